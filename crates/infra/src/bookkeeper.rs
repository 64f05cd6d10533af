//! Ledger service: applies an operation, then brings every file in line with it.
//!
//! Files are touched only after the ledger accepted the operation, in this order:
//! invoice log(s), distribution report (sales only), persisted state. A crash in
//! between can leave them out of step; there is no recovery pass.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use stockbook_core::{AggregateRoot, DomainError};
use stockbook_ledger::{Expense, Ledger, Product, Sale};

use crate::config::StorageConfig;
use crate::error::{InfraError, InfraResult};
use crate::invoice;
use crate::journal::{InvoiceKind, InvoiceLog};
use crate::report;
use crate::store::{JsonStateStore, StateStore};

#[derive(Debug)]
pub struct Bookkeeper<S = JsonStateStore> {
    ledger: Ledger,
    store: S,
    log: InvoiceLog,
    report_path: PathBuf,
}

impl Bookkeeper<JsonStateStore> {
    /// Create the data directories and load any saved state from them.
    pub fn open(config: &StorageConfig) -> InfraResult<Self> {
        config.ensure_dirs()?;
        Self::with_store(config, JsonStateStore::new(config))
    }
}

impl<S: StateStore> Bookkeeper<S> {
    pub fn with_store(config: &StorageConfig, store: S) -> InfraResult<Self> {
        let ledger = store.load_ledger()?;
        tracing::info!(
            data_dir = %config.data_dir().display(),
            products = ledger.products().count(),
            expenses = ledger.expenses().len(),
            "ledger loaded"
        );

        Ok(Self {
            ledger,
            store,
            log: InvoiceLog::new(config),
            report_path: config.distribution_report(),
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn add_stock(
        &mut self,
        name: &str,
        price: f64,
        quantity: i64,
        discount: f64,
    ) -> InfraResult<Product> {
        let now = Utc::now();
        let product = self
            .ledger
            .add_stock_at(name, price, quantity, discount, now)
            .inspect_err(|e| rejected("add_stock", e))?;

        self.log
            .append(InvoiceKind::Incoming, &invoice::incoming(&product, quantity, now))?;
        self.save()?;

        tracing::info!(
            product = product.name(),
            quantity,
            on_hand = product.quantity(),
            "stock received"
        );
        Ok(product)
    }

    pub fn sell(
        &mut self,
        name: &str,
        quantity: i64,
        city: &str,
        location: &str,
    ) -> InfraResult<Sale> {
        let sale = self
            .ledger
            .sell_at(name, quantity, city, location, Utc::now())
            .inspect_err(|e| rejected("sell", e))?;

        // The ledger just accepted the sale, so the product is present.
        let product = self
            .ledger
            .product(name)
            .ok_or_else(|| DomainError::not_found(format!("product '{}'", name.trim())))?;

        self.log
            .append(InvoiceKind::Sale, &invoice::sale(product, &sale))?;
        self.log
            .append(InvoiceKind::CitySale, &invoice::city_line(product.name(), &sale))?;
        tracing::info!(
            product = product.name(),
            quantity = sale.quantity(),
            city = sale.city(),
            location = sale.location(),
            total = sale.total(),
            "sale recorded"
        );

        self.refresh_report()?;
        self.save()?;
        Ok(sale)
    }

    /// Record an expense, optionally attributed to `(city, location)`.
    pub fn record_expense(
        &mut self,
        description: &str,
        amount: f64,
        site: Option<(&str, &str)>,
    ) -> InfraResult<Expense> {
        let expense = self
            .ledger
            .record_expense_at(description, amount, site, Utc::now())
            .inspect_err(|e| rejected("record_expense", e))?;

        self.log
            .append(InvoiceKind::Expense, &invoice::expense(&expense))?;
        self.save()?;

        tracing::info!(
            description = expense.description(),
            amount = expense.amount(),
            "expense recorded"
        );
        Ok(expense)
    }

    pub fn set_price(&mut self, name: &str, price: f64) -> InfraResult<Product> {
        let product = self
            .ledger
            .set_price(name, price)
            .inspect_err(|e| rejected("set_price", e))?;

        self.save()?;
        tracing::info!(product = product.name(), price, "price changed");
        Ok(product)
    }

    /// Rewrite the distribution report from the current ledger.
    pub fn refresh_report(&self) -> InfraResult<()> {
        report::write(&self.report_path, &self.ledger)?;
        tracing::debug!(path = %self.report_path.display(), "distribution report refreshed");
        Ok(())
    }

    pub fn invoices(&self, kind: InvoiceKind) -> InfraResult<String> {
        self.log.read(kind)
    }

    /// Persist the full ledger state.
    pub fn save(&self) -> InfraResult<()> {
        self.store.save_ledger(&self.ledger)?;
        tracing::debug!(version = self.ledger.version(), "ledger saved");
        Ok(())
    }
}

fn rejected(operation: &str, error: &DomainError) {
    tracing::warn!(operation, %error, "operation rejected");
}

/// A bookkeeper behind one lock, for callers on several threads.
///
/// Every call holds the lock for the whole operation, file writes included.
#[derive(Debug)]
pub struct SharedBookkeeper<S = JsonStateStore> {
    inner: Arc<Mutex<Bookkeeper<S>>>,
}

impl<S> Clone for SharedBookkeeper<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: StateStore> SharedBookkeeper<S> {
    pub fn new(bookkeeper: Bookkeeper<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(bookkeeper)),
        }
    }

    /// Run `f` with exclusive access to the bookkeeper.
    pub fn with<R>(&self, f: impl FnOnce(&mut Bookkeeper<S>) -> InfraResult<R>) -> InfraResult<R> {
        let mut guard = self.inner.lock().map_err(|_| InfraError::Poisoned)?;
        f(&mut guard)
    }
}

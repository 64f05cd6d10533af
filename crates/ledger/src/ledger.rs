use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::{DateTime, Utc};

use stockbook_core::{AggregateRoot, Discount, DomainError, DomainResult, Entity, ensure_amount};

use crate::expense::Expense;
use crate::product::Product;
use crate::sale::{Destination, Sale};
use crate::summary::{DistributionSummary, InventoryLine};

/// Aggregate root: Ledger.
///
/// Owns every product (keyed by name) and the expense log. State changes only
/// through the operations below; a rejected operation leaves the ledger exactly
/// as it was.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    products: BTreeMap<String, Product>,
    expenses: Vec<Expense>,
    version: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate from persisted state.
    ///
    /// Map keys are ignored in favour of each product's own name. A product that
    /// violates the stock invariants, or repeats another product's name, is rejected.
    pub fn from_parts(
        products: impl IntoIterator<Item = Product>,
        expenses: Vec<Expense>,
    ) -> DomainResult<Self> {
        let mut map: BTreeMap<String, Product> = BTreeMap::new();
        for product in products {
            product.check_invariants()?;
            if map.contains_key(product.id()) {
                return Err(DomainError::invalid(format!(
                    "product '{}' is stored more than once",
                    product.id()
                )));
            }
            map.insert(product.id().to_string(), product);
        }
        Ok(Self {
            products: map,
            expenses,
            version: 0,
        })
    }

    pub fn product(&self, name: &str) -> Option<&Product> {
        self.products.get(name.trim())
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Receive stock now. See [`Ledger::add_stock_at`].
    pub fn add_stock(
        &mut self,
        name: &str,
        price: f64,
        quantity: i64,
        discount: f64,
    ) -> DomainResult<Product> {
        self.add_stock_at(name, price, quantity, discount, Utc::now())
    }

    /// Receive `quantity` units of `name`.
    ///
    /// An existing product only gains quantity: its price and discount stay as
    /// they were. A new product is created with today's acquisition date.
    pub fn add_stock_at(
        &mut self,
        name: &str,
        price: f64,
        quantity: i64,
        discount: f64,
        at: DateTime<Utc>,
    ) -> DomainResult<Product> {
        let name = required("product name", name)?;
        let price = ensure_amount("price", price)?;
        let discount = Discount::new(discount)?;
        if quantity < 0 {
            return Err(DomainError::invalid(format!(
                "quantity cannot be negative, got {quantity}"
            )));
        }

        let product = match self.products.entry(name.to_string()) {
            Entry::Occupied(mut slot) => {
                slot.get_mut().receive(quantity)?;
                slot.get().clone()
            }
            Entry::Vacant(slot) => {
                let product =
                    Product::new(name.to_string(), price, quantity, discount, at.date_naive())?;
                slot.insert(product).clone()
            }
        };

        self.version += 1;
        Ok(product)
    }

    /// Sell now. See [`Ledger::sell_at`].
    pub fn sell(
        &mut self,
        name: &str,
        quantity: i64,
        city: &str,
        location: &str,
    ) -> DomainResult<Sale> {
        self.sell_at(name, quantity, city, location, Utc::now())
    }

    /// Sell `quantity` units of `name` to `(city, location)`.
    ///
    /// The sale total uses the product's current price and discount.
    pub fn sell_at(
        &mut self,
        name: &str,
        quantity: i64,
        city: &str,
        location: &str,
        at: DateTime<Utc>,
    ) -> DomainResult<Sale> {
        let product = self
            .products
            .get_mut(name.trim())
            .ok_or_else(|| DomainError::not_found(format!("product '{}'", name.trim())))?;

        let sale = product.sell(
            quantity,
            Destination::new(city.trim(), location.trim()),
            at,
        )?;

        self.version += 1;
        Ok(sale)
    }

    /// Change the unit price of an existing product.
    pub fn set_price(&mut self, name: &str, price: f64) -> DomainResult<Product> {
        let price = ensure_amount("price", price)?;
        let product = self
            .products
            .get_mut(name.trim())
            .ok_or_else(|| DomainError::not_found(format!("product '{}'", name.trim())))?;

        product.reprice(price)?;
        let product = product.clone();

        self.version += 1;
        Ok(product)
    }

    /// Record an expense now, with no site attached.
    pub fn record_expense(&mut self, description: &str, amount: f64) -> DomainResult<Expense> {
        self.record_expense_at(description, amount, None, Utc::now())
    }

    /// Record an expense now, attributed to a city and location.
    pub fn record_expense_at_site(
        &mut self,
        description: &str,
        amount: f64,
        city: &str,
        location: &str,
    ) -> DomainResult<Expense> {
        self.record_expense_at(description, amount, Some((city, location)), Utc::now())
    }

    pub fn record_expense_at(
        &mut self,
        description: &str,
        amount: f64,
        site: Option<(&str, &str)>,
        at: DateTime<Utc>,
    ) -> DomainResult<Expense> {
        let amount = ensure_amount("amount", amount)?;
        let (city, location) = match site {
            Some((city, location)) => (non_blank(city), non_blank(location)),
            None => (None, None),
        };

        let expense = Expense::new(description.trim().to_string(), amount, at, city, location);
        self.expenses.push(expense.clone());

        self.version += 1;
        Ok(expense)
    }

    /// Inventory view, ordered by product name.
    pub fn inventory_snapshot(&self) -> Vec<InventoryLine> {
        self.products.values().map(InventoryLine::from).collect()
    }

    /// Sold quantities grouped by product, city and location.
    pub fn distribution_summary(&self) -> DistributionSummary {
        DistributionSummary::from_products(self.products.values())
    }

    /// Units on hand across all products, saturating at `i64::MAX`.
    pub fn total_stock(&self) -> i64 {
        self.products
            .values()
            .map(Product::quantity)
            .fold(0, i64::saturating_add)
    }

    /// Sum of every recorded sale total.
    pub fn total_revenue(&self) -> f64 {
        self.products
            .values()
            .flat_map(Product::sales)
            .map(Sale::total)
            .sum()
    }

    pub fn total_expenses(&self) -> f64 {
        self.expenses.iter().map(Expense::amount).sum()
    }
}

impl AggregateRoot for Ledger {
    fn version(&self) -> u64 {
        self.version
    }
}

fn required<'a>(field: &str, value: &'a str) -> DomainResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid(format!("{field} cannot be empty")));
    }
    Ok(trimmed)
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

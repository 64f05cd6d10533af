//! Persisted ledger state.
//!
//! The inventory is stored as one JSON object mapping product name to the full
//! product record (sale history included). Expenses live in their own JSON array.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use stockbook_ledger::{Expense, Ledger, Product};

use crate::config::StorageConfig;
use crate::error::{InfraError, InfraResult};
use crate::fs;

/// Load/save abstraction for ledger state.
pub trait StateStore: Send + Sync {
    fn load_products(&self) -> InfraResult<Vec<Product>>;
    fn save_products(&self, products: &BTreeMap<String, Product>) -> InfraResult<()>;
    fn load_expenses(&self) -> InfraResult<Vec<Expense>>;
    fn save_expenses(&self, expenses: &[Expense]) -> InfraResult<()>;

    /// Rebuild a ledger from whatever was saved (empty if nothing was).
    fn load_ledger(&self) -> InfraResult<Ledger> {
        let ledger = Ledger::from_parts(self.load_products()?, self.load_expenses()?)?;
        Ok(ledger)
    }

    /// Rewrite both products and expenses from the ledger.
    fn save_ledger(&self, ledger: &Ledger) -> InfraResult<()> {
        let products = ledger
            .products()
            .map(|p| (p.name().to_string(), p.clone()))
            .collect();
        self.save_products(&products)?;
        self.save_expenses(ledger.expenses())
    }
}

impl<S> StateStore for Arc<S>
where
    S: StateStore + ?Sized,
{
    fn load_products(&self) -> InfraResult<Vec<Product>> {
        (**self).load_products()
    }

    fn save_products(&self, products: &BTreeMap<String, Product>) -> InfraResult<()> {
        (**self).save_products(products)
    }

    fn load_expenses(&self) -> InfraResult<Vec<Expense>> {
        (**self).load_expenses()
    }

    fn save_expenses(&self, expenses: &[Expense]) -> InfraResult<()> {
        (**self).save_expenses(expenses)
    }
}

/// JSON files on disk.
#[derive(Debug, Clone)]
pub struct JsonStateStore {
    inventory_file: PathBuf,
    expenses_file: PathBuf,
}

impl JsonStateStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            inventory_file: config.inventory_file(),
            expenses_file: config.expenses_file(),
        }
    }

    fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> InfraResult<Option<T>> {
        match fs::read_optional(path)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| InfraError::json(path, e)),
            None => Ok(None),
        }
    }

    fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> InfraResult<()> {
        let raw = serde_json::to_vec_pretty(value).map_err(|e| InfraError::json(path, e))?;
        fs::atomic_write(path, &raw)?;
        tracing::debug!(path = %path.display(), bytes = raw.len(), "state written");
        Ok(())
    }
}

impl StateStore for JsonStateStore {
    fn load_products(&self) -> InfraResult<Vec<Product>> {
        let map: Option<BTreeMap<String, Product>> = Self::read_json(&self.inventory_file)?;
        Ok(map.map(|m| m.into_values().collect()).unwrap_or_default())
    }

    fn save_products(&self, products: &BTreeMap<String, Product>) -> InfraResult<()> {
        Self::write_json(&self.inventory_file, products)
    }

    fn load_expenses(&self) -> InfraResult<Vec<Expense>> {
        Ok(Self::read_json(&self.expenses_file)?.unwrap_or_default())
    }

    fn save_expenses(&self, expenses: &[Expense]) -> InfraResult<()> {
        Self::write_json(&self.expenses_file, expenses)
    }
}

/// In-memory store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    products: RwLock<BTreeMap<String, Product>>,
    expenses: RwLock<Vec<Expense>>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for InMemoryStateStore {
    fn load_products(&self) -> InfraResult<Vec<Product>> {
        let map = self.products.read().map_err(|_| InfraError::Poisoned)?;
        Ok(map.values().cloned().collect())
    }

    fn save_products(&self, products: &BTreeMap<String, Product>) -> InfraResult<()> {
        let mut map = self.products.write().map_err(|_| InfraError::Poisoned)?;
        *map = products.clone();
        Ok(())
    }

    fn load_expenses(&self) -> InfraResult<Vec<Expense>> {
        let list = self.expenses.read().map_err(|_| InfraError::Poisoned)?;
        Ok(list.clone())
    }

    fn save_expenses(&self, expenses: &[Expense]) -> InfraResult<()> {
        let mut list = self.expenses.write().map_err(|_| InfraError::Poisoned)?;
        *list = expenses.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.add_stock("Widget", 10.0, 5, 10.0).unwrap();
        ledger.add_stock("Gadget", 3.25, 40, 0.0).unwrap();
        ledger.sell("Widget", 2, "Lima", "StoreA").unwrap();
        ledger.sell("Gadget", 7, "Cusco", "Market").unwrap();
        ledger.record_expense("rent", 120.5).unwrap();
        ledger
    }

    fn assert_equivalent(a: &Ledger, b: &Ledger) {
        let a_products: Vec<_> = a.products().collect();
        let b_products: Vec<_> = b.products().collect();
        assert_eq!(a_products, b_products);
        assert_eq!(a.expenses(), b.expenses());
        assert_eq!(a.distribution_summary(), b.distribution_summary());
    }

    #[test]
    fn json_round_trip_reproduces_ledger() {
        let dir = tempdir().unwrap();
        let store = JsonStateStore::new(&StorageConfig::new(dir.path()));
        let ledger = sample_ledger();

        store.save_ledger(&ledger).unwrap();
        let loaded = store.load_ledger().unwrap();

        assert_equivalent(&ledger, &loaded);
    }

    #[test]
    fn inventory_file_is_a_name_keyed_object() {
        let dir = tempdir().unwrap();
        let config = StorageConfig::new(dir.path());
        let store = JsonStateStore::new(&config);
        store.save_ledger(&sample_ledger()).unwrap();

        let raw = std::fs::read_to_string(config.inventory_file()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let widget = &value["Widget"];
        assert_eq!(widget["quantity"], 3);
        assert_eq!(widget["sold"], 2);
        assert_eq!(widget["sales"][0]["city"], "Lima");
    }

    #[test]
    fn saved_state_reloads_after_an_out_of_range_receipt() {
        let dir = tempdir().unwrap();
        let store = JsonStateStore::new(&StorageConfig::new(dir.path()));
        let mut ledger = sample_ledger();

        assert!(ledger.add_stock("Bulk", 1e308, 10, 0.0).is_err());
        store.save_ledger(&ledger).unwrap();
        let loaded = store.load_ledger().unwrap();

        assert!(loaded.product("Bulk").is_none());
        assert_equivalent(&ledger, &loaded);
    }

    #[test]
    fn missing_files_load_as_empty_ledger() {
        let dir = tempdir().unwrap();
        let store = JsonStateStore::new(&StorageConfig::new(dir.path()));
        assert_eq!(store.load_ledger().unwrap(), Ledger::new());
    }

    #[test]
    fn corrupt_inventory_is_reported_with_its_path() {
        let dir = tempdir().unwrap();
        let config = StorageConfig::new(dir.path());
        std::fs::write(config.inventory_file(), "{ not json").unwrap();

        match JsonStateStore::new(&config).load_ledger() {
            Err(InfraError::Json { path, .. }) => assert_eq!(path, config.inventory_file()),
            other => panic!("expected Json error, got {other:?}"),
        }
    }

    #[test]
    fn in_memory_store_round_trips() {
        let store = InMemoryStateStore::new();
        let ledger = sample_ledger();
        store.save_ledger(&ledger).unwrap();
        assert_equivalent(&ledger, &store.load_ledger().unwrap());
    }
}

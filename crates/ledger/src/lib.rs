//! Ledger domain module.
//!
//! This crate contains the bookkeeping rules for stock, sales and expenses,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod expense;
pub mod ledger;
pub mod product;
pub mod sale;
pub mod summary;

pub use expense::Expense;
pub use ledger::Ledger;
pub use product::Product;
pub use sale::{Destination, Sale};
pub use summary::{DistributionSummary, InventoryLine};

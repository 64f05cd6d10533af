//! Infrastructure layer: configuration, files on disk, and the bookkeeping
//! service that keeps them in step with the ledger.

pub mod bookkeeper;
pub mod config;
pub mod error;
pub mod fs;
pub mod invoice;
pub mod journal;
pub mod report;
pub mod staff_store;
pub mod store;

pub use bookkeeper::{Bookkeeper, SharedBookkeeper};
pub use config::StorageConfig;
pub use error::{InfraError, InfraResult};
pub use journal::{InvoiceKind, InvoiceLog};
pub use staff_store::StaffStore;
pub use store::{InMemoryStateStore, JsonStateStore, StateStore};

//! Append-only invoice logs.

use std::path::{Path, PathBuf};

use crate::config::StorageConfig;
use crate::error::InfraResult;
use crate::fs;

/// Which log stream an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvoiceKind {
    Incoming,
    Sale,
    Expense,
    /// One line per sale with its city and location.
    CitySale,
}

impl InvoiceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceKind::Incoming => "incoming",
            InvoiceKind::Sale => "sale",
            InvoiceKind::Expense => "expense",
            InvoiceKind::CitySale => "city_sale",
        }
    }
}

impl core::fmt::Display for InvoiceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct InvoiceLog {
    incoming: PathBuf,
    sale: PathBuf,
    expense: PathBuf,
    city_sale: PathBuf,
}

impl InvoiceLog {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            incoming: config.incoming_log(),
            sale: config.sales_log(),
            expense: config.expenses_log(),
            city_sale: config.city_sales_log(),
        }
    }

    pub fn path(&self, kind: InvoiceKind) -> &Path {
        match kind {
            InvoiceKind::Incoming => &self.incoming,
            InvoiceKind::Sale => &self.sale,
            InvoiceKind::Expense => &self.expense,
            InvoiceKind::CitySale => &self.city_sale,
        }
    }

    pub fn append(&self, kind: InvoiceKind, entry: &str) -> InfraResult<()> {
        fs::append(self.path(kind), entry)
    }

    /// Whole stream as written so far; empty if nothing was logged yet.
    pub fn read(&self, kind: InvoiceKind) -> InfraResult<String> {
        Ok(fs::read_optional(self.path(kind))?.unwrap_or_default())
    }
}

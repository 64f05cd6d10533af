//! Where stockbook keeps its files.

use std::path::{Path, PathBuf};

use crate::error::{InfraError, InfraResult};

pub const DATA_DIR_ENV: &str = "STOCKBOOK_DATA_DIR";
pub const DEFAULT_DATA_DIR: &str = "./invoices";

/// Every path stockbook reads or writes, derived from one data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Read the data directory from `STOCKBOOK_DATA_DIR`, falling back to `./invoices`.
    pub fn from_env() -> Self {
        let data_dir = std::env::var(DATA_DIR_ENV).unwrap_or_else(|_| {
            tracing::debug!("{DATA_DIR_ENV} not set; using {DEFAULT_DATA_DIR}");
            DEFAULT_DATA_DIR.to_string()
        });
        Self::new(data_dir)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn inventory_file(&self) -> PathBuf {
        self.data_dir.join("inventory.json")
    }

    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir.join("expenses.json")
    }

    pub fn employees_file(&self) -> PathBuf {
        self.data_dir.join("employees.json")
    }

    pub fn incoming_log(&self) -> PathBuf {
        self.data_dir.join("incoming").join("incoming_invoices.txt")
    }

    pub fn sales_log(&self) -> PathBuf {
        self.data_dir.join("sales").join("sale_invoices.txt")
    }

    pub fn expenses_log(&self) -> PathBuf {
        self.data_dir.join("expenses").join("expense_invoices.txt")
    }

    pub fn city_sales_log(&self) -> PathBuf {
        self.data_dir.join("city_sales").join("city_sales.txt")
    }

    pub fn distribution_report(&self) -> PathBuf {
        self.data_dir.join("distribution").join("distribution_summary.txt")
    }

    pub fn employees_dir(&self) -> PathBuf {
        self.data_dir.join("employees")
    }

    /// Directory holding one employee's info, shift log and report.
    ///
    /// Always a direct child of [`StorageConfig::employees_dir`], whatever the names contain.
    pub fn employee_dir(&self, first_name: &str, last_name: &str) -> PathBuf {
        self.employees_dir()
            .join(path_component(&format!("{first_name}_{last_name}")))
    }

    /// Create every directory the other paths live in.
    pub fn ensure_dirs(&self) -> InfraResult<()> {
        let files = [
            self.inventory_file(),
            self.incoming_log(),
            self.sales_log(),
            self.expenses_log(),
            self.city_sales_log(),
            self.distribution_report(),
        ];
        let dirs = files
            .iter()
            .filter_map(|f| f.parent().map(Path::to_path_buf))
            .chain(std::iter::once(self.employees_dir()));

        for dir in dirs {
            std::fs::create_dir_all(&dir).map_err(|e| InfraError::io(&dir, e))?;
        }
        Ok(())
    }
}

/// Turn operator input into a single relative path component.
fn path_component(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c => c,
        })
        .collect();
    if cleaned.chars().all(|c| c == '.') {
        cleaned.replace('.', "_")
    } else {
        cleaned
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

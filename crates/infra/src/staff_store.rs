//! Employee roster on disk.
//!
//! `employees.json` holds the whole roster. Each employee also gets a directory
//! with an info file, an append-only shift log, and the latest report.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use stockbook_staff::{Employee, NewEmployee, Roster, Shift};

use crate::config::StorageConfig;
use crate::error::{InfraError, InfraResult};
use crate::fs;

const TIMESTAMP: &str = "%d/%m/%Y %H:%M:%S";

#[derive(Debug)]
pub struct StaffStore {
    config: StorageConfig,
    roster: Roster,
}

impl StaffStore {
    pub fn open(config: &StorageConfig) -> InfraResult<Self> {
        let path = config.employees_file();
        let employees: Vec<Employee> = match fs::read_optional(&path)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| InfraError::json(&path, e))?,
            None => Vec::new(),
        };
        tracing::info!(employees = employees.len(), "roster loaded");

        Ok(Self {
            config: config.clone(),
            roster: Roster::from_employees(employees),
        })
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn register(&mut self, data: NewEmployee) -> InfraResult<Employee> {
        let employee = self.roster.register(data, Utc::now())?.clone();

        let info = format!(
            "First name: {}\nLast name: {}\nAge: {}\nPhone: {}\nEmail: {}\nAddress: {}\n",
            employee.first_name(),
            employee.last_name(),
            employee.age().map(|a| a.to_string()).unwrap_or_default(),
            employee.phone(),
            employee.email(),
            employee.address(),
        );
        fs::atomic_write(&self.dir_of(&employee).join("info.txt"), info.as_bytes())?;
        self.save()?;

        tracing::info!(employee = employee.full_name(), "employee registered");
        Ok(employee)
    }

    pub fn start_shift(&mut self, first_name: &str) -> InfraResult<DateTime<Utc>> {
        let started_at = self.roster.start_shift(first_name, Utc::now())?.started_at;
        self.log_shift(first_name, &format!("Shift start: {}\n", started_at.format(TIMESTAMP)))?;
        self.save()?;
        Ok(started_at)
    }

    pub fn end_shift(&mut self, first_name: &str) -> InfraResult<Shift> {
        let shift = self.roster.end_shift(first_name, Utc::now())?;
        if let Some(end) = shift.ended_at {
            self.log_shift(first_name, &format!("Shift end: {}\n", end.format(TIMESTAMP)))?;
        }
        self.save()?;
        Ok(shift)
    }

    /// Render an employee's report and keep a copy in their directory.
    pub fn report(&self, first_name: &str) -> InfraResult<String> {
        let report = self.roster.report(first_name)?;
        if let Some(employee) = self.roster.find(first_name) {
            fs::atomic_write(&self.dir_of(employee).join("report.txt"), report.as_bytes())?;
        }
        Ok(report)
    }

    fn log_shift(&self, first_name: &str, line: &str) -> InfraResult<()> {
        match self.roster.find(first_name) {
            Some(employee) => fs::append(&self.dir_of(employee).join("shifts.txt"), line),
            None => Ok(()),
        }
    }

    fn dir_of(&self, employee: &Employee) -> PathBuf {
        self.config
            .employee_dir(employee.first_name(), employee.last_name())
    }

    fn save(&self) -> InfraResult<()> {
        let path = self.config.employees_file();
        let raw = serde_json::to_vec_pretty(self.roster.employees())
            .map_err(|e| InfraError::json(&path, e))?;
        fs::atomic_write(&path, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockbook_core::DomainError;
    use tempfile::tempdir;

    fn luis() -> NewEmployee {
        NewEmployee {
            first_name: "Luis".to_string(),
            last_name: "Mamani".to_string(),
            age: Some(24),
            ..NewEmployee::default()
        }
    }

    #[test]
    fn register_writes_info_and_roster() {
        let dir = tempdir().unwrap();
        let config = StorageConfig::new(dir.path());
        let mut staff = StaffStore::open(&config).unwrap();

        staff.register(luis()).unwrap();

        let info = config.employee_dir("Luis", "Mamani").join("info.txt");
        assert!(std::fs::read_to_string(info).unwrap().contains("Age: 24"));

        let reopened = StaffStore::open(&config).unwrap();
        assert!(reopened.roster().find("luis").is_some());
    }

    #[test]
    fn shifts_are_logged_per_employee() {
        let dir = tempdir().unwrap();
        let config = StorageConfig::new(dir.path());
        let mut staff = StaffStore::open(&config).unwrap();
        staff.register(luis()).unwrap();

        staff.start_shift("Luis").unwrap();
        staff.end_shift("Luis").unwrap();

        let log = config.employee_dir("Luis", "Mamani").join("shifts.txt");
        let text = std::fs::read_to_string(log).unwrap();
        assert!(text.contains("Shift start:"));
        assert!(text.contains("Shift end:"));

        let report = staff.report("luis").unwrap();
        assert!(report.contains("Shift 1:"));
        assert!(config.employee_dir("Luis", "Mamani").join("report.txt").exists());
    }

    #[test]
    fn unknown_employee_is_not_found() {
        let dir = tempdir().unwrap();
        let mut staff = StaffStore::open(&StorageConfig::new(dir.path())).unwrap();
        let err = staff.start_shift("nobody").unwrap_err();
        assert!(matches!(err.as_domain(), Some(DomainError::NotFound(_))));
    }
}

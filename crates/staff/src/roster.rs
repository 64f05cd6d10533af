use chrono::{DateTime, Utc};

use stockbook_core::{DomainError, DomainResult};

use crate::employee::{Employee, NewEmployee, Shift};

/// Registered employees, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    employees: Vec<Employee>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_employees(employees: Vec<Employee>) -> Self {
        Self { employees }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn register(&mut self, data: NewEmployee, at: DateTime<Utc>) -> DomainResult<&Employee> {
        let employee = Employee::new(data, at.date_naive())?;
        if self
            .employees
            .iter()
            .any(|e| e.full_name().eq_ignore_ascii_case(employee.full_name()))
        {
            return Err(DomainError::conflict(format!(
                "employee {} is already registered",
                employee.full_name()
            )));
        }
        self.employees.push(employee);
        Ok(&self.employees[self.employees.len() - 1])
    }

    /// Look up by first name, ignoring case and surrounding whitespace.
    pub fn find(&self, first_name: &str) -> Option<&Employee> {
        let wanted = first_name.trim().to_lowercase();
        self.employees
            .iter()
            .find(|e| e.first_name().to_lowercase() == wanted)
    }

    pub fn start_shift(&mut self, first_name: &str, at: DateTime<Utc>) -> DomainResult<&Shift> {
        self.find_mut(first_name)?.start_shift(at)
    }

    pub fn end_shift(&mut self, first_name: &str, at: DateTime<Utc>) -> DomainResult<Shift> {
        self.find_mut(first_name)?.end_shift(at)
    }

    pub fn report(&self, first_name: &str) -> DomainResult<String> {
        self.find(first_name)
            .map(Employee::report)
            .ok_or_else(|| DomainError::not_found(format!("employee '{}'", first_name.trim())))
    }

    fn find_mut(&mut self, first_name: &str) -> DomainResult<&mut Employee> {
        let wanted = first_name.trim().to_lowercase();
        self.employees
            .iter_mut()
            .find(|e| e.first_name().to_lowercase() == wanted)
            .ok_or_else(|| DomainError::not_found(format!("employee '{}'", first_name.trim())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap()
    }

    fn ana() -> NewEmployee {
        NewEmployee {
            first_name: "Ana".to_string(),
            last_name: "Quispe".to_string(),
            age: Some(31),
            phone: "555-0101".to_string(),
            email: "ana@example.com".to_string(),
            address: "Av. Sol 12".to_string(),
        }
    }

    #[test]
    fn register_then_find_case_insensitively() {
        let mut roster = Roster::new();
        roster.register(ana(), test_time()).unwrap();

        let found = roster.find("  ANA ").unwrap();
        assert_eq!(found.full_name(), "Ana Quispe");
        assert!(roster.find("Luis").is_none());
    }

    #[test]
    fn register_rejects_blank_names_and_duplicates() {
        let mut roster = Roster::new();
        let blank = NewEmployee {
            first_name: " ".to_string(),
            ..ana()
        };
        assert!(matches!(
            roster.register(blank, test_time()),
            Err(DomainError::InvalidInput(_))
        ));

        roster.register(ana(), test_time()).unwrap();
        assert!(matches!(
            roster.register(ana(), test_time()),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn shift_lifecycle_accumulates_worked_time() {
        let mut roster = Roster::new();
        roster.register(ana(), test_time()).unwrap();

        roster.start_shift("ana", test_time()).unwrap();
        assert!(matches!(
            roster.start_shift("ana", test_time()),
            Err(DomainError::Conflict(_))
        ));

        let shift = roster
            .end_shift("ana", test_time() + Duration::hours(8))
            .unwrap();
        assert_eq!(shift.duration(), Some(Duration::hours(8)));
        assert_eq!(roster.find("ana").unwrap().worked(), Duration::hours(8));
    }

    #[test]
    fn ending_without_open_shift_is_a_conflict() {
        let mut roster = Roster::new();
        roster.register(ana(), test_time()).unwrap();
        assert!(matches!(
            roster.end_shift("ana", test_time()),
            Err(DomainError::Conflict(_))
        ));
        assert!(matches!(
            roster.end_shift("luis", test_time()),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn report_marks_open_shift_in_progress() {
        let mut roster = Roster::new();
        roster.register(ana(), test_time()).unwrap();
        roster.start_shift("ana", test_time()).unwrap();

        let report = roster.report("ana").unwrap();
        assert!(report.contains("EMPLOYEE REPORT: Ana Quispe"));
        assert!(report.contains("Shift 1: start 06/05/2024 09:00:00 | end in progress"));
    }

    #[test]
    fn employees_survive_json() {
        let mut roster = Roster::new();
        roster.register(ana(), test_time()).unwrap();
        roster.start_shift("ana", test_time()).unwrap();

        let json = serde_json::to_string(roster.employees()).unwrap();
        let back: Vec<Employee> = serde_json::from_str(&json).unwrap();
        assert_eq!(Roster::from_employees(back), roster);
    }
}

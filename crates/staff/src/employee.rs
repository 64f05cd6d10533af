use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use stockbook_core::{DomainError, DomainResult, Entity};

/// Registration data for a new employee.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub age: Option<u32>,
    pub phone: String,
    pub email: String,
    pub address: String,
}

/// One work interval. `ended_at` is `None` while the shift is in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl Shift {
    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }

    /// Length of a closed shift.
    pub fn duration(&self) -> Option<Duration> {
        self.ended_at.map(|end| end - self.started_at)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    full_name: String,
    first_name: String,
    last_name: String,
    age: Option<u32>,
    phone: String,
    email: String,
    address: String,
    hired_on: NaiveDate,
    #[serde(default)]
    shifts: Vec<Shift>,
}

impl Employee {
    pub(crate) fn new(data: NewEmployee, hired_on: NaiveDate) -> DomainResult<Self> {
        let first_name = data.first_name.trim().to_string();
        let last_name = data.last_name.trim().to_string();
        if first_name.is_empty() || last_name.is_empty() {
            return Err(DomainError::invalid("first and last name are required"));
        }

        Ok(Self {
            full_name: format!("{first_name} {last_name}"),
            first_name,
            last_name,
            age: data.age,
            phone: data.phone.trim().to_string(),
            email: data.email.trim().to_string(),
            address: data.address.trim().to_string(),
            hired_on,
            shifts: Vec::new(),
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn age(&self) -> Option<u32> {
        self.age
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn hired_on(&self) -> NaiveDate {
        self.hired_on
    }

    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub fn open_shift(&self) -> Option<&Shift> {
        self.shifts.last().filter(|s| s.is_open())
    }

    /// Sum of all closed shifts.
    pub fn worked(&self) -> Duration {
        self.shifts
            .iter()
            .filter_map(Shift::duration)
            .fold(Duration::zero(), |acc, d| acc + d)
    }

    pub(crate) fn start_shift(&mut self, at: DateTime<Utc>) -> DomainResult<&Shift> {
        if self.open_shift().is_some() {
            return Err(DomainError::conflict(format!(
                "{} already has a shift in progress",
                self.full_name
            )));
        }
        self.shifts.push(Shift {
            started_at: at,
            ended_at: None,
        });
        Ok(&self.shifts[self.shifts.len() - 1])
    }

    pub(crate) fn end_shift(&mut self, at: DateTime<Utc>) -> DomainResult<Shift> {
        let name = self.full_name.clone();
        let shift = self
            .shifts
            .last_mut()
            .filter(|s| s.is_open())
            .ok_or_else(|| DomainError::conflict(format!("{name} has no shift in progress")))?;

        if at < shift.started_at {
            return Err(DomainError::invalid("shift cannot end before it started"));
        }
        shift.ended_at = Some(at);
        Ok(shift.clone())
    }

    /// Human-readable report: contact details plus every shift.
    pub fn report(&self) -> String {
        let rule = "=".repeat(50);
        let mut out = format!(
            "\n{rule}\nEMPLOYEE REPORT: {}\n{rule}\n\
             Age: {}\nPhone: {}\nEmail: {}\nAddress: {}\nHired on: {}\n",
            self.full_name,
            self.age.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string()),
            self.phone,
            self.email,
            self.address,
            self.hired_on.format("%d/%m/%Y"),
        );

        for (idx, shift) in self.shifts.iter().enumerate() {
            let end = shift
                .ended_at
                .map(|t| t.format("%d/%m/%Y %H:%M:%S").to_string())
                .unwrap_or_else(|| "in progress".to_string());
            out.push_str(&format!(
                "Shift {}: start {} | end {}\n",
                idx + 1,
                shift.started_at.format("%d/%m/%Y %H:%M:%S"),
                end
            ));
        }

        let worked = self.worked();
        out.push_str(&format!(
            "Worked: {}h {:02}m\n",
            worked.num_hours(),
            worked.num_minutes() % 60
        ));
        out
    }
}

impl Entity for Employee {
    type Id = str;

    fn id(&self) -> &Self::Id {
        &self.full_name
    }
}

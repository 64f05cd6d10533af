use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A monetary outlay (immutable fact, independent of products).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    description: String,
    amount: f64,
    recorded_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,
}

impl Expense {
    pub(crate) fn new(
        description: String,
        amount: f64,
        recorded_at: DateTime<Utc>,
        city: Option<String>,
        location: Option<String>,
    ) -> Self {
        Self {
            description,
            amount,
            recorded_at,
            city,
            location,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

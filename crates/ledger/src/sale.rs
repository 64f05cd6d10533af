use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a sale went: destination city plus the selling location.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Destination {
    pub city: String,
    pub location: String,
}

impl Destination {
    pub fn new(city: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            location: location.into(),
        }
    }
}

impl core::fmt::Display for Destination {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} / {}", self.city, self.location)
    }
}

/// One recorded sale of a product (immutable fact).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    quantity: i64,
    city: String,
    location: String,
    sold_at: DateTime<Utc>,
    /// Amount charged, computed from the price and discount in force at sale time.
    #[serde(default)]
    total: f64,
}

impl Sale {
    pub(crate) fn new(
        quantity: i64,
        destination: Destination,
        sold_at: DateTime<Utc>,
        total: f64,
    ) -> Self {
        Self {
            quantity,
            city: destination.city,
            location: destination.location,
            sold_at,
            total,
        }
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn destination(&self) -> Destination {
        Destination::new(self.city.clone(), self.location.clone())
    }

    pub fn sold_at(&self) -> DateTime<Utc> {
        self.sold_at
    }

    pub fn total(&self) -> f64 {
        self.total
    }
}

//! Value objects: equality by value, not identity.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one. Implementors must be cheap to clone and debuggable.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// Discount percentage, always within `[0, 100]`.
///
/// Serialized as a bare number so persisted state stays readable.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Discount(f64);

impl ValueObject for Discount {}

impl Discount {
    pub const NONE: Discount = Discount(0.0);

    pub fn new(percent: f64) -> DomainResult<Self> {
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(DomainError::invalid(format!(
                "discount must be between 0 and 100, got {percent}"
            )));
        }
        Ok(Self(percent))
    }

    pub fn percent(self) -> f64 {
        self.0
    }

    /// Multiplier applied to a gross amount: `1 - percent / 100`.
    pub fn factor(self) -> f64 {
        1.0 - self.0 / 100.0
    }
}

impl Default for Discount {
    fn default() -> Self {
        Self::NONE
    }
}

impl TryFrom<f64> for Discount {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Discount> for f64 {
    fn from(value: Discount) -> Self {
        value.0
    }
}

impl core::fmt::Display for Discount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bounds_are_inclusive() {
        assert!(Discount::new(0.0).is_ok());
        assert!(Discount::new(100.0).is_ok());
    }

    #[test]
    fn out_of_range_is_invalid_input() {
        for bad in [-0.5, 100.01, 150.0, f64::NAN, f64::INFINITY] {
            match Discount::new(bad) {
                Err(DomainError::InvalidInput(_)) => {}
                other => panic!("expected InvalidInput for {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    fn deserializing_rejects_out_of_range_values() {
        let ok: Discount = serde_json::from_str("12.5").unwrap();
        assert_eq!(ok.percent(), 12.5);
        assert!(serde_json::from_str::<Discount>("150").is_err());
    }

    proptest! {
        #[test]
        fn factor_stays_within_unit_interval(p in 0.0f64..=100.0) {
            let d = Discount::new(p).unwrap();
            prop_assert!((0.0..=1.0).contains(&d.factor()));
        }
    }
}

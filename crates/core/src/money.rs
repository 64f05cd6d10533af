//! Monetary arithmetic on plain `f64` amounts.
//!
//! Amounts are kept at full precision; rounding to cents only happens when a
//! value is displayed or compared at display precision.

use crate::error::{DomainError, DomainResult};
use crate::value_object::Discount;

/// `price * quantity * (1 - discount / 100)`.
pub fn discounted_total(price: f64, quantity: i64, discount: Discount) -> f64 {
    price * quantity as f64 * discount.factor()
}

/// [`discounted_total`], rejecting results that overflow `f64`.
///
/// A non-finite total cannot be persisted, so it is refused up front.
pub fn checked_total(price: f64, quantity: i64, discount: Discount) -> DomainResult<f64> {
    let total = discounted_total(price, quantity, discount);
    if !total.is_finite() {
        return Err(DomainError::invalid(format!(
            "value of {quantity} units at {price} is out of range"
        )));
    }
    Ok(total)
}

/// Round to two decimal places (display precision).
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Reject negative and non-finite amounts (prices, expense amounts).
pub fn ensure_amount(field: &str, value: f64) -> DomainResult<f64> {
    if !value.is_finite() {
        return Err(DomainError::invalid(format!("{field} must be a finite number")));
    }
    if value < 0.0 {
        return Err(DomainError::invalid(format!("{field} cannot be negative, got {value}")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_example_totals_forty_five() {
        let total = discounted_total(10.0, 5, Discount::new(10.0).unwrap());
        assert_eq!(round_cents(total), 45.00);
    }

    #[test]
    fn full_discount_is_free() {
        assert_eq!(discounted_total(99.99, 3, Discount::new(100.0).unwrap()), 0.0);
    }

    #[test]
    fn overflowing_total_is_rejected() {
        assert!(matches!(
            checked_total(1e308, 10, Discount::NONE),
            Err(DomainError::InvalidInput(_))
        ));
        assert_eq!(checked_total(10.0, 5, Discount::NONE).unwrap(), 50.0);
    }

    #[test]
    fn negative_amount_is_rejected() {
        assert!(matches!(
            ensure_amount("amount", -1.0),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(ensure_amount("amount", f64::NAN).is_err());
        assert_eq!(ensure_amount("amount", 0.0).unwrap(), 0.0);
    }
}

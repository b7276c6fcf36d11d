//! # Validation Module
//!
//! Input checks shared by every rule.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Browser client                                               │
//! │  ├── HTML input types, required fields                                 │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Rules (Rust)                                                 │
//! │  ├── THIS MODULE: positivity, ranges, tolerances                       │
//! │  └── allocation / composition invariants                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend store                                                │
//! │  ├── NOT NULL / foreign key constraints                                │
//! │  └── Check-and-persist in one transaction (see allocation.rs)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;

use crate::error::{ValidationError, ValidationResult};
use crate::TOLERANCE;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates that a value is strictly greater than zero.
///
/// ## Example
/// ```rust
/// use finca_core::validation::validate_positive;
/// use rust_decimal_macros::dec;
///
/// assert!(validate_positive("quantity", dec!(0.5)).is_ok());
/// assert!(validate_positive("quantity", dec!(0)).is_err());
/// ```
pub fn validate_positive(field: &str, value: Decimal) -> ValidationResult<()> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
            value,
        });
    }

    Ok(())
}

/// Validates that a value is zero or greater.
///
/// Zero is allowed (a supply with no quoted price).
pub fn validate_non_negative(field: &str, value: Decimal) -> ValidationResult<()> {
    if value < Decimal::ZERO {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
            value,
        });
    }

    Ok(())
}

/// Validates a percentage in the closed range 0-100.
pub fn validate_percentage(field: &str, value: Decimal) -> ValidationResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: Decimal::ZERO,
            max: Decimal::ONE_HUNDRED,
            value,
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: Decimal::ZERO,
            max: Decimal::from(10000),
            value: Decimal::from(bps),
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a text field is not blank, returning it trimmed.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(value.to_string())
}

// =============================================================================
// Tolerance
// =============================================================================

/// `projected <= limit`, allowing [`TOLERANCE`] of slack.
///
/// Exact equality always passes.
#[inline]
pub fn within_limit(projected: Decimal, limit: Decimal) -> bool {
    match limit.checked_add(TOLERANCE) {
        Some(ceiling) => projected <= ceiling,
        None => projected <= limit,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("area", dec!(0.0001)).is_ok());
        assert!(validate_positive("area", dec!(100)).is_ok());

        assert!(validate_positive("area", dec!(0)).is_err());
        assert!(validate_positive("area", dec!(-1)).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("unit price", dec!(0)).is_ok());
        assert!(validate_non_negative("unit price", dec!(500)).is_ok());
        assert!(matches!(
            validate_non_negative("unit price", dec!(-0.01)),
            Err(ValidationError::MustNotBeNegative { .. })
        ));
    }

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage("pct", dec!(0)).is_ok());
        assert!(validate_percentage("pct", dec!(100)).is_ok());
        assert!(validate_percentage("pct", dec!(100.01)).is_err());
        assert!(validate_percentage("pct", dec!(-1)).is_err());
    }

    #[test]
    fn test_validate_tax_rate_bps() {
        assert!(validate_tax_rate_bps(0).is_ok());
        assert!(validate_tax_rate_bps(1900).is_ok());
        assert!(validate_tax_rate_bps(10000).is_ok());
        assert!(validate_tax_rate_bps(10001).is_err());
    }

    #[test]
    fn test_validate_required() {
        assert_eq!(validate_required("ration", "  RAC01 ").unwrap(), "RAC01");
        assert!(validate_required("ration", "   ").is_err());
    }

    #[test]
    fn test_within_limit_tolerance() {
        assert!(within_limit(dec!(100), dec!(100)));
        assert!(within_limit(dec!(100.0000000005), dec!(100)));
        assert!(!within_limit(dec!(100.01), dec!(100)));
    }
}

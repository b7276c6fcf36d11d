//! # Ration Costs
//!
//! Estimated cost of a feed ingredient and the 100% dry-matter ceiling of a
//! ration.

use rust_decimal::Decimal;

use crate::error::{CompositionError, CoreError, CoreResult};
use crate::money::{checked_product, checked_sum};
use crate::types::RationIngredient;
use crate::validation::{validate_non_negative, validate_percentage, within_limit};

/// Prefix of generated ingredient ids (`ING001`).
pub const INGREDIENT_ID_PREFIX: &str = "ING";

/// Estimated cost of an ingredient: `unit_price × percentage / 100`.
///
/// ## Example
/// ```rust
/// use finca_core::ration::compute_ingredient_cost;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(compute_ingredient_cost(dec!(500), dec!(20)).unwrap(), dec!(100));
/// ```
///
/// ## Errors
/// `CoreError::InvalidInput` for a negative price or a percentage outside
/// 0-100.
pub fn compute_ingredient_cost(unit_price: Decimal, percentage_dry_matter: Decimal) -> CoreResult<Decimal> {
    validate_non_negative("unit price", unit_price)?;
    validate_percentage("dry matter percentage", percentage_dry_matter)?;

    let share = percentage_dry_matter / Decimal::ONE_HUNDRED;
    Ok(checked_product(&[unit_price, share])?.normalize())
}

/// Checks that adding `new_percentage` keeps the ration at or below 100%.
///
/// ## Example
/// ```rust
/// use finca_core::ration::validate_ration_composition;
/// use rust_decimal_macros::dec;
///
/// assert!(validate_ration_composition(&[dec!(60), dec!(25)], dec!(15)).is_ok());
/// assert!(validate_ration_composition(&[dec!(60), dec!(25)], dec!(15.5)).is_err());
/// ```
///
/// ## Errors
/// `CoreError::InvalidInput` when the new or any existing percentage is
/// outside 0-100; `CoreError::Composition` when the ceiling is exceeded.
pub fn validate_ration_composition(existing: &[Decimal], new_percentage: Decimal) -> CoreResult<()> {
    validate_percentage("dry matter percentage", new_percentage)?;
    for pct in existing {
        validate_percentage("dry matter percentage", *pct)?;
    }

    let current = checked_sum(existing)?;
    let projected = current
        .checked_add(new_percentage)
        .ok_or_else(|| CoreError::AmountOverflow {
            amount: format!("{} + {}", current, new_percentage),
        })?;

    if within_limit(projected, Decimal::ONE_HUNDRED) {
        return Ok(());
    }

    Err(CompositionError {
        current,
        requested: new_percentage,
        projected,
    }
    .into())
}

/// Composition check over the stored ingredients of one ration.
///
/// Ingredients of other rations are ignored; `editing_id` is left out of the
/// sum so an edit does not count its own old percentage.
pub fn validate_ingredient(
    ingredients: &[RationIngredient],
    ration_id: &str,
    editing_id: Option<&str>,
    new_percentage: Decimal,
) -> CoreResult<()> {
    let existing: Vec<Decimal> = ingredients
        .iter()
        .filter(|i| i.ration_id == ration_id)
        .filter(|i| Some(i.id.as_str()) != editing_id)
        .map(|i| i.percentage_dry_matter)
        .collect();

    validate_ration_composition(&existing, new_percentage)
}

/// Dry-matter total of one ration, leaving out `editing_id`.
pub fn ration_percentage(
    ingredients: &[RationIngredient],
    ration_id: &str,
    editing_id: Option<&str>,
) -> CoreResult<Decimal> {
    checked_sum(
        ingredients
            .iter()
            .filter(|i| i.ration_id == ration_id)
            .filter(|i| Some(i.id.as_str()) != editing_id)
            .map(|i| &i.percentage_dry_matter),
    )
}

/// Next id in the `ING001`, `ING002`, … sequence.
///
/// Ids that do not follow the pattern are ignored, as are suffixes with no
/// successor in `u64`. Numbers past 999 keep growing (`ING1000`).
pub fn next_ingredient_id<'a, I>(existing_ids: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let next = existing_ids
        .into_iter()
        .filter_map(|id| id.strip_prefix(INGREDIENT_ID_PREFIX))
        .filter(|suffix| !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit()))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .filter_map(|n| n.checked_add(1))
        .max()
        .unwrap_or(1);

    format!("{}{:03}", INGREDIENT_ID_PREFIX, next)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use rust_decimal_macros::dec;

    fn ingredient(id: &str, ration: &str, pct: Decimal) -> RationIngredient {
        RationIngredient {
            id: id.to_string(),
            ration_id: ration.to_string(),
            supply_id: "INS001".to_string(),
            percentage_dry_matter: pct,
        }
    }

    #[test]
    fn test_cost_reference_value() {
        assert_eq!(compute_ingredient_cost(dec!(500), dec!(20)).unwrap(), dec!(100));
        assert_eq!(compute_ingredient_cost(dec!(0), dec!(20)).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_cost_is_linear_in_percentage() {
        for (price, pct) in [(dec!(500), dec!(20)), (dec!(1234.56), dec!(12.5)), (dec!(7), dec!(50))] {
            let single = compute_ingredient_cost(price, pct).unwrap();
            let double = compute_ingredient_cost(price, pct * dec!(2)).unwrap();
            assert_eq!(double, single * dec!(2));
        }
    }

    #[test]
    fn test_cost_rejects_out_of_range() {
        assert!(matches!(
            compute_ingredient_cost(dec!(500), dec!(100.5)),
            Err(CoreError::InvalidInput(ValidationError::OutOfRange { .. }))
        ));
        assert!(matches!(
            compute_ingredient_cost(dec!(-1), dec!(10)),
            Err(CoreError::InvalidInput(ValidationError::MustNotBeNegative { .. }))
        ));
    }

    #[test]
    fn test_cost_is_repeatable() {
        let first = compute_ingredient_cost(dec!(1234.56), dec!(12.5)).unwrap();
        let second = compute_ingredient_cost(dec!(1234.56), dec!(12.5)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, dec!(154.32));
    }

    #[test]
    fn test_composition_boundary() {
        assert!(validate_ration_composition(&[dec!(60), dec!(25)], dec!(15)).is_ok());
        assert!(validate_ration_composition(&[], dec!(100)).is_ok());

        let err = validate_ration_composition(&[dec!(60), dec!(25)], dec!(20)).unwrap_err();
        match err {
            CoreError::Composition(e) => {
                assert_eq!(e.current, dec!(85));
                assert_eq!(e.projected, dec!(105));
                assert_eq!(e.remaining(), dec!(15));
            }
            other => panic!("expected composition error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_ingredient_scopes_to_ration() {
        let ingredients = vec![
            ingredient("ING001", "RAC1", dec!(70)),
            ingredient("ING002", "RAC1", dec!(20)),
            ingredient("ING003", "RAC2", dec!(90)),
        ];

        assert!(validate_ingredient(&ingredients, "RAC1", None, dec!(10)).is_ok());
        assert!(validate_ingredient(&ingredients, "RAC1", None, dec!(11)).is_err());
        // Editing ING002 from 20 to 30 replaces its old share
        assert!(validate_ingredient(&ingredients, "RAC1", Some("ING002"), dec!(30)).is_ok());
        assert!(validate_ingredient(&ingredients, "RAC2", None, dec!(10)).is_ok());

        assert_eq!(ration_percentage(&ingredients, "RAC1", None).unwrap(), dec!(90));
        assert_eq!(
            ration_percentage(&ingredients, "RAC1", Some("ING001")).unwrap(),
            dec!(20)
        );
    }

    #[test]
    fn test_next_ingredient_id() {
        assert_eq!(next_ingredient_id(Vec::<&str>::new()), "ING001");
        assert_eq!(next_ingredient_id(["ING001", "ING007", "ING003"]), "ING008");
        assert_eq!(next_ingredient_id(["ING999"]), "ING1000");
        assert_eq!(next_ingredient_id(["custom", "ING", "INGx2", "ING002"]), "ING003");
    }

    #[test]
    fn test_next_ingredient_id_skips_exhausted_suffix() {
        assert_eq!(next_ingredient_id(["ING18446744073709551615"]), "ING001");
        assert_eq!(
            next_ingredient_id(["ING18446744073709551615", "ING002"]),
            "ING003"
        );
        assert_eq!(
            next_ingredient_id(["ING18446744073709551614"]),
            "ING18446744073709551615"
        );
        // Too long for u64 at all
        assert_eq!(next_ingredient_id(["ING99999999999999999999", "ING004"]), "ING005");
    }

    #[test]
    fn test_composition_rejects_invalid_existing_shares() {
        assert!(matches!(
            validate_ration_composition(&[dec!(150), dec!(-60)], dec!(10)),
            Err(CoreError::InvalidInput(_))
        ));
        assert!(matches!(
            validate_ration_composition(&[dec!(60), dec!(-5)], dec!(10)),
            Err(CoreError::InvalidInput(ValidationError::OutOfRange { .. }))
        ));

        let ingredients = vec![
            ingredient("ING001", "RAC1", dec!(150)),
            ingredient("ING002", "RAC1", dec!(-60)),
        ];
        assert!(matches!(
            validate_ingredient(&ingredients, "RAC1", None, dec!(10)),
            Err(CoreError::InvalidInput(_))
        ));
    }
}

//! # Land Allocation
//!
//! Keeps the parcels of a farm from claiming more area than the farm has.
//!
//! ## Invariant
//! ```text
//! Σ area(parcels of F, except the one being edited) + area(draft) ≤ F.total_area
//! ```
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Land form: "Create parcel" / "Save parcel"                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CRUD layer fetches farm + parcels snapshot                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_parcel(farm, parcels, draft) ← THIS MODULE                   │
//! │       │                                                                 │
//! │       ├── Err(Allocation) → message with overflow + availability       │
//! │       │                                                                 │
//! │       └── Ok → POST / PUT the parcel                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Check, Not Reservation
//! Nothing is claimed. Two callers validating against the same snapshot can
//! both pass and both persist. Callers that need atomicity run the check and
//! the write in one server-side transaction, or retry on a version conflict.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{AllocationError, CoreError, CoreResult};
use crate::money::{checked_difference, checked_sum};
use crate::types::{Farm, LandParcel, ParcelArea, ParcelDraft};
use crate::validation::{validate_positive, within_limit};

/// Checks that adding (or resizing) a parcel keeps the farm within its area.
///
/// ## Arguments
/// * `farm_total_area` - The farm's total area, > 0
/// * `existing` - Areas of the parcels currently on the farm
/// * `exclude_parcel_id` - The parcel being edited, left out of the sum
/// * `requested_area` - Area of the new or edited parcel
///
/// ## Example
/// ```rust
/// use finca_core::allocation::validate_allocation;
/// use finca_core::types::ParcelArea;
/// use rust_decimal_macros::dec;
///
/// let existing = [
///     ParcelArea { parcel_id: 1, area_ha: dec!(30) },
///     ParcelArea { parcel_id: 2, area_ha: dec!(40) },
/// ];
/// assert!(validate_allocation(dec!(100), &existing, None, dec!(30)).is_ok());
/// assert!(validate_allocation(dec!(100), &existing, None, dec!(30.01)).is_err());
/// ```
///
/// ## Errors
/// - `CoreError::InvalidInput` for a non-positive farm area, requested area
///   or counted existing area
/// - `CoreError::Allocation` when the projected total exceeds the farm area
pub fn validate_allocation(
    farm_total_area: Decimal,
    existing: &[ParcelArea],
    exclude_parcel_id: Option<i64>,
    requested_area: Decimal,
) -> CoreResult<()> {
    validate_positive("farm total area", farm_total_area)?;
    validate_positive("parcel area", requested_area)?;

    let counted: Vec<&ParcelArea> = existing
        .iter()
        .filter(|p| Some(p.parcel_id) != exclude_parcel_id)
        .collect();
    for parcel in &counted {
        validate_positive("parcel area", parcel.area_ha)?;
    }

    let used = checked_sum(counted.iter().map(|p| &p.area_ha))?;
    let projected = used
        .checked_add(requested_area)
        .ok_or_else(|| CoreError::AmountOverflow {
            amount: format!("{} + {}", used, requested_area),
        })?;

    if within_limit(projected, farm_total_area) {
        return Ok(());
    }

    Err(AllocationError {
        farm_total: farm_total_area,
        used,
        projected,
        available: checked_difference(farm_total_area, used)?,
        requested: requested_area,
    }
    .into())
}

/// Validates a parcel form against the farm snapshot it belongs to.
///
/// Parcels of other farms in `parcels` are ignored, so the caller may pass
/// the unfiltered list.
///
/// ## Errors
/// - `CoreError::FarmMismatch` when `draft.farm_id` is not `farm.id`
/// - `CoreError::InvalidInput` when the draft area is not positive
/// - `CoreError::Allocation` when the farm would be over-allocated
pub fn validate_parcel(farm: &Farm, parcels: &[LandParcel], draft: &ParcelDraft) -> CoreResult<()> {
    if draft.farm_id != farm.id {
        return Err(CoreError::FarmMismatch {
            expected: farm.id,
            actual: draft.farm_id,
        });
    }
    validate_positive("parcel area", draft.area_ha)?;

    let existing: Vec<ParcelArea> = parcels
        .iter()
        .filter(|p| p.farm_id == farm.id)
        .map(ParcelArea::from)
        .collect();

    validate_allocation(farm.total_area_ha, &existing, draft.id, draft.area_ha)
}

// =============================================================================
// Land Usage
// =============================================================================

/// How much of a farm is assigned to parcels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LandUsage {
    pub farm_id: i64,
    #[ts(type = "string")]
    pub total_ha: Decimal,
    #[ts(type = "string")]
    pub used_ha: Decimal,
    /// Negative when an older, unchecked write over-allocated the farm.
    #[ts(type = "string")]
    pub available_ha: Decimal,
    pub parcel_count: usize,
}

impl LandUsage {
    /// True when the stored parcels already exceed the farm area.
    pub fn is_over_allocated(&self) -> bool {
        !within_limit(self.used_ha, self.total_ha)
    }
}

/// Summarizes the parcels currently assigned to `farm`.
pub fn land_usage(farm: &Farm, parcels: &[LandParcel]) -> CoreResult<LandUsage> {
    let own: Vec<&LandParcel> = parcels.iter().filter(|p| p.farm_id == farm.id).collect();
    let used_ha = checked_sum(own.iter().map(|p| &p.area_ha))?;

    Ok(LandUsage {
        farm_id: farm.id,
        total_ha: farm.total_area_ha,
        used_ha,
        available_ha: checked_difference(farm.total_area_ha, used_ha)?,
        parcel_count: own.len(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use rust_decimal_macros::dec;

    fn areas(values: &[(i64, Decimal)]) -> Vec<ParcelArea> {
        values
            .iter()
            .map(|&(parcel_id, area_ha)| ParcelArea { parcel_id, area_ha })
            .collect()
    }

    fn farm() -> Farm {
        Farm {
            id: 1,
            total_area_ha: dec!(100),
        }
    }

    fn parcels() -> Vec<LandParcel> {
        vec![
            LandParcel { id: 10, farm_id: 1, area_ha: dec!(30) },
            LandParcel { id: 11, farm_id: 1, area_ha: dec!(40) },
            LandParcel { id: 20, farm_id: 2, area_ha: dec!(500) },
        ]
    }

    #[test]
    fn test_exact_fill_passes() {
        let existing = areas(&[(1, dec!(30)), (2, dec!(40))]);
        assert!(validate_allocation(dec!(100), &existing, None, dec!(30)).is_ok());
    }

    #[test]
    fn test_overflow_reports_availability() {
        let existing = areas(&[(1, dec!(30)), (2, dec!(40))]);
        let err = validate_allocation(dec!(100), &existing, None, dec!(30.01)).unwrap_err();

        match err {
            CoreError::Allocation(e) => {
                assert_eq!(e.used, dec!(70));
                assert_eq!(e.projected, dec!(100.01));
                assert_eq!(e.available, dec!(30));
                assert_eq!(e.requested, dec!(30.01));
                assert_eq!(e.overflow(), dec!(0.01));
            }
            other => panic!("expected allocation error, got {other:?}"),
        }
    }

    #[test]
    fn test_tolerance_at_boundary() {
        let existing = areas(&[(1, dec!(33.3333333333)), (2, dec!(33.3333333333))]);
        assert!(validate_allocation(dec!(100), &existing, None, dec!(33.3333333334)).is_ok());
        // 5e-11 over the farm area is inside the tolerance
        assert!(validate_allocation(dec!(100), &existing, None, dec!(33.33333333345)).is_ok());
        assert!(validate_allocation(dec!(100), &existing, None, dec!(33.3333333444)).is_err());
    }

    #[test]
    fn test_editing_excludes_own_area() {
        let existing = areas(&[(1, dec!(30)), (2, dec!(40))]);
        // Growing parcel 2 from 40 to 70 fills the farm exactly
        assert!(validate_allocation(dec!(100), &existing, Some(2), dec!(70)).is_ok());
        // Without the exclusion the old 40 would be double counted
        assert!(validate_allocation(dec!(100), &existing, None, dec!(70)).is_err());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            validate_allocation(dec!(0), &[], None, dec!(1)),
            Err(CoreError::InvalidInput(ValidationError::MustBePositive { .. }))
        ));
        assert!(matches!(
            validate_allocation(dec!(10), &[], None, dec!(-1)),
            Err(CoreError::InvalidInput(ValidationError::MustBePositive { .. }))
        ));
        assert!(matches!(
            validate_allocation(dec!(10), &[], None, dec!(0)),
            Err(CoreError::InvalidInput(ValidationError::MustBePositive { .. }))
        ));
    }

    #[test]
    fn test_invalid_existing_area_is_rejected() {
        // A negative stored area must not make room for the request
        let existing = areas(&[(1, dec!(80)), (2, dec!(-50))]);
        assert!(matches!(
            validate_allocation(dec!(100), &existing, None, dec!(60)),
            Err(CoreError::InvalidInput(ValidationError::MustBePositive { .. }))
        ));

        let existing = areas(&[(1, dec!(80)), (2, dec!(0))]);
        assert!(matches!(
            validate_allocation(dec!(100), &existing, None, dec!(10)),
            Err(CoreError::InvalidInput(_))
        ));

        // The parcel being edited is replaced, so its old area is not checked
        let existing = areas(&[(1, dec!(80)), (2, dec!(-50))]);
        assert!(validate_allocation(dec!(100), &existing, Some(2), dec!(20)).is_ok());
    }

    #[test]
    fn test_validate_allocation_is_repeatable() {
        let existing = areas(&[(1, dec!(30)), (2, dec!(40))]);
        let first = validate_allocation(dec!(100), &existing, None, dec!(31));
        let second = validate_allocation(dec!(100), &existing, None, dec!(31));
        assert_eq!(first, second);
    }

    #[test]
    fn test_validate_parcel_filters_other_farms() {
        let draft = ParcelDraft {
            id: None,
            farm_id: 1,
            area_ha: dec!(30),
        };
        assert!(validate_parcel(&farm(), &parcels(), &draft).is_ok());
    }

    #[test]
    fn test_validate_parcel_edit() {
        let draft = ParcelDraft {
            id: Some(10),
            farm_id: 1,
            area_ha: dec!(60),
        };
        assert!(validate_parcel(&farm(), &parcels(), &draft).is_ok());

        let draft = ParcelDraft {
            id: Some(10),
            farm_id: 1,
            area_ha: dec!(60.5),
        };
        assert!(matches!(
            validate_parcel(&farm(), &parcels(), &draft),
            Err(CoreError::Allocation(_))
        ));
    }

    #[test]
    fn test_validate_parcel_rejects_mismatch_and_zero_area() {
        let draft = ParcelDraft {
            id: None,
            farm_id: 2,
            area_ha: dec!(1),
        };
        assert_eq!(
            validate_parcel(&farm(), &parcels(), &draft),
            Err(CoreError::FarmMismatch {
                expected: 1,
                actual: 2
            })
        );

        let draft = ParcelDraft {
            id: None,
            farm_id: 1,
            area_ha: dec!(0),
        };
        assert!(matches!(
            validate_parcel(&farm(), &parcels(), &draft),
            Err(CoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_land_usage() {
        let usage = land_usage(&farm(), &parcels()).unwrap();
        assert_eq!(usage.used_ha, dec!(70));
        assert_eq!(usage.available_ha, dec!(30));
        assert_eq!(usage.parcel_count, 2);
        assert!(!usage.is_over_allocated());

        let small = Farm {
            id: 2,
            total_area_ha: dec!(400),
        };
        let usage = land_usage(&small, &parcels()).unwrap();
        assert_eq!(usage.available_ha, dec!(-100));
        assert!(usage.is_over_allocated());
    }
}

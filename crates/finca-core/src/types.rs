//! # Domain Types
//!
//! Records the CRUD layer hands to the rules, plus the `TaxRate` value type.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Farm       │   │   LandParcel    │   │   ParcelDraft   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │◄──│  farm_id (FK)   │   │  id? (editing)  │       │
//! │  │  total_area_ha  │   │  area_ha        │   │  farm_id, area  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Animal      │   │ SlaughterWeight │   │     Supply      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (String)    │◄──│  animal_id (FK) │   │  category       │       │
//! │  │  farm_id        │   │  carcass kg     │   │  unit_price     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │ RationIngredient│   │    TaxRate      │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  ration_id      │   │  bps (u32)      │                             │
//! │  │  percentage     │   │  1900 = 19%     │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! Every record here is a snapshot owned by the backend store. The rules read
//! them and never hold on to them between calls.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::supply::SupplyCategory;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1900 bps = 19% (Colombian IVA)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Colombian IVA, the rate behind the 0.81 / 0.19 split.
    pub const IVA: TaxRate = TaxRate(1900);

    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// The tax share of a gross amount (1900 bps = 0.19).
    #[inline]
    pub fn fraction(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 4)
    }

    /// The net share of a gross amount (1900 bps = 0.81).
    #[inline]
    pub fn net_fraction(&self) -> Decimal {
        Decimal::ONE - self.fraction()
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::IVA
    }
}

// =============================================================================
// Farm & Land Parcels
// =============================================================================

/// A managed land holding with a bounded total area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Farm {
    pub id: i64,

    /// Total area in hectares.
    #[ts(type = "string")]
    pub total_area_ha: Decimal,
}

/// A subdivision of a farm's area, assigned a productive activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LandParcel {
    pub id: i64,
    pub farm_id: i64,

    /// Area in hectares.
    #[ts(type = "string")]
    pub area_ha: Decimal,
}

/// A parcel about to be created (`id: None`) or edited (`id: Some`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ParcelDraft {
    #[serde(default)]
    pub id: Option<i64>,
    pub farm_id: i64,
    #[ts(type = "string")]
    pub area_ha: Decimal,
}

/// The minimum a parcel contributes to an allocation check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParcelArea {
    pub parcel_id: i64,
    pub area_ha: Decimal,
}

impl From<&LandParcel> for ParcelArea {
    fn from(parcel: &LandParcel) -> Self {
        ParcelArea {
            parcel_id: parcel.id,
            area_ha: parcel.area_ha,
        }
    }
}

// =============================================================================
// Animals & Slaughter Weights
// =============================================================================

/// An animal, reduced to what the sale rules need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Animal {
    pub id: String,
    pub farm_id: i64,
    #[serde(default)]
    pub breed: Option<String>,
}

/// A carcass weighing taken after slaughter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SlaughterWeight {
    pub id: String,
    pub animal_id: String,

    /// Carcass weight in kilograms.
    #[ts(type = "string")]
    pub carcass_weight_kg: Decimal,
}

// =============================================================================
// Supplies & Rations
// =============================================================================

/// A purchasable supply (feed, medicine, utilities).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Supply {
    pub id: String,
    pub name: String,
    #[ts(type = "string")]
    pub category: SupplyCategory,
    pub unit: String,

    /// Unit price; a missing price counts as zero.
    #[serde(default)]
    #[ts(type = "string | null")]
    pub unit_price: Option<Decimal>,
}

impl Supply {
    /// Unit price, zero when the supplier never quoted one.
    pub fn unit_price_or_zero(&self) -> Decimal {
        self.unit_price.unwrap_or(Decimal::ZERO)
    }
}

/// One ingredient line of a feed ration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RationIngredient {
    pub id: String,
    pub ration_id: String,
    pub supply_id: String,

    /// Share of the ration's dry matter, 0-100.
    #[ts(type = "string")]
    pub percentage_dry_matter: Decimal,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tax_rate_fractions() {
        let rate = TaxRate::IVA;
        assert_eq!(rate.bps(), 1900);
        assert_eq!(rate.fraction(), dec!(0.19));
        assert_eq!(rate.net_fraction(), dec!(0.81));
        assert_eq!(rate.fraction() + rate.net_fraction(), Decimal::ONE);
    }

    #[test]
    fn test_tax_rate_default_is_iva() {
        assert_eq!(TaxRate::default(), TaxRate::from_bps(1900));
        assert_eq!(TaxRate::from_bps(0).net_fraction(), Decimal::ONE);
    }

    #[test]
    fn test_parcel_area_from_record() {
        let parcel = LandParcel {
            id: 7,
            farm_id: 1,
            area_ha: dec!(12.5),
        };
        let area = ParcelArea::from(&parcel);
        assert_eq!(area.parcel_id, 7);
        assert_eq!(area.area_ha, dec!(12.5));
    }

    #[test]
    fn test_records_deserialize_from_client_json() {
        let draft: ParcelDraft =
            serde_json::from_str(r#"{ "farmId": 3, "areaHa": "30.01" }"#).unwrap();
        assert_eq!(draft.id, None);
        assert_eq!(draft.area_ha, dec!(30.01));

        let supply: Supply = serde_json::from_str(
            r#"{ "id": "INS001", "name": "Maiz", "category": "Suministros Alimentarios",
                 "unit": "kg", "unitPrice": 500 }"#,
        )
        .unwrap();
        assert!(supply.category.is_feed());
        assert_eq!(supply.unit_price_or_zero(), dec!(500));
    }
}

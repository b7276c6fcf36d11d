//! # Supply Units
//!
//! Which unit of measure a supply may be recorded in, chosen by category.
//!
//! ```text
//! ┌──────────────────────────────┬──────────────────────────────┐
//! │  Category                    │  Unit rule                   │
//! ├──────────────────────────────┼──────────────────────────────┤
//! │  Agua                        │  fixed "m³"                  │
//! │  Luz                         │  fixed "kWh"                 │
//! │  Medicamento                 │  fixed "unidades"            │
//! │  Suministros Alimentarios    │  one of "kg" / "ton"         │
//! │  anything else               │  free text                   │
//! └──────────────────────────────┴──────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{ValidationError, ValidationResult};

const FEED_UNITS: [&str; 2] = ["kg", "ton"];

// =============================================================================
// Supply Category
// =============================================================================

/// Supply category as stored by the backend (Spanish labels on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SupplyCategory {
    Water,
    Electricity,
    Medicine,
    Feed,
    Other(String),
}

impl SupplyCategory {
    /// The label the backend stores.
    pub fn label(&self) -> &str {
        match self {
            SupplyCategory::Water => "Agua",
            SupplyCategory::Electricity => "Luz",
            SupplyCategory::Medicine => "Medicamento",
            SupplyCategory::Feed => "Suministros Alimentarios",
            SupplyCategory::Other(label) => label,
        }
    }

    /// Only feed supplies can go into a ration.
    pub fn is_feed(&self) -> bool {
        matches!(self, SupplyCategory::Feed)
    }

    /// The unit rule for this category.
    pub fn unit_rule(&self) -> UnitRule {
        match self {
            SupplyCategory::Water => UnitRule::Fixed("m³".to_string()),
            SupplyCategory::Electricity => UnitRule::Fixed("kWh".to_string()),
            SupplyCategory::Medicine => UnitRule::Fixed("unidades".to_string()),
            SupplyCategory::Feed => {
                UnitRule::OneOf(FEED_UNITS.iter().map(|u| u.to_string()).collect())
            }
            SupplyCategory::Other(_) => UnitRule::Free,
        }
    }
}

impl From<String> for SupplyCategory {
    fn from(label: String) -> Self {
        let known = match label.trim() {
            "Agua" => Some(SupplyCategory::Water),
            "Luz" => Some(SupplyCategory::Electricity),
            "Medicamento" => Some(SupplyCategory::Medicine),
            "Suministros Alimentarios" => Some(SupplyCategory::Feed),
            _ => None,
        };
        known.unwrap_or(SupplyCategory::Other(label))
    }
}

impl From<SupplyCategory> for String {
    fn from(category: SupplyCategory) -> Self {
        category.label().to_string()
    }
}

impl fmt::Display for SupplyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Unit Rule
// =============================================================================

/// What the supply form offers for the unit field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "units", rename_all = "camelCase")]
#[ts(export)]
pub enum UnitRule {
    /// Read-only field with this unit.
    Fixed(String),
    /// Dropdown with these units.
    OneOf(Vec<String>),
    /// Any non-empty text.
    Free,
}

/// Resolves the unit to persist for a supply.
///
/// ## Rules
/// - Fixed categories: an empty unit becomes the fixed one; a different unit
///   is rejected
/// - Feed: the unit must be `kg` or `ton`
/// - Other categories: any non-empty unit, trimmed
///
/// ## Example
/// ```rust
/// use finca_core::supply::{validate_supply_unit, SupplyCategory};
///
/// assert_eq!(validate_supply_unit(&SupplyCategory::Water, "").unwrap(), "m³");
/// assert!(validate_supply_unit(&SupplyCategory::Feed, "litros").is_err());
/// ```
pub fn validate_supply_unit(category: &SupplyCategory, unit: &str) -> ValidationResult<String> {
    let unit = unit.trim();

    match category.unit_rule() {
        UnitRule::Fixed(fixed) => {
            if unit.is_empty() || unit == fixed {
                Ok(fixed)
            } else {
                Err(ValidationError::NotAllowed {
                    field: "unit".to_string(),
                    allowed: vec![fixed],
                })
            }
        }
        UnitRule::OneOf(allowed) => {
            if unit.is_empty() {
                return Err(ValidationError::Required {
                    field: "unit".to_string(),
                });
            }
            if allowed.iter().any(|a| a == unit) {
                Ok(unit.to_string())
            } else {
                Err(ValidationError::NotAllowed {
                    field: "unit".to_string(),
                    allowed,
                })
            }
        }
        UnitRule::Free => {
            if unit.is_empty() {
                Err(ValidationError::Required {
                    field: "unit".to_string(),
                })
            } else {
                Ok(unit.to_string())
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_round_trip() {
        for label in ["Agua", "Luz", "Medicamento", "Suministros Alimentarios", "Herramientas"] {
            let category = SupplyCategory::from(label.to_string());
            assert_eq!(category.label(), label);
        }
        assert_eq!(
            SupplyCategory::from("Herramientas".to_string()),
            SupplyCategory::Other("Herramientas".to_string())
        );
    }

    #[test]
    fn test_fixed_units() {
        assert_eq!(validate_supply_unit(&SupplyCategory::Water, "").unwrap(), "m³");
        assert_eq!(
            validate_supply_unit(&SupplyCategory::Electricity, "kWh").unwrap(),
            "kWh"
        );
        assert_eq!(
            validate_supply_unit(&SupplyCategory::Medicine, "  ").unwrap(),
            "unidades"
        );
        assert!(matches!(
            validate_supply_unit(&SupplyCategory::Water, "litros"),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_feed_units() {
        assert_eq!(validate_supply_unit(&SupplyCategory::Feed, "kg").unwrap(), "kg");
        assert_eq!(validate_supply_unit(&SupplyCategory::Feed, " ton ").unwrap(), "ton");
        assert!(matches!(
            validate_supply_unit(&SupplyCategory::Feed, ""),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_supply_unit(&SupplyCategory::Feed, "bulto").is_err());
    }

    #[test]
    fn test_free_units() {
        let other = SupplyCategory::Other("Herramientas".to_string());
        assert_eq!(validate_supply_unit(&other, "caja").unwrap(), "caja");
        assert!(validate_supply_unit(&other, "").is_err());
        assert_eq!(other.unit_rule(), UnitRule::Free);
    }

    #[test]
    fn test_unit_rule_serialization() {
        let json = serde_json::to_string(&SupplyCategory::Feed.unit_rule()).unwrap();
        assert_eq!(json, r#"{"kind":"oneOf","units":["kg","ton"]}"#);

        let json = serde_json::to_string(&SupplyCategory::Water).unwrap();
        assert_eq!(json, r#""Agua""#);
    }
}

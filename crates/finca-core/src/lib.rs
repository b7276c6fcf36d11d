//! # finca-core: Farm Accounting & Allocation Rules
//!
//! The pure rules behind the farm management client. Callers fetch records
//! from the farm API, pass them in, and persist whatever comes back.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Farm Management System                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser client (forms, lists)                │   │
//! │  │    Land form ──► Purchase form ──► Sale form ──► Ration form    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               finca-cli (config, logging, commands)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ finca-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐        │   │
//! │  │   │ allocation │ │ purchase │ │   sale   │ │  ration  │        │   │
//! │  │   │  parcels   │ │ IVA split│ │ carcass  │ │ DM ≤100% │        │   │
//! │  │   └────────────┘ └──────────┘ └──────────┘ └──────────┘        │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO SHARED STATE • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              Farm REST API (owns every record)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`allocation`] - Parcel areas never exceed the farm area
//! - [`purchase`] - Purchase subtotal / IVA split
//! - [`sale`] - Carcass sale pricing and split
//! - [`ration`] - Ingredient cost and the 100% dry-matter ceiling
//! - [`supply`] - Unit of measure by supply category
//! - [`rules`] - Named, injectable rule constants
//! - [`money`] - Display rounding and formatting
//! - [`types`] - Records passed in by the CRUD layer
//! - [`error`] - Domain error types
//! - [`validation`] - Shared input checks
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, no I/O
//! 2. **Exact Arithmetic**: `Decimal` everywhere; cents only for display
//! 3. **Explicit Errors**: every rule returns a typed `Result`, never panics

pub mod allocation;
pub mod error;
pub mod money;
pub mod purchase;
pub mod ration;
pub mod rules;
pub mod sale;
pub mod supply;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use allocation::{land_usage, validate_allocation, validate_parcel, LandUsage};
pub use error::{
    AllocationError, CompositionError, CoreError, CoreResult, ValidationError, ValidationResult,
};
pub use money::Money;
pub use purchase::{compute_purchase, PurchaseBreakdown, PurchaseTotals};
pub use ration::{
    compute_ingredient_cost, next_ingredient_id, ration_percentage, validate_ingredient,
    validate_ration_composition,
};
pub use rules::{CompositionPolicy, CurrencyFormat, RulesConfig, SaleRules};
pub use sale::{compute_sale, farm_carcasses, selected_weights, split_total, SaleBreakdown, SaleTotals};
pub use supply::{validate_supply_unit, SupplyCategory, UnitRule};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Slack allowed when comparing areas or percentages against their ceiling.
///
/// Equality always passes. Values that arrive from binary-float clients
/// (e.g. `33.33 + 33.33 + 33.34`) may carry noise in the last digits.
pub const TOLERANCE: rust_decimal::Decimal = rust_decimal::Decimal::from_parts(1, 0, 0, false, 9);

//! # Error Types
//!
//! Domain-specific error types for finca-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  finca-core errors (this file)                                         │
//! │  ├── CoreError         - Umbrella returned by every rule               │
//! │  ├── ValidationError   - Malformed / out-of-range numeric input        │
//! │  ├── AllocationError   - Parcel areas would exceed the farm area       │
//! │  └── CompositionError  - Ration dry matter would exceed 100%           │
//! │                                                                         │
//! │  finca-cli errors (app)                                                │
//! │  └── ApiError          - What the browser client sees (serialized)     │
//! │                                                                         │
//! │  Flow: ValidationError ─┐                                              │
//! │        AllocationError ─┼─► CoreError ──► ApiError ──► Client          │
//! │        CompositionError ┘                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Carry the numbers the client needs to explain the rejection
//! 3. Errors are enum variants or structs, never String
//! 4. Nothing here is fatal: every error is fixed by correcting input

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Umbrella error for every rule in this crate.
///
/// The presentation layer decides how to surface each variant (inline
/// message, toast, log) and must abort the matching persistence call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Input failed a range or presence check.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// Land parcels would use more area than the farm has.
    #[error(transparent)]
    Allocation(#[from] AllocationError),

    /// Ration ingredients would exceed 100% dry matter.
    #[error(transparent)]
    Composition(#[from] CompositionError),

    /// A parcel draft names a different farm than the snapshot supplied.
    ///
    /// ## When This Occurs
    /// - The caller fetched farm A but the form still points at farm B
    #[error("Parcel belongs to farm {actual}, but farm {expected} was supplied")]
    FarmMismatch { expected: i64, actual: i64 },

    /// An amount is too large for integer minor units or for decimal math.
    #[error("Amount {amount} cannot be represented")]
    AmountOverflow { amount: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are checked before any rule runs, so a rule never computes on a
/// zero price or a negative weight.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field or sequence is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly greater than zero.
    #[error("{field} must be positive, got {value}")]
    MustBePositive { field: String, value: Decimal },

    /// Value must be zero or greater.
    #[error("{field} must not be negative, got {value}")]
    MustNotBeNegative { field: String, value: Decimal },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        min: Decimal,
        max: Decimal,
        value: Decimal,
    },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Value appears more than once where it must be unique.
    #[error("{field} '{value}' appears more than once")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Allocation Error
// =============================================================================

/// Parcel areas would exceed the farm's total area.
///
/// ## User Workflow
/// ```text
/// Farm: 100 ha, parcels 30 ha + 40 ha
///      │
///      ▼
/// New parcel: 30.01 ha
///      │
///      ▼
/// AllocationError { used: 70, projected: 100.01, available: 30, requested: 30.01 }
///      │
///      ▼
/// UI shows: "Parcels would total 100.01 ha ... 30 ha available"
/// ```
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error(
    "Parcel areas would total {projected} ha, exceeding the farm's {farm_total} ha; \
     {available} ha available, {requested} ha requested"
)]
pub struct AllocationError {
    /// The farm's total area.
    pub farm_total: Decimal,
    /// Area already assigned to other parcels of the farm.
    pub used: Decimal,
    /// `used + requested`.
    pub projected: Decimal,
    /// `farm_total - used`.
    pub available: Decimal,
    /// Area of the parcel being created or edited.
    pub requested: Decimal,
}

impl AllocationError {
    /// How far the projected total goes past the farm area.
    pub fn overflow(&self) -> Decimal {
        self.projected - self.farm_total
    }
}

// =============================================================================
// Composition Error
// =============================================================================

/// Ration ingredient percentages would exceed 100% dry matter.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error(
    "Dry-matter percentages for this ration cannot exceed 100%: \
     current {current}%, new {requested}%, total would be {projected}%"
)]
pub struct CompositionError {
    /// Sum of the ration's other ingredients.
    pub current: Decimal,
    /// Percentage of the ingredient being added or edited.
    pub requested: Decimal,
    /// `current + requested`.
    pub projected: Decimal,
}

impl CompositionError {
    /// Percentage still free in the ration (never negative).
    pub fn remaining(&self) -> Decimal {
        (Decimal::ONE_HUNDRED - self.current).max(Decimal::ZERO)
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

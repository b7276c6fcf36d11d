//! # API Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in finca-cli                              │
//! │                                                                         │
//! │  Client                      Rust CLI                                   │
//! │  ──────                      ────────                                   │
//! │                                                                         │
//! │  finca check-parcel < draft.json                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<Value, ApiError>                                         │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Bad JSON? ──────── serde_json::Error ─────────────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Rule rejected? ─── CoreError::Allocation ─────── ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stdout: { "code": "ALLOCATION_EXCEEDED", "message": "...",             │
//! │            "details": { "available": "30", ... } }                      │
//! │  exit code: 1                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::config::ConfigError;
use finca_core::CoreError;

/// API error printed when a command fails.
///
/// ## Serialization
/// ```json
/// {
///   "code": "COMPOSITION_EXCEEDED",
///   "message": "Dry-matter percentages for this ration cannot exceed 100%: ...",
///   "details": { "current": "85", "requested": "20", "projected": "105" }
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Numbers behind a rejection, for rules that carry them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input failed a range or presence check
    ValidationError,

    /// Parcel areas would exceed the farm area
    AllocationExceeded,

    /// Ration dry matter would exceed 100%
    CompositionExceeded,

    /// Parcel draft and farm snapshot disagree
    FarmMismatch,

    /// Amount too large to represent
    AmountOverflow,

    /// Configuration could not be loaded
    ConfigError,

    /// Request could not be read or parsed
    InputError,

    /// Internal error
    Internal,
}

impl ErrorCode {
    /// Process exit code for this error.
    ///
    /// `1` when a rule rejected the request, `2` when the request or the
    /// configuration could not be used at all.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorCode::ValidationError
            | ErrorCode::AllocationExceeded
            | ErrorCode::CompositionExceeded
            | ErrorCode::FarmMismatch
            | ErrorCode::AmountOverflow => 1,
            ErrorCode::ConfigError | ErrorCode::InputError | ErrorCode::Internal => 2,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attaches structured details.
    pub fn with_details(mut self, details: Option<Value>) -> Self {
        self.details = details;
        self
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an input error.
    pub fn input(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InputError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn exit_code(&self) -> i32 {
        self.code.exit_code()
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::InvalidInput(_) => ApiError::validation(message),
            CoreError::Allocation(e) => ApiError::new(ErrorCode::AllocationExceeded, message)
                .with_details(serde_json::to_value(&e).ok()),
            CoreError::Composition(e) => ApiError::new(ErrorCode::CompositionExceeded, message)
                .with_details(serde_json::to_value(&e).ok()),
            CoreError::FarmMismatch { expected, actual } => {
                ApiError::new(ErrorCode::FarmMismatch, message).with_details(Some(
                    serde_json::json!({ "expected": expected, "actual": actual }),
                ))
            }
            CoreError::AmountOverflow { .. } => ApiError::new(ErrorCode::AmountOverflow, message),
        }
    }
}

/// Converts configuration errors to API errors.
impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

/// Converts request parse errors to API errors.
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::input(format!("Invalid request: {}", err))
    }
}

/// Converts request read errors to API errors.
impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::input(format!("Failed to read request: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================

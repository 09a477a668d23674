//! # Error Types
//!
//! Domain-specific error types for kiosk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kiosk-core errors (this file)                                         │
//! │  ├── CoreError        - Cart/catalog rule violations                   │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  kiosk-host errors (separate crate)                                    │
//! │  └── HostError        - What the view layer sees (code + message)      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → HostError → View layer            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! Hitting the quantity cap through `increment_quantity` is a normal outcome
//! (`IncrementOutcome::LimitReached`), not a failure. The view layer decides
//! whether to show anything for it.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart and catalog errors.
///
/// Every operation that returns one of these leaves the order state exactly
/// as it was before the call.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The referenced item is not in the catalog (add) or not in the cart
    /// (increment/decrement).
    ///
    /// ## User Workflow
    /// ```text
    /// Tap "+" on a cart row
    ///      │
    ///      ▼
    /// increment_quantity("cola")
    ///      │
    ///      ▼
    /// Row was already removed by a concurrent "clear"
    ///      │
    ///      ▼
    /// NotFound { item_id: "cola" } → view simply re-renders
    /// ```
    #[error("Item not found: {item_id}")]
    NotFound { item_id: String },

    /// Adding would push a line past the cap and the overflow policy is
    /// `Reject`.
    #[error("Quantity {requested} for {item_id} exceeds maximum allowed ({max})")]
    QuantityLimitExceeded {
        item_id: String,
        requested: u32,
        max: u32,
    },

    /// The injected catalog could not be parsed.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`].
    pub fn not_found(item_id: impl Into<String>) -> Self {
        CoreError::NotFound {
            item_id: item_id.into(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::InvalidCatalog(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while building a catalog or an order configuration, before any
/// cart logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. an item id with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g. two catalog entries with the same id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

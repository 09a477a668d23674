//! # Host Error Type
//!
//! Unified error type for host commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Kiosk Host                         │
//! │                                                                         │
//! │  View layer                  Rust Host                                  │
//! │  ──────────                  ─────────                                  │
//! │                                                                         │
//! │  add_to_cart("pizza")                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, HostError>                                            │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  CoreError::NotFound ─────────────► HostError { NOT_FOUND }  ───►│  │
//! │  │  CoreError::QuantityLimitExceeded ► HostError { QUANTITY_LIMIT }►│  │
//! │  │  Checkout flow misuse ────────────► HostError { INVALID_STATE }─►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  The view decides: alert, toast, or silently re-render.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use kiosk_core::CoreError;

/// Error returned from host commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Item not found: pizza"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown menu item or cart line
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Add refused by the `reject` overflow policy
    QuantityLimit,

    /// Cancel/pay requested with nothing in the cart
    EmptyCart,

    /// Checkout step requested out of order
    InvalidState,

    /// Configuration or catalog could not be loaded
    ConfigError,

    /// Internal error
    Internal,
}

impl HostError {
    /// Creates a new host error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        HostError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        HostError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an invalid-state error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        HostError::new(ErrorCode::InvalidState, message)
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        HostError::new(ErrorCode::ConfigError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        HostError::new(ErrorCode::Internal, message)
    }

    /// Checkout refused because the cart has no lines.
    pub fn empty_cart() -> Self {
        HostError::new(ErrorCode::EmptyCart, "Cart is empty")
    }
}

/// Converts core errors to host errors.
impl From<CoreError> for HostError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::NotFound { .. } => HostError::new(ErrorCode::NotFound, message),
            CoreError::QuantityLimitExceeded { .. } => {
                HostError::new(ErrorCode::QuantityLimit, message)
            }
            CoreError::InvalidCatalog(_) => HostError::config(message),
            CoreError::Validation(e) => HostError::validation(e.to_string()),
        }
    }
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for HostError {}

//! # Order Configuration
//!
//! The per-line quantity cap and what happens when an add would exceed it.
//!
//! The kiosk shipped with a cap of 50 and silently dropped any excess. Both
//! are kept as defaults here but are configuration, not business rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation::{validate_max_quantity, ValidationResult};

/// Default per-line quantity cap.
pub const DEFAULT_MAX_QUANTITY: u32 = 50;

/// What `add_to_cart` does when the requested quantity would pass the cap.
///
/// `increment_quantity` is unaffected: at the cap it always reports
/// `LimitReached` without failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Fill the line up to the cap and drop the rest.
    #[default]
    Clamp,
    /// Refuse the whole add and leave the line untouched.
    Reject,
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Clamp => f.write_str("clamp"),
            OverflowPolicy::Reject => f.write_str("reject"),
        }
    }
}

impl FromStr for OverflowPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clamp" => Ok(OverflowPolicy::Clamp),
            "reject" => Ok(OverflowPolicy::Reject),
            _ => Err(ValidationError::NotAllowed {
                field: "overflow_policy".to_string(),
                allowed: vec!["clamp".to_string(), "reject".to_string()],
            }),
        }
    }
}

/// Cart limits for one order screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderConfig {
    /// Highest quantity a single cart line may hold.
    pub max_quantity: u32,

    /// Behavior when `add_to_cart` would exceed `max_quantity`.
    pub overflow: OverflowPolicy,
}

impl Default for OrderConfig {
    fn default() -> Self {
        OrderConfig {
            max_quantity: DEFAULT_MAX_QUANTITY,
            overflow: OverflowPolicy::Clamp,
        }
    }
}

impl OrderConfig {
    /// Checks the cap is within `1..=999`.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_max_quantity(self.max_quantity)
    }
}

//! # Validation Module
//!
//! Input validation for catalog entries and order configuration.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Catalog load (once, at startup)                                       │
//! │  ├── validate_item_id      every entry                                 │
//! │  ├── validate_item_name    every entry                                 │
//! │  ├── validate_price        every entry                                 │
//! │  └── validate_item_category every entry                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  OrderState construction                                               │
//! │  └── validate_max_quantity                                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Cart operations: no validation needed, ids are looked up and          │
//! │  quantities are clamped by the cart itself                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kiosk_core::validation::{validate_item_id, validate_price};
//! use kiosk_core::Money;
//!
//! assert!(validate_item_id("cheeseburger").is_ok());
//! assert!(validate_price(Money::from_amount(-1)).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Category;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted item id.
pub const MAX_ITEM_ID_LEN: usize = 50;

/// Longest accepted display name.
pub const MAX_ITEM_NAME_LEN: usize = 200;

/// Upper bound for a configurable per-line cap.
pub const MAX_QUANTITY_CEILING: u32 = 999;

/// Highest unit price (100,000,000).
///
/// A full line is at most `MAX_PRICE * MAX_QUANTITY_CEILING`, which leaves
/// room for tens of millions of lines before an `i64` total could overflow.
pub const MAX_PRICE: i64 = 100_000_000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item id.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only ASCII letters, digits, hyphens and underscores
pub fn validate_item_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.len() > MAX_ITEM_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_ITEM_ID_LEN,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a display name.
///
/// Names are Hangul in the shipped menu, so length is counted in characters,
/// not bytes.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price. Zero is allowed (free items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() || price.amount() > MAX_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE,
        });
    }

    Ok(())
}

/// Validates the configured per-line quantity cap.
pub fn validate_max_quantity(max: u32) -> ValidationResult<()> {
    if max == 0 || max > MAX_QUANTITY_CEILING {
        return Err(ValidationError::OutOfRange {
            field: "max_quantity".to_string(),
            min: 1,
            max: MAX_QUANTITY_CEILING as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Enum Validators
// =============================================================================

/// Rejects the filter-only category on a real catalog item.
pub fn validate_item_category(category: Category) -> ValidationResult<()> {
    if category.is_filter_only() {
        return Err(ValidationError::NotAllowed {
            field: "category".to_string(),
            allowed: Category::ALL
                .iter()
                .filter(|c| !c.is_filter_only())
                .map(|c| c.as_str().to_string())
                .collect(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_id() {
        assert!(validate_item_id("cheeseburger").is_ok());
        assert!(validate_item_id("monk-burger").is_ok());
        assert!(validate_item_id("side_01").is_ok());

        assert!(validate_item_id("").is_err());
        assert!(validate_item_id("   ").is_err());
        assert!(validate_item_id("has space").is_err());
        assert!(validate_item_id("치즈버거").is_err());
        assert!(validate_item_id(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("치즈버거").is_ok());
        assert!(validate_item_name("").is_err());
        // 200 Hangul syllables are 600 bytes but still within the limit
        assert!(validate_item_name(&"버".repeat(200)).is_ok());
        assert!(validate_item_name(&"버".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_amount(4000)).is_ok());
        assert!(validate_price(Money::from_amount(-100)).is_err());
        assert!(validate_price(Money::from_amount(MAX_PRICE)).is_ok());
        assert!(validate_price(Money::from_amount(MAX_PRICE + 1)).is_err());
        assert!(validate_price(Money::from_amount(i64::MAX / 2 + 1)).is_err());
    }

    #[test]
    fn test_validate_max_quantity() {
        assert!(validate_max_quantity(1).is_ok());
        assert!(validate_max_quantity(50).is_ok());
        assert!(validate_max_quantity(999).is_ok());
        assert!(validate_max_quantity(0).is_err());
        assert!(validate_max_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_item_category() {
        assert!(validate_item_category(Category::Burger).is_ok());
        assert!(matches!(
            validate_item_category(Category::All),
            Err(ValidationError::NotAllowed { .. })
        ));
    }
}

//! # Domain Types
//!
//! Core domain types shared by every view that renders the menu or the cart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    MenuItem     │   │    Category     │   │     ItemId      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  All (filter)   │   │  "cheeseburger" │       │
//! │  │  name           │   │  Burger         │   │  "cola"         │       │
//! │  │  price (Money)  │   │  Chicken        │   │  ...            │       │
//! │  │  image_ref      │   │  Vegan          │   └─────────────────┘       │
//! │  │  category       │   │  Side           │                             │
//! │  └─────────────────┘   │  Drink          │                             │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is exactly one `Category` enum and one `MenuItem` record. The grid,
//! the category bar and the cart panel all read the same types.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// Menu category.
///
/// `All` is a filter-only pseudo-category: the category bar offers it, but no
/// catalog item may carry it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Every item in the catalog.
    #[default]
    All,
    Burger,
    Chicken,
    Vegan,
    Side,
    Drink,
}

impl Category {
    /// Every category in category-bar order.
    pub const ALL: [Category; 6] = [
        Category::All,
        Category::Burger,
        Category::Chicken,
        Category::Vegan,
        Category::Side,
        Category::Drink,
    ];

    /// Stable lowercase key (`"burger"`), identical to the serde form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Burger => "burger",
            Category::Chicken => "chicken",
            Category::Vegan => "vegan",
            Category::Side => "side",
            Category::Drink => "drink",
        }
    }

    /// Returns true for the pseudo-category that only exists as a filter.
    #[inline]
    pub const fn is_filter_only(&self) -> bool {
        matches!(self, Category::All)
    }

    /// Checks whether an item of category `item` passes this filter.
    #[inline]
    pub fn admits(&self, item: Category) -> bool {
        self.is_filter_only() || *self == item
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    /// Parses a category key, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == key)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::ALL.iter().map(|c| c.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Item Identity
// =============================================================================

/// Stable identity of a menu item.
///
/// Cart lines are keyed by this, never by display name or grid position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        ItemId(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        ItemId(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        ItemId(id)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Menu Item
// =============================================================================

/// A catalog entry. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Stable identity, unique within the catalog.
    pub id: ItemId,

    /// Display name shown on the card and in the cart row.
    pub name: String,

    /// Unit price.
    pub price: Money,

    /// Asset key for the card image. Never interpreted here.
    pub image_ref: String,

    /// Real category; never `Category::All`.
    pub category: Category,
}

impl MenuItem {
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        price: i64,
        image_ref: impl Into<String>,
        category: Category,
    ) -> Self {
        MenuItem {
            id: id.into(),
            name: name.into(),
            price: Money::from_amount(price),
            image_ref: image_ref.into(),
            category,
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
    fn test_category_default_is_all() {
        assert_eq!(Category::default(), Category::All);
        assert!(Category::All.is_filter_only());
        assert!(!Category::Drink.is_filter_only());
    }

    #[test]
    fn test_category_admits() {
        assert!(Category::All.admits(Category::Burger));
        assert!(Category::Burger.admits(Category::Burger));
        assert!(!Category::Burger.admits(Category::Drink));
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("burger".parse::<Category>().unwrap(), Category::Burger);
        assert_eq!(" Drink ".parse::<Category>().unwrap(), Category::Drink);
        assert_eq!("ALL".parse::<Category>().unwrap(), Category::All);
        assert!("dessert".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde_matches_as_str() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }

    #[test]
    fn test_menu_item_json_shape() {
        let item = MenuItem::new("cola", "콜라", 5000, "cola", Category::Drink);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "cola");
        assert_eq!(json["price"], 5000);
        assert_eq!(json["imageRef"], "cola");
        assert_eq!(json["category"], "drink");
    }
}

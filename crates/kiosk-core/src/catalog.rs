//! # Catalog
//!
//! The fixed, ordered list of orderable menu items.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Startup                                                                │
//! │    seed menu ──┐                                                        │
//! │                ├──► Catalog::new(items) ──► validated, read-only        │
//! │  catalog.json ─┘         │                                              │
//! │                          ├── ids unique                                 │
//! │                          ├── names unique                               │
//! │                          ├── prices >= 0                                │
//! │                          └── no item tagged `all`                       │
//! │                                                                         │
//! │  Runtime                                                                │
//! │    filter(category) ──► items in catalog order                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::error::{CoreResult, ValidationError};
use crate::types::{Category, ItemId, MenuItem};
use crate::validation::{validate_item_category, validate_item_id, validate_item_name, validate_price};

/// Ordered, validated menu.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    /// Builds a catalog, validating every entry.
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::{Catalog, Category, MenuItem};
    ///
    /// let catalog = Catalog::new(vec![
    ///     MenuItem::new("cheeseburger", "치즈버거", 4000, "cheeseburger", Category::Burger),
    ///     MenuItem::new("cola", "콜라", 5000, "cola", Category::Drink),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(catalog.len(), 2);
    /// assert_eq!(catalog.filter(Category::Drink).len(), 1);
    /// ```
    pub fn new(items: Vec<MenuItem>) -> CoreResult<Self> {
        validate_entries(&items)?;

        debug!(items = items.len(), "catalog built");
        Ok(Catalog { items })
    }

    /// Parses a JSON array of menu items and validates it.
    ///
    /// ## Format
    /// ```json
    /// [
    ///   { "id": "cola", "name": "콜라", "price": 5000,
    ///     "imageRef": "cola", "category": "drink" }
    /// ]
    /// ```
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let items: Vec<MenuItem> = serde_json::from_str(json)?;
        Catalog::new(items)
    }

    /// Looks up an item by id.
    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id.as_str() == id)
    }

    /// Checks whether an id belongs to the catalog.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All items in catalog order.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Items passing `category`, in catalog order. `All` returns everything.
    pub fn filter(&self, category: Category) -> Vec<&MenuItem> {
        self.items
            .iter()
            .filter(|item| category.admits(item.category))
            .collect()
    }

    /// Ids in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.items.iter().map(|item| &item.id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Checks each entry and rejects duplicate ids or names.
fn validate_entries(items: &[MenuItem]) -> CoreResult<()> {
    let mut ids = HashSet::with_capacity(items.len());
    let mut names = HashSet::with_capacity(items.len());

    for item in items {
        validate_item_id(item.id.as_str())?;
        validate_item_name(&item.name)?;
        validate_price(item.price)?;
        validate_item_category(item.category)?;

        if !ids.insert(item.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "id".to_string(),
                value: item.id.to_string(),
            }
            .into());
        }
        if !names.insert(item.name.trim()) {
            return Err(ValidationError::Duplicate {
                field: "name".to_string(),
                value: item.name.clone(),
            }
            .into());
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

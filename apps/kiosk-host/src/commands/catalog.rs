//! # Catalog Commands
//!
//! Category bar and menu grid.

use kiosk_core::{Category, MenuItem, OrderState, ValidationError};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::HostError;
use crate::state::OrderSession;

/// One button of the category bar.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOption {
    pub category: Category,
    pub selected: bool,
}

/// What the menu grid shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    pub category: Category,
    pub items: Vec<MenuItem>,
}

/// Lists the category bar in display order.
pub fn list_categories(session: &OrderSession) -> Vec<CategoryOption> {
    debug!("list_categories command");
    let current = session.with_order(|order| order.category());

    Category::ALL
        .iter()
        .map(|&category| CategoryOption {
            category,
            selected: category == current,
        })
        .collect()
}

/// Switches the filter and returns the newly visible items.
///
/// ## Arguments
/// * `name` - Category name, case-insensitive (`all`, `burger`, ...)
pub fn select_category(session: &OrderSession, name: &str) -> Result<MenuResponse, HostError> {
    debug!(name = %name, "select_category command");

    let category: Category = name.parse().map_err(|e: ValidationError| {
        warn!(name = %name, "unknown category");
        HostError::validation(e.to_string())
    })?;

    Ok(session.with_order_mut(|order| {
        order.set_category(category);
        menu_of(order)
    }))
}

/// Items under the current filter, in catalog order.
pub fn visible_menu(session: &OrderSession) -> MenuResponse {
    debug!("visible_menu command");
    session.with_order(menu_of)
}

fn menu_of(order: &OrderState) -> MenuResponse {
    MenuResponse {
        category: order.category(),
        items: order.visible_items().into_iter().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::HostConfig;
    use kiosk_core::seed;

    fn session() -> OrderSession {
        OrderSession::new(seed::default_catalog().unwrap(), &HostConfig::default()).unwrap()
    }

    #[test]
    fn test_list_categories_marks_selection() {
        let session = session();
        let options = list_categories(&session);

        assert_eq!(options.len(), 6);
        assert_eq!(options[0].category, Category::All);
        assert!(options[0].selected);
        assert_eq!(options.iter().filter(|o| o.selected).count(), 1);
    }

    #[test]
    fn test_select_category_filters_menu() {
        let session = session();
        let menu = select_category(&session, "Vegan").unwrap();

        assert_eq!(menu.category, Category::Vegan);
        assert_eq!(menu.items.len(), 2);
        assert!(menu.items.iter().all(|i| i.category == Category::Vegan));
        assert!(list_categories(&session)
            .iter()
            .any(|o| o.category == Category::Vegan && o.selected));
    }

    #[test]
    fn test_unknown_category_is_validation_error() {
        let session = session();
        let err = select_category(&session, "dessert").unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(visible_menu(&session).category, Category::All);
    }

    #[test]
    fn test_visible_menu_defaults_to_everything() {
        let session = session();
        assert_eq!(visible_menu(&session).items.len(), 15);
    }
}

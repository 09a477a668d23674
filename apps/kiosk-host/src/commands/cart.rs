//! # Cart Commands
//!
//! Commands behind the cart panel.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────────┐     ┌──────────┐   │
//! │  │  Empty   │────►│ In Cart  │────►│ Confirmation │────►│  Empty   │   │
//! │  │  Cart    │     │          │     │   (footer)   │     │  Cart    │   │
//! │  └──────────┘     └──────────┘     └──────────────┘     └──────────┘   │
//! │                        │                                                │
//! │                   add_to_cart                                           │
//! │                   increase_item (+)                                     │
//! │                   decrease_item (−, removes at 1)                       │
//! │                   remove_item                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kiosk_core::{CartLine, CartTotals, OrderState};
use serde::Serialize;
use tracing::debug;

use crate::error::HostError;
use crate::state::OrderSession;

/// Cart response including lines and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
    /// Enables the cancel and pay buttons
    pub can_checkout: bool,
}

impl From<&OrderState> for CartResponse {
    fn from(order: &OrderState) -> Self {
        CartResponse {
            lines: order.lines().to_vec(),
            totals: order.totals(),
            can_checkout: order.can_checkout(),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(session: &OrderSession) -> CartResponse {
    debug!("get_cart command");
    session.with_order(|order| CartResponse::from(order))
}

/// Adds a menu item to the cart.
///
/// ## Behavior
/// - Already in cart: quantities merge into the existing line
/// - Not in cart: appended as a new line
/// - Over the cap: clamped or refused, per the overflow policy
///
/// ## Arguments
/// * `item_id` - Menu item id
/// * `quantity` - Quantity to add (default: 1)
pub fn add_to_cart(
    session: &OrderSession,
    item_id: &str,
    quantity: Option<u32>,
) -> Result<CartResponse, HostError> {
    let quantity = quantity.unwrap_or(1);
    debug!(item_id = %item_id, quantity, "add_to_cart command");

    session.with_order_mut(|order| {
        order.add_to_cart(item_id, quantity)?;
        Ok::<_, HostError>(CartResponse::from(&*order))
    })
}

/// The "+" button on a cart line.
///
/// At the cap this succeeds without changing anything.
pub fn increase_item(session: &OrderSession, item_id: &str) -> Result<CartResponse, HostError> {
    debug!(item_id = %item_id, "increase_item command");

    session.with_order_mut(|order| {
        order.increment_quantity(item_id)?;
        Ok::<_, HostError>(CartResponse::from(&*order))
    })
}

/// The "−" button on a cart line; a line at 1 is removed.
pub fn decrease_item(session: &OrderSession, item_id: &str) -> Result<CartResponse, HostError> {
    debug!(item_id = %item_id, "decrease_item command");

    session.with_order_mut(|order| {
        order.decrement_quantity(item_id)?;
        Ok::<_, HostError>(CartResponse::from(&*order))
    })
}

/// Deletes a line outright. Removing an absent line is a no-op.
pub fn remove_item(session: &OrderSession, item_id: &str) -> CartResponse {
    debug!(item_id = %item_id, "remove_item command");

    session.with_order_mut(|order| {
        order.remove_from_cart(item_id);
        CartResponse::from(&*order)
    })
}

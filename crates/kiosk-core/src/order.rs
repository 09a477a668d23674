//! # Order State
//!
//! Single source of truth for "what can be ordered" and "what is in the
//! cart", independent of any rendering technology.
//!
//! ## Who Calls What
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    View Layer → OrderState                              │
//! │                                                                         │
//! │  Category bar ────► set_category()        reads visible_items()         │
//! │  Menu grid ───────► add_to_cart()         reads visible_items()         │
//! │  Cart panel ──────► increment_quantity()  reads lines()                 │
//! │                     decrement_quantity()                                │
//! │                     remove_from_cart()                                  │
//! │  Footer ──────────► clear_cart()          reads totals()/can_checkout() │
//! │                                                                         │
//! │  Every mutation ──► OrderObserver callbacks ──► views re-render         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Semantics
//! Referencing an unknown id fails with `CoreError::NotFound` and changes
//! nothing. Nothing is retried; every call is synchronous and in-memory.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cart::{AddOutcome, Cart, CartLine, CartTotals, DecrementOutcome, IncrementOutcome};
use crate::catalog::Catalog;
use crate::config::OrderConfig;
use crate::error::{CoreError, CoreResult};
use crate::events::{CartChange, Observers, OrderObserver, SubscriptionId};
use crate::money::Money;
use crate::types::{Category, ItemId, MenuItem};

/// Catalog, category filter and cart for one order screen.
///
/// ## Example
/// ```rust
/// use kiosk_core::{Catalog, Category, MenuItem, OrderState};
///
/// let catalog = Catalog::new(vec![
///     MenuItem::new("cheeseburger", "치즈버거", 4000, "cheeseburger", Category::Burger),
///     MenuItem::new("chicken", "치킨", 4500, "chicken", Category::Chicken),
/// ])
/// .unwrap();
/// let mut order = OrderState::new(catalog);
///
/// order.add_to_cart("cheeseburger", 2).unwrap();
/// order.add_one("chicken").unwrap();
/// assert_eq!(order.total_quantity(), 3);
/// assert_eq!(order.total_price().amount(), 12500);
///
/// order.clear_cart();
/// assert_eq!(order.line_count(), 0);
/// ```
#[derive(Debug)]
pub struct OrderState {
    catalog: Catalog,
    category: Category,
    cart: Cart,
    config: OrderConfig,
    observers: Observers,
}

impl OrderState {
    /// Creates an order screen with the default limits (cap 50, clamp).
    pub fn new(catalog: Catalog) -> Self {
        OrderState {
            catalog,
            category: Category::All,
            cart: Cart::new(),
            config: OrderConfig::default(),
            observers: Observers::default(),
        }
    }

    /// Creates an order screen with explicit limits.
    pub fn with_config(catalog: Catalog, config: OrderConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(OrderState {
            config,
            ..OrderState::new(catalog)
        })
    }

    // =========================================================================
    // Observers
    // =========================================================================

    pub fn subscribe(&mut self, observer: Arc<dyn OrderObserver>) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // =========================================================================
    // Category Filter
    // =========================================================================

    /// Sets the active filter. Never touches the cart.
    pub fn set_category(&mut self, category: Category) {
        debug!(%category, "category selected");
        self.category = category;
        self.observers.notify_category(category);
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Items passing the current filter, in catalog order.
    pub fn visible_items(&self) -> Vec<&MenuItem> {
        self.catalog.filter(self.category)
    }

    // =========================================================================
    // Cart Mutations
    // =========================================================================

    /// Adds `quantity` units of a catalog item (0 counts as 1).
    ///
    /// ## Behavior
    /// - Unknown id: `NotFound`
    /// - Existing line: quantities merge, capped per the overflow policy
    /// - New line: appended after existing lines
    pub fn add_to_cart(&mut self, item_id: &str, quantity: u32) -> CoreResult<AddOutcome> {
        let item = self
            .catalog
            .get(item_id)
            .ok_or_else(|| CoreError::not_found(item_id))?;

        let outcome = match self.cart.add(item, quantity, &self.config) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(item_id, quantity, error = %err, "add_to_cart rejected");
                return Err(err);
            }
        };
        debug!(
            item_id,
            quantity,
            new_quantity = outcome.quantity,
            dropped = outcome.dropped,
            "add_to_cart"
        );

        let item_id = item.id.clone();
        let change = if outcome.created() {
            CartChange::LineAdded {
                item_id,
                quantity: outcome.quantity,
            }
        } else if outcome.changed() {
            CartChange::QuantityChanged {
                item_id,
                quantity: outcome.quantity,
            }
        } else {
            CartChange::LimitReached {
                item_id,
                quantity: outcome.quantity,
            }
        };
        self.emit(change);
        Ok(outcome)
    }

    /// `add_to_cart(item_id, 1)`, the grid's tap action.
    pub fn add_one(&mut self, item_id: &str) -> CoreResult<AddOutcome> {
        self.add_to_cart(item_id, 1)
    }

    /// One more unit on an existing line, unless it sits at the cap.
    pub fn increment_quantity(&mut self, item_id: &str) -> CoreResult<IncrementOutcome> {
        let outcome = self.cart.increment(item_id, self.config.max_quantity)?;
        let item_id = ItemId::from(item_id);

        let change = match outcome {
            IncrementOutcome::Incremented(quantity) => {
                debug!(%item_id, quantity, "increment_quantity");
                CartChange::QuantityChanged { item_id, quantity }
            }
            IncrementOutcome::LimitReached(quantity) => {
                debug!(%item_id, quantity, "increment_quantity at cap");
                CartChange::LimitReached { item_id, quantity }
            }
        };
        self.emit(change);
        Ok(outcome)
    }

    /// One unit fewer; a line reaching zero is deleted.
    pub fn decrement_quantity(&mut self, item_id: &str) -> CoreResult<DecrementOutcome> {
        let outcome = self.cart.decrement(item_id)?;
        let id = ItemId::from(item_id);
        debug!(item_id = %id, ?outcome, "decrement_quantity");

        let change = match outcome {
            DecrementOutcome::Decremented(quantity) => CartChange::QuantityChanged {
                item_id: id,
                quantity,
            },
            DecrementOutcome::Removed => CartChange::LineRemoved { item_id: id },
        };
        self.emit(change);
        Ok(outcome)
    }

    /// Deletes a line if present. Returns whether anything was removed.
    ///
    /// Absent lines are a silent no-op and notify nobody.
    pub fn remove_from_cart(&mut self, item_id: &str) -> bool {
        let id = match self.cart.line(item_id) {
            Some(line) => line.item.id.clone(),
            None => return false,
        };

        self.cart.remove(item_id);
        debug!(item_id = %id, "remove_from_cart");
        self.emit(CartChange::LineRemoved { item_id: id });
        true
    }

    /// Removes every line. Always notifies, even for an empty cart.
    pub fn clear_cart(&mut self) -> usize {
        let removed_lines = self.cart.clear();
        debug!(removed_lines, "clear_cart");
        self.emit(CartChange::Cleared { removed_lines });
        removed_lines
    }

    // =========================================================================
    // Cart Queries
    // =========================================================================

    /// Σ quantity; 0 for an empty cart.
    pub fn total_quantity(&self) -> u32 {
        self.cart.total_quantity()
    }

    /// Σ price × quantity; 0 for an empty cart.
    pub fn total_price(&self) -> Money {
        self.cart.total_price()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.cart.line_count()
    }

    /// Whether the cancel/pay buttons should be enabled.
    pub fn can_checkout(&self) -> bool {
        self.line_count() > 0
    }

    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn line(&self, item_id: &str) -> Option<&CartLine> {
        self.cart.line(item_id)
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &OrderConfig {
        &self.config
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn emit(&self, change: CartChange) {
        let totals = self.cart.totals();
        self.observers.notify_cart(&change, &totals);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

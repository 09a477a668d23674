//! # Change Notifications
//!
//! The view layer registers an [`OrderObserver`] and re-renders from the
//! callbacks. There is no inheritance and no per-screen delegate protocol:
//! one capability covers the category bar, the grid, the cart panel and the
//! footer.
//!
//! ```text
//! OrderState mutation ──► Observers::notify_cart ──► every observer, in
//!                                                    subscription order
//! ```
//!
//! Observers run synchronously inside the mutating call, after the state has
//! changed, so a read from the callback already sees the new state.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartTotals;
use crate::types::{Category, ItemId};

/// What a cart mutation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CartChange {
    /// A new line was appended.
    LineAdded {
        #[serde(rename = "itemId")]
        item_id: ItemId,
        quantity: u32,
    },
    /// An existing line's quantity moved.
    QuantityChanged {
        #[serde(rename = "itemId")]
        item_id: ItemId,
        quantity: u32,
    },
    /// The call landed on a line already at the cap; nothing moved.
    LimitReached {
        #[serde(rename = "itemId")]
        item_id: ItemId,
        quantity: u32,
    },
    /// A line was deleted (explicitly or by decrementing to zero).
    LineRemoved {
        #[serde(rename = "itemId")]
        item_id: ItemId,
    },
    /// Every line was deleted at once.
    Cleared {
        #[serde(rename = "removedLines")]
        removed_lines: usize,
    },
}

impl CartChange {
    /// The line this change concerns, if any.
    pub fn item_id(&self) -> Option<&ItemId> {
        match self {
            CartChange::LineAdded { item_id, .. }
            | CartChange::QuantityChanged { item_id, .. }
            | CartChange::LimitReached { item_id, .. }
            | CartChange::LineRemoved { item_id } => Some(item_id),
            CartChange::Cleared { .. } => None,
        }
    }
}

/// Capability the view layer implements to hear about state changes.
///
/// Both methods default to no-ops so a renderer only overrides what it draws.
pub trait OrderObserver: Send + Sync {
    fn on_category_changed(&self, _category: Category) {}

    fn on_cart_changed(&self, _change: &CartChange, _totals: &CartTotals) {}
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registered observers.
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Arc<dyn OrderObserver>)>,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, observer: Arc<dyn OrderObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn notify_category(&self, category: Category) {
        for (_, observer) in &self.entries {
            observer.on_category_changed(category);
        }
    }

    pub(crate) fn notify_cart(&self, change: &CartChange, totals: &CartTotals) {
        for (_, observer) in &self.entries {
            observer.on_cart_changed(change, totals);
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}

//! # Cart
//!
//! Line bookkeeping for the order in progress.
//!
//! ## Line Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Line Lifecycle                                  │
//! │                                                                         │
//! │  Card tapped ──────► add() ───────┬──► new line (qty = n, capped)       │
//! │                                   └──► existing line (qty += n, capped) │
//! │                                                                         │
//! │  "+" tapped/held ──► increment() ─┬──► qty + 1                          │
//! │                                   └──► LimitReached (qty == cap)        │
//! │                                                                         │
//! │  "−" tapped ───────► decrement() ─┬──► qty − 1                          │
//! │                                   └──► line removed (qty hit 0)         │
//! │                                                                         │
//! │  Trash tapped ─────► remove()                                           │
//! │  Cancel/Pay ───────► clear()                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per item id, in insertion order
//! - Every line has `1 <= quantity <= cap`
//! - Totals are recomputed from the lines on every read, never cached

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::config::{OrderConfig, OverflowPolicy};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{ItemId, MenuItem};

// =============================================================================
// Cart Line
// =============================================================================

/// One (item, quantity) pairing selected for purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Snapshot of the catalog entry.
    pub item: MenuItem,

    /// Always within `1..=cap`.
    pub quantity: u32,
}

impl CartLine {
    #[inline]
    pub fn item_id(&self) -> &ItemId {
        &self.item.id
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.item.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Outcomes
// =============================================================================

/// Result of a successful `add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AddOutcome {
    /// Line quantity before the add (0 for a new line).
    pub previous: u32,
    /// Line quantity after the add.
    pub quantity: u32,
    /// Units silently discarded by the cap.
    pub dropped: u32,
}

impl AddOutcome {
    /// True when the add created the line.
    pub fn created(&self) -> bool {
        self.previous == 0
    }

    /// True when the line quantity moved.
    pub fn changed(&self) -> bool {
        self.previous != self.quantity
    }
}

/// Result of `increment`. Reaching the cap is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "quantity", rename_all = "snake_case")]
pub enum IncrementOutcome {
    Incremented(u32),
    LimitReached(u32),
}

impl IncrementOutcome {
    pub fn quantity(&self) -> u32 {
        match self {
            IncrementOutcome::Incremented(q) | IncrementOutcome::LimitReached(q) => *q,
        }
    }

    pub fn is_limit_reached(&self) -> bool {
        matches!(self, IncrementOutcome::LimitReached(_))
    }
}

/// Result of `decrement`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "quantity", rename_all = "snake_case")]
pub enum DecrementOutcome {
    Decremented(u32),
    /// The line dropped to zero and was deleted.
    Removed,
}

// =============================================================================
// Totals
// =============================================================================

/// Footer summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Distinct lines (gates the cancel/pay buttons).
    pub line_count: usize,
    /// Σ quantity.
    pub total_quantity: u32,
    /// Σ price × quantity.
    pub total_price: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            total_price: cart.total_price(),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The cart for one order screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,

    /// When the cart was created/last cleared.
    opened_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            opened_at: Utc::now(),
        }
    }

    /// Adds `quantity` units of `item`, merging into an existing line.
    ///
    /// ## Behavior
    /// - A quantity of 0 is treated as 1
    /// - Past the cap: `Clamp` fills to the cap and reports the excess as
    ///   `dropped`; `Reject` fails and leaves the line untouched
    pub fn add(
        &mut self,
        item: &MenuItem,
        quantity: u32,
        config: &OrderConfig,
    ) -> CoreResult<AddOutcome> {
        let requested = quantity.max(1);
        let index = self.position(item.id.as_str());
        let previous = index.map(|i| self.lines[i].quantity).unwrap_or(0);
        let wanted = previous.saturating_add(requested);

        let (new_quantity, dropped) = if wanted > config.max_quantity {
            match config.overflow {
                OverflowPolicy::Reject => {
                    return Err(CoreError::QuantityLimitExceeded {
                        item_id: item.id.to_string(),
                        requested: wanted,
                        max: config.max_quantity,
                    });
                }
                OverflowPolicy::Clamp => {
                    debug!(
                        item_id = %item.id,
                        requested = wanted,
                        max = config.max_quantity,
                        "quantity capped"
                    );
                    (config.max_quantity, wanted - config.max_quantity)
                }
            }
        } else {
            (wanted, 0)
        };

        match index {
            Some(i) => self.lines[i].quantity = new_quantity,
            None => self.lines.push(CartLine {
                item: item.clone(),
                quantity: new_quantity,
            }),
        }

        Ok(AddOutcome {
            previous,
            quantity: new_quantity,
            dropped,
        })
    }

    /// Adds one unit to an existing line unless it is already at `max`.
    pub fn increment(&mut self, item_id: &str, max: u32) -> CoreResult<IncrementOutcome> {
        let line = self.line_mut(item_id)?;
        if line.quantity >= max {
            return Ok(IncrementOutcome::LimitReached(line.quantity));
        }
        line.quantity += 1;
        Ok(IncrementOutcome::Incremented(line.quantity))
    }

    /// Takes one unit off a line, deleting it when it reaches zero.
    pub fn decrement(&mut self, item_id: &str) -> CoreResult<DecrementOutcome> {
        let index = self
            .position(item_id)
            .ok_or_else(|| CoreError::not_found(item_id))?;

        if self.lines[index].quantity <= 1 {
            self.lines.remove(index);
            return Ok(DecrementOutcome::Removed);
        }

        self.lines[index].quantity -= 1;
        Ok(DecrementOutcome::Decremented(self.lines[index].quantity))
    }

    /// Deletes a line. Returns false if there was none.
    pub fn remove(&mut self, item_id: &str) -> bool {
        match self.position(item_id) {
            Some(index) => {
                self.lines.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes every line and restarts the cart clock.
    ///
    /// Returns how many lines were dropped.
    pub fn clear(&mut self) -> usize {
        let removed = self.lines.len();
        self.lines.clear();
        self.opened_at = Utc::now();
        removed
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, item_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.item.id.as_str() == item_id)
    }

    /// Returns the number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity of all lines.
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Σ price × quantity, recomputed from the lines.
    pub fn total_price(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    fn position(&self, item_id: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.item.id.as_str() == item_id)
    }

    fn line_mut(&mut self, item_id: &str) -> CoreResult<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|l| l.item.id.as_str() == item_id)
            .ok_or_else(|| CoreError::not_found(item_id))
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Order Session
//!
//! Shares one [`OrderState`] across the host and drives the checkout
//! confirmation steps that the core deliberately leaves out.
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<T>>` because:
//! 1. The console loop and the hold-to-repeat task both mutate the cart
//! 2. Only one of them may mutate at a time
//! 3. Observers run inside the lock, so renderers see consistent totals
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Confirmation                                │
//! │                                                                         │
//! │              request_cancel()                request_payment()          │
//! │   ┌────────┐ ─────────────► ┌──────────────────┐                        │
//! │   │  Idle  │                │ ConfirmingCancel │                        │
//! │   │        │ ◄───────────── └──────────────────┘                        │
//! │   │        │  confirm(): cart cleared                                   │
//! │   │        │  dismiss(): cart untouched                                 │
//! │   │        │                                                            │
//! │   │        │ ─────────────► ┌───────────────────┐                       │
//! │   │        │                │ ConfirmingPayment │                       │
//! │   └────────┘ ◄───────────── └───────────────────┘                       │
//! │               confirm(): receipt issued, cart cleared                   │
//! │               dismiss(): cart untouched                                 │
//! │                                                                         │
//! │  Requests need can_checkout() (at least one line).                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use kiosk_core::{Catalog, CartLine, Money, OrderState};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use super::config::HostConfig;
use super::events::{EventBus, EventReceiver};
use crate::error::HostError;

/// Where the footer's confirmation dialog stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutFlow {
    #[default]
    Idle,
    ConfirmingCancel,
    ConfirmingPayment,
}

/// Snapshot of a paid order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub order_id: Uuid,
    pub store_name: String,
    pub lines: Vec<CartLine>,
    pub total_quantity: u32,
    pub total_price: Money,
    pub completed_at: DateTime<Utc>,
}

/// What a confirmed dialog did.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckoutResult {
    Cancelled { removed_lines: usize },
    Paid { receipt: Receipt },
}

#[derive(Debug)]
struct Session {
    order: OrderState,
    flow: CheckoutFlow,
}

/// Shared handle to the order screen's state.
#[derive(Debug, Clone)]
pub struct OrderSession {
    inner: Arc<Mutex<Session>>,
    bus: Arc<EventBus>,
    store_name: Arc<str>,
}

impl OrderSession {
    /// Builds the order state and wires the render bus as its observer.
    pub fn new(catalog: Catalog, config: &HostConfig) -> Result<Self, HostError> {
        let mut order = OrderState::with_config(catalog, config.order)?;
        let bus = Arc::new(EventBus::new(config.event_capacity));
        order.subscribe(bus.clone());

        Ok(OrderSession {
            inner: Arc::new(Mutex::new(Session {
                order,
                flow: CheckoutFlow::Idle,
            })),
            bus,
            store_name: Arc::from(config.store_name.as_str()),
        })
    }

    /// Executes a function with read access to the order state.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = session.with_order(|order| order.totals());
    /// ```
    pub fn with_order<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OrderState) -> R,
    {
        let session = self.lock();
        f(&session.order)
    }

    /// Executes a function with write access to the order state.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// session.with_order_mut(|order| order.add_to_cart("cola", 1))?;
    /// ```
    pub fn with_order_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OrderState) -> R,
    {
        let mut session = self.lock();
        f(&mut session.order)
    }

    /// New receiver for render events.
    pub fn events(&self) -> EventReceiver {
        self.bus.subscribe()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn flow(&self) -> CheckoutFlow {
        self.lock().flow
    }

    // =========================================================================
    // Checkout Flow
    // =========================================================================

    /// Opens the "cancel order?" confirmation.
    pub fn request_cancel(&self) -> Result<CheckoutFlow, HostError> {
        self.open(CheckoutFlow::ConfirmingCancel)
    }

    /// Opens the "pay now?" confirmation.
    pub fn request_payment(&self) -> Result<CheckoutFlow, HostError> {
        self.open(CheckoutFlow::ConfirmingPayment)
    }

    /// Accepts the open confirmation.
    ///
    /// ## Behavior
    /// - Cancel: clears the cart
    /// - Payment: snapshots a receipt, then clears the cart
    /// - Payment on a cart emptied meanwhile: back to `Idle`, `EMPTY_CART`
    pub fn confirm(&self) -> Result<CheckoutResult, HostError> {
        let mut session = self.lock();
        let flow = session.flow;
        session.flow = CheckoutFlow::Idle;

        match flow {
            CheckoutFlow::Idle => Err(HostError::invalid_state("No confirmation is open")),
            CheckoutFlow::ConfirmingCancel => {
                let removed_lines = session.order.clear_cart();
                info!(removed_lines, "order cancelled");
                Ok(CheckoutResult::Cancelled { removed_lines })
            }
            CheckoutFlow::ConfirmingPayment => {
                if !session.order.can_checkout() {
                    return Err(HostError::empty_cart());
                }

                let totals = session.order.totals();
                let receipt = Receipt {
                    order_id: Uuid::new_v4(),
                    store_name: self.store_name.to_string(),
                    lines: session.order.lines().to_vec(),
                    total_quantity: totals.total_quantity,
                    total_price: totals.total_price,
                    completed_at: Utc::now(),
                };
                session.order.clear_cart();

                info!(
                    order_id = %receipt.order_id,
                    total_quantity = receipt.total_quantity,
                    total_price = receipt.total_price.amount(),
                    "order paid"
                );
                Ok(CheckoutResult::Paid { receipt })
            }
        }
    }

    /// Closes the open confirmation without touching the cart.
    pub fn dismiss(&self) -> Result<CheckoutFlow, HostError> {
        let mut session = self.lock();
        if session.flow == CheckoutFlow::Idle {
            return Err(HostError::invalid_state("No confirmation is open"));
        }
        debug!(flow = ?session.flow, "confirmation dismissed");
        session.flow = CheckoutFlow::Idle;
        Ok(CheckoutFlow::Idle)
    }

    fn open(&self, target: CheckoutFlow) -> Result<CheckoutFlow, HostError> {
        let mut session = self.lock();
        if session.flow != CheckoutFlow::Idle {
            return Err(HostError::invalid_state(format!(
                "Confirmation already open: {:?}",
                session.flow
            )));
        }
        if !session.order.can_checkout() {
            return Err(HostError::empty_cart());
        }
        debug!(flow = ?target, "confirmation opened");
        session.flow = target;
        Ok(target)
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        // State is only mutated through complete OrderState calls, so a
        // panic elsewhere never leaves it half-written.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::events::RenderEvent;
    use kiosk_core::seed;

    fn session() -> OrderSession {
        OrderSession::new(seed::default_catalog().unwrap(), &HostConfig::default()).unwrap()
    }

    #[test]
    fn test_request_needs_lines() {
        let session = session();
        assert_eq!(session.request_cancel().unwrap_err().code, ErrorCode::EmptyCart);
        assert_eq!(session.request_payment().unwrap_err().code, ErrorCode::EmptyCart);
        assert_eq!(session.flow(), CheckoutFlow::Idle);
    }

    #[test]
    fn test_confirm_cancel_clears_cart() {
        let session = session();
        session.with_order_mut(|o| o.add_to_cart("cola", 2)).unwrap();

        assert_eq!(session.request_cancel().unwrap(), CheckoutFlow::ConfirmingCancel);
        let result = session.confirm().unwrap();

        assert!(matches!(result, CheckoutResult::Cancelled { removed_lines: 1 }));
        assert_eq!(session.with_order(|o| o.line_count()), 0);
        assert_eq!(session.flow(), CheckoutFlow::Idle);
    }

    #[test]
    fn test_dismiss_keeps_cart() {
        let session = session();
        session.with_order_mut(|o| o.add_one("chicken")).unwrap();

        session.request_payment().unwrap();
        assert_eq!(session.dismiss().unwrap(), CheckoutFlow::Idle);
        assert_eq!(session.with_order(|o| o.total_quantity()), 1);
        assert_eq!(session.dismiss().unwrap_err().code, ErrorCode::InvalidState);
    }

    #[test]
    fn test_confirm_payment_issues_receipt() {
        let session = session();
        session
            .with_order_mut(|o| {
                o.add_to_cart("cheeseburger", 2)?;
                o.add_one("chicken")
            })
            .unwrap();

        session.request_payment().unwrap();
        let receipt = match session.confirm().unwrap() {
            CheckoutResult::Paid { receipt } => receipt,
            other => panic!("expected receipt, got {:?}", other),
        };

        assert_eq!(receipt.total_quantity, 3);
        assert_eq!(receipt.total_price.amount(), 12500);
        assert_eq!(receipt.lines.len(), 2);
        assert_eq!(receipt.store_name, "iMacDonald");
        assert!(!session.with_order(|o| o.can_checkout()));
    }

    #[test]
    fn test_double_open_is_invalid() {
        let session = session();
        session.with_order_mut(|o| o.add_one("cola")).unwrap();

        session.request_cancel().unwrap();
        assert_eq!(session.request_payment().unwrap_err().code, ErrorCode::InvalidState);
        assert_eq!(session.flow(), CheckoutFlow::ConfirmingCancel);
    }

    #[test]
    fn test_confirm_without_dialog() {
        let session = session();
        assert_eq!(session.confirm().unwrap_err().code, ErrorCode::InvalidState);
    }

    #[test]
    fn test_payment_on_emptied_cart() {
        let session = session();
        session.with_order_mut(|o| o.add_one("cola")).unwrap();
        session.request_payment().unwrap();
        session.with_order_mut(|o| o.decrement_quantity("cola")).unwrap();

        assert_eq!(session.confirm().unwrap_err().code, ErrorCode::EmptyCart);
        assert_eq!(session.flow(), CheckoutFlow::Idle);
    }

    #[test]
    fn test_mutations_reach_the_bus() {
        let session = session();
        let mut rx = session.events();

        session.with_order_mut(|o| o.add_one("wing")).unwrap();

        match rx.try_recv() {
            Some(RenderEvent::CartChanged { totals, .. }) => {
                assert_eq!(totals.total_price.amount(), 2000);
            }
            other => panic!("expected cart event, got {:?}", other),
        }
    }
}

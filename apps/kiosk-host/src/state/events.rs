//! # Render Event Bus
//!
//! Bridges the synchronous [`OrderObserver`] callbacks onto a tokio broadcast
//! channel so any number of async renderers can follow the order screen.
//!
//! ```text
//! OrderState ──observer──► EventBus::publish ──broadcast──► renderer A
//!                                                      └──► renderer B
//! ```
//!
//! A slow renderer that lags behind loses the oldest events; since every
//! event carries fresh totals, catching up on the next one is enough.

use std::sync::atomic::{AtomicU64, Ordering};

use kiosk_core::{CartChange, CartTotals, Category, OrderObserver};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::warn;

/// Something the view layer should re-render for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RenderEvent {
    CategoryChanged { category: Category },
    CartChanged { change: CartChange, totals: CartTotals },
}

/// Broadcast fan-out for render events.
#[derive(Debug)]
pub struct EventBus {
    sender: broadcast::Sender<RenderEvent>,
    events_published: AtomicU64,
}

impl EventBus {
    /// Creates a bus whose receivers buffer up to `capacity` events.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        EventBus {
            sender,
            events_published: AtomicU64::new(0),
        }
    }

    /// Publishes to every receiver; returns how many received it.
    pub fn publish(&self, event: RenderEvent) -> usize {
        self.events_published.fetch_add(1, Ordering::Relaxed);
        // No receivers is fine: nobody is rendering yet
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> EventReceiver {
        EventReceiver {
            inner: self.sender.subscribe(),
        }
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }

    pub fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}

impl OrderObserver for EventBus {
    fn on_category_changed(&self, category: Category) {
        self.publish(RenderEvent::CategoryChanged { category });
    }

    fn on_cart_changed(&self, change: &CartChange, totals: &CartTotals) {
        self.publish(RenderEvent::CartChanged {
            change: change.clone(),
            totals: *totals,
        });
    }
}

/// Receiving end for one renderer.
pub struct EventReceiver {
    inner: broadcast::Receiver<RenderEvent>,
}

impl EventReceiver {
    /// Waits for the next event; `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<RenderEvent> {
        loop {
            match self.inner.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "render receiver lagged, skipped events");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Takes an event if one is already queued.
    pub fn try_recv(&mut self) -> Option<RenderEvent> {
        loop {
            match self.inner.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "render receiver lagged, skipped events");
                    continue;
                }
                Err(_) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_core::ItemId;

    #[tokio::test]
    async fn test_observer_callbacks_reach_receivers() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.on_category_changed(Category::Vegan);
        bus.on_cart_changed(
            &CartChange::LineRemoved {
                item_id: ItemId::from("salad"),
            },
            &CartTotals::default(),
        );

        assert_eq!(
            rx.recv().await,
            Some(RenderEvent::CategoryChanged {
                category: Category::Vegan
            })
        );
        assert!(matches!(rx.recv().await, Some(RenderEvent::CartChanged { .. })));
        assert_eq!(bus.events_published(), 2);
    }

    #[test]
    fn test_publish_without_receivers() {
        let bus = EventBus::new(4);
        assert_eq!(bus.publish(RenderEvent::CategoryChanged { category: Category::All }), 0);
        assert_eq!(bus.receiver_count(), 0);
    }

    #[test]
    fn test_lagging_receiver_skips_to_newest() {
        let bus = EventBus::new(2);
        let mut rx = bus.subscribe();
        for category in [Category::Burger, Category::Chicken, Category::Side] {
            bus.publish(RenderEvent::CategoryChanged { category });
        }

        assert_eq!(
            rx.try_recv(),
            Some(RenderEvent::CategoryChanged {
                category: Category::Chicken
            })
        );
        assert_eq!(
            rx.try_recv(),
            Some(RenderEvent::CategoryChanged {
                category: Category::Side
            })
        );
        assert_eq!(rx.try_recv(), None);
    }

    #[test]
    fn test_render_event_json_is_camel_case() {
        let event = RenderEvent::CartChanged {
            change: CartChange::QuantityChanged {
                item_id: ItemId::from("cola"),
                quantity: 3,
            },
            totals: CartTotals::default(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "cart_changed");
        assert_eq!(json["change"]["itemId"], "cola");
        assert_eq!(json["totals"]["totalQuantity"], 0);
    }
}

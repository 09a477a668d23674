//! # State Module
//!
//! Shared state for the kiosk host.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────────┐  ┌──────────────────┐  │
//! │  │   HostConfig     │  │    OrderSession      │  │    EventBus      │  │
//! │  │                  │  │                      │  │                  │  │
//! │  │  store name      │  │  Arc<Mutex<          │  │  broadcast of    │  │
//! │  │  currency        │  │    OrderState +      │  │  RenderEvent     │  │
//! │  │  cap / policy    │  │    CheckoutFlow      │  │                  │  │
//! │  │  hold interval   │  │  >>                  │──►  (observer)      │  │
//! │  └──────────────────┘  └──────────────────────┘  └──────────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • HostConfig: Read-only after initialization                          │
//! │  • OrderSession: Protected by Arc<Mutex<T>>, cheap to clone            │
//! │  • EventBus: Lock-free broadcast, owned by the session                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod events;
mod session;

pub use config::{default_catalog_path, HostConfig, DEFAULT_EVENT_CAPACITY, DEFAULT_HOLD_INTERVAL_MS};
pub use events::{EventBus, EventReceiver, RenderEvent};
pub use session::{CheckoutFlow, CheckoutResult, OrderSession, Receipt};

//! # Commands Module
//!
//! Every operation the view layer may call.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Category bar + menu grid
//! ├── cart.rs      ◄─── Cart panel
//! └── checkout.rs  ◄─── Footer (cancel / pay confirmations)
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  View layer (console, or any UI)                                        │
//! │  ───────────────────────────────                                        │
//! │  add_to_cart(&session, "cola", Some(2))                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  session.with_order_mut(|order| order.add_to_cart(..))                  │
//! │         │                    │                                          │
//! │         │                    └──► OrderObserver ──► EventBus            │
//! │         ▼                                                               │
//! │  Result<CartResponse, HostError> (JSON-serializable)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command takes only the state it needs and returns a fresh snapshot,
//! so a caller that ignores render events can still redraw from the reply.

pub mod cart;
pub mod catalog;
pub mod checkout;

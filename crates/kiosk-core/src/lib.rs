//! # kiosk-core: Pure Ordering Logic for the Kiosk
//!
//! This crate is the state model behind the ordering screen: the menu, the
//! category filter and the cart. It contains no I/O and knows nothing about
//! how (or whether) anything is drawn.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kiosk Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 View Layer (any toolkit)                        │   │
//! │  │   Category bar ──► Menu grid ──► Cart panel ──► Footer          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ calls + OrderObserver callbacks        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kiosk-host                                   │   │
//! │  │   session lock, checkout confirmation, hold-to-repeat timer     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kiosk-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   cart    │  │   order   │  │  events   │  │   │
//! │  │   │  Catalog  │  │   Cart    │  │OrderState │  │ Observer  │  │   │
//! │  │   │  filter   │  │ CartLine  │  │           │  │CartChange │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO LOCKS • SYNCHRONOUS                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Category, ItemId, MenuItem
//! - [`money`] - Integer money with display grouping
//! - [`catalog`] - Validated, ordered menu with category filtering
//! - [`cart`] - Lines, quantities, totals
//! - [`order`] - `OrderState`, the single source of truth
//! - [`events`] - Observer capability and change records
//! - [`config`] - Quantity cap and overflow policy
//! - [`validation`] - Input rules
//! - [`seed`] - The shipped menu
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use kiosk_core::{seed, Category, OrderState};
//!
//! let mut order = OrderState::new(seed::default_catalog().unwrap());
//!
//! order.set_category(Category::Drink);
//! assert!(order.visible_items().iter().all(|i| i.category == Category::Drink));
//!
//! order.add_to_cart("cola", 2).unwrap();
//! assert_eq!(order.total_price().to_string(), "10,000");
//! assert!(order.can_checkout());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod money;
pub mod order;
pub mod seed;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{AddOutcome, Cart, CartLine, CartTotals, DecrementOutcome, IncrementOutcome};
pub use catalog::Catalog;
pub use config::{OrderConfig, OverflowPolicy, DEFAULT_MAX_QUANTITY};
pub use error::{CoreError, CoreResult, ValidationError};
pub use events::{CartChange, OrderObserver, SubscriptionId};
pub use money::Money;
pub use order::OrderState;
pub use types::{Category, ItemId, MenuItem};

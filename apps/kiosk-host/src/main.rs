//! # Kiosk Host Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        iMacDonald Kiosk                                 │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                  Front End (console here)                        │  │
//! │  │   category bar • menu grid • cart panel • cancel / pay footer    │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    kiosk_host (lib.rs)                           │  │
//! │  │  commands/ ──► add_to_cart, increase_item, request_payment      │  │
//! │  │  state/ ─────► HostConfig, OrderSession, EventBus               │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                 kiosk-core (no I/O)                              │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    match kiosk_host::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("kiosk-host: {}", e);
            ExitCode::FAILURE
        }
    }
}

//! # Kiosk Host Library
//!
//! Wires the pure order state to a runtime: configuration, a shared session,
//! render events, the hold-to-repeat timer and a console front end.
//!
//! ## Module Organization
//! ```text
//! kiosk_host/
//! ├── lib.rs          ◄─── You are here (startup & run loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── HostConfig (env + defaults)
//! │   ├── session.rs  ◄─── OrderSession + checkout confirmation
//! │   └── events.rs   ◄─── EventBus (observer → broadcast)
//! ├── commands/
//! │   ├── catalog.rs  ◄─── Category bar, menu grid
//! │   ├── cart.rs     ◄─── Cart panel
//! │   └── checkout.rs ◄─── Footer
//! ├── hold.rs         ◄─── Long-press repeat driver
//! ├── console.rs      ◄─── Line-oriented front end
//! └── error.rs        ◄─── HostError for commands
//! ```

pub mod commands;
pub mod console;
pub mod error;
pub mod hold;
pub mod state;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, Subscriber};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use console::{Console, Reply};
use error::HostError;
use state::{EventReceiver, HostConfig, OrderSession};

/// Runs the kiosk until `quit` or end of input.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Kiosk Startup                                     │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter (stderr)                       │
/// │     • Default: info,kiosk=debug, override with RUST_LOG                 │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • KIOSK_* environment variables over defaults                       │
/// │                                                                         │
/// │  3. Load Catalog ─────────────────────────────────────────────────────► │
/// │     • KIOSK_CATALOG_PATH, data dir catalog.json, or built-in menu       │
/// │                                                                         │
/// │  4. Create Session ───────────────────────────────────────────────────► │
/// │     • OrderState behind a Mutex, EventBus subscribed as observer        │
/// │                                                                         │
/// │  5. Spawn Render Log ─────────────────────────────────────────────────► │
/// │     • Follows the bus until shutdown                                    │
/// │                                                                         │
/// │  6. Read Commands ────────────────────────────────────────────────────► │
/// │     • One JSON reply per stdin line                                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), HostError> {
    init_tracing();

    let config = HostConfig::from_env();
    info!(
        store = %config.store_name,
        max_quantity = config.order.max_quantity,
        overflow = %config.order.overflow,
        "Starting kiosk host"
    );

    let catalog = config.load_catalog()?;
    let session = OrderSession::new(catalog, &config)?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
    let render_log = tokio::spawn(log_render_events(session.events(), shutdown_rx));

    let console = Console::new(session, config);
    let result = read_commands(&console).await;

    let _ = shutdown_tx.send(()).await;
    let _ = render_log.await;

    info!("Kiosk host stopped");
    result
}

async fn read_commands(console: &Console) -> Result<(), HostError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    write_line(&mut stdout, console::HELP).await?;

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| HostError::internal(format!("stdin: {}", e)))?
    {
        match console.handle_line(&line).await {
            Reply::Quit => break,
            Reply::Output(text) if text.is_empty() => {}
            Reply::Output(text) => write_line(&mut stdout, &text).await?,
        }
    }

    Ok(())
}

async fn write_line(stdout: &mut tokio::io::Stdout, text: &str) -> Result<(), HostError> {
    let io = async {
        stdout.write_all(text.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await
    };
    io.await
        .map_err(|e| HostError::internal(format!("stdout: {}", e)))
}

/// Stand-in renderer: logs every render event.
async fn log_render_events(mut events: EventReceiver, mut shutdown_rx: mpsc::Receiver<()>) {
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => debug!(?event, "render"),
                None => break,
            },
            _ = shutdown_rx.recv() => {
                debug!("Render log received shutdown");
                break;
            }
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=kiosk=trace` - Show trace for kiosk crates only
/// - Default: `info,kiosk=debug`
///
/// Logs go to stderr so stdout stays pure JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    build_subscriber(filter).init();
}

/// Default `EnvFilter` directives when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info,kiosk=debug";

/// Formatting subscriber gated only by `filter`.
fn build_subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_default_filter_levels() {
        let subscriber = build_subscriber(EnvFilter::new(DEFAULT_LOG_FILTER));
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "kiosk_core::order", Level::DEBUG));
            assert!(!tracing::enabled!(target: "kiosk_core::order", Level::TRACE));
            assert!(tracing::enabled!(target: "tokio::runtime", Level::INFO));
            assert!(!tracing::enabled!(target: "tokio::runtime", Level::DEBUG));
        });
    }

    #[test]
    fn test_env_filter_is_honoured() {
        let subscriber = build_subscriber(EnvFilter::new("warn"));
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "kiosk_host::hold", Level::WARN));
            assert!(!tracing::enabled!(target: "kiosk_core::order", Level::INFO));
            assert!(!tracing::enabled!(target: "kiosk_core::order", Level::TRACE));
        });
    }
}

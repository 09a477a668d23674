//! # Hold-to-Repeat
//!
//! Long-pressing "+" on a cart line keeps incrementing it. The order state
//! has no notion of time, so the repetition lives here as a tokio task that
//! issues one discrete `increment_quantity` per tick.
//!
//! ```text
//! press ──► HoldRepeat::start ──► [tick] increment ──► [tick] increment ──► ...
//!                                        │                    │
//!                                        ▼                    ▼
//!                                  LimitReached?         line removed?
//!                                     └──── stop ◄──────────┘
//! release ──► HoldRepeat::release ──► stop signal ──► HoldSummary
//! ```

use std::time::Duration;

use kiosk_core::IncrementOutcome;
use serde::Serialize;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace};

use crate::error::HostError;
use crate::state::OrderSession;

/// Why a hold stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldEnd {
    /// The press was released
    Released,
    /// The line hit the quantity cap
    LimitReached,
    /// The line is not in the cart (anymore)
    LineGone,
}

/// Result of one press-and-hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldSummary {
    pub item_id: String,
    pub increments: u32,
    pub ended_by: HoldEnd,
}

/// A running hold on one cart line.
#[derive(Debug)]
pub struct HoldRepeat {
    stop_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<HoldSummary>,
}

impl HoldRepeat {
    /// Starts incrementing `item_id` every `interval`.
    ///
    /// The first increment lands one interval after the press. Dropping the
    /// handle without releasing stops the task as well.
    pub fn start(session: OrderSession, item_id: impl Into<String>, interval: Duration) -> Self {
        let item_id = item_id.into();
        let (stop_tx, stop_rx) = oneshot::channel();

        debug!(item_id = %item_id, interval_ms = interval.as_millis() as u64, "hold started");
        let handle = tokio::spawn(run(session, item_id, interval, stop_rx));

        HoldRepeat {
            stop_tx: Some(stop_tx),
            handle,
        }
    }

    /// True once the task stopped on its own.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stops the hold and reports what it did.
    pub async fn release(mut self) -> Result<HoldSummary, HostError> {
        if let Some(tx) = self.stop_tx.take() {
            // Already stopped on its own if the receiver is gone
            let _ = tx.send(());
        }

        let summary = (&mut self.handle)
            .await
            .map_err(|e| HostError::internal(format!("hold task failed: {}", e)))?;

        debug!(
            item_id = %summary.item_id,
            increments = summary.increments,
            ended_by = ?summary.ended_by,
            "hold finished"
        );
        Ok(summary)
    }
}

async fn run(
    session: OrderSession,
    item_id: String,
    interval: Duration,
    mut stop_rx: oneshot::Receiver<()>,
) -> HoldSummary {
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut increments = 0;

    let ended_by = loop {
        tokio::select! {
            biased;

            _ = &mut stop_rx => break HoldEnd::Released,

            _ = ticker.tick() => {
                match session.with_order_mut(|order| order.increment_quantity(&item_id)) {
                    Ok(IncrementOutcome::Incremented(quantity)) => {
                        increments += 1;
                        trace!(item_id = %item_id, quantity, "hold tick");
                    }
                    Ok(IncrementOutcome::LimitReached(_)) => break HoldEnd::LimitReached,
                    Err(e) => {
                        debug!(item_id = %item_id, error = %e, "hold target disappeared");
                        break HoldEnd::LineGone;
                    }
                }
            }
        }
    };

    HoldSummary {
        item_id,
        increments,
        ended_by,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::HostConfig;
    use kiosk_core::{seed, OrderConfig};

    fn session_with_cap(max_quantity: u32) -> OrderSession {
        let config = HostConfig {
            order: OrderConfig {
                max_quantity,
                ..OrderConfig::default()
            },
            ..HostConfig::default()
        };
        OrderSession::new(seed::default_catalog().unwrap(), &config).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_hold_increments_until_released() {
        let session = session_with_cap(50);
        session.with_order_mut(|o| o.add_one("potato")).unwrap();

        let hold = HoldRepeat::start(session.clone(), "potato", Duration::from_millis(100));
        time::sleep(Duration::from_millis(350)).await;
        let summary = hold.release().await.unwrap();

        assert_eq!(summary.ended_by, HoldEnd::Released);
        assert_eq!(summary.increments, 3);
        assert_eq!(session.with_order(|o| o.line("potato").unwrap().quantity), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hold_stops_at_cap() {
        let session = session_with_cap(5);
        session.with_order_mut(|o| o.add_one("cola")).unwrap();

        let hold = HoldRepeat::start(session.clone(), "cola", Duration::from_millis(10));
        time::sleep(Duration::from_secs(1)).await;
        assert!(hold.is_finished());

        let summary = hold.release().await.unwrap();
        assert_eq!(summary.ended_by, HoldEnd::LimitReached);
        assert_eq!(summary.increments, 4);
        assert_eq!(session.with_order(|o| o.total_quantity()), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hold_on_missing_line() {
        let session = session_with_cap(50);

        let hold = HoldRepeat::start(session.clone(), "wing", Duration::from_millis(100));
        time::sleep(Duration::from_millis(150)).await;

        let summary = hold.release().await.unwrap();
        assert_eq!(summary.ended_by, HoldEnd::LineGone);
        assert_eq!(summary.increments, 0);
        assert!(!session.with_order(|o| o.can_checkout()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_line_removed_mid_hold() {
        let session = session_with_cap(50);
        session.with_order_mut(|o| o.add_one("nugget")).unwrap();

        let hold = HoldRepeat::start(session.clone(), "nugget", Duration::from_millis(100));
        time::sleep(Duration::from_millis(150)).await;
        session.with_order_mut(|o| o.remove_from_cart("nugget"));
        time::sleep(Duration::from_millis(100)).await;

        let summary = hold.release().await.unwrap();
        assert_eq!(summary.ended_by, HoldEnd::LineGone);
        assert_eq!(summary.increments, 1);
    }
}

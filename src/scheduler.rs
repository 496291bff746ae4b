// src/scheduler.rs
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::feeds::Feed;
use crate::notify::NotificationSink;
use crate::poller::{CycleOutcome, Poller};
use crate::source::RecordSource;

/// Drive one poller at a fixed rate, first cycle immediately. Cycles never
/// overlap for a given poller: a cycle that overruns the period simply
/// delays the next tick.
pub fn spawn_poller<F, S, K>(mut poller: Poller<F, S, K>, period: Duration) -> JoinHandle<()>
where
    F: Feed + 'static,
    S: RecordSource + 'static,
    K: NotificationSink + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match poller.run_cycle().await {
                Ok(CycleOutcome::Delivered(count)) => {
                    info!(feed = poller.feed_name(), count, "delivered notifications");
                }
                Ok(CycleOutcome::NoNewRecords) => {
                    debug!(feed = poller.feed_name(), "no new records");
                }
                // Fetch failures already logged inside the cycle.
                Ok(CycleOutcome::FetchFailed) => {}
                Err(err) => {
                    warn!(feed = poller.feed_name(), error = ?err, "cycle aborted");
                }
            }
        }
    })
}

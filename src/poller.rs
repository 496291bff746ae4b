// src/poller.rs
//! Watermark-driven cycle engine. One `Poller` owns one feed's watermark
//! and runs the fetch → filter → transform → deliver pass; what a "record"
//! means is the feed's business.

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::feeds::{created_at, Feed};
use crate::notify::NotificationSink;
use crate::source::RecordSource;
use crate::timefmt;

/// What one cycle did. Fetch failures are an explicit outcome rather than
/// an error: they self-heal on the next scheduled cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The source query failed. Nothing was delivered, watermark untouched.
    FetchFailed,
    /// The batch was empty or entirely at-or-before the watermark.
    NoNewRecords,
    /// Records delivered this cycle.
    Delivered(usize),
}

/// One poller instance. The watermark is exclusively owned here and only
/// mutated at the end of a successful cycle; the scheduling layer must not
/// overlap invocations of `run_cycle` for the same instance.
pub struct Poller<F, S, K> {
    feed: F,
    source: S,
    sink: K,
    watermark: DateTime<Utc>,
}

impl<F, S, K> Poller<F, S, K>
where
    F: Feed,
    S: RecordSource,
    K: NotificationSink,
{
    /// Records created at or before `initial_watermark` are never notified;
    /// the composition root passes the construction instant so only records
    /// created after startup are picked up.
    pub fn new(feed: F, source: S, sink: K, initial_watermark: DateTime<Utc>) -> Self {
        Self {
            feed,
            source,
            sink,
            watermark: initial_watermark,
        }
    }

    pub fn feed_name(&self) -> &'static str {
        self.feed.name()
    }

    pub fn watermark(&self) -> DateTime<Utc> {
        self.watermark
    }

    /// Run one cycle. Delivery and record-shape errors propagate and abort
    /// the rest of the batch; the watermark only advances on the success
    /// path, once, after the whole batch was processed. A mid-batch failure
    /// therefore re-delivers the earlier records next cycle (at-least-once).
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome> {
        let since = timefmt::format_watermark(self.watermark);
        let url = self.feed.query_url(&since);

        let batch = match self.source.fetch(&url).await {
            Ok(batch) => batch,
            Err(err) => {
                debug!(feed = self.feed.name(), error = ?err, "fetch failed, retrying next cycle");
                return Ok(CycleOutcome::FetchFailed);
            }
        };

        let start = self.watermark;
        let mut newest: Option<DateTime<Utc>> = None;
        let mut delivered = 0usize;

        // Batch order is not chronological; the whole batch is scanned for
        // the maximum creation time, and delivery happens in batch order.
        for record in &batch {
            let created = created_at(record)?;
            if newest.map_or(true, |n| created > n) {
                newest = Some(created);
            }
            if created <= start {
                continue;
            }

            let payload = self.feed.render(record)?;
            self.sink.deliver(&payload).await?;
            delivered += 1;
        }

        match newest {
            Some(newest) if newest > start => {
                self.watermark = newest;
                Ok(CycleOutcome::Delivered(delivered))
            }
            _ => Ok(CycleOutcome::NoNewRecords),
        }
    }
}

// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod config;
pub mod feeds;
pub mod notify;
pub mod poller;
pub mod scheduler;
pub mod source;
pub mod timefmt;

// ---- Re-exports for stable public API ----
pub use crate::feeds::{bans::BanFeed, records::WorldRecordFeed, Feed};
pub use crate::notify::{NotificationPayload, NotificationSink};
pub use crate::poller::{CycleOutcome, Poller};
pub use crate::source::{HttpRecordSource, RecordSource};

//! Headless notifier — binary entrypoint.
//! Composition root: reads configuration, builds both pollers, and hands
//! them to the fixed-rate scheduler.

use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gokz_notifier::config::Config;
use gokz_notifier::feeds::{bans::BanFeed, records::WorldRecordFeed};
use gokz_notifier::notify::discord::DiscordWebhook;
use gokz_notifier::poller::Poller;
use gokz_notifier::scheduler::spawn_poller;
use gokz_notifier::source::HttpRecordSource;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("gokz_notifier=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = Config::from_env()?;
    let period = Duration::from_secs(config.poll_period_secs);
    let client = reqwest::Client::new();

    // Only records created after startup are ever notified.
    let bans = Poller::new(
        BanFeed,
        HttpRecordSource::new(client.clone()),
        DiscordWebhook::new(config.bans_webhook_url),
        Utc::now(),
    );
    let wrs = Poller::new(
        WorldRecordFeed,
        HttpRecordSource::new(client),
        DiscordWebhook::new(config.wrs_webhook_url),
        Utc::now(),
    );

    tracing::info!(period_secs = config.poll_period_secs, "starting pollers");
    let handles = [spawn_poller(bans, period), spawn_poller(wrs, period)];
    for handle in handles {
        handle.await?;
    }
    Ok(())
}

pub mod discord;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Bot identity shown on every outgoing message (username/avatar on the
/// message, label/icon in the embed footer).
pub const BOT_NAME: &str = "KZ Global";
pub const BOT_ICON_URL: &str = "https://kztimerglobal.com/favicon.ico";

/// Embed accent colors per feed.
pub const BAN_COLOR: u32 = 0xE74C3C;
pub const WR_COLOR: u32 = 0xF1C40F;

/// Sink-agnostic message produced by a feed transform. Ephemeral: built for
/// one record, handed to the sink, then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationPayload {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub timestamp: DateTime<Utc>,
    pub footer_text: String,
    pub footer_icon_url: String,
    pub image_url: Option<String>,
}

#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, payload: &NotificationPayload) -> Result<()>;
}

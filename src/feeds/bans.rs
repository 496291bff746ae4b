use anyhow::{anyhow, Result};
use chrono::Datelike;
use serde_json::Value;

use super::{created_at, profile_link, str_field, Feed};
use crate::notify::{NotificationPayload, BAN_COLOR, BOT_ICON_URL, BOT_NAME};
use crate::timefmt;

/// Sentinel expiry year the API uses for permanent bans.
const NEVER_EXPIRES_YEAR: i32 = 9999;

/// Global ban feed: recent ban records from the KZ global API.
pub struct BanFeed;

impl Feed for BanFeed {
    fn name(&self) -> &'static str {
        "bans"
    }

    fn query_url(&self, created_since: &str) -> String {
        format!("https://kztimerglobal.com/api/v2/bans?created_since={created_since}")
    }

    fn render(&self, record: &Value) -> Result<NotificationPayload> {
        let created = created_at(record)?;
        let player_name = str_field(record, "player_name")?;
        let ban_type = humanize_ban_type(str_field(record, "ban_type")?);
        let expires = format_expiry(str_field(record, "expires_on")?)?;
        let steamid64 = str_field(record, "steamid64")?;
        let notes = str_field(record, "notes")?;
        let stats = str_field(record, "stats")?;

        let mut description = format!(
            "Player: **{}**\nReason: **{ban_type}**\nExpires: **{expires}**",
            profile_link(player_name, steamid64)
        );

        // Bans auto-issued for bhop hack detections carry boilerplate notes;
        // drop them to keep the embed readable.
        if !notes.trim().is_empty() && !notes.contains("bhop hack") {
            description.push_str("\n\nNotes: **");
            description.push_str(notes);
            description.push_str("**");
        }

        if !stats.trim().is_empty() {
            description.push_str("\n\n");
            description.push_str(&render_stats(stats)?);
        }

        Ok(NotificationPayload {
            title: "Recent Global Ban".to_string(),
            description,
            color: BAN_COLOR,
            timestamp: created,
            footer_text: BOT_NAME.to_string(),
            footer_icon_url: BOT_ICON_URL.to_string(),
            image_url: None,
        })
    }
}

/// `snake_case` ban-type token to display form: each segment capitalized,
/// joined with spaces.
fn humanize_ban_type(token: &str) -> String {
    token
        .split('_')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `D/M/YYYY` without zero padding, or `Never` for the sentinel year.
fn format_expiry(expires_on: &str) -> Result<String> {
    let expiry = timefmt::parse_api_timestamp(expires_on)?;
    if expiry.year() == NEVER_EXPIRES_YEAR {
        return Ok("Never".to_string());
    }
    Ok(format!(
        "{}/{}/{}",
        expiry.day(),
        expiry.month(),
        expiry.year()
    ))
}

/// Re-render the `key: value, key: value` stats blob one pair per line,
/// with `*` in values escaped so they don't toggle markdown emphasis.
fn render_stats(stats: &str) -> Result<String> {
    let mut lines = Vec::new();
    for pair in stats.split(", ") {
        let (key, value) = pair
            .split_once(": ")
            .ok_or_else(|| anyhow!("malformed stats pair {pair:?}"))?;
        let value = value.replace('*', "\\*");
        lines.push(format!("{key}: **{value}**"));
    }
    Ok(lines.join("\n"))
}

pub mod bans;
pub mod records;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::notify::NotificationPayload;
use crate::timefmt;

/// A monitored feed: knows how to query the source for records created
/// since a given instant and how to render one raw record into a
/// notification. Rendering errors mean the source broke its contract and
/// are propagated, not masked.
pub trait Feed: Send + Sync {
    fn name(&self) -> &'static str;
    fn query_url(&self, created_since: &str) -> String;
    fn render(&self, record: &Value) -> Result<NotificationPayload>;
}

/// Creation instant of a raw record, from the `created_on` field both feeds
/// share.
pub fn created_at(record: &Value) -> Result<DateTime<Utc>> {
    timefmt::parse_api_timestamp(str_field(record, "created_on")?)
}

pub(crate) fn str_field<'a>(record: &'a Value, key: &str) -> Result<&'a str> {
    record
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("record missing string field {key:?}"))
}

pub(crate) fn f64_field(record: &Value, key: &str) -> Result<f64> {
    record
        .get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| anyhow!("record missing numeric field {key:?}"))
}

pub(crate) fn i64_field(record: &Value, key: &str) -> Result<i64> {
    record
        .get(key)
        .and_then(Value::as_i64)
        .ok_or_else(|| anyhow!("record missing integer field {key:?}"))
}

/// Markdown profile link for a player.
pub(crate) fn profile_link(player_name: &str, steamid64: &str) -> String {
    format!("[{player_name}](https://steamcommunity.com/profiles/{steamid64})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn created_at_reads_the_shared_field() {
        let record = json!({ "created_on": "2024-03-05 17:42:09" });
        assert_eq!(
            timefmt::format_watermark(created_at(&record).unwrap()),
            "2024-03-05 17:42:09"
        );
    }

    #[test]
    fn missing_fields_are_contract_violations() {
        let record = json!({ "player_name": 42 });
        assert!(created_at(&record).is_err());
        assert!(str_field(&record, "player_name").is_err());
        assert!(f64_field(&record, "time").is_err());
        assert!(i64_field(&record, "teleports").is_err());
    }
}

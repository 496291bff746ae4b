use anyhow::Result;
use serde_json::Value;

use super::{created_at, f64_field, i64_field, profile_link, str_field, Feed};
use crate::notify::{NotificationPayload, BOT_ICON_URL, BOT_NAME, WR_COLOR};

const MAP_IMAGE_BASE_URL: &str =
    "https://raw.githubusercontent.com/KZGlobalTeam/map-images/refs/heads/master/images/";

/// World-record feed: top-ranked recent runs from the KZ global API.
pub struct WorldRecordFeed;

impl Feed for WorldRecordFeed {
    fn name(&self) -> &'static str {
        "world-records"
    }

    fn query_url(&self, created_since: &str) -> String {
        format!(
            "https://kztimerglobal.com/api/v2.0/records/top/recent\
             ?modes_list_string=kz_vanilla\
             &place_top_at_least=1\
             &created_since={created_since}"
        )
    }

    fn render(&self, record: &Value) -> Result<NotificationPayload> {
        let created = created_at(record)?;
        let map_name = str_field(record, "map_name")?;
        let mode = mode_abbrev(str_field(record, "mode")?);
        let player_name = str_field(record, "player_name")?;
        let steamid64 = str_field(record, "steamid64")?;
        let time = f64_field(record, "time")?;
        let server_name = str_field(record, "server_name")?;
        let teleports = i64_field(record, "teleports")?;

        let description = format!(
            "Map: **{map_name}**\nMode: **{mode}**\n\nPlayer: **{}**\nTime: **{}** [{}]\nServer: **{server_name}**",
            profile_link(player_name, steamid64),
            format_run_time(time),
            format_teleports(teleports),
        );

        Ok(NotificationPayload {
            title: "Recent World Record".to_string(),
            description,
            color: WR_COLOR,
            timestamp: created,
            footer_text: BOT_NAME.to_string(),
            footer_icon_url: BOT_ICON_URL.to_string(),
            image_url: Some(format!("{MAP_IMAGE_BASE_URL}{map_name}.jpg")),
        })
    }
}

/// Short display abbreviation for a mode token. Unrecognized tokens pass
/// through unchanged.
fn mode_abbrev(token: &str) -> &str {
    match token {
        "kz_vanilla" => "VNL",
        "kz_simple" => "SKZ",
        "kz_timer" => "KZT",
        other => other,
    }
}

/// Render a run time as `H:MM:SS.mmm`, `M:SS.mmm` or `S.mmm`. All unit
/// values are truncated from the raw seconds, never rounded.
fn format_run_time(time: f64) -> String {
    let total_hours = (time / 3600.0) as i64;
    let total_minutes = (time / 60.0) as i64;
    let total_seconds = time as i64;
    let total_milliseconds = (time * 1000.0) as i64;

    let minutes = total_minutes % 60;
    let seconds = total_seconds % 60;
    let milliseconds = total_milliseconds % 1000;

    if total_hours != 0 {
        format!("{total_hours}:{minutes:02}:{seconds:02}.{milliseconds:03}")
    } else if total_minutes != 0 {
        format!("{minutes}:{seconds:02}.{milliseconds:03}")
    } else {
        format!("{seconds}.{milliseconds:03}")
    }
}

fn format_teleports(count: i64) -> String {
    if count == 1 {
        "1 TP".to_string()
    } else {
        format!("{count} TPs")
    }
}

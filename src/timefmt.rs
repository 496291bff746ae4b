// src/timefmt.rs
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Textual date format shared by the API's `created_since` query parameter
/// and the timestamps the API returns. The string carries no offset and is
/// interpreted as UTC on both sides.
pub const KZ_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_watermark(ts: DateTime<Utc>) -> String {
    ts.format(KZ_DATE_FORMAT).to_string()
}

pub fn parse_api_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(s, KZ_DATE_FORMAT)
        .with_context(|| format!("unparseable API timestamp {s:?}"))?;
    Ok(naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn watermark_round_trips_through_api_format() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 5, 17, 42, 9).unwrap();
        let s = format_watermark(ts);
        assert_eq!(s, "2024-03-05 17:42:09");
        assert_eq!(parse_api_timestamp(&s).unwrap(), ts);
    }

    #[test]
    fn offset_suffixes_are_rejected() {
        assert!(parse_api_timestamp("2024-03-05T17:42:09Z").is_err());
        assert!(parse_api_timestamp("not a date").is_err());
    }
}

// src/config.rs
use anyhow::{ensure, Context, Result};

pub const ENV_BANS_WEBHOOK_URL: &str = "RECENT_BANS_WEBHOOK_URL";
pub const ENV_WRS_WEBHOOK_URL: &str = "RECENT_WRS_WEBHOOK_URL";
pub const ENV_POLL_PERIOD_SECS: &str = "POLL_PERIOD_SECS";

pub const DEFAULT_POLL_PERIOD_SECS: u64 = 60;

/// Process configuration, read once at startup. A missing or blank webhook
/// URL is fatal: neither poller starts.
#[derive(Debug, Clone)]
pub struct Config {
    pub bans_webhook_url: String,
    pub wrs_webhook_url: String,
    pub poll_period_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bans_webhook_url: required_var(ENV_BANS_WEBHOOK_URL)?,
            wrs_webhook_url: required_var(ENV_WRS_WEBHOOK_URL)?,
            poll_period_secs: poll_period()?,
        })
    }
}

fn required_var(key: &str) -> Result<String> {
    let value = std::env::var(key).with_context(|| format!("{key} must be set"))?;
    ensure!(!value.trim().is_empty(), "{key} must not be blank");
    Ok(value)
}

fn poll_period() -> Result<u64> {
    match std::env::var(ENV_POLL_PERIOD_SECS) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{ENV_POLL_PERIOD_SECS} is not a number: {raw:?}")),
        Err(_) => Ok(DEFAULT_POLL_PERIOD_SECS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn set_webhooks() {
        std::env::set_var(ENV_BANS_WEBHOOK_URL, "https://discord.test/bans");
        std::env::set_var(ENV_WRS_WEBHOOK_URL, "https://discord.test/wrs");
    }

    #[test]
    #[serial]
    fn loads_required_urls_and_default_period() {
        set_webhooks();
        std::env::remove_var(ENV_POLL_PERIOD_SECS);

        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.bans_webhook_url, "https://discord.test/bans");
        assert_eq!(cfg.wrs_webhook_url, "https://discord.test/wrs");
        assert_eq!(cfg.poll_period_secs, DEFAULT_POLL_PERIOD_SECS);
    }

    #[test]
    #[serial]
    fn missing_webhook_url_is_fatal() {
        std::env::remove_var(ENV_BANS_WEBHOOK_URL);
        std::env::set_var(ENV_WRS_WEBHOOK_URL, "https://discord.test/wrs");
        assert!(Config::from_env().is_err());
    }

    #[test]
    #[serial]
    fn blank_webhook_url_is_fatal() {
        std::env::set_var(ENV_BANS_WEBHOOK_URL, "   ");
        std::env::set_var(ENV_WRS_WEBHOOK_URL, "https://discord.test/wrs");
        assert!(Config::from_env().is_err());
    }

    #[test]
    #[serial]
    fn period_override_is_parsed() {
        set_webhooks();
        std::env::set_var(ENV_POLL_PERIOD_SECS, "15");
        assert_eq!(Config::from_env().unwrap().poll_period_secs, 15);

        std::env::set_var(ENV_POLL_PERIOD_SECS, "sixty");
        assert!(Config::from_env().is_err());
        std::env::remove_var(ENV_POLL_PERIOD_SECS);
    }
}

use super::{NotificationPayload, NotificationSink, BOT_ICON_URL, BOT_NAME};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Discord webhook client. Transient HTTP failures are retried with bounded
/// exponential backoff; once retries are exhausted the error propagates to
/// the caller.
#[derive(Clone)]
pub struct DiscordWebhook {
    webhook: String,
    client: Client,
    timeout: Duration,
    max_retries: u8,
}

impl DiscordWebhook {
    pub fn new(webhook: String) -> Self {
        Self {
            webhook,
            client: Client::new(),
            timeout: Duration::from_secs(5),
            max_retries: 3,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    pub fn with_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }
}

#[async_trait]
impl NotificationSink for DiscordWebhook {
    async fn deliver(&self, payload: &NotificationPayload) -> Result<()> {
        let message = DiscordMessage::from_payload(payload);

        let mut attempt: u8 = 0;
        loop {
            attempt += 1;
            let res = self
                .client
                .post(&self.webhook)
                .timeout(self.timeout)
                .json(&message)
                .send()
                .await;

            match res {
                Ok(rsp) => {
                    if let Err(e) = rsp.error_for_status_ref() {
                        if attempt < self.max_retries {
                            tokio::time::sleep(Duration::from_millis(500u64 << (attempt - 1)))
                                .await;
                            continue;
                        }
                        return Err(anyhow!("Discord webhook HTTP error: {e}"));
                    }
                    return Ok(());
                }
                Err(e) => {
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(500u64 << (attempt - 1))).await;
                        continue;
                    }
                    return Err(anyhow!("Discord webhook request failed: {e}"));
                }
            }
        }
    }
}

#[derive(Serialize)]
struct DiscordMessage {
    username: String,
    avatar_url: String,
    embeds: Vec<DiscordEmbed>,
}

#[derive(Serialize)]
struct DiscordEmbed {
    title: String,
    description: String,
    color: u32,
    timestamp: String,
    footer: EmbedFooter,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<EmbedImage>,
}

#[derive(Serialize)]
struct EmbedFooter {
    text: String,
    icon_url: String,
}

#[derive(Serialize)]
struct EmbedImage {
    url: String,
}

impl DiscordMessage {
    fn from_payload(payload: &NotificationPayload) -> Self {
        Self {
            username: BOT_NAME.to_string(),
            avatar_url: BOT_ICON_URL.to_string(),
            embeds: vec![DiscordEmbed {
                title: payload.title.clone(),
                description: payload.description.clone(),
                color: payload.color,
                timestamp: payload.timestamp.to_rfc3339(),
                footer: EmbedFooter {
                    text: payload.footer_text.clone(),
                    icon_url: payload.footer_icon_url.clone(),
                },
                image: payload
                    .image_url
                    .clone()
                    .map(|url| EmbedImage { url }),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn payload(image_url: Option<String>) -> NotificationPayload {
        NotificationPayload {
            title: "Recent World Record".into(),
            description: "Map: **kz_test**".into(),
            color: 0xF1C40F,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 5, 17, 42, 9).unwrap(),
            footer_text: BOT_NAME.into(),
            footer_icon_url: BOT_ICON_URL.into(),
            image_url,
        }
    }

    #[test]
    fn wire_shape_carries_identity_and_embed_fields() {
        let msg = DiscordMessage::from_payload(&payload(Some("https://img.test/kz_test.jpg".into())));
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["username"], BOT_NAME);
        assert_eq!(json["avatar_url"], BOT_ICON_URL);
        let embed = &json["embeds"][0];
        assert_eq!(embed["title"], "Recent World Record");
        assert_eq!(embed["color"], 0xF1C40F);
        assert_eq!(embed["timestamp"], "2024-03-05T17:42:09+00:00");
        assert_eq!(embed["footer"]["text"], BOT_NAME);
        assert_eq!(embed["image"]["url"], "https://img.test/kz_test.jpg");
    }

    #[test]
    fn image_field_is_omitted_when_absent() {
        let msg = DiscordMessage::from_payload(&payload(None));
        let json = serde_json::to_value(&msg).unwrap();
        assert!(json["embeds"][0].get("image").is_none());
    }
}

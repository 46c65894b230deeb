//! Telegram Bot API notifier

use async_trait::async_trait;
use serde::Serialize;
use showroom_common::types::ConnectionRequest;
use std::time::Duration;

use super::{Notifier, NotifyError};
use crate::config::TelegramConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: String,
    parse_mode: &'static str,
}

pub struct TelegramNotifier {
    client: reqwest::Client,
    config: TelegramConfig,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.config.api_base.trim_end_matches('/'),
            self.config.bot_token
        )
    }
}

/// Escape text for Telegram's HTML parse mode
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render the notification body for a contact request
pub fn render_message(request: &ConnectionRequest) -> String {
    let received_at = request.created_at.format("%B %-d, %Y, %-I:%M %p UTC");

    format!(
        "<b>New Contact Request</b>\n\
         <b>Source:</b> {}\n\
         <b>Name:</b> {}\n\
         <b>Email:</b> {}\n\
         <b>Message:</b>\n{}\n\
         <b>Received at:</b> {}",
        escape_html(&request.source),
        escape_html(&request.name),
        escape_html(&request.email),
        escape_html(&request.message),
        received_at,
    )
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn notify(&self, request: &ConnectionRequest) -> Result<(), NotifyError> {
        let body = SendMessage {
            chat_id: &self.config.chat_id,
            text: render_message(request),
            parse_mode: "HTML",
        };

        let response = self.client.post(self.endpoint()).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn request(message: &str) -> ConnectionRequest {
        let at = Utc.with_ymd_and_hms(2026, 10, 16, 15, 4, 0).unwrap();
        ConnectionRequest {
            id: Uuid::new_v4(),
            source: "portfolio".into(),
            name: "Linus <T>".into(),
            email: "linus@example.com".into(),
            message: message.into(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">&</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_render_message() {
        let text = render_message(&request("Tea & biscuits?"));
        assert!(text.contains("<b>Name:</b> Linus &lt;T&gt;"));
        assert!(text.contains("Tea &amp; biscuits?"));
        assert!(text.ends_with("<b>Received at:</b> October 16, 2026, 3:04 PM UTC"));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let notifier = TelegramNotifier::new(TelegramConfig {
            api_base: "http://localhost:9000/".into(),
            bot_token: "123:abc".into(),
            chat_id: "42".into(),
        })
        .unwrap();
        assert_eq!(notifier.endpoint(), "http://localhost:9000/bot123:abc/sendMessage");
    }
}

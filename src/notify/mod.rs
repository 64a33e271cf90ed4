//! Notification delivery.
//!
//! Best-effort from the pipeline's perspective: a failed send is
//! logged here and never reaches the orchestrator's control flow.

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use tracing::error;

use crate::config::TelegramConfig;

const SEND_TIMEOUT_SECS: u64 = 15;

/// Sink for the per-cycle change report.
pub trait Notifier: Send + Sync {
    fn deliver(&self, text: &str) -> impl Future<Output = ()> + Send;
}

/// Telegram Bot API client. Sends the same message to the configured
/// plain chat and, when set, a forum-topic target with a thread id.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: Client,
    config: TelegramConfig,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(SEND_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, config })
    }

    fn send_url(&self) -> String {
        format!(
            "https://api.telegram.org/bot{}/sendMessage",
            self.config.bot_token
        )
    }

    async fn send_to(&self, chat_id: &str, thread_id: Option<i64>, text: &str) {
        let mut form = vec![
            ("chat_id".to_string(), chat_id.to_string()),
            ("text".to_string(), text.to_string()),
            ("parse_mode".to_string(), "HTML".to_string()),
        ];
        if let Some(thread_id) = thread_id {
            form.push(("message_thread_id".to_string(), thread_id.to_string()));
        }

        match self.client.post(self.send_url()).form(&form).send().await {
            Ok(response) if !response.status().is_success() => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                error!(chat_id = %chat_id, %status, body = %body, "Telegram send rejected");
            }
            Ok(_) => {}
            Err(e) => {
                error!(chat_id = %chat_id, error = %e, "Telegram send failed");
            }
        }
    }
}

impl Notifier for TelegramNotifier {
    async fn deliver(&self, text: &str) {
        if let (Some(chat), Some(thread)) = (
            self.config.topic_chat_id.as_deref(),
            self.config.topic_thread_id,
        ) {
            self.send_to(chat, Some(thread), text).await;
        }
        self.send_to(&self.config.chat_id, None, text).await;
    }
}

//! Notifier abstraction for relaying messages to the chat.
//!
//! Delivery is best-effort by design: the poll loop logs a failed send
//! and keeps its cadence instead of retrying or crashing.

use async_trait::async_trait;

use crate::error::{HomewatchError, Result};

const TELEGRAM_DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Trait for delivering a plain-text notification.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `text` to the configured destination.
    ///
    /// # Errors
    /// Returns `HomewatchError::Delivery` if the message could not be
    /// sent. Callers are expected to log and continue.
    async fn notify(&self, text: &str) -> Result<()>;
}

// ============================================================================
// Production Implementation using the Telegram Bot API
// ============================================================================

/// Notifier that posts messages through the Telegram Bot API.
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_base: String,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    /// Create a notifier for the given bot token and chat.
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self::with_api_base(TELEGRAM_DEFAULT_API_BASE, token, chat_id)
    }

    /// Create a notifier against a non-default API base (tests, proxies).
    pub fn with_api_base(
        api_base: impl Into<String>,
        token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into(),
            token: token.into(),
            chat_id: chat_id.into(),
        }
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    #[tracing::instrument(skip(self, text), fields(chat_id = %self.chat_id))]
    async fn notify(&self, text: &str) -> Result<()> {
        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
        });

        let response = self
            .client
            .post(self.api_url("sendMessage"))
            .json(&body)
            .send()
            .await
            .map_err(|e| HomewatchError::Delivery(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(HomewatchError::Delivery(format!(
                "telegram API returned HTTP {}: {detail}",
                status.as_u16()
            )));
        }

        tracing::info!(message = %text, "Notification delivered");
        Ok(())
    }
}

// ============================================================================
// Test/Mock Implementation
// ============================================================================

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

/// Mock notifier for testing.
///
/// Records every attempted message and can be primed with failures that
/// are consumed in FIFO order before sends succeed again.
#[derive(Clone, Default)]
pub struct MockNotifier {
    attempts: Arc<Mutex<Vec<String>>>,
    delivered: Arc<Mutex<Vec<String>>>,
    failures: Arc<Mutex<VecDeque<String>>>,
}

impl MockNotifier {
    /// Create a new mock notifier that accepts every message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prime the next `notify` call to fail with the given reason.
    pub fn push_failure(&self, reason: impl Into<String>) {
        self.failures.lock().push_back(reason.into());
    }

    /// Every message `notify` was called with, in order.
    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().clone()
    }

    /// Messages that were accepted, in order.
    pub fn delivered(&self) -> Vec<String> {
        self.delivered.lock().clone()
    }

    /// Number of accepted messages.
    pub fn delivered_count(&self) -> usize {
        self.delivered.lock().len()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, text: &str) -> Result<()> {
        self.attempts.lock().push(text.to_string());

        if let Some(reason) = self.failures.lock().pop_front() {
            return Err(HomewatchError::Delivery(reason));
        }

        self.delivered.lock().push(text.to_string());
        Ok(())
    }
}

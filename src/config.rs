//! Configuration for the poller and its collaborators.

use std::time::Duration;

use crate::error::{HomewatchError, Result};

/// Status endpoint queried by the default configuration.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Environment variable holding the review-API token.
pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
/// Environment variable holding the Telegram bot token.
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
/// Environment variable holding the destination chat id.
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Opaque credentials for the two external collaborators.
///
/// All three values are required; the process refuses to start without
/// them.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Bearer token for the homework-review API.
    pub practicum_token: String,
    /// Bot token for the Telegram API.
    pub telegram_token: String,
    /// Chat the notifications are delivered to.
    pub telegram_chat_id: String,
}

impl Credentials {
    /// Read credentials from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through a lookup function.
    ///
    /// Every missing or empty variable is collected so the startup log
    /// names all of them at once. An empty value counts as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut require = |name: &'static str| match lookup(name) {
            Some(value) if !value.is_empty() => Some(value),
            _ => {
                missing.push(name);
                None
            }
        };

        let practicum_token = require(PRACTICUM_TOKEN_VAR);
        let telegram_token = require(TELEGRAM_TOKEN_VAR);
        let telegram_chat_id = require(TELEGRAM_CHAT_ID_VAR);

        match (practicum_token, telegram_token, telegram_chat_id) {
            (Some(practicum_token), Some(telegram_token), Some(telegram_chat_id)) => Ok(Self {
                practicum_token,
                telegram_token,
                telegram_chat_id,
            }),
            _ => Err(HomewatchError::Config(missing.join(", "))),
        }
    }
}

/// Configuration for the poll loop.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Status endpoint to query.
    pub endpoint: String,

    /// How long to sleep between cycles.
    pub poll_interval: Duration,

    /// Timeout for each individual status request.
    pub request_timeout: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            poll_interval: Duration::from_secs(600),
            request_timeout: Duration::from_secs(30),
        }
    }
}

//! Fetcher abstraction for querying the homework-review API.
//!
//! This module defines the `StatusFetcher` trait to abstract the status
//! query, enabling testability with a mock implementation.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Result, TransportError};

/// Trait for querying homework statuses updated since a time cursor.
///
/// This abstraction allows for different implementations (production
/// vs. testing) and makes the poll loop testable without real HTTP
/// calls.
#[async_trait]
pub trait StatusFetcher: Send + Sync {
    /// Fetch the raw status payload for updates since `from_date`.
    ///
    /// # Errors
    /// Returns a transport error if the request fails on the network,
    /// the endpoint answers with a non-success code (5xx is tagged
    /// separately as a service outage), or the body is not JSON.
    async fn fetch(&self, from_date: i64) -> Result<Value>;
}

// ============================================================================
// Production Implementation using reqwest
// ============================================================================

/// Production fetcher using reqwest.
///
/// Queries the review API with an `Authorization: OAuth <token>` header
/// and a `from_date` query parameter.
pub struct ReqwestStatusFetcher {
    client: reqwest::Client,
    endpoint: String,
    token: String,
    timeout: Duration,
}

impl ReqwestStatusFetcher {
    /// Create a new reqwest-based fetcher.
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            token: token.into(),
            timeout,
        }
    }
}

#[async_trait]
impl StatusFetcher for ReqwestStatusFetcher {
    #[tracing::instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch(&self, from_date: i64) -> Result<Value> {
        tracing::debug!(from_date, "Requesting homework statuses");

        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Status request failed");
                TransportError::Network(e)
            })?;

        let status = response.status();
        if status.is_server_error() {
            return Err(TransportError::ServerError(status.as_u16()).into());
        }
        if !status.is_success() {
            return Err(TransportError::UnexpectedStatus(status.as_u16()).into());
        }

        let payload = response
            .json::<Value>()
            .await
            .map_err(TransportError::MalformedBody)?;

        tracing::debug!(status = status.as_u16(), "Homework statuses received");
        Ok(payload)
    }
}

// ============================================================================
// Test/Mock Implementation
// ============================================================================

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

/// Mock fetcher for testing.
///
/// Returns queued responses in FIFO order and records the cursor of
/// every call, without making actual HTTP requests.
///
/// # Example
/// ```ignore
/// let mock = MockStatusFetcher::new();
/// mock.push_response(Ok(serde_json::json!({"homeworks": []})));
/// let payload = mock.fetch(0).await?;
/// assert_eq!(mock.calls(), vec![0]);
/// ```
#[derive(Clone, Default)]
pub struct MockStatusFetcher {
    responses: Arc<Mutex<VecDeque<Result<Value>>>>,
    calls: Arc<Mutex<Vec<i64>>>,
}

impl MockStatusFetcher {
    /// Create a new mock fetcher with no queued responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response. Responses are consumed in FIFO order.
    pub fn push_response(&self, response: Result<Value>) {
        self.responses.lock().push_back(response);
    }

    /// Cursors of all calls made to this fetcher, in order.
    pub fn calls(&self) -> Vec<i64> {
        self.calls.lock().clone()
    }

    /// Number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl StatusFetcher for MockStatusFetcher {
    async fn fetch(&self, from_date: i64) -> Result<Value> {
        self.calls.lock().push(from_date);

        match self.responses.lock().pop_front() {
            Some(response) => response,
            None => Err(crate::error::HomewatchError::Other(anyhow::anyhow!(
                "no mock response queued for from_date {from_date}"
            ))),
        }
    }
}

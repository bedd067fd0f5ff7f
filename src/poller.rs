//! Poll loop that relays homework-status changes to the chat.

use std::sync::Arc;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::catalog::StatusCatalog;
use crate::config::PollerConfig;
use crate::error::{FailureClass, HomewatchError, Result};
use crate::format::render_status;
use crate::http::StatusFetcher;
use crate::notify::Notifier;
use crate::response::validate_response;

/// Counters tracked across the poller's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollerStats {
    /// Cycles run, successful or not.
    pub cycles_completed: u64,
    /// Status notifications accepted by the notifier.
    pub notifications_sent: u64,
    /// Failures that were relayed to the chat as a notice.
    pub failures_reported: u64,
}

/// Poller that periodically queries the review API and notifies the chat.
///
/// The poller owns the time cursor and is the single place where
/// failures are classified: a failed cycle is logged (and, for
/// reportable kinds, relayed to the chat) and the loop keeps its fixed
/// cadence. Nothing that happens inside a cycle terminates the process.
pub struct Poller<F, N>
where
    F: StatusFetcher,
    N: Notifier,
{
    fetcher: Arc<F>,
    notifier: Arc<N>,
    catalog: StatusCatalog,
    config: PollerConfig,
    cursor: i64,
    shutdown: CancellationToken,
    stats: PollerStats,
}

impl<F, N> Poller<F, N>
where
    F: StatusFetcher,
    N: Notifier,
{
    /// Create a new poller with the cursor set to the current time.
    pub fn new(
        fetcher: Arc<F>,
        notifier: Arc<N>,
        catalog: StatusCatalog,
        config: PollerConfig,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            fetcher,
            notifier,
            catalog,
            config,
            cursor: Utc::now().timestamp(),
            shutdown,
            stats: PollerStats::default(),
        }
    }

    /// Override the initial cursor (Unix seconds).
    pub fn with_cursor(mut self, cursor: i64) -> Self {
        self.cursor = cursor;
        self
    }

    /// Current cursor (Unix seconds).
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Lifetime counters.
    pub fn stats(&self) -> PollerStats {
        self.stats
    }

    /// Run the poll loop until the shutdown token is cancelled.
    ///
    /// Cancellation also interrupts the inter-cycle sleep, so shutdown
    /// is prompt even with a long interval.
    #[tracing::instrument(skip(self), fields(endpoint = %self.config.endpoint))]
    pub async fn run(mut self) -> Result<()> {
        tracing::info!(
            interval_s = self.config.poll_interval.as_secs(),
            "Poller starting"
        );

        loop {
            if self.shutdown.is_cancelled() {
                tracing::info!("Shutdown signal received, stopping poller");
                break;
            }

            self.run_cycle().await;

            tokio::select! {
                _ = tokio::time::sleep(self.config.poll_interval) => {}
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Shutdown signal received, stopping poller");
                    break;
                }
            }
        }

        tracing::info!(
            cycles = self.stats.cycles_completed,
            notifications = self.stats.notifications_sent,
            "Poller stopped"
        );
        Ok(())
    }

    /// Run one poll cycle: fetch, validate, notify, classify, advance.
    ///
    /// The cursor moves to "now" whatever the outcome, so a persistent
    /// outage does not tighten the poll interval into a retry storm.
    pub async fn run_cycle(&mut self) {
        match self.poll_once().await {
            Ok(sent) => {
                tracing::debug!(notifications = sent, "Cycle completed");
            }
            Err(err) => match err.classification() {
                FailureClass::Reportable => {
                    tracing::error!(error = %err, "Cycle failed, relaying failure notice");
                    self.stats.failures_reported += 1;
                    self.report_failure(&err).await;
                }
                // Delivery failures and anything unclassified stay
                // between us and the log.
                FailureClass::Silent | FailureClass::Fatal => {
                    tracing::error!(error = %err, "Cycle failed");
                }
            },
        }

        self.stats.cycles_completed += 1;
        self.cursor = Utc::now().timestamp();
    }

    async fn poll_once(&mut self) -> Result<usize> {
        let payload = self.fetcher.fetch(self.cursor).await?;
        let records = validate_response(&payload)?;

        if records.is_empty() {
            tracing::debug!("No new homework statuses");
            return Ok(0);
        }

        // Records are notified in the order the server returned them.
        let mut sent = 0;
        for record in &records {
            let message = render_status(record, &self.catalog)?;
            match self.notifier.notify(&message).await {
                Ok(()) => {
                    sent += 1;
                    self.stats.notifications_sent += 1;
                }
                Err(err) => {
                    tracing::error!(error = %err, "Failed to deliver notification");
                }
            }
        }

        Ok(sent)
    }

    /// Best-effort failure notice to the chat. A failed send is logged
    /// and dropped.
    async fn report_failure(&self, err: &HomewatchError) {
        let notice = format!("Сбой в работе программы: {err}");
        if let Err(delivery) = self.notifier.notify(&notice).await {
            tracing::error!(error = %delivery, "Failed to deliver failure notice");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockStatusFetcher;
    use crate::notify::MockNotifier;
    use serde_json::json;

    fn build_poller(
        fetcher: &Arc<MockStatusFetcher>,
        notifier: &Arc<MockNotifier>,
    ) -> Poller<MockStatusFetcher, MockNotifier> {
        Poller::new(
            fetcher.clone(),
            notifier.clone(),
            StatusCatalog::default(),
            PollerConfig::default(),
            CancellationToken::new(),
        )
        .with_cursor(0)
    }

    #[tokio::test]
    async fn test_cycle_uses_cursor_as_from_date() {
        let fetcher = Arc::new(MockStatusFetcher::new());
        let notifier = Arc::new(MockNotifier::new());
        fetcher.push_response(Ok(json!({"homeworks": []})));

        let mut poller = build_poller(&fetcher, &notifier).with_cursor(1_700_000_000);
        poller.run_cycle().await;

        assert_eq!(fetcher.calls(), vec![1_700_000_000]);
    }

    #[tokio::test]
    async fn test_cursor_advances_even_when_cycle_fails() {
        let fetcher = Arc::new(MockStatusFetcher::new());
        let notifier = Arc::new(MockNotifier::new());
        fetcher.push_response(Ok(json!("not a mapping")));

        let mut poller = build_poller(&fetcher, &notifier);
        poller.run_cycle().await;

        assert!(poller.cursor() > 0);
        assert_eq!(poller.stats().cycles_completed, 1);
    }

    #[tokio::test]
    async fn test_stats_count_sent_notifications() {
        let fetcher = Arc::new(MockStatusFetcher::new());
        let notifier = Arc::new(MockNotifier::new());
        fetcher.push_response(Ok(json!({"homeworks": [
            {"homework_name": "hw1", "status": "approved"},
            {"homework_name": "hw2", "status": "rejected"},
        ]})));

        let mut poller = build_poller(&fetcher, &notifier);
        poller.run_cycle().await;

        let stats = poller.stats();
        assert_eq!(stats.notifications_sent, 2);
        assert_eq!(stats.failures_reported, 0);
    }
}

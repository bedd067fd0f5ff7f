//! Error types for the homework-status poller.

use thiserror::Error;

/// Result type alias using the homewatch error type.
pub type Result<T> = std::result::Result<T, HomewatchError>;

/// Transport-level failure, tagged by status-code class.
///
/// A 5xx answer means the status endpoint itself is down and is kept
/// distinct from other non-success codes.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Request never produced a response (DNS, connect, timeout).
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered with a server error (5xx).
    #[error("status endpoint unavailable (HTTP {0})")]
    ServerError(u16),

    /// The endpoint answered with a non-success, non-5xx code.
    #[error("unexpected response status (HTTP {0})")]
    UnexpectedStatus(u16),

    /// The endpoint answered 2xx but the body was not valid JSON.
    #[error("malformed response body: {0}")]
    MalformedBody(#[source] reqwest::Error),
}

/// Main error type for the poller.
#[derive(Error, Debug)]
pub enum HomewatchError {
    /// The API payload does not have the expected shape
    #[error("malformed API payload: {0}")]
    Schema(String),

    /// Fetching the homework statuses failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A homework carries a status code the catalog does not document
    #[error("undocumented homework status '{0}'")]
    UnknownStatus(String),

    /// Sending a notification failed
    #[error("notification delivery failed: {0}")]
    Delivery(String),

    /// A required credential is missing at startup
    #[error("missing required environment variable(s): {0}")]
    Config(String),

    /// General error from anyhow
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// What the poll loop does with a failed cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Logged and relayed to the chat as a best-effort failure notice.
    Reportable,
    /// Logged only; the cycle ends normally.
    Silent,
    /// Terminates the process. Only possible before the loop starts.
    Fatal,
}

impl HomewatchError {
    /// Classify this failure for the poll-loop boundary.
    ///
    /// Every kind except `Config` is recoverable: the cursor still
    /// advances and the next cycle runs on schedule.
    pub fn classification(&self) -> FailureClass {
        match self {
            HomewatchError::Schema(_)
            | HomewatchError::Transport(_)
            | HomewatchError::UnknownStatus(_) => FailureClass::Reportable,
            HomewatchError::Delivery(_) | HomewatchError::Other(_) => FailureClass::Silent,
            HomewatchError::Config(_) => FailureClass::Fatal,
        }
    }

    /// True if the failure should also be relayed to the chat.
    pub fn is_reportable(&self) -> bool {
        self.classification() == FailureClass::Reportable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_failures_are_reportable() {
        let err = HomewatchError::Transport(TransportError::ServerError(503));
        assert_eq!(err.classification(), FailureClass::Reportable);

        let err = HomewatchError::Transport(TransportError::UnexpectedStatus(404));
        assert_eq!(err.classification(), FailureClass::Reportable);
    }

    #[test]
    fn test_schema_and_unknown_status_are_reportable() {
        assert!(HomewatchError::Schema("not a mapping".into()).is_reportable());
        assert!(HomewatchError::UnknownStatus("pending".into()).is_reportable());
    }

    #[test]
    fn test_delivery_failure_is_silent() {
        let err = HomewatchError::Delivery("chat unreachable".into());
        assert_eq!(err.classification(), FailureClass::Silent);
        assert!(!err.is_reportable());
    }

    #[test]
    fn test_unclassified_failure_is_silent() {
        let err = HomewatchError::Other(anyhow::anyhow!("surprise"));
        assert_eq!(err.classification(), FailureClass::Silent);
    }

    #[test]
    fn test_missing_config_is_fatal() {
        let err = HomewatchError::Config("TELEGRAM_CHAT_ID".into());
        assert_eq!(err.classification(), FailureClass::Fatal);
    }

    #[test]
    fn test_server_error_display_mentions_code() {
        let err = TransportError::ServerError(503);
        assert!(err.to_string().contains("503"));
    }
}

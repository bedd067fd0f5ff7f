//! Polling notifier for homework-review status changes.
//!
//! This crate polls a remote homework-review API with a time cursor and
//! relays human-readable status notifications to a Telegram chat. The
//! poll loop validates each payload, translates status codes through a
//! catalog, and classifies every failure as reportable, silent, or
//! fatal. A failed cycle never breaks the polling cadence.
//!
//! The HTTP transport and the messaging client live behind the
//! `StatusFetcher` and `Notifier` traits; mock implementations make the
//! loop testable without the network.

pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod http;
pub mod notify;
pub mod poller;
pub mod response;

// Re-export commonly used types
pub use catalog::StatusCatalog;
pub use config::{Credentials, PollerConfig};
pub use error::{FailureClass, HomewatchError, Result, TransportError};
pub use format::render_status;
pub use http::{MockStatusFetcher, ReqwestStatusFetcher, StatusFetcher};
pub use notify::{MockNotifier, Notifier, TelegramNotifier};
pub use poller::{Poller, PollerStats};
pub use response::{ApiResponse, HomeworkRecord, validate_response};

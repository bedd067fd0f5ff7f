use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use homewatch::StatusCatalog;
use homewatch::config::{Credentials, PollerConfig};
use homewatch::http::ReqwestStatusFetcher;
use homewatch::notify::TelegramNotifier;
use homewatch::poller::Poller;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "homewatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Missing credentials are the one fatal failure, and only here,
    // before any polling starts.
    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(err) => {
            tracing::error!(error = %err, "Required credentials are not configured, refusing to start");
            std::process::exit(1);
        }
    };

    let config = PollerConfig::default();
    let fetcher = Arc::new(ReqwestStatusFetcher::new(
        config.endpoint.clone(),
        credentials.practicum_token.clone(),
        config.request_timeout,
    ));
    let notifier = Arc::new(TelegramNotifier::new(
        credentials.telegram_token.clone(),
        credentials.telegram_chat_id.clone(),
    ));

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for shutdown signal");
            return;
        }
        tracing::info!("Shutdown signal received");
        signal_token.cancel();
    });

    let poller = Poller::new(
        fetcher,
        notifier,
        StatusCatalog::default(),
        config,
        shutdown,
    );

    if let Err(err) = poller.run().await {
        tracing::error!(error = %err, "Poller terminated unexpectedly");
        std::process::exit(1);
    }
}

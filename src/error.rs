//! Error types for webwatch.

/// Result type alias for webwatch operations.
pub type Result<T> = std::result::Result<T, WatchError>;

/// Errors that can occur while watching targets and delivering notifications.
///
/// None of these are fatal to the run loop: fetch and delivery errors are
/// logged and the affected target or endpoint is skipped for the cycle.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// Failed to load or parse the configuration file.
    #[error("Failed to load configuration: {0}")]
    ConfigError(String),

    /// A network request to a watched target failed.
    #[error("Failed to fetch target: {0}")]
    FetchError(String),

    /// A watched target answered with a non-success status code.
    #[error("Target returned status {status}: {url}")]
    FetchStatus {
        /// The HTTP status code returned.
        status: u16,
        /// The target URL.
        url: String,
    },

    /// Delivering a notification to a webhook endpoint failed.
    #[error("Webhook delivery failed: {0}")]
    DeliveryError(String),

    /// The watcher could not be constructed from the given settings.
    #[error("Failed to build watcher: {0}")]
    BuildError(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

//! The refresh cycle and its scheduler.

use crate::config::{DEFAULT_DEBOUNCE_SECS, DEFAULT_INTERVAL_SECS, WatchConfig};
use crate::detect::ChangeDetector;
use crate::error::{Result, WatchError};
use crate::notify::WebhookNotifier;
use crate::store::{MemoryStore, ObservationStore};
use chrono::Local;
use futures::future::join_all;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

/// Default timeout for each HTTP request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Watches a fixed set of URLs and notifies webhooks on detected changes.
///
/// Runs an unbounded sequence of refresh cycles: one immediately at startup,
/// then one after every inter-cycle delay. Within a cycle all targets are
/// checked concurrently; any change fans out to every webhook before the
/// next delay starts.
///
/// # Examples
///
/// ```rust,no_run
/// use webwatch::prelude::*;
/// use std::time::Duration;
///
/// # async fn example() -> webwatch::error::Result<()> {
/// let watcher = UrlWatcher::builder()
///     .with_target("https://example.com/releases.html")
///     .with_webhook("https://hooks.example.com/T000/B000")
///     .with_interval(Duration::from_secs(300))
///     .build()?;
///
/// watcher.run_until(async {
///     let _ = tokio::signal::ctrl_c().await;
/// })
/// .await;
/// # Ok(())
/// # }
/// ```
pub struct UrlWatcher {
    targets: Vec<String>,
    detector: ChangeDetector,
    notifier: WebhookNotifier,
    interval: Duration,
}

impl UrlWatcher {
    /// Create a new builder for constructing a watcher.
    pub fn builder() -> UrlWatcherBuilder {
        UrlWatcherBuilder::new()
    }

    /// The URLs this watcher checks each cycle.
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// The webhook endpoints notified on detected changes.
    pub fn webhooks(&self) -> &[String] {
        self.notifier.endpoints()
    }

    /// The delay between refresh cycles.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run refresh cycles forever.
    ///
    /// Fixed-delay scheduling: the inter-cycle sleep starts only after the
    /// previous cycle (including its notification fan-out) has completed.
    pub async fn run(&self) {
        loop {
            self.refresh().await;
            sleep(self.interval).await;
        }
    }

    /// Run refresh cycles until `shutdown` completes.
    ///
    /// Cancellation abandons any in-flight checks and deliveries immediately
    /// and logs a stop message.
    pub async fn run_until<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            () = self.run() => {}
            () = shutdown => info!("Stopped"),
        }
    }

    /// Perform one refresh cycle: check every target, notify on changes.
    ///
    /// Targets are checked concurrently and independently; one target's
    /// failure or slowness never delays or fails the others. With no targets
    /// configured this is a no-op.
    pub async fn refresh(&self) {
        if self.targets.is_empty() {
            return;
        }

        info!(
            "Checking {} target(s): {}",
            self.targets.len(),
            Local::now().format("%Y/%m/%d %H:%M")
        );

        let checks = self.targets.iter().map(|target| self.check_and_notify(target));
        join_all(checks).await;
    }

    async fn check_and_notify(&self, target: &str) {
        if let Some(event) = self.detector.check(target).await {
            self.notifier.notify(&event).await;
        }
    }
}

/// Builder for constructing a [`UrlWatcher`].
///
/// # Examples
///
/// ```rust,no_run
/// use webwatch::prelude::*;
/// use std::time::Duration;
///
/// # fn example() -> webwatch::error::Result<()> {
/// let watcher = UrlWatcher::builder()
///     .with_target("https://example.com/news")
///     .with_webhook("https://hooks.example.com/abc")
///     .with_debounce(Duration::from_secs(1800))
///     .with_request_timeout(Duration::from_secs(5))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct UrlWatcherBuilder {
    targets: Vec<String>,
    webhooks: Vec<String>,
    interval: Duration,
    debounce: Duration,
    request_timeout: Duration,
    store: Option<Arc<dyn ObservationStore>>,
}

impl UrlWatcherBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            webhooks: Vec::new(),
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            debounce: Duration::from_secs(DEFAULT_DEBOUNCE_SECS),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            store: None,
        }
    }

    /// Seed the builder from a loaded [`WatchConfig`].
    pub fn from_config(config: WatchConfig) -> Self {
        Self::new()
            .with_targets(config.urls)
            .with_webhooks(config.webhooks)
            .with_interval(Duration::from_secs(config.interval_secs))
            .with_debounce(Duration::from_secs(config.debounce_secs))
    }

    /// Add one URL to watch.
    pub fn with_target(mut self, url: impl Into<String>) -> Self {
        self.targets.push(url.into());
        self
    }

    /// Add several URLs to watch.
    pub fn with_targets<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets.extend(urls.into_iter().map(Into::into));
        self
    }

    /// Add one webhook endpoint to notify on detected changes.
    pub fn with_webhook(mut self, url: impl Into<String>) -> Self {
        self.webhooks.push(url.into());
        self
    }

    /// Add several webhook endpoints.
    pub fn with_webhooks<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.webhooks.extend(urls.into_iter().map(Into::into));
        self
    }

    /// Set the delay between refresh cycles.
    ///
    /// Default is 300 seconds.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the debounce window for the timestamp strategy.
    ///
    /// A newer `Last-Modified` value only counts as a change once it is more
    /// than this far past the stored reference point. Default is 1800
    /// seconds.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set the per-request HTTP timeout.
    ///
    /// Default is 10 seconds.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Use a custom observation store instead of the in-memory default.
    pub fn with_store(mut self, store: Arc<dyn ObservationStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the watcher.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<UrlWatcher> {
        let client = Client::builder()
            .timeout(self.request_timeout)
            .build()
            .map_err(|e| WatchError::BuildError(format!("Failed to create HTTP client: {e}")))?;

        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()));

        Ok(UrlWatcher {
            targets: self.targets,
            detector: ChangeDetector::new(client.clone(), store, self.debounce),
            notifier: WebhookNotifier::new(client, self.webhooks),
            interval: self.interval,
        })
    }
}

impl Default for UrlWatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let watcher = UrlWatcher::builder().build().unwrap();
        assert!(watcher.targets().is_empty());
        assert_eq!(watcher.interval(), Duration::from_secs(300));
    }

    #[test]
    fn test_builder_collects_targets_and_webhooks() {
        let watcher = UrlWatcher::builder()
            .with_target("https://a.example")
            .with_targets(vec!["https://b.example", "https://c.example"])
            .with_webhook("https://hooks.example.com/1")
            .with_interval(Duration::from_secs(60))
            .build()
            .unwrap();

        assert_eq!(watcher.targets().len(), 3);
        assert_eq!(watcher.interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_builder_from_config() {
        let config = WatchConfig {
            urls: vec!["https://a.example".to_string()],
            webhooks: vec!["https://hooks.example.com/1".to_string()],
            interval_secs: 120,
            debounce_secs: 600,
        };

        let watcher = UrlWatcherBuilder::from_config(config).build().unwrap();
        assert_eq!(watcher.targets(), ["https://a.example"]);
        assert_eq!(watcher.interval(), Duration::from_secs(120));
    }

    #[tokio::test]
    async fn test_refresh_with_no_targets_is_a_noop() {
        let watcher = UrlWatcher::builder().build().unwrap();
        watcher.refresh().await;
    }

    #[tokio::test]
    async fn test_run_until_stops_on_shutdown() {
        let watcher = UrlWatcher::builder()
            .with_interval(Duration::from_secs(3600))
            .build()
            .unwrap();

        // An already-complete shutdown future stops the loop after at most
        // one (empty) cycle.
        tokio::time::timeout(Duration::from_secs(1), watcher.run_until(async {}))
            .await
            .expect("watcher did not stop on shutdown");
    }
}

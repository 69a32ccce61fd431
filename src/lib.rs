//! # webwatch
//!
//! Watches a set of URLs for changes and notifies webhook endpoints when a
//! change is detected.
//!
//! ## Overview
//!
//! `webwatch` runs an unbounded loop of refresh cycles. Each cycle checks
//! every watched URL concurrently, deciding "changed" per URL with one of
//! two strategies:
//!
//! - **timestamp strategy**: compare `Last-Modified` header values, with a
//!   debounce window so a burst of small updates registers once;
//! - **content strategy**: when the server sends no usable `Last-Modified`,
//!   normalize the page text and diff it line by line against the previous
//!   snapshot.
//!
//! Detected changes fan out concurrently to every configured webhook as a
//! `{"content": "…"}` JSON POST. All failures — fetch errors, parse errors,
//! delivery errors — terminate in a log line; nothing is fatal to the loop.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use webwatch::prelude::*;
//! use std::time::Duration;
//!
//! # async fn example() -> webwatch::error::Result<()> {
//! let watcher = UrlWatcher::builder()
//!     .with_target("https://example.com/releases.html")
//!     .with_webhook("https://hooks.example.com/T000/B000")
//!     .with_interval(Duration::from_secs(300))
//!     .with_debounce(Duration::from_secs(1800))
//!     .build()?;
//!
//! // One cycle immediately, then one per interval, until ctrl-c.
//! watcher.run_until(async {
//!     let _ = tokio::signal::ctrl_c().await;
//! })
//! .await;
//! # Ok(())
//! # }
//! ```
//!
//! ## State
//!
//! Per-target state lives in an [`store::ObservationStore`] — an in-memory
//! map by default, injectable for tests or a future persistence backend.
//! Nothing survives a restart.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod config;
pub mod detect;
pub mod error;
pub mod notify;
pub mod store;
pub mod watcher;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::config::WatchConfig;
    pub use crate::detect::{ChangeDetector, ChangeEvent};
    pub use crate::error::{Result, WatchError};
    pub use crate::notify::WebhookNotifier;
    pub use crate::store::{MemoryStore, Observation, ObservationStore};
    pub use crate::watcher::{UrlWatcher, UrlWatcherBuilder};
}

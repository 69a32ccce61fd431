//! Per-target change decisions.

use crate::detect::diff::{diff_lines, normalize};
use crate::detect::fetch::{FetchKind, Fetcher};
use crate::notify::{DISPLAY_FORMAT, display_zone};
use crate::store::{Observation, ObservationStore};
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// A detected change on one target.
///
/// Ephemeral: produced by the detector and handed straight to the notifier,
/// never persisted. `detected_at` is the server's `Last-Modified` value under
/// the timestamp strategy and the local wall clock under the content
/// strategy, which has no authoritative server timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    /// The watched URL that changed.
    pub target: String,
    /// When the change was detected.
    pub detected_at: DateTime<Utc>,
}

/// Decides whether a single target changed since its last observation.
///
/// One detector is shared by all targets; the per-target state lives in the
/// injected [`ObservationStore`]. Cycles are sequential, so no two checks of
/// the same target ever run concurrently.
pub struct ChangeDetector {
    fetcher: Fetcher,
    store: Arc<dyn ObservationStore>,
    debounce: Duration,
}

impl ChangeDetector {
    /// Create a detector over the given client, store, and debounce window.
    pub fn new(client: Client, store: Arc<dyn ObservationStore>, debounce: Duration) -> Self {
        Self {
            fetcher: Fetcher::new(client),
            store,
            debounce,
        }
    }

    /// Check one target, returning a change event if it changed.
    ///
    /// A fetch failure is logged and yields `None` without touching the
    /// store, so the target's last observation survives transient errors.
    pub async fn check(&self, target: &str) -> Option<ChangeEvent> {
        match self.fetcher.probe(target).await {
            Ok(FetchKind::LastModified(modified)) => self.check_timestamp(target, modified),
            Ok(FetchKind::Body(body)) => self.check_body(target, &body),
            Err(e) => {
                warn!("Failed to get {target}: {e}");
                None
            }
        }
    }

    /// Timestamp strategy: debounced comparison of `Last-Modified` values.
    ///
    /// The stored timestamp is overwritten only when an event is emitted, so
    /// the debounce reference point cannot erode through a stream of small
    /// updates that each stay inside the window.
    fn check_timestamp(&self, target: &str, modified: DateTime<Utc>) -> Option<ChangeEvent> {
        info!(
            "{} : {target}",
            modified.with_timezone(&display_zone()).format(DISPLAY_FORMAT)
        );

        match self.store.get(target) {
            Some(Observation::Timestamp(previous)) => {
                let elapsed = modified.signed_duration_since(previous);
                let tripped = elapsed
                    .to_std()
                    .is_ok_and(|elapsed| elapsed > self.debounce);
                if tripped {
                    self.store.put(target, Observation::Timestamp(modified));
                    Some(ChangeEvent {
                        target: target.to_string(),
                        detected_at: modified,
                    })
                } else {
                    None
                }
            }
            // First observation, or the server switched strategies on us:
            // record the baseline, emit nothing.
            Some(Observation::TextSnapshot(_)) | None => {
                self.store.put(target, Observation::Timestamp(modified));
                None
            }
        }
    }

    /// Content strategy: normalize and diff against the stored snapshot.
    ///
    /// The snapshot is always overwritten after comparison; the content
    /// strategy does not debounce.
    fn check_body(&self, target: &str, body: &str) -> Option<ChangeEvent> {
        let normalized = normalize(body);
        let previous = self.store.get(target);
        self.store
            .put(target, Observation::TextSnapshot(normalized.clone()));

        match previous {
            Some(Observation::TextSnapshot(snapshot)) => {
                let changes = diff_lines(&snapshot, &normalized);
                if changes.is_empty() {
                    None
                } else {
                    info!("{} line(s) changed on {target}", changes.len());
                    Some(ChangeEvent {
                        target: target.to_string(),
                        detected_at: Utc::now(),
                    })
                }
            }
            Some(Observation::Timestamp(_)) | None => {
                info!("Text baseline recorded for {target}");
                None
            }
        }
    }
}

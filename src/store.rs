//! Observation storage for watched targets.
//!
//! The store keeps the last-known state of every target so the detector can
//! decide whether a fetch represents a change. State is memory-resident only
//! and lives exactly as long as the process.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::RwLock;

/// Last-known state of a watched target.
///
/// A target is associated with at most one observation kind at a time, fixed
/// by whichever strategy its first successful fetch used. If a server later
/// changes what it offers (e.g. starts sending `Last-Modified`), the detector
/// re-baselines the target with the new kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Observation {
    /// Last value of the `Last-Modified` response header, parsed as UTC.
    Timestamp(DateTime<Utc>),
    /// Whitespace-normalized page text, used when no reliable timestamp is
    /// available.
    TextSnapshot(String),
}

/// Storage abstraction mapping target URLs to their last observation.
///
/// Written only by the detector, one write per target per cycle. The default
/// implementation is [`MemoryStore`]; tests (or a future persistence backend)
/// can inject their own.
pub trait ObservationStore: Send + Sync {
    /// Get the last observation recorded for a target, if any.
    ///
    /// An absent entry means the target has never been successfully observed.
    fn get(&self, target: &str) -> Option<Observation>;

    /// Record an observation for a target, replacing any previous one.
    fn put(&self, target: &str, observation: Observation);

    /// Number of targets with a recorded observation.
    fn len(&self) -> usize;

    /// Whether any target has been observed yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory observation store backed by a `RwLock<HashMap>`.
///
/// Nothing is ever deleted during a run; entries are only created and
/// overwritten.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Observation>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ObservationStore for MemoryStore {
    fn get(&self, target: &str) -> Option<Observation> {
        self.entries.read().unwrap().get(target).cloned()
    }

    fn put(&self, target: &str, observation: Observation) {
        self.entries
            .write()
            .unwrap()
            .insert(target.to_string(), observation);
    }

    fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_empty_store() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("https://example.com"), None);
    }

    #[test]
    fn test_put_and_get() {
        let store = MemoryStore::new();
        let ts = Utc.with_ymd_and_hms(2021, 6, 1, 3, 0, 0).unwrap();

        store.put("https://example.com", Observation::Timestamp(ts));
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("https://example.com"),
            Some(Observation::Timestamp(ts))
        );
    }

    #[test]
    fn test_overwrite_replaces_kind() {
        let store = MemoryStore::new();
        let ts = Utc.with_ymd_and_hms(2021, 6, 1, 3, 0, 0).unwrap();

        store.put("https://example.com", Observation::Timestamp(ts));
        store.put(
            "https://example.com",
            Observation::TextSnapshot("body".to_string()),
        );

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("https://example.com"),
            Some(Observation::TextSnapshot("body".to_string()))
        );
    }

    #[test]
    fn test_targets_are_independent() {
        let store = MemoryStore::new();
        store.put("https://a.example", Observation::TextSnapshot("a".into()));
        store.put("https://b.example", Observation::TextSnapshot("b".into()));

        assert_eq!(store.len(), 2);
        assert_eq!(
            store.get("https://a.example"),
            Some(Observation::TextSnapshot("a".into()))
        );
    }
}

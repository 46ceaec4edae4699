//! Holds the most recently fetched station payload.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::model::StationObservations;

/// A payload together with the time it was fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub payload: StationObservations,
    pub fetched_at: DateTime<Utc>,
    /// Sample data served because the station couldn't be reached.
    /// Such snapshots are never stored.
    pub fallback: bool,
}

/// Shared handle to the last successful fetch.
///
/// Starts empty. Each successful fetch swaps in a whole new [`Snapshot`];
/// a snapshot is never modified in place. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct ObservationStore {
    inner: Arc<RwLock<Option<Snapshot>>>,
}

impl ObservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `payload` as the current snapshot, stamped with the current time.
    pub fn replace(&self, payload: StationObservations) -> Snapshot {
        self.replace_at(payload, Utc::now())
    }

    pub fn replace_at(&self, payload: StationObservations, fetched_at: DateTime<Utc>) -> Snapshot {
        let snapshot = Snapshot {
            payload,
            fetched_at,
            fallback: false,
        };
        *self.inner.write() = Some(snapshot.clone());
        tracing::debug!("Observation snapshot replaced at {}", fetched_at);
        snapshot
    }

    pub fn latest(&self) -> Option<Snapshot> {
        self.inner.read().clone()
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.inner.read().as_ref().map(|s| s.fetched_at)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_none()
    }
}

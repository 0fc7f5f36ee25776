//! Trend lifecycle tracking.
//!
//! Each identifier moves `unseen -> emerging -> confirmed` and never back.
//! Storage sits behind [`TrendStore`] so callers can swap the in-memory maps
//! for something persistent.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};

use crate::error::TrackerError;
use crate::predictor::get_trend_predictions;
use crate::types::{
    TrackedPhase, TrackedTrend, TrendCandidate, TrendPrediction, TrendScore, TrendSnapshot,
};

/// Snapshots required before promotion is considered (strictly more than).
const PROMOTION_MIN_HISTORY: usize = 5;
/// Trailing snapshots that must all clear [`PROMOTION_SCORE`].
const PROMOTION_WINDOW: usize = 3;
const PROMOTION_SCORE: f64 = 80.0;

/// Backing storage for tracked trends: two disjoint collections keyed by
/// identifier.
pub trait TrendStore: Send + Sync {
    /// Looks the identifier up in either collection.
    ///
    /// # Errors
    ///
    /// Implementation-defined storage failures.
    fn get(&self, identifier: &str) -> Result<Option<TrackedTrend>, TrackerError>;

    /// Inserts or replaces a trend in the collection named by its
    /// `current_phase`.
    ///
    /// # Errors
    ///
    /// Implementation-defined storage failures.
    fn put(&self, trend: TrackedTrend) -> Result<(), TrackerError>;

    /// Removes the identifier from emerging and files it under confirmed.
    ///
    /// # Errors
    ///
    /// [`TrackerError::Store`] if the identifier is not currently emerging.
    fn move_to_confirmed(&self, identifier: &str) -> Result<(), TrackerError>;

    /// All emerging trends, ordered by identifier.
    ///
    /// # Errors
    ///
    /// Implementation-defined storage failures.
    fn emerging(&self) -> Result<Vec<TrackedTrend>, TrackerError>;

    /// All confirmed trends, ordered by identifier.
    ///
    /// # Errors
    ///
    /// Implementation-defined storage failures.
    fn confirmed(&self) -> Result<Vec<TrackedTrend>, TrackerError>;
}

#[derive(Debug, Default)]
struct Collections {
    emerging: HashMap<String, TrackedTrend>,
    confirmed: HashMap<String, TrackedTrend>,
}

/// [`TrendStore`] over two hash maps behind one `RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryTrendStore {
    inner: RwLock<Collections>,
}

impl InMemoryTrendStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted(map: &HashMap<String, TrackedTrend>) -> Vec<TrackedTrend> {
    let mut trends: Vec<TrackedTrend> = map.values().cloned().collect();
    trends.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    trends
}

impl TrendStore for InMemoryTrendStore {
    fn get(&self, identifier: &str) -> Result<Option<TrackedTrend>, TrackerError> {
        let guard = self
            .inner
            .read()
            .map_err(|_| TrackerError::LockPoisoned("trend store"))?;
        Ok(guard
            .emerging
            .get(identifier)
            .or_else(|| guard.confirmed.get(identifier))
            .cloned())
    }

    fn put(&self, trend: TrackedTrend) -> Result<(), TrackerError> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| TrackerError::LockPoisoned("trend store"))?;
        let collections = &mut *guard;
        let (target, other) = match trend.current_phase {
            TrackedPhase::Emerging => (&mut collections.emerging, &mut collections.confirmed),
            TrackedPhase::Confirmed => (&mut collections.confirmed, &mut collections.emerging),
        };
        other.remove(&trend.identifier);
        target.insert(trend.identifier.clone(), trend);
        Ok(())
    }

    fn move_to_confirmed(&self, identifier: &str) -> Result<(), TrackerError> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| TrackerError::LockPoisoned("trend store"))?;
        let mut trend = guard
            .emerging
            .remove(identifier)
            .ok_or_else(|| TrackerError::Store(format!("{identifier} is not an emerging trend")))?;
        trend.current_phase = TrackedPhase::Confirmed;
        guard.confirmed.insert(identifier.to_string(), trend);
        Ok(())
    }

    fn emerging(&self) -> Result<Vec<TrackedTrend>, TrackerError> {
        let guard = self
            .inner
            .read()
            .map_err(|_| TrackerError::LockPoisoned("trend store"))?;
        Ok(sorted(&guard.emerging))
    }

    fn confirmed(&self) -> Result<Vec<TrackedTrend>, TrackerError> {
        let guard = self
            .inner
            .read()
            .map_err(|_| TrackerError::LockPoisoned("trend store"))?;
        Ok(sorted(&guard.confirmed))
    }
}

/// Records score snapshots per identifier and promotes sustained trends.
///
/// Calls for different identifiers proceed in parallel; calls for the same
/// identifier are serialized so no snapshot is lost between read and write.
#[derive(Debug, Default)]
pub struct TrendTracker<S = InMemoryTrendStore> {
    store: S,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl TrendTracker<InMemoryTrendStore> {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(InMemoryTrendStore::new())
    }
}

impl<S: TrendStore> TrendTracker<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// [`Self::track_trend_at`] stamped with the current time.
    ///
    /// # Errors
    ///
    /// See [`Self::track_trend_at`].
    pub fn track_trend(
        &self,
        identifier: &str,
        snapshot: TrendScore,
    ) -> Result<TrackedPhase, TrackerError> {
        self.track_trend_at(identifier, snapshot, Utc::now())
    }

    /// Appends a snapshot taken at `now` and returns the phase the trend is in
    /// afterwards.
    ///
    /// An unseen identifier starts as emerging with `first_seen = now`. An
    /// emerging trend is promoted once it holds more than five snapshots and
    /// the latest three all score above 80. Confirmed trends keep collecting
    /// history but are never demoted.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] if a lock is poisoned or the store fails.
    pub fn track_trend_at(
        &self,
        identifier: &str,
        snapshot: TrendScore,
        now: DateTime<Utc>,
    ) -> Result<TrackedPhase, TrackerError> {
        let lock = self.identifier_lock(identifier)?;
        let _guard = lock
            .lock()
            .map_err(|_| TrackerError::LockPoisoned("trend identifier"))?;

        let mut trend = self
            .store
            .get(identifier)?
            .unwrap_or_else(|| TrackedTrend::new(identifier, now));
        trend.history.push(TrendSnapshot {
            timestamp: now,
            metrics: snapshot,
        });

        let promote =
            trend.current_phase == TrackedPhase::Emerging && sustained_virality(&trend.history);
        let snapshots = trend.history.len();
        self.store.put(trend)?;

        if promote {
            self.store.move_to_confirmed(identifier)?;
            tracing::info!(identifier, snapshots, "trend confirmed");
            return Ok(TrackedPhase::Confirmed);
        }

        self.status(identifier)?
            .ok_or_else(|| TrackerError::Store(format!("{identifier} vanished after write")))
    }

    /// Tracks every candidate of an analysis under its identifier.
    ///
    /// # Errors
    ///
    /// Stops at the first failing [`Self::track_trend`].
    pub fn track_candidates(&self, candidates: &[TrendCandidate]) -> Result<(), TrackerError> {
        let now = Utc::now();
        for candidate in candidates {
            self.track_trend_at(&candidate.identifier, candidate.score.clone(), now)?;
        }
        Ok(())
    }

    /// Which collection the identifier is in, if it has been seen.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] if the store fails.
    pub fn status(&self, identifier: &str) -> Result<Option<TrackedPhase>, TrackerError> {
        Ok(self.store.get(identifier)?.map(|t| t.current_phase))
    }

    /// # Errors
    ///
    /// Returns [`TrackerError`] if the store fails.
    pub fn emerging_trends(&self) -> Result<Vec<TrackedTrend>, TrackerError> {
        self.store.emerging()
    }

    /// # Errors
    ///
    /// Returns [`TrackerError`] if the store fails.
    pub fn confirmed_trends(&self) -> Result<Vec<TrackedTrend>, TrackerError> {
        self.store.confirmed()
    }

    /// Forecasts for every emerging trend with enough history.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] if the store fails.
    pub fn predictions(&self, now: DateTime<Utc>) -> Result<Vec<TrendPrediction>, TrackerError> {
        get_trend_predictions(&self.store, now)
    }

    fn identifier_lock(&self, identifier: &str) -> Result<Arc<Mutex<()>>, TrackerError> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| TrackerError::LockPoisoned("identifier lock map"))?;
        Ok(Arc::clone(locks.entry(identifier.to_string()).or_default()))
    }
}

fn sustained_virality(history: &[TrendSnapshot]) -> bool {
    history.len() > PROMOTION_MIN_HISTORY
        && history[history.len() - PROMOTION_WINDOW..]
            .iter()
            .all(|s| s.metrics.viral_score > PROMOTION_SCORE)
}

#[cfg(test)]
#[path = "tracker_test.rs"]
mod tests;

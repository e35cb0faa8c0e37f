//! Shared rolling history of machine observations.
//!
//! The store is the only mutable state shared between machine workers.
//! A single coarse lock guards the whole mapping; every operation takes
//! it for the duration of one read or write only, never across a
//! pipeline cycle. Contention stays low because each machine writes
//! once per cycle.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rotorwatch_core::{FeatureSet, MachineId, Observation};

/// Per-machine rolling history: five time-aligned bounded sequences.
///
/// The sequences always have identical length; an observation is
/// appended to all five or none.
#[derive(Debug, Default)]
struct MachineHistory {
    health: VecDeque<f64>,
    anomaly: VecDeque<f64>,
    rul: VecDeque<f64>,
    timestamps: VecDeque<DateTime<Utc>>,
    features: VecDeque<FeatureSet>,
}

impl MachineHistory {
    fn push(&mut self, observation: Observation, capacity: usize) {
        if self.health.len() >= capacity {
            self.health.pop_front();
            self.anomaly.pop_front();
            self.rul.pop_front();
            self.timestamps.pop_front();
            self.features.pop_front();
        }
        self.health.push_back(observation.health);
        self.anomaly.push_back(observation.anomaly_score);
        self.rul.push_back(observation.rul);
        self.timestamps.push_back(observation.timestamp);
        self.features.push_back(observation.features);
    }

    fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            health: self.health.iter().copied().collect(),
            anomaly: self.anomaly.iter().copied().collect(),
            rul: self.rul.iter().copied().collect(),
            timestamps: self.timestamps.iter().copied().collect(),
            features: self.features.iter().cloned().collect(),
        }
    }

    fn latest(&self) -> Option<Observation> {
        Some(Observation {
            health: *self.health.back()?,
            anomaly_score: *self.anomaly.back()?,
            rul: *self.rul.back()?,
            timestamp: *self.timestamps.back()?,
            features: self.features.back()?.clone(),
        })
    }
}

/// An owned copy of one machine's history.
///
/// Snapshots are detached from the store: later `store` calls never
/// mutate a snapshot a caller already holds.
#[derive(Debug, Clone, Default)]
pub struct HistorySnapshot {
    /// Health index per cycle, oldest first.
    pub health: Vec<f64>,
    /// Anomaly score per cycle.
    pub anomaly: Vec<f64>,
    /// RUL estimate per cycle.
    pub rul: Vec<f64>,
    /// Capture timestamp per cycle.
    pub timestamps: Vec<DateTime<Utc>>,
    /// Feature snapshot per cycle.
    pub features: Vec<FeatureSet>,
}

impl HistorySnapshot {
    /// Number of observations in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.health.len()
    }

    /// Whether the snapshot holds no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.health.is_empty()
    }

    /// The most recently stored health index, if any.
    #[must_use]
    pub fn latest_health(&self) -> Option<f64> {
        self.health.last().copied()
    }
}

/// Concurrent, bounded-capacity store of per-machine observations.
///
/// Machines are registered explicitly from the deployment roster at
/// startup via [`ensure_machine`](Self::ensure_machine); `store` also
/// registers on first write so a late-added machine is never dropped.
#[derive(Debug)]
pub struct HistoryStore {
    capacity: usize,
    inner: Mutex<HashMap<MachineId, MachineHistory>>,
}

impl HistoryStore {
    /// Create a store retaining at most `capacity` observations per
    /// machine. A zero capacity is bumped to 1.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Register a machine with an empty history if not already present.
    pub fn ensure_machine(&self, machine_id: &MachineId) {
        self.inner
            .lock()
            .entry(machine_id.clone())
            .or_default();
    }

    /// Append one observation atomically across all five sequences.
    ///
    /// Evicts the oldest entry first once the machine is at capacity.
    pub fn store(&self, machine_id: &MachineId, observation: Observation) {
        let mut inner = self.inner.lock();
        inner
            .entry(machine_id.clone())
            .or_default()
            .push(observation, self.capacity);
    }

    /// An owned snapshot of a machine's history.
    ///
    /// Unknown machines yield an empty snapshot, not an error.
    #[must_use]
    pub fn get_history(&self, machine_id: &MachineId) -> HistorySnapshot {
        self.inner
            .lock()
            .get(machine_id)
            .map_or_else(HistorySnapshot::default, MachineHistory::snapshot)
    }

    /// The most recent observation for a machine, if any.
    #[must_use]
    pub fn latest(&self, machine_id: &MachineId) -> Option<Observation> {
        self.inner
            .lock()
            .get(machine_id)
            .and_then(MachineHistory::latest)
    }

    /// All machine ids currently tracked, sorted for stable output.
    #[must_use]
    pub fn list_machines(&self) -> Vec<MachineId> {
        let mut ids: Vec<MachineId> = self.inner.lock().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Maximum observations retained per machine.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

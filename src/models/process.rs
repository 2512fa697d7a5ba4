//! Process model.
//!
//! A process is the unit of CPU demand: it becomes ready at its arrival
//! time and needs `burst_time` units of CPU before it completes.
//!
//! # Time Representation
//! All times are integer ticks on a virtual clock starting at t=0.
//! The clock has no wall-clock meaning.
//!
//! # Reference
//! Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5

use serde::{Deserialize, Serialize};

/// A validated process definition.
///
/// Produced by [`crate::validation::validate_request`]; immutable for the
/// lifetime of a run. `priority` is only populated for priority scheduling
/// (lower value = more urgent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Unique process identifier.
    pub id: String,
    /// Tick at which the process becomes ready (>= 0).
    pub arrival_time: i64,
    /// Total CPU time required (>= 1).
    pub burst_time: i64,
    /// Scheduling priority. `None` unless the algorithm is priority scheduling.
    pub priority: Option<i64>,
}

impl ProcessSpec {
    /// Creates a process with the given ID, arrival and burst.
    pub fn new(id: impl Into<String>, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            id: id.into(),
            arrival_time,
            burst_time,
            priority: None,
        }
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Earliest tick at which this process could possibly complete.
    #[inline]
    pub fn earliest_completion(&self) -> i64 {
        self.arrival_time + self.burst_time
    }
}

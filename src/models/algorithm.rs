//! Scheduling algorithm configuration.
//!
//! Each variant carries exactly the parameters its policy needs, so a
//! round-robin run cannot observe a preemption flag and an FCFS run cannot
//! observe a quantum.
//!
//! | Variant | Selection key | Preemption |
//! |---------|---------------|------------|
//! | `Fcfs` | arrival time | never |
//! | `Sjf` | remaining time | optional (SRTF) |
//! | `Priority` | priority value (lower wins) | optional |
//! | `RoundRobin` | FIFO queue | on quantum expiry |

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum contiguous CPU slice granted per round-robin dispatch.
///
/// Always >= 1; construct with [`TimeQuantum::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TimeQuantum(i64);

impl TimeQuantum {
    /// Returns `None` if `ticks < 1`.
    pub fn new(ticks: i64) -> Option<Self> {
        (ticks >= 1).then_some(Self(ticks))
    }

    /// Quantum length in ticks.
    #[inline]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for TimeQuantum {
    type Error = String;

    fn try_from(ticks: i64) -> Result<Self, Self::Error> {
        Self::new(ticks).ok_or_else(|| format!("time quantum must be >= 1, got {ticks}"))
    }
}

impl From<TimeQuantum> for i64 {
    fn from(q: TimeQuantum) -> Self {
        q.0
    }
}

/// A validated algorithm configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm")]
pub enum AlgorithmConfig {
    /// First-Come-First-Served.
    #[serde(rename = "FCFS")]
    Fcfs,
    /// Shortest-Job-First; preemptive form is shortest-remaining-time-first.
    #[serde(rename = "SJF")]
    Sjf {
        /// Re-evaluate on every arrival and preempt on strictly shorter remaining time.
        preemptive: bool,
    },
    /// Priority scheduling, lower value = higher priority.
    #[serde(rename = "Priority")]
    Priority {
        /// Re-evaluate on every arrival and preempt on strictly better priority.
        preemptive: bool,
    },
    /// Round Robin with a fixed quantum.
    #[serde(rename = "RR")]
    RoundRobin {
        /// Slice length.
        quantum: TimeQuantum,
    },
}

impl AlgorithmConfig {
    /// Wire name of the algorithm (`"FCFS"`, `"SJF"`, `"Priority"`, `"RR"`).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf { .. } => "SJF",
            Self::Priority { .. } => "Priority",
            Self::RoundRobin { .. } => "RR",
        }
    }

    /// Whether a running process may be interrupted before it finishes.
    pub fn is_preemptive(&self) -> bool {
        match self {
            Self::Fcfs => false,
            Self::Sjf { preemptive } | Self::Priority { preemptive } => *preemptive,
            Self::RoundRobin { .. } => true,
        }
    }

    /// Whether processes must carry a priority value.
    pub fn requires_priority(&self) -> bool {
        matches!(self, Self::Priority { .. })
    }
}

impl fmt::Display for AlgorithmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fcfs => write!(f, "FCFS"),
            Self::Sjf { preemptive: true } => write!(f, "SJF (preemptive)"),
            Self::Sjf { preemptive: false } => write!(f, "SJF (non-preemptive)"),
            Self::Priority { preemptive: true } => write!(f, "Priority (preemptive)"),
            Self::Priority { preemptive: false } => write!(f, "Priority (non-preemptive)"),
            Self::RoundRobin { quantum } => write!(f, "RR (q={})", quantum.get()),
        }
    }
}

//! Per-process runtime state.
//!
//! ```text
//! Pending ──admit──▶ Ready ──dispatch──▶ Running ──finish──▶ Completed
//!                      ▲                    │
//!                      └─────preempt────────┘
//! ```
//!
//! The first transition to `Running` stamps the first-dispatch tick.

use crate::error::InvariantViolation;
use crate::models::ProcessSpec;

/// Lifecycle phase of a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessPhase {
    /// Not yet arrived.
    Pending,
    /// Arrived and waiting for the CPU.
    Ready,
    /// Holding the CPU.
    Running,
    /// No CPU time remaining.
    Completed,
}

/// Mutable state of one process during a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessState {
    phase: ProcessPhase,
    remaining: i64,
    first_dispatch: Option<i64>,
    completion: Option<i64>,
}

impl ProcessState {
    /// Fresh state for `spec`: pending, with the full burst remaining.
    pub fn new(spec: &ProcessSpec) -> Self {
        Self {
            phase: ProcessPhase::Pending,
            remaining: spec.burst_time,
            first_dispatch: None,
            completion: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> ProcessPhase {
        self.phase
    }

    /// CPU time still owed.
    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    /// Tick of the first dispatch, once dispatched.
    pub fn first_dispatch(&self) -> Option<i64> {
        self.first_dispatch
    }

    /// Completion tick, once completed.
    pub fn completion(&self) -> Option<i64> {
        self.completion
    }

    /// Whether the process is waiting for the CPU.
    pub fn is_ready(&self) -> bool {
        self.phase == ProcessPhase::Ready
    }

    /// Pending → Ready.
    pub(crate) fn admit(&mut self) {
        if self.phase == ProcessPhase::Pending {
            self.phase = ProcessPhase::Ready;
        }
    }

    /// Ready → Running at `now`.
    pub(crate) fn dispatch(
        &mut self,
        spec: &ProcessSpec,
        now: i64,
    ) -> Result<(), InvariantViolation> {
        if now < spec.arrival_time {
            return Err(InvariantViolation::EarlyDispatch {
                id: spec.id.clone(),
                at: now,
                arrival: spec.arrival_time,
            });
        }
        if self.phase != ProcessPhase::Ready {
            return Err(InvariantViolation::InvalidTransition {
                id: spec.id.clone(),
                phase: self.phase,
            });
        }
        self.phase = ProcessPhase::Running;
        self.first_dispatch.get_or_insert(now);
        Ok(())
    }

    /// Consumes `slice` ticks of CPU. Completes the process at `end` when
    /// nothing remains.
    pub(crate) fn run(
        &mut self,
        spec: &ProcessSpec,
        slice: i64,
        end: i64,
    ) -> Result<(), InvariantViolation> {
        if self.phase != ProcessPhase::Running {
            return Err(InvariantViolation::InvalidTransition {
                id: spec.id.clone(),
                phase: self.phase,
            });
        }
        if slice <= 0 || slice > self.remaining {
            return Err(InvariantViolation::RemainingUnderflow {
                id: spec.id.clone(),
                remaining: self.remaining,
                slice,
            });
        }
        self.remaining -= slice;
        if self.remaining == 0 {
            self.phase = ProcessPhase::Completed;
            self.completion = Some(end);
        }
        Ok(())
    }

    /// Running → Ready.
    pub(crate) fn preempt(&mut self) {
        if self.phase == ProcessPhase::Running {
            self.phase = ProcessPhase::Ready;
        }
    }
}

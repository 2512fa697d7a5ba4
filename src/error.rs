//! Error taxonomy.
//!
//! - [`ValidationError`]: malformed or inconsistent input, reported before
//!   any computation.
//! - [`InvariantViolation`]: the engine broke one of its own guarantees.
//!   This is a defect; the run fails and nothing is corrected silently.

use thiserror::Error;

use crate::simulator::ProcessPhase;
use crate::validation::ValidationError;

/// Internal consistency failure detected during or after a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A dispatch would drive remaining time below zero.
    #[error("process '{id}' would run {slice} ticks with only {remaining} remaining")]
    RemainingUnderflow {
        /// Process ID.
        id: String,
        /// Ticks still owed.
        remaining: i64,
        /// Ticks requested.
        slice: i64,
    },
    /// A segment does not start where the previous one ended.
    #[error("timeline gap or overlap at t={at}: previous segment ended at {previous_end}")]
    NonContiguous {
        /// Start of the offending segment.
        at: i64,
        /// End of the preceding segment.
        previous_end: i64,
    },
    /// A segment with `start >= end`.
    #[error("empty or inverted segment [{start}, {end})")]
    EmptySegment {
        /// Segment start.
        start: i64,
        /// Segment end.
        end: i64,
    },
    /// A process received a different amount of CPU than its burst.
    #[error("process '{id}' ran {ran} ticks, burst is {burst}")]
    BurstMismatch {
        /// Process ID.
        id: String,
        /// CPU time on the timeline.
        ran: i64,
        /// Declared burst.
        burst: i64,
    },
    /// A process was dispatched before it arrived.
    #[error("process '{id}' dispatched at t={at} before its arrival at t={arrival}")]
    EarlyDispatch {
        /// Process ID.
        id: String,
        /// Dispatch tick.
        at: i64,
        /// Arrival tick.
        arrival: i64,
    },
    /// A lifecycle transition was attempted from the wrong phase.
    #[error("process '{id}' cannot make this transition from phase {phase:?}")]
    InvalidTransition {
        /// Process ID.
        id: String,
        /// Phase at the time of the attempt.
        phase: ProcessPhase,
    },
    /// The dispatch loop ended with a process not completed.
    #[error("process '{id}' never completed")]
    Unfinished {
        /// Process ID.
        id: String,
    },
    /// Nothing was ready and no future arrival exists while work remains.
    #[error("no ready process and no pending arrival at t={at}")]
    DispatchWithoutCandidate {
        /// Clock value when the loop stalled.
        at: i64,
    },
}

/// Any failure of a simulation request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// The request was rejected by validation.
    #[error("invalid request: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),
    /// The engine violated an internal invariant.
    #[error("internal invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}

impl SimError {
    /// Validation errors, if this is a validation failure.
    pub fn validation_errors(&self) -> Option<&[ValidationError]> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::Invariant(_) => None,
        }
    }
}

impl From<Vec<ValidationError>> for SimError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Validation(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

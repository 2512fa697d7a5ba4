//! Per-process outcome and the response payload.

use serde::{Deserialize, Serialize};

use super::{ProcessSpec, Timeline};

/// Outcome of one process after a completed simulation.
///
/// # Identities
/// - `turnaround_time = completion_time - arrival_time`
/// - `waiting_time = turnaround_time - burst_time`
/// - `response_time = first dispatch - arrival_time`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResult {
    /// Process identifier.
    pub id: String,
    /// Arrival tick.
    pub arrival_time: i64,
    /// CPU demand.
    pub burst_time: i64,
    /// Priority, present only for priority scheduling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    /// Time spent ready but not running.
    pub waiting_time: i64,
    /// Time from arrival to completion.
    pub turnaround_time: i64,
    /// Time from arrival to first dispatch.
    pub response_time: i64,
    /// Completion tick.
    pub completion_time: i64,
}

impl ProcessResult {
    /// Derives the metrics of `spec` from its first dispatch and completion ticks.
    pub fn from_run(spec: &ProcessSpec, first_dispatch: i64, completion_time: i64) -> Self {
        let turnaround_time = completion_time - spec.arrival_time;
        Self {
            id: spec.id.clone(),
            arrival_time: spec.arrival_time,
            burst_time: spec.burst_time,
            priority: spec.priority,
            waiting_time: turnaround_time - spec.burst_time,
            turnaround_time,
            response_time: first_dispatch - spec.arrival_time,
            completion_time,
        }
    }
}

/// Payload returned to the rendering layer.
///
/// Field names and layout are the wire contract; averages are the only
/// non-integer values and are converted from exact totals at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResponse {
    /// Gantt chart segments, idle included.
    pub timeline: Timeline,
    /// Per-process results in input order.
    pub processes: Vec<ProcessResult>,
    /// Mean waiting time.
    pub average_waiting_time: f64,
    /// Mean turnaround time.
    pub average_turnaround_time: f64,
    /// Mean response time.
    pub average_response_time: f64,
}

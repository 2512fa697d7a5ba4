//! Request-to-response simulation pipeline.
//!
//! # Pipeline
//!
//! 1. [`Validator`] normalizes the request into a [`Workload`]
//! 2. [`simulator::simulate`] produces dispatch events and final states
//! 3. [`TimelineBuilder`] merges events into segments; [`audit_timeline`]
//!    re-checks them against the workload
//! 4. [`SimulationMetrics`] derives per-process results and averages
//!
//! Validation failures carry every violation. An invariant violation means
//! an engine defect and is never masked as a successful response.

use tracing::{debug, error, info, instrument, warn, Level};

use super::kpi::SimulationMetrics;
use super::timeline::{audit_timeline, TimelineBuilder};
use crate::error::SimError;
use crate::models::{SimulationRequest, SimulationResponse, Timeline};
use crate::simulator;
use crate::validation::{Validator, Workload};

/// Everything produced by one successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    /// The normalized input.
    pub workload: Workload,
    /// Merged Gantt segments.
    pub timeline: Timeline,
    /// Per-process results and aggregates.
    pub metrics: SimulationMetrics,
}

impl SimulationOutcome {
    /// Wire payload for this outcome.
    pub fn to_response(&self) -> SimulationResponse {
        self.clone().into_response()
    }

    /// Converts into the wire payload, dropping the extended metrics.
    pub fn into_response(self) -> SimulationResponse {
        SimulationResponse {
            average_waiting_time: self.metrics.waiting.value(),
            average_turnaround_time: self.metrics.turnaround.value(),
            average_response_time: self.metrics.response.value(),
            timeline: self.timeline,
            processes: self.metrics.processes,
        }
    }
}

/// Runs simulation requests end to end.
///
/// # Example
/// ```
/// use cpu_sched::models::{ProcessInput, SimulationRequest};
/// use cpu_sched::scheduler::SimulationService;
///
/// let request = SimulationRequest::new("RR")
///     .with_time_quantum(2)
///     .with_process(ProcessInput::new("P1", 0, 5))
///     .with_process(ProcessInput::new("P2", 1, 3));
///
/// let response = SimulationService::new().simulate(&request).unwrap();
/// assert_eq!(response.timeline.len(), 5);
/// assert_eq!(response.processes[1].completion_time, 7);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimulationService {
    validator: Validator,
}

impl SimulationService {
    /// Creates a service with default validation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects requests with more than `limit` processes.
    pub fn with_process_limit(mut self, limit: usize) -> Self {
        self.validator = self.validator.with_process_limit(limit);
        self
    }

    /// Validates and simulates `request`.
    ///
    /// # Errors
    /// [`SimError::Validation`] with every violation found, or
    /// [`SimError::Invariant`] on an engine defect.
    #[instrument(level = Level::DEBUG, skip_all, fields(
        algorithm = %request.algorithm,
        processes = request.processes.len(),
    ))]
    pub fn run(&self, request: &SimulationRequest) -> Result<SimulationOutcome, SimError> {
        let workload = match self.validator.validate(request) {
            Ok(workload) => workload,
            Err(errors) => {
                warn!(errors = errors.len(), "request rejected");
                return Err(SimError::Validation(errors));
            }
        };
        debug!(algorithm = %workload.algorithm(), "request accepted");
        self.run_workload(workload)
    }

    /// Simulates an already validated workload.
    ///
    /// # Errors
    /// [`SimError::Invariant`] on an engine defect.
    pub fn run_workload(&self, workload: Workload) -> Result<SimulationOutcome, SimError> {
        let outcome = execute(workload).inspect_err(|e| error!(error = %e, "simulation failed"))?;
        info!(
            makespan = outcome.metrics.makespan,
            segments = outcome.timeline.len(),
            avg_waiting = outcome.metrics.waiting.value(),
            "simulation complete"
        );
        Ok(outcome)
    }

    /// Validates and simulates `request`, returning the wire payload.
    ///
    /// # Errors
    /// As [`SimulationService::run`].
    pub fn simulate(&self, request: &SimulationRequest) -> Result<SimulationResponse, SimError> {
        self.run(request).map(SimulationOutcome::into_response)
    }
}

/// Simulates `request` with a default [`SimulationService`].
///
/// # Errors
/// As [`SimulationService::run`].
pub fn simulate(request: &SimulationRequest) -> Result<SimulationResponse, SimError> {
    SimulationService::new().simulate(request)
}

fn execute(workload: Workload) -> Result<SimulationOutcome, SimError> {
    let trace = simulator::simulate(&workload)?;
    let processes = workload.processes();
    let timeline = TimelineBuilder::new(processes).build(&trace.events)?;
    audit_timeline(&timeline, processes)?;
    let metrics = SimulationMetrics::calculate(processes, &trace.states, &timeline)?;
    Ok(SimulationOutcome {
        workload,
        timeline,
        metrics,
    })
}

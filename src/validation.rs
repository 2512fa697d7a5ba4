//! Input validation for simulation requests.
//!
//! Checks a raw [`SimulationRequest`] and normalizes it into a
//! [`Workload`]. Detects:
//! - Unknown algorithm names
//! - Missing, non-positive or misplaced time quantum
//! - Empty process list, or more processes than the configured limit
//! - Empty, reserved or duplicate process IDs
//! - Negative arrival and non-positive burst times
//! - Missing or misplaced priorities
//! - Horizons that would overflow the virtual clock
//!
//! All violations are collected; processes are checked in input order.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::{
    AlgorithmConfig, ProcessInput, ProcessSpec, SimulationRequest, TimeQuantum, IDLE_PROCESS_ID,
};

/// Validation result.
pub type ValidationResult<T> = Result<T, Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The request contains no processes.
    EmptyProcessList,
    /// More processes than the service accepts.
    TooManyProcesses,
    /// A process ID is empty after trimming.
    EmptyId,
    /// A process ID collides with the idle sentinel.
    ReservedId,
    /// Two processes share the same ID.
    DuplicateId,
    /// Arrival time below zero.
    NegativeArrival,
    /// Burst time below one.
    NonPositiveBurst,
    /// Priority scheduling without a priority value.
    MissingPriority,
    /// Priority supplied for a non-priority algorithm.
    UnexpectedPriority,
    /// Round Robin without a time quantum.
    MissingTimeQuantum,
    /// Time quantum below one.
    NonPositiveTimeQuantum,
    /// Time quantum supplied for a non-RR algorithm.
    UnexpectedTimeQuantum,
    /// Algorithm name not recognized.
    UnknownAlgorithm,
    /// Latest arrival plus total burst does not fit the clock.
    HorizonOverflow,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// A validated, normalized simulation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    algorithm: AlgorithmConfig,
    processes: Vec<ProcessSpec>,
}

impl Workload {
    /// Algorithm configuration.
    pub fn algorithm(&self) -> AlgorithmConfig {
        self.algorithm
    }

    /// Processes in input order.
    pub fn processes(&self) -> &[ProcessSpec] {
        &self.processes
    }

    /// Number of processes (never zero).
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Always `false`: a workload has at least one process.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

/// Request validator.
///
/// # Example
/// ```
/// use cpu_sched::models::{ProcessInput, SimulationRequest};
/// use cpu_sched::validation::Validator;
///
/// let request = SimulationRequest::new("FCFS")
///     .with_process(ProcessInput::new("P1", 0, 5));
/// let workload = Validator::new().validate(&request).unwrap();
/// assert_eq!(workload.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    process_limit: Option<usize>,
}

impl Validator {
    /// Creates a validator with no process limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects requests with more than `limit` processes.
    pub fn with_process_limit(mut self, limit: usize) -> Self {
        self.process_limit = Some(limit);
        self
    }

    /// Validates `request`.
    ///
    /// # Returns
    /// The normalized workload, or every detected violation.
    pub fn validate(&self, request: &SimulationRequest) -> ValidationResult<Workload> {
        let mut errors = Vec::new();

        let algorithm = parse_algorithm(request, &mut errors);

        if request.processes.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyProcessList,
                "No processes provided",
            ));
        }

        if let Some(limit) = self.process_limit {
            if request.processes.len() > limit {
                errors.push(ValidationError::new(
                    ValidationErrorKind::TooManyProcesses,
                    format!(
                        "{} processes exceed the limit of {limit}",
                        request.processes.len()
                    ),
                ));
            }
        }

        let mut seen = HashSet::new();
        let mut processes = Vec::with_capacity(request.processes.len());
        for (index, input) in request.processes.iter().enumerate() {
            if let Some(spec) = check_process(index, input, algorithm, &mut seen, &mut errors) {
                processes.push(spec);
            }
        }

        if errors.is_empty() {
            check_horizon(&processes, &mut errors);
        }

        match algorithm {
            Some(algorithm) if errors.is_empty() => Ok(Workload {
                algorithm,
                processes,
            }),
            _ => Err(errors),
        }
    }
}

/// Validates `request` with default settings.
pub fn validate_request(request: &SimulationRequest) -> ValidationResult<Workload> {
    Validator::new().validate(request)
}

fn parse_algorithm(
    request: &SimulationRequest,
    errors: &mut Vec<ValidationError>,
) -> Option<AlgorithmConfig> {
    let preemptive = request.is_preemptive;
    let algorithm = match request.algorithm.trim() {
        "FCFS" => AlgorithmConfig::Fcfs,
        "SJF" => AlgorithmConfig::Sjf { preemptive },
        "Priority" => AlgorithmConfig::Priority { preemptive },
        "RR" => {
            return match request.time_quantum {
                None => {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::MissingTimeQuantum,
                        "Round Robin requires a time quantum",
                    ));
                    None
                }
                Some(ticks) => match TimeQuantum::new(ticks) {
                    Some(quantum) => Some(AlgorithmConfig::RoundRobin { quantum }),
                    None => {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::NonPositiveTimeQuantum,
                            format!("Time quantum must be at least 1, got {ticks}"),
                        ));
                        None
                    }
                },
            };
        }
        other => {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownAlgorithm,
                format!("Unknown algorithm '{other}' (expected FCFS, SJF, RR or Priority)"),
            ));
            return None;
        }
    };

    if let Some(ticks) = request.time_quantum {
        errors.push(ValidationError::new(
            ValidationErrorKind::UnexpectedTimeQuantum,
            format!("Time quantum {ticks} given for {}, which does not use one", algorithm.name()),
        ));
    }
    Some(algorithm)
}

fn check_process(
    index: usize,
    input: &ProcessInput,
    algorithm: Option<AlgorithmConfig>,
    seen: &mut HashSet<String>,
    errors: &mut Vec<ValidationError>,
) -> Option<ProcessSpec> {
    let before = errors.len();
    let position = index + 1;
    let id = input.id.trim();

    if id.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyId,
            format!("Process #{position} has an empty ID"),
        ));
    } else if id == IDLE_PROCESS_ID {
        errors.push(ValidationError::new(
            ValidationErrorKind::ReservedId,
            format!("Process #{position} uses the reserved ID '{IDLE_PROCESS_ID}'"),
        ));
    } else if !seen.insert(id.to_string()) {
        errors.push(ValidationError::new(
            ValidationErrorKind::DuplicateId,
            format!("Duplicate process ID: {id}"),
        ));
    }

    if input.arrival_time < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeArrival,
            format!(
                "Process '{id}' has negative arrival time {}",
                input.arrival_time
            ),
        ));
    }

    if input.burst_time < 1 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveBurst,
            format!(
                "Process '{id}' has burst time {}, must be at least 1",
                input.burst_time
            ),
        ));
    }

    let priority = match (algorithm, input.priority) {
        (Some(algo), None) if algo.requires_priority() => {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingPriority,
                format!("Process '{id}' has no priority"),
            ));
            None
        }
        (Some(algo), Some(value)) if algo.requires_priority() => Some(value),
        (Some(algo), Some(value)) => {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnexpectedPriority,
                format!(
                    "Process '{id}' has priority {value}, but {} does not use priorities",
                    algo.name()
                ),
            ));
            None
        }
        _ => None,
    };

    (errors.len() == before).then(|| ProcessSpec {
        id: id.to_string(),
        arrival_time: input.arrival_time,
        burst_time: input.burst_time,
        priority,
    })
}

/// Ensures `max(arrival) + sum(burst)` fits in `i64`; every clock value
/// reached during a run is bounded by it.
fn check_horizon(processes: &[ProcessSpec], errors: &mut Vec<ValidationError>) {
    let latest_arrival = processes.iter().map(|p| p.arrival_time).max().unwrap_or(0);
    let horizon = processes
        .iter()
        .try_fold(latest_arrival, |acc, p| acc.checked_add(p.burst_time));
    if horizon.is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::HorizonOverflow,
            "Arrival and burst times are too large to simulate",
        ));
    }
}

//! Raw simulation request, as received from the input layer.
//!
//! Nothing here is trusted: fields may be missing, negative or irrelevant
//! to the chosen algorithm. [`crate::validation::validate_request`] turns a
//! request into a [`crate::validation::Workload`].

use serde::{Deserialize, Serialize};

/// One process row as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessInput {
    /// Process identifier.
    pub id: String,
    /// Arrival tick.
    pub arrival_time: i64,
    /// CPU demand.
    pub burst_time: i64,
    /// Priority; expected only for priority scheduling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

impl ProcessInput {
    /// Creates a process row without priority.
    pub fn new(id: impl Into<String>, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            id: id.into(),
            arrival_time,
            burst_time,
            priority: None,
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// A simulation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    /// `"FCFS"`, `"SJF"`, `"RR"` or `"Priority"`.
    pub algorithm: String,
    /// Only meaningful for SJF and Priority.
    #[serde(default)]
    pub is_preemptive: bool,
    /// Required for RR only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_quantum: Option<i64>,
    /// Processes in input order.
    pub processes: Vec<ProcessInput>,
}

impl SimulationRequest {
    /// Creates a request for the named algorithm with no processes.
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            is_preemptive: false,
            time_quantum: None,
            processes: Vec::new(),
        }
    }

    /// Sets the preemption flag.
    pub fn with_preemptive(mut self, is_preemptive: bool) -> Self {
        self.is_preemptive = is_preemptive;
        self
    }

    /// Sets the round-robin quantum.
    pub fn with_time_quantum(mut self, quantum: i64) -> Self {
        self.time_quantum = Some(quantum);
        self
    }

    /// Appends a process.
    pub fn with_process(mut self, process: ProcessInput) -> Self {
        self.processes.push(process);
        self
    }

    /// Replaces the process list.
    pub fn with_processes(mut self, processes: Vec<ProcessInput>) -> Self {
        self.processes = processes;
        self
    }
}

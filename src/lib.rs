//! CPU scheduling simulation engine.
//!
//! Replays a set of processes through a classic single-CPU scheduling
//! algorithm and reports the resulting Gantt timeline together with
//! per-process waiting, turnaround and response times.
//!
//! # Modules
//!
//! - **`models`**: Domain and wire types: `ProcessSpec`, `AlgorithmConfig`,
//!   `Timeline`, `SimulationRequest`, `SimulationResponse`, `ProcessList`
//! - **`validation`**: Request checks (IDs, times, priorities, quantum) and
//!   normalization into a `Workload`
//! - **`dispatching`**: Rule-based process selection (FCFS, SRT, priority)
//! - **`simulator`**: Discrete-event dispatch loops for every algorithm
//! - **`scheduler`**: Timeline assembly, metrics and the end-to-end service
//! - **`workload`**: Seeded random workload generation
//! - **`error`**: Error types shared across the pipeline
//!
//! # Supported algorithms
//!
//! | Name | Variant | Preemptive |
//! |------|---------|------------|
//! | `FCFS` | First-Come-First-Served | never |
//! | `SJF` | Shortest-Job-First / Shortest-Remaining-Time-First | optional |
//! | `Priority` | Lowest value first | optional |
//! | `RR` | Round Robin with a fixed quantum | always |
//!
//! # Example
//!
//! ```
//! use cpu_sched::{simulate, ProcessInput, SimulationRequest};
//!
//! let request = SimulationRequest::new("FCFS")
//!     .with_process(ProcessInput::new("P1", 0, 5))
//!     .with_process(ProcessInput::new("P2", 1, 3))
//!     .with_process(ProcessInput::new("P3", 2, 8));
//!
//! let response = simulate(&request).unwrap();
//! assert_eq!(response.timeline.makespan(), 16);
//! assert!((response.average_waiting_time - 10.0 / 3.0).abs() < 1e-10);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7-9

pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod simulator;
pub mod validation;
pub mod workload;

pub use error::{InvariantViolation, SimError};
pub use models::{
    AlgorithmConfig, ProcessInput, ProcessList, ProcessResult, SimulationRequest,
    SimulationResponse, Timeline, TimelineSegment,
};
pub use scheduler::{simulate, SimulationMetrics, SimulationOutcome, SimulationService};
pub use validation::{ValidationError, ValidationErrorKind, Validator, Workload};
pub use workload::WorkloadGenerator;

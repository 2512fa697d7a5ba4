//! Simulation pipeline, timeline assembly and metrics.
//!
//! # Pipeline
//!
//! `SimulationService` validates a request, runs the simulator, folds the
//! dispatch events into a `Timeline` and aggregates `SimulationMetrics`.
//!
//! # Metrics
//!
//! `SimulationMetrics` computes the standard CPU scheduling criteria:
//! waiting, turnaround and response time, plus makespan, utilization,
//! throughput and context switches.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7

mod kpi;
mod service;
mod timeline;

pub use kpi::{process_results, Average, SimulationMetrics};
pub use service::{simulate, SimulationOutcome, SimulationService};
pub use timeline::{audit_timeline, TimelineBuilder};

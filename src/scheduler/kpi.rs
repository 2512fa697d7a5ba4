//! Simulation performance metrics.
//!
//! Derives per-process results from the final runtime states and
//! aggregates them into averages and CPU-level indicators.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | completion - arrival |
//! | Waiting | turnaround - burst |
//! | Response | first dispatch - arrival |
//! | Makespan | end of the last segment |
//! | Utilization | busy time / makespan |
//! | Throughput | processes / makespan |
//! | Context switches | changes of running process, idle skipped |
//!
//! Averages are held as exact `(total, count)` pairs; conversion to `f64`
//! happens only when a caller asks for a display value. Totals are `i128`:
//! each sample is bounded by the `i64` horizon, their sum is not.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use crate::error::InvariantViolation;
use crate::models::{ProcessResult, ProcessSpec, Timeline};
use crate::simulator::ProcessState;

/// An exact arithmetic mean of integer samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Average {
    total: i128,
    count: usize,
}

impl Average {
    /// Mean of `samples`.
    pub fn of(samples: impl IntoIterator<Item = i64>) -> Self {
        samples
            .into_iter()
            .fold(Self::default(), |acc, sample| Self {
                total: acc.total + i128::from(sample),
                count: acc.count + 1,
            })
    }

    /// Sum of the samples.
    pub fn total(&self) -> i128 {
        self.total
    }

    /// Number of samples.
    pub fn count(&self) -> usize {
        self.count
    }

    /// The mean as `f64` (0.0 when there are no samples).
    pub fn value(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total as f64 / self.count as f64
        }
    }
}

/// Aggregated outcome of one simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationMetrics {
    /// Per-process results in input order.
    pub processes: Vec<ProcessResult>,
    /// Mean waiting time.
    pub waiting: Average,
    /// Mean turnaround time.
    pub turnaround: Average,
    /// Mean response time.
    pub response: Average,
    /// End of the last segment.
    pub makespan: i64,
    /// Ticks with a process on the CPU.
    pub busy_time: i64,
    /// Ticks with nothing ready.
    pub idle_time: i64,
    /// Switches between different processes.
    pub context_switches: usize,
}

impl SimulationMetrics {
    /// Computes metrics from final runtime states and the built timeline.
    ///
    /// # Errors
    /// [`InvariantViolation::Unfinished`] if any process lacks a first
    /// dispatch or completion tick.
    pub fn calculate(
        processes: &[ProcessSpec],
        states: &[ProcessState],
        timeline: &Timeline,
    ) -> Result<Self, InvariantViolation> {
        let results = process_results(processes, states)?;
        Ok(Self::from_results(results, timeline))
    }

    /// Aggregates already-extracted results.
    pub fn from_results(processes: Vec<ProcessResult>, timeline: &Timeline) -> Self {
        Self {
            waiting: Average::of(processes.iter().map(|p| p.waiting_time)),
            turnaround: Average::of(processes.iter().map(|p| p.turnaround_time)),
            response: Average::of(processes.iter().map(|p| p.response_time)),
            makespan: timeline.makespan(),
            busy_time: timeline.busy_time(),
            idle_time: timeline.idle_time(),
            context_switches: timeline.context_switches(),
            processes,
        }
    }

    /// Fraction of the makespan the CPU was busy (0.0..=1.0).
    pub fn utilization(&self) -> f64 {
        if self.makespan <= 0 {
            0.0
        } else {
            self.busy_time as f64 / self.makespan as f64
        }
    }

    /// Completed processes per tick.
    pub fn throughput(&self) -> f64 {
        if self.makespan <= 0 {
            0.0
        } else {
            self.processes.len() as f64 / self.makespan as f64
        }
    }
}

/// Extracts one [`ProcessResult`] per process from its final runtime state.
///
/// # Errors
/// [`InvariantViolation::Unfinished`] for a process that never ran to completion,
/// [`InvariantViolation::EarlyDispatch`] or [`InvariantViolation::BurstMismatch`]
/// if the recorded ticks contradict the process definition.
pub fn process_results(
    processes: &[ProcessSpec],
    states: &[ProcessState],
) -> Result<Vec<ProcessResult>, InvariantViolation> {
    if processes.len() != states.len() {
        let missing = processes.get(states.len()).map(|p| p.id.clone());
        return Err(InvariantViolation::Unfinished {
            id: missing.unwrap_or_default(),
        });
    }

    processes
        .iter()
        .zip(states)
        .map(|(spec, state)| {
            let unfinished = || InvariantViolation::Unfinished {
                id: spec.id.clone(),
            };
            let first_dispatch = state.first_dispatch().ok_or_else(unfinished)?;
            let completion = state.completion().ok_or_else(unfinished)?;
            if first_dispatch < spec.arrival_time {
                return Err(InvariantViolation::EarlyDispatch {
                    id: spec.id.clone(),
                    at: first_dispatch,
                    arrival: spec.arrival_time,
                });
            }
            if completion < spec.earliest_completion() {
                return Err(InvariantViolation::BurstMismatch {
                    id: spec.id.clone(),
                    ran: completion - spec.arrival_time,
                    burst: spec.burst_time,
                });
            }
            Ok(ProcessResult::from_run(spec, first_dispatch, completion))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimelineSegment;

    #[test]
    fn test_average_exact() {
        let avg = Average::of([0, 4, 6]);
        assert_eq!(avg.total(), 10);
        assert_eq!(avg.count(), 3);
        assert!((avg.value() - 10.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_average_sums_past_i64() {
        let avg = Average::of([i64::MAX, i64::MAX, 1]);
        assert_eq!(avg.total(), 2 * i128::from(i64::MAX) + 1);
        let expected = 2.0 * i64::MAX as f64 / 3.0;
        assert!((avg.value() - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn test_average_empty() {
        let avg = Average::of(std::iter::empty());
        assert_eq!(avg.count(), 0);
        assert!((avg.value() - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_metrics_fcfs_example() {
        let results = vec![
            ProcessResult::from_run(&ProcessSpec::new("P1", 0, 5), 0, 5),
            ProcessResult::from_run(&ProcessSpec::new("P2", 1, 3), 5, 8),
            ProcessResult::from_run(&ProcessSpec::new("P3", 2, 8), 8, 16),
        ];
        let timeline = Timeline::from_segments(vec![
            TimelineSegment::process("P1", 0, 5),
            TimelineSegment::process("P2", 5, 8),
            TimelineSegment::process("P3", 8, 16),
        ]);
        let m = SimulationMetrics::from_results(results, &timeline);

        // waiting 0, 4, 6 → 10/3; turnaround 5, 7, 14 → 26/3; response = waiting
        assert_eq!(m.waiting.total(), 10);
        assert_eq!(m.turnaround.total(), 26);
        assert_eq!(m.response.total(), 10);
        assert_eq!(m.makespan, 16);
        assert_eq!(m.context_switches, 2);
        assert!((m.utilization() - 1.0).abs() < 1e-10);
        assert!((m.throughput() - 3.0 / 16.0).abs() < 1e-10);
    }

    #[test]
    fn test_metrics_with_idle() {
        let results = vec![ProcessResult::from_run(&ProcessSpec::new("P1", 2, 2), 2, 4)];
        let timeline = Timeline::from_segments(vec![
            TimelineSegment::idle(0, 2),
            TimelineSegment::process("P1", 2, 4),
        ]);
        let m = SimulationMetrics::from_results(results, &timeline);
        assert_eq!(m.idle_time, 2);
        assert_eq!(m.busy_time, 2);
        assert!((m.utilization() - 0.5).abs() < 1e-10);
        assert_eq!(m.context_switches, 0);
    }

    #[test]
    fn test_unfinished_process_rejected() {
        let spec = ProcessSpec::new("P1", 0, 3);
        let states = vec![ProcessState::new(&spec)];
        assert_eq!(
            process_results(&[spec], &states),
            Err(InvariantViolation::Unfinished { id: "P1".into() })
        );
    }

    #[test]
    fn test_empty_metrics() {
        let m = SimulationMetrics::from_results(Vec::new(), &Timeline::default());
        assert_eq!(m.makespan, 0);
        assert!((m.utilization() - 0.0).abs() < 1e-10);
        assert!((m.throughput() - 0.0).abs() < 1e-10);
    }
}

//! Random workload generation.
//!
//! Produces reproducible process lists for demos, benchmarks and property
//! tests. Generation is driven by a caller-supplied [`Rng`]; the same seed
//! always yields the same list.
//!
//! # Example
//! ```
//! use cpu_sched::workload::WorkloadGenerator;
//!
//! let generator = WorkloadGenerator::new(4).with_max_burst(6);
//! let a = generator.generate_seeded(7);
//! let b = generator.generate_seeded(7);
//! assert_eq!(a, b);
//! assert_eq!(a[0].id, "P1");
//! ```

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::models::{AlgorithmConfig, ProcessInput, SimulationRequest};

/// Parameters for random process lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadGenerator {
    count: usize,
    max_arrival: i64,
    max_burst: i64,
    max_priority: i64,
}

impl Default for WorkloadGenerator {
    fn default() -> Self {
        Self {
            count: 5,
            max_arrival: 10,
            max_burst: 10,
            max_priority: 5,
        }
    }
}

impl WorkloadGenerator {
    /// Generator for `count` processes with default ranges.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    /// Arrivals are drawn from `0..=max` (negative values clamp to 0).
    pub fn with_max_arrival(mut self, max: i64) -> Self {
        self.max_arrival = max.max(0);
        self
    }

    /// Bursts are drawn from `1..=max` (values below 1 clamp to 1).
    pub fn with_max_burst(mut self, max: i64) -> Self {
        self.max_burst = max.max(1);
        self
    }

    /// Priorities are drawn from `1..=max` (values below 1 clamp to 1).
    pub fn with_max_priority(mut self, max: i64) -> Self {
        self.max_priority = max.max(1);
        self
    }

    /// Number of processes generated.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Draws a process list named `P1..Pn`, every row carrying a priority.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Vec<ProcessInput> {
        (0..self.count)
            .map(|i| {
                ProcessInput::new(
                    format!("P{}", i + 1),
                    rng.random_range(0..=self.max_arrival),
                    rng.random_range(1..=self.max_burst),
                )
                .with_priority(rng.random_range(1..=self.max_priority))
            })
            .collect()
    }

    /// [`generate`](Self::generate) with a [`SmallRng`] seeded from `seed`.
    pub fn generate_seeded(&self, seed: u64) -> Vec<ProcessInput> {
        self.generate(&mut SmallRng::seed_from_u64(seed))
    }

    /// A request for `algorithm` that passes validation.
    ///
    /// Priorities are kept only for priority scheduling and the time
    /// quantum only for Round Robin.
    pub fn request<R: Rng>(&self, algorithm: AlgorithmConfig, rng: &mut R) -> SimulationRequest {
        let mut processes = self.generate(rng);
        if !algorithm.requires_priority() {
            for process in &mut processes {
                process.priority = None;
            }
        }

        let request = SimulationRequest::new(algorithm.name())
            .with_preemptive(algorithm.is_preemptive())
            .with_processes(processes);
        match algorithm {
            AlgorithmConfig::RoundRobin { quantum } => request.with_time_quantum(quantum.get()),
            _ => request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeQuantum;
    use crate::validation::validate_request;

    #[test]
    fn test_same_seed_same_list() {
        let generator = WorkloadGenerator::new(8);
        assert_eq!(generator.generate_seeded(42), generator.generate_seeded(42));
    }

    #[test]
    fn test_ranges_respected() {
        let generator = WorkloadGenerator::new(50)
            .with_max_arrival(3)
            .with_max_burst(4)
            .with_max_priority(2);
        let rows = generator.generate_seeded(1);
        assert_eq!(rows.len(), 50);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.id, format!("P{}", i + 1));
            assert!((0..=3).contains(&row.arrival_time));
            assert!((1..=4).contains(&row.burst_time));
            assert!(row.priority.is_some_and(|p| (1..=2).contains(&p)));
        }
    }

    #[test]
    fn test_clamped_bounds() {
        let generator = WorkloadGenerator::new(3)
            .with_max_arrival(-5)
            .with_max_burst(0);
        let rows = generator.generate_seeded(9);
        assert!(rows.iter().all(|r| r.arrival_time == 0 && r.burst_time == 1));
    }

    #[test]
    fn test_requests_validate_for_every_algorithm() {
        let generator = WorkloadGenerator::new(6);
        let mut rng = SmallRng::seed_from_u64(3);
        let algorithms = [
            AlgorithmConfig::Fcfs,
            AlgorithmConfig::Sjf { preemptive: true },
            AlgorithmConfig::Priority { preemptive: false },
            AlgorithmConfig::RoundRobin {
                quantum: TimeQuantum::new(2).unwrap(),
            },
        ];
        for algorithm in algorithms {
            let request = generator.request(algorithm, &mut rng);
            let workload = validate_request(&request).unwrap();
            assert_eq!(workload.algorithm(), algorithm);
        }
    }
}

//! Discrete-event CPU scheduling simulator.
//!
//! Turns a validated [`Workload`] into a chronological list of dispatch
//! events plus the final runtime state of every process.
//!
//! # Clock
//!
//! A single virtual clock starts at t=0 and only jumps to the next event:
//! an arrival, a completion, a quantum expiry or a preemption. When nothing
//! is ready the clock jumps to the earliest future arrival and the gap is
//! recorded as an idle event.
//!
//! # Variants
//!
//! - FCFS, SJF and Priority share one loop driven by a [`RuleEngine`]
//!   (`selective`); preemptive forms re-evaluate at every arrival.
//! - Round Robin uses a strict FIFO queue (`round_robin`).
//!
//! Every run is deterministic: identical workloads yield identical traces.

mod round_robin;
mod selective;
mod state;

pub use state::{ProcessPhase, ProcessState};

use tracing::trace;

use crate::dispatching::RuleEngine;
use crate::error::InvariantViolation;
use crate::models::{AlgorithmConfig, ProcessSpec};
use crate::validation::Workload;

/// Who held the CPU during a dispatch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOwner {
    /// Nothing was ready.
    Idle,
    /// Index into the workload's process list.
    Process(usize),
}

/// One uninterrupted interval `[start, end)` on the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchEvent {
    /// Owner of the interval.
    pub owner: EventOwner,
    /// Start tick.
    pub start: i64,
    /// End tick.
    pub end: i64,
}

/// Output of one simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationTrace {
    /// Dispatch events in chronological order, idle gaps included.
    pub events: Vec<DispatchEvent>,
    /// Final state per process, in input order.
    pub states: Vec<ProcessState>,
}

/// Runs the workload's algorithm to completion.
///
/// # Errors
/// Returns [`InvariantViolation`] only on an engine defect; validated
/// workloads never fail.
pub fn simulate(workload: &Workload) -> Result<SimulationTrace, InvariantViolation> {
    let processes = workload.processes();
    match workload.algorithm() {
        AlgorithmConfig::Fcfs => selective::run(processes, &RuleEngine::fcfs(), false),
        AlgorithmConfig::Sjf { preemptive } => {
            selective::run(processes, &RuleEngine::shortest_remaining(), preemptive)
        }
        AlgorithmConfig::Priority { preemptive } => {
            selective::run(processes, &RuleEngine::priority(), preemptive)
        }
        AlgorithmConfig::RoundRobin { quantum } => round_robin::run(processes, quantum.get()),
    }
}

/// Process indices in arrival order (ties by input order), consumed as the
/// clock advances.
struct ArrivalQueue {
    order: Vec<usize>,
    arrivals: Vec<i64>,
    cursor: usize,
}

impl ArrivalQueue {
    fn new(processes: &[ProcessSpec]) -> Self {
        let mut order: Vec<usize> = (0..processes.len()).collect();
        order.sort_by_key(|&i| (processes[i].arrival_time, i));
        Self {
            order,
            arrivals: processes.iter().map(|p| p.arrival_time).collect(),
            cursor: 0,
        }
    }

    /// Pops every process that has arrived by `now`, in arrival order.
    fn admit_until(&mut self, now: i64) -> &[usize] {
        let start = self.cursor;
        while self
            .order
            .get(self.cursor)
            .is_some_and(|&i| self.arrivals[i] <= now)
        {
            self.cursor += 1;
        }
        &self.order[start..self.cursor]
    }

    /// Arrival tick of the next process not yet admitted.
    fn next_arrival(&self) -> Option<i64> {
        self.order.get(self.cursor).map(|&i| self.arrivals[i])
    }
}

/// Appends dispatch events and advances the clock.
#[derive(Default)]
struct Recorder {
    now: i64,
    events: Vec<DispatchEvent>,
}

impl Recorder {
    fn now(&self) -> i64 {
        self.now
    }

    /// Jumps the clock to `until`, recording the gap as idle.
    fn idle_until(&mut self, until: i64) {
        if until > self.now {
            trace!(from = self.now, to = until, "cpu idle");
            self.events.push(DispatchEvent {
                owner: EventOwner::Idle,
                start: self.now,
                end: until,
            });
            self.now = until;
        }
    }

    /// Runs process `index` for `slice` ticks.
    fn run(
        &mut self,
        index: usize,
        spec: &ProcessSpec,
        state: &mut ProcessState,
        slice: i64,
    ) -> Result<(), InvariantViolation> {
        let end = self.now + slice;
        state.run(spec, slice, end)?;
        trace!(
            process = %spec.id,
            start = self.now,
            end,
            remaining = state.remaining(),
            "dispatch"
        );
        self.events.push(DispatchEvent {
            owner: EventOwner::Process(index),
            start: self.now,
            end,
        });
        self.now = end;
        Ok(())
    }

    /// Idles until the next arrival, or fails if none is left.
    fn idle_until_next_arrival(
        &mut self,
        arrivals: &ArrivalQueue,
    ) -> Result<(), InvariantViolation> {
        let next = arrivals
            .next_arrival()
            .ok_or(InvariantViolation::DispatchWithoutCandidate { at: self.now })?;
        self.idle_until(next);
        Ok(())
    }

    fn finish(self, states: Vec<ProcessState>) -> SimulationTrace {
        SimulationTrace {
            events: self.events,
            states,
        }
    }
}

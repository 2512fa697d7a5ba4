//! Rule-driven dispatch loop shared by FCFS, SJF and Priority.
//!
//! # Algorithm
//!
//! 1. Admit every process that has arrived by the current clock.
//! 2. If the CPU is free, dispatch the best ready process per the rule
//!    engine; if none is ready, idle until the next arrival.
//! 3. Non-preemptive: run the process to completion.
//!    Preemptive: run until completion or the next arrival, whichever is
//!    first. At an arrival, a ready process with a strictly better primary
//!    score displaces the running one, which returns to the ready set and
//!    competes again on its current score.
//!
//! # Complexity
//! O(n^2) for n processes: at most 2n events, each scanning the ready set.

use tracing::trace;

use super::{ArrivalQueue, ProcessState, Recorder, SimulationTrace};
use crate::dispatching::{Candidate, RuleEngine};
use crate::error::InvariantViolation;
use crate::models::ProcessSpec;

pub(super) fn run(
    processes: &[ProcessSpec],
    engine: &RuleEngine,
    preemptive: bool,
) -> Result<SimulationTrace, InvariantViolation> {
    let mut states: Vec<ProcessState> = processes.iter().map(ProcessState::new).collect();
    let mut arrivals = ArrivalQueue::new(processes);
    let mut recorder = Recorder::default();
    let mut running: Option<usize> = None;
    let mut completed = 0;

    while completed < processes.len() {
        for &i in arrivals.admit_until(recorder.now()) {
            states[i].admit();
        }

        let current = match running {
            Some(current) => current,
            None => match best_ready(processes, &states, engine) {
                Some(next) => {
                    states[next].dispatch(&processes[next], recorder.now())?;
                    running = Some(next);
                    next
                }
                None => {
                    recorder.idle_until_next_arrival(&arrivals)?;
                    continue;
                }
            },
        };

        let remaining = states[current].remaining();
        let slice = match arrivals.next_arrival() {
            Some(next) if preemptive => (next - recorder.now()).min(remaining),
            _ => remaining,
        };
        recorder.run(current, &processes[current], &mut states[current], slice)?;

        if states[current].remaining() == 0 {
            trace!(process = %processes[current].id, at = recorder.now(), "completed");
            running = None;
            completed += 1;
            continue;
        }

        // Arrival event while the current process still has work.
        for &i in arrivals.admit_until(recorder.now()) {
            states[i].admit();
        }
        let incumbent = Candidate::new(current, &processes[current], states[current].remaining());
        let challenger = best_ready(processes, &states, engine)
            .map(|i| Candidate::new(i, &processes[i], states[i].remaining()));
        if let Some(challenger) = challenger.filter(|c| engine.preempts(c, &incumbent)) {
            trace!(
                preempted = %processes[current].id,
                by = %challenger.spec.id,
                at = recorder.now(),
                "preemption"
            );
            states[current].preempt();
            running = None;
        }
    }

    Ok(recorder.finish(states))
}

/// Index of the best ready process, if any.
fn best_ready(
    processes: &[ProcessSpec],
    states: &[ProcessState],
    engine: &RuleEngine,
) -> Option<usize> {
    let ready: Vec<Candidate<'_>> = states
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_ready())
        .map(|(i, s)| Candidate::new(i, &processes[i], s.remaining()))
        .collect();
    engine.select_best(&ready).map(|pos| ready[pos].index)
}

//! Round Robin dispatch loop.
//!
//! # Algorithm
//!
//! 1. The ready queue is strict FIFO; arrivals join the tail in arrival order.
//! 2. The head runs for `min(remaining, quantum)`.
//! 3. Processes that arrived during that slice (up to and including its
//!    end) are enqueued first; the process just run, if unfinished, goes
//!    after them.
//! 4. An empty queue with work outstanding idles the CPU until the next
//!    arrival.

use std::collections::VecDeque;

use tracing::trace;

use super::{ArrivalQueue, ProcessState, Recorder, SimulationTrace};
use crate::error::InvariantViolation;
use crate::models::ProcessSpec;

pub(super) fn run(
    processes: &[ProcessSpec],
    quantum: i64,
) -> Result<SimulationTrace, InvariantViolation> {
    let mut states: Vec<ProcessState> = processes.iter().map(ProcessState::new).collect();
    let mut arrivals = ArrivalQueue::new(processes);
    let mut recorder = Recorder::default();
    let mut queue: VecDeque<usize> = VecDeque::with_capacity(processes.len());
    let mut completed = 0;

    enqueue_arrivals(&mut arrivals, recorder.now(), &mut states, &mut queue);

    while completed < processes.len() {
        let Some(current) = queue.pop_front() else {
            recorder.idle_until_next_arrival(&arrivals)?;
            enqueue_arrivals(&mut arrivals, recorder.now(), &mut states, &mut queue);
            continue;
        };

        let spec = &processes[current];
        states[current].dispatch(spec, recorder.now())?;
        let slice = states[current].remaining().min(quantum);
        recorder.run(current, spec, &mut states[current], slice)?;

        enqueue_arrivals(&mut arrivals, recorder.now(), &mut states, &mut queue);

        if states[current].remaining() == 0 {
            trace!(process = %spec.id, at = recorder.now(), "completed");
            completed += 1;
        } else {
            states[current].preempt();
            queue.push_back(current);
        }
    }

    Ok(recorder.finish(states))
}

fn enqueue_arrivals(
    arrivals: &mut ArrivalQueue,
    now: i64,
    states: &mut [ProcessState],
    queue: &mut VecDeque<usize>,
) {
    for &i in arrivals.admit_until(now) {
        states[i].admit();
        queue.push_back(i);
    }
}

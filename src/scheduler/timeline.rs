//! Timeline construction and audit.
//!
//! Folds raw dispatch events into Gantt segments: back-to-back events of
//! the same owner collapse into one segment (common under Round Robin and
//! at non-preempting arrivals). The result is then audited against the
//! timeline invariants:
//!
//! - segments are non-empty, sorted and contiguous from t=0 to the makespan
//! - each process receives exactly its burst time
//! - no process runs before it arrives

use std::collections::HashMap;

use crate::error::InvariantViolation;
use crate::models::{ProcessSpec, SegmentOwner, Timeline, TimelineSegment};
use crate::simulator::{DispatchEvent, EventOwner};

/// Builds a [`Timeline`] from dispatch events.
#[derive(Debug, Clone, Copy)]
pub struct TimelineBuilder<'a> {
    processes: &'a [ProcessSpec],
}

impl<'a> TimelineBuilder<'a> {
    /// Creates a builder resolving event indices against `processes`.
    pub fn new(processes: &'a [ProcessSpec]) -> Self {
        Self { processes }
    }

    /// Merges `events` into segments.
    ///
    /// # Errors
    /// [`InvariantViolation::EmptySegment`] or [`InvariantViolation::NonContiguous`]
    /// if the events do not tile `[0, makespan)`.
    pub fn build(&self, events: &[DispatchEvent]) -> Result<Timeline, InvariantViolation> {
        let mut merged: Vec<DispatchEvent> = Vec::with_capacity(events.len());
        let mut previous_end = 0;

        for event in events {
            if event.start >= event.end {
                return Err(InvariantViolation::EmptySegment {
                    start: event.start,
                    end: event.end,
                });
            }
            if event.start != previous_end {
                return Err(InvariantViolation::NonContiguous {
                    at: event.start,
                    previous_end,
                });
            }
            previous_end = event.end;

            match merged.last_mut() {
                Some(last) if last.owner == event.owner => last.end = event.end,
                _ => merged.push(*event),
            }
        }

        let segments = merged
            .into_iter()
            .map(|event| TimelineSegment {
                owner: self.owner(event.owner),
                start_time: event.start,
                end_time: event.end,
            })
            .collect();
        Ok(Timeline::from_segments(segments))
    }

    fn owner(&self, owner: EventOwner) -> SegmentOwner {
        match owner {
            EventOwner::Idle => SegmentOwner::Idle,
            EventOwner::Process(i) => SegmentOwner::Process(self.processes[i].id.clone()),
        }
    }
}

/// Checks a finished timeline against the processes it was built from.
///
/// # Errors
/// The first violated invariant.
pub fn audit_timeline(
    timeline: &Timeline,
    processes: &[ProcessSpec],
) -> Result<(), InvariantViolation> {
    let mut previous_end = 0;
    for segment in timeline.segments() {
        if segment.start_time >= segment.end_time {
            return Err(InvariantViolation::EmptySegment {
                start: segment.start_time,
                end: segment.end_time,
            });
        }
        if segment.start_time != previous_end {
            return Err(InvariantViolation::NonContiguous {
                at: segment.start_time,
                previous_end,
            });
        }
        previous_end = segment.end_time;
    }

    let by_id: HashMap<&str, &ProcessSpec> =
        processes.iter().map(|p| (p.id.as_str(), p)).collect();
    let mut ran: HashMap<&str, i64> = HashMap::with_capacity(processes.len());

    for segment in timeline.segments() {
        let Some(id) = segment.owner.process_id() else {
            continue;
        };
        let spec = by_id.get(id).ok_or_else(|| InvariantViolation::BurstMismatch {
            id: id.to_string(),
            ran: segment.duration(),
            burst: 0,
        })?;
        if segment.start_time < spec.arrival_time {
            return Err(InvariantViolation::EarlyDispatch {
                id: spec.id.clone(),
                at: segment.start_time,
                arrival: spec.arrival_time,
            });
        }
        *ran.entry(spec.id.as_str()).or_insert(0) += segment.duration();
    }

    for spec in processes {
        let total = ran.get(spec.id.as_str()).copied().unwrap_or(0);
        if total != spec.burst_time {
            return Err(InvariantViolation::BurstMismatch {
                id: spec.id.clone(),
                ran: total,
                burst: spec.burst_time,
            });
        }
    }

    Ok(())
}

//! Timeline (Gantt chart) model.
//!
//! A timeline is the ordered, contiguous sequence of execution segments
//! from t=0 to the makespan. Gaps where nothing is ready are recorded as
//! explicit idle segments.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Process ID used on the wire for idle segments.
pub const IDLE_PROCESS_ID: &str = "IDLE";

/// What occupies the CPU during a segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SegmentOwner {
    /// No process was ready.
    Idle,
    /// The named process was running.
    Process(String),
}

impl SegmentOwner {
    /// Whether this is an idle segment.
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Process ID, or `None` for idle.
    pub fn process_id(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Process(id) => Some(id),
        }
    }
}

impl From<String> for SegmentOwner {
    fn from(id: String) -> Self {
        if id == IDLE_PROCESS_ID {
            Self::Idle
        } else {
            Self::Process(id)
        }
    }
}

impl From<SegmentOwner> for String {
    fn from(owner: SegmentOwner) -> Self {
        match owner {
            SegmentOwner::Idle => IDLE_PROCESS_ID.to_string(),
            SegmentOwner::Process(id) => id,
        }
    }
}

impl fmt::Display for SegmentOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str(IDLE_PROCESS_ID),
            Self::Process(id) => f.write_str(id),
        }
    }
}

/// A half-open interval `[start_time, end_time)` on the CPU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSegment {
    /// Running process, or idle.
    #[serde(rename = "processId")]
    pub owner: SegmentOwner,
    /// Start tick (inclusive).
    pub start_time: i64,
    /// End tick (exclusive). Always greater than `start_time`.
    pub end_time: i64,
}

impl TimelineSegment {
    /// Creates a segment for a process.
    pub fn process(id: impl Into<String>, start_time: i64, end_time: i64) -> Self {
        Self {
            owner: SegmentOwner::Process(id.into()),
            start_time,
            end_time,
        }
    }

    /// Creates an idle segment.
    pub fn idle(start_time: i64, end_time: i64) -> Self {
        Self {
            owner: SegmentOwner::Idle,
            start_time,
            end_time,
        }
    }

    /// Segment length in ticks.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end_time - self.start_time
    }

    /// Whether this segment belongs to the given process.
    #[inline]
    pub fn is_for(&self, process_id: &str) -> bool {
        self.owner.process_id() == Some(process_id)
    }
}

/// Ordered execution segments of one simulation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    segments: Vec<TimelineSegment>,
}

impl Timeline {
    pub(crate) fn from_segments(segments: Vec<TimelineSegment>) -> Self {
        Self { segments }
    }

    /// All segments in chronological order.
    pub fn segments(&self) -> &[TimelineSegment] {
        &self.segments
    }

    /// Consumes the timeline, returning its segments.
    pub fn into_segments(self) -> Vec<TimelineSegment> {
        self.segments
    }

    /// Number of segments, idle included.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the timeline has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// End of the last segment (0 for an empty timeline).
    pub fn makespan(&self) -> i64 {
        self.segments.last().map(|s| s.end_time).unwrap_or(0)
    }

    /// Segments belonging to one process.
    pub fn segments_for<'a>(
        &'a self,
        process_id: &'a str,
    ) -> impl Iterator<Item = &'a TimelineSegment> + 'a {
        self.segments.iter().filter(move |s| s.is_for(process_id))
    }

    /// Total CPU time given to one process.
    pub fn run_time_of(&self, process_id: &str) -> i64 {
        self.segments_for(process_id).map(TimelineSegment::duration).sum()
    }

    /// Total non-idle time.
    pub fn busy_time(&self) -> i64 {
        self.segments
            .iter()
            .filter(|s| !s.owner.is_idle())
            .map(TimelineSegment::duration)
            .sum()
    }

    /// Total idle time.
    pub fn idle_time(&self) -> i64 {
        self.segments
            .iter()
            .filter(|s| s.owner.is_idle())
            .map(TimelineSegment::duration)
            .sum()
    }

    /// Number of times the CPU switches from one process to a different one.
    ///
    /// Idle segments are skipped: `P1, IDLE, P1` is not a switch,
    /// `P1, IDLE, P2` is.
    pub fn context_switches(&self) -> usize {
        let mut switches = 0;
        let mut previous: Option<&str> = None;
        for id in self.segments.iter().filter_map(|s| s.owner.process_id()) {
            if previous.is_some_and(|p| p != id) {
                switches += 1;
            }
            previous = Some(id);
        }
        switches
    }
}

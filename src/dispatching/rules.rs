//! Built-in dispatching rules.
//!
//! | Rule | Score | Used by |
//! |------|-------|---------|
//! | `ArrivalOrder` | arrival time | FCFS; tie-breaker for SJF and Priority |
//! | `ShortestRemaining` | remaining CPU time | SJF / SRTF |
//! | `PriorityValue` | priority (lower = more urgent) | Priority |
//!
//! # Score Convention
//! All rules return lower scores for processes that should run first.

use super::{Candidate, DispatchingRule, RuleScore};

/// First-come, first-served.
///
/// Prioritizes the earliest arrival.
#[derive(Debug, Clone, Copy)]
pub struct ArrivalOrder;

impl DispatchingRule for ArrivalOrder {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn evaluate(&self, candidate: &Candidate<'_>) -> RuleScore {
        candidate.spec.arrival_time
    }

    fn description(&self) -> &'static str {
        "First Come First Served"
    }
}

/// Shortest remaining time.
///
/// Before a process first runs its remaining time equals its burst, so the
/// same rule serves non-preemptive SJF.
///
/// # Reference
/// Schrage (1968), SRPT is optimal for mean flow time on a single machine.
#[derive(Debug, Clone, Copy)]
pub struct ShortestRemaining;

impl DispatchingRule for ShortestRemaining {
    fn name(&self) -> &'static str {
        "SRT"
    }

    fn evaluate(&self, candidate: &Candidate<'_>) -> RuleScore {
        candidate.remaining
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Time"
    }
}

/// Static priority, lower value first.
///
/// Processes without a priority rank last.
#[derive(Debug, Clone, Copy)]
pub struct PriorityValue;

impl DispatchingRule for PriorityValue {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, candidate: &Candidate<'_>) -> RuleScore {
        candidate.spec.priority.unwrap_or(RuleScore::MAX)
    }

    fn description(&self) -> &'static str {
        "Lowest Priority Value"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProcessSpec;

    #[test]
    fn test_arrival_order() {
        let p = ProcessSpec::new("P1", 7, 3);
        assert_eq!(ArrivalOrder.evaluate(&Candidate::new(0, &p, 3)), 7);
    }

    #[test]
    fn test_shortest_remaining_uses_remaining() {
        let p = ProcessSpec::new("P1", 0, 8);
        assert_eq!(ShortestRemaining.evaluate(&Candidate::new(0, &p, 5)), 5);
    }

    #[test]
    fn test_priority_value() {
        let p = ProcessSpec::new("P1", 0, 8).with_priority(-2);
        assert_eq!(PriorityValue.evaluate(&Candidate::new(0, &p, 8)), -2);

        let none = ProcessSpec::new("P2", 0, 8);
        assert_eq!(PriorityValue.evaluate(&Candidate::new(1, &none, 8)), i64::MAX);
    }

    #[test]
    fn test_names() {
        assert_eq!(ShortestRemaining.name(), "SRT");
        assert_eq!(ArrivalOrder.description(), "First Come First Served");
    }
}

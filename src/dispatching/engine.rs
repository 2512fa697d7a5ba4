//! Rule engine for multi-criteria dispatching.
//!
//! Applies rules in sequence, consulting the next rule only on ties.
//! When every rule ties, the candidate that appears first in the input
//! wins, so the engine never depends on iteration order of the ready set.

use std::cmp::Ordering;
use std::sync::Arc;

use super::rules::{ArrivalOrder, PriorityValue, ShortestRemaining};
use super::{Candidate, DispatchingRule, RuleScore};

/// A composable rule engine for process selection.
///
/// The first rule added is the primary rule; it alone decides preemption.
/// Later rules only break ties.
#[derive(Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
}

impl RuleEngine {
    /// Creates an empty rule engine (pure input order).
    pub fn new() -> Self {
        Self::default()
    }

    /// Earliest arrival first.
    pub fn fcfs() -> Self {
        Self::new().with_rule(ArrivalOrder)
    }

    /// Shortest remaining time, then earliest arrival.
    pub fn shortest_remaining() -> Self {
        Self::new()
            .with_rule(ShortestRemaining)
            .with_tie_breaker(ArrivalOrder)
    }

    /// Lowest priority value, then earliest arrival.
    pub fn priority() -> Self {
        Self::new()
            .with_rule(PriorityValue)
            .with_tie_breaker(ArrivalOrder)
    }

    /// Adds a rule. The first rule added is the primary rule.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a tie-breaking rule, consulted after all earlier rules tie.
    pub fn with_tie_breaker<R: DispatchingRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Score of the primary rule, or `0` for an empty engine.
    pub fn primary_score(&self, candidate: &Candidate<'_>) -> RuleScore {
        self.rules
            .first()
            .map(|rule| rule.evaluate(candidate))
            .unwrap_or(0)
    }

    /// Whether `challenger` should displace the running `incumbent`.
    ///
    /// Only a strictly better primary score preempts; tie-breakers never do.
    pub fn preempts(&self, challenger: &Candidate<'_>, incumbent: &Candidate<'_>) -> bool {
        self.primary_score(challenger) < self.primary_score(incumbent)
    }

    /// Orders two candidates: `Less` means `a` is dispatched first.
    pub fn compare(&self, a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(a).cmp(&rule.evaluate(b)))
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| a.index.cmp(&b.index))
    }

    /// Returns the position (within `candidates`) of the candidate to dispatch.
    pub fn select_best(&self, candidates: &[Candidate<'_>]) -> Option<usize> {
        candidates
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| self.compare(a, b))
            .map(|(pos, _)| pos)
    }

    /// Names of the configured rules, primary first.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProcessSpec;

    #[test]
    fn test_srt_ordering() {
        let specs = [
            ProcessSpec::new("long", 0, 5),
            ProcessSpec::new("short", 0, 1),
            ProcessSpec::new("medium", 0, 3),
        ];
        let ready: Vec<Candidate> = specs
            .iter()
            .enumerate()
            .map(|(i, s)| Candidate::new(i, s, s.burst_time))
            .collect();
        let engine = RuleEngine::new().with_rule(ShortestRemaining);

        assert_eq!(engine.select_best(&ready), Some(1));
        assert_eq!(engine.compare(&ready[2], &ready[0]), Ordering::Less);
    }

    #[test]
    fn test_tie_breaker_then_input_order() {
        let specs = [
            ProcessSpec::new("late", 3, 4),
            ProcessSpec::new("first", 1, 4),
            ProcessSpec::new("second", 1, 4),
        ];
        let ready: Vec<Candidate> = specs
            .iter()
            .enumerate()
            .map(|(i, s)| Candidate::new(i, s, 4))
            .collect();
        let engine = RuleEngine::shortest_remaining();

        // SRT ties → arrival → input order
        assert_eq!(engine.select_best(&ready), Some(1));
        assert_eq!(engine.compare(&ready[1], &ready[2]), Ordering::Less);
        assert_eq!(engine.compare(&ready[2], &ready[0]), Ordering::Less);
    }

    #[test]
    fn test_input_order_when_rules_tie() {
        let a = ProcessSpec::new("A", 0, 2).with_priority(1);
        let b = ProcessSpec::new("B", 0, 2).with_priority(1);
        // Candidates listed out of input order
        let ready = [Candidate::new(1, &b, 2), Candidate::new(0, &a, 2)];
        let engine = RuleEngine::priority();
        assert_eq!(engine.select_best(&ready), Some(1));
    }

    #[test]
    fn test_preemption_requires_strictly_better_primary() {
        let running = ProcessSpec::new("run", 0, 8);
        let equal = ProcessSpec::new("eq", 0, 3);
        let better = ProcessSpec::new("better", 1, 2);
        let engine = RuleEngine::shortest_remaining();

        let incumbent = Candidate::new(1, &running, 3);
        // Earlier arrival and input position, but equal remaining → no preemption
        assert!(!engine.preempts(&Candidate::new(0, &equal, 3), &incumbent));
        assert!(engine.preempts(&Candidate::new(2, &better, 2), &incumbent));
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(RuleEngine::fcfs().rule_names(), vec!["FCFS"]);
        assert_eq!(RuleEngine::priority().rule_names(), vec!["PRIORITY", "FCFS"]);
        assert!(format!("{:?}", RuleEngine::shortest_remaining()).contains("SRT"));
    }

    #[test]
    fn test_empty_candidates() {
        let engine = RuleEngine::new().with_rule(ShortestRemaining);
        assert!(engine.select_best(&[]).is_none());
    }
}

//! Dispatching rules and rule engine for CPU selection.
//!
//! A rule assigns each ready process an integer score; the engine picks
//! the lowest score, falling back to tie-breaking rules and finally to
//! input order, so selection is always deterministic.
//!
//! # Usage
//!
//! ```
//! use cpu_sched::dispatching::{Candidate, RuleEngine};
//! use cpu_sched::dispatching::rules;
//! use cpu_sched::models::ProcessSpec;
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::ShortestRemaining)
//!     .with_tie_breaker(rules::ArrivalOrder);
//!
//! let a = ProcessSpec::new("A", 0, 8);
//! let b = ProcessSpec::new("B", 1, 4);
//! let ready = [Candidate::new(0, &a, 7), Candidate::new(1, &b, 4)];
//! assert_eq!(engine.select_best(&ready), Some(1));
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

mod context;
mod engine;
pub mod rules;

pub use context::Candidate;
pub use engine::RuleEngine;

use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first).
pub type RuleScore = i64;

/// A dispatching rule that scores a ready process.
///
/// # Score Convention
/// **Lower score = dispatched first.**
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SRT").
    fn name(&self) -> &'static str;

    /// Scores a candidate.
    fn evaluate(&self, candidate: &Candidate<'_>) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

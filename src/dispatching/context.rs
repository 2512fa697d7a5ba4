//! Candidate view passed to dispatching rules.

use crate::models::ProcessSpec;

/// A ready process as seen by the dispatcher at the current clock.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Position in the input list; the final tie-breaker.
    pub index: usize,
    /// Static process definition.
    pub spec: &'a ProcessSpec,
    /// CPU time still owed.
    pub remaining: i64,
}

impl<'a> Candidate<'a> {
    /// Creates a candidate.
    pub fn new(index: usize, spec: &'a ProcessSpec, remaining: i64) -> Self {
        Self {
            index,
            spec,
            remaining,
        }
    }
}

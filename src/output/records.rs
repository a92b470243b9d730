#![forbid(unsafe_code)]

//! Results handed from CLI commands to the formatters

use crate::engine::Decision;

/// Outcome of evaluating one flag for one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub flag: String,
    pub user_id: String,
    pub decision: Decision,
}

impl Evaluation {
    pub fn enabled(&self) -> bool {
        self.decision.enabled()
    }
}

/// One input line of a batch evaluation
///
/// `line` is 1-based. Lines that could not be decoded or evaluated carry the
/// error message instead of an evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub line: usize,
    pub result: Result<Evaluation, String>,
}

#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Every record is one JSON object on its own line with a `type` field:
//! `evaluation`, `error`, `flag` or `status`.

use crate::engine::{Decision, RulesEngine};
use crate::output::{BatchEntry, Evaluation};
use crate::rules::FeatureFlagRule;
use serde::Serialize;
use std::io::{self, Write};

/// JSONL output formatter
pub struct JsonlFormatter;

impl JsonlFormatter {
    /// Creates a new JsonlFormatter
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Format a single evaluation
    pub fn format_evaluation(&self, evaluation: &Evaluation) -> String {
        let mut output = String::new();
        push_line(&mut output, &EvaluationRecord::from(evaluation));
        output
    }

    /// Format batch results, one record per input line, in input order
    pub fn format_batch(&self, entries: &[BatchEntry]) -> String {
        let mut output = String::new();
        for entry in entries {
            match &entry.result {
                Ok(evaluation) => push_line(&mut output, &EvaluationRecord::from(evaluation)),
                Err(message) => push_line(
                    &mut output,
                    &ErrorRecord {
                        record_type: "error",
                        line: entry.line,
                        message,
                    },
                ),
            }
        }
        output
    }

    /// Format every flag of an engine, sorted by name
    pub fn format_flags(&self, engine: &RulesEngine) -> String {
        let mut output = String::new();
        for (name, rule) in engine.configuration().iter() {
            push_line(
                &mut output,
                &FlagRecord {
                    record_type: "flag",
                    name,
                    rule,
                },
            );
        }
        output
    }

    /// Format the result of validating a rules file (flag count or error message)
    pub fn format_check(&self, source: &str, result: &Result<usize, String>) -> String {
        let record = match result {
            Ok(flags) => StatusRecord {
                record_type: "status",
                source,
                valid: true,
                flags: Some(*flags),
                error: None,
            },
            Err(message) => StatusRecord {
                record_type: "status",
                source,
                valid: false,
                flags: None,
                error: Some(message.as_str()),
            },
        };

        let mut output = String::new();
        push_line(&mut output, &record);
        output
    }

    /// Write already formatted output to stdout
    pub fn write_to_stdout(&self, output: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(output.as_bytes())?;
        stdout.flush()
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_line<T: Serialize>(output: &mut String, record: &T) {
    if let Ok(json) = serde_json::to_string(record) {
        output.push_str(&json);
        output.push('\n');
    }
}

/// Evaluation record for JSONL output
#[derive(Debug, Serialize)]
struct EvaluationRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    flag: &'a str,
    user_id: &'a str,
    enabled: bool,
    reason: Decision,
}

impl<'a> From<&'a Evaluation> for EvaluationRecord<'a> {
    fn from(evaluation: &'a Evaluation) -> Self {
        Self {
            record_type: "evaluation",
            flag: &evaluation.flag,
            user_id: &evaluation.user_id,
            enabled: evaluation.enabled(),
            reason: evaluation.decision,
        }
    }
}

/// Per-line failure record for JSONL output
#[derive(Debug, Serialize)]
struct ErrorRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    line: usize,
    message: &'a str,
}

/// Flag record for JSONL output
#[derive(Debug, Serialize)]
struct FlagRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    name: &'a str,
    #[serde(flatten)]
    rule: &'a FeatureFlagRule,
}

/// Status record for JSONL output
#[derive(Debug, Serialize)]
struct StatusRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    source: &'a str,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    flags: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

//! Batch command implementation
//!
//! Evaluates one flag for every user context in a JSON Lines input. Lines
//! are evaluated in parallel with rayon against one shared engine; results
//! are reported in input order.
//!
//! Exit code:
//! - 0: every line was evaluated
//! - 2: the input could not be read, or at least one line failed
//! - 3: invalid rules file

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::cli::common::{EXIT_ERROR, EXIT_SUCCESS, load_engine, report_error, stdout_stream};
use crate::cli::eval::evaluate_one;
use crate::engine::RulesEngine;
use crate::error::FlagError;
use crate::output::{BatchEntry, HumanFormatter, JsonlFormatter};
use crate::types::UserContext;
use rayon::prelude::*;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Run the batch command
pub fn run_batch(
    rules: &Path,
    flag: &str,
    contexts: Option<&Path>,
    format: OutputFormat,
    color: ColorChoice,
) -> i32 {
    let engine = match load_engine(rules) {
        Ok(engine) => engine,
        Err(e) => return report_error(&e),
    };

    let input = match read_input(contexts) {
        Ok(input) => input,
        Err(e) => return report_error(&e),
    };

    let entries = evaluate_batch(&engine, flag, &input);
    let failed = entries.iter().filter(|entry| entry.result.is_err()).count();
    tracing::debug!(flag, lines = entries.len(), failed, "evaluated batch");

    let written = match format {
        OutputFormat::Human => HumanFormatter::new().write_batch(&mut stdout_stream(color), &entries),
        OutputFormat::Jsonl => {
            let formatter = JsonlFormatter::new();
            formatter.write_to_stdout(&formatter.format_batch(&entries))
        }
    };

    if let Err(e) = written {
        eprintln!("Error: {}", e);
        return EXIT_ERROR;
    }

    if failed > 0 { EXIT_ERROR } else { EXIT_SUCCESS }
}

/// Evaluate `flag` for each non-blank line of `input`
///
/// Each line must be a JSON object with `user_id` (or `userId`), `plan` and
/// `region`. Blank lines are skipped but still counted for line numbers.
pub fn evaluate_batch(engine: &RulesEngine, flag: &str, input: &str) -> Vec<BatchEntry> {
    let lines: Vec<(usize, &str)> = input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| (i + 1, line))
        .collect();

    lines
        .par_iter()
        .map(|&(line, text)| BatchEntry {
            line,
            result: serde_json::from_str::<UserContext>(text)
                .map_err(|e| format!("invalid user context JSON: {e}"))
                .and_then(|context| {
                    evaluate_one(engine, flag, &context).map_err(|e| e.to_string())
                }),
        })
        .collect()
}

fn read_input(contexts: Option<&Path>) -> Result<String, FlagError> {
    match contexts {
        Some(path) => fs::read_to_string(path).map_err(|source| FlagError::Io {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .map_err(|source| FlagError::Io {
                    path: "<stdin>".into(),
                    source,
                })?;
            Ok(input)
        }
    }
}

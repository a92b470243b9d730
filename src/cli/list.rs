//! List command implementation
//!
//! Lists every flag in the rules file with a summary of its targeting.

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::cli::common::{EXIT_ERROR, EXIT_SUCCESS, load_engine, report_error, stdout_stream};
use crate::output::{HumanFormatter, JsonlFormatter};
use std::path::Path;

/// Run the list command
///
/// # Returns
///
/// Exit code:
/// - 0: Success
/// - 2: Error
/// - 3: Invalid rules file
pub fn run_list(rules: &Path, format: OutputFormat, color: ColorChoice) -> i32 {
    let engine = match load_engine(rules) {
        Ok(engine) => engine,
        Err(e) => return report_error(&e),
    };

    let written = match format {
        OutputFormat::Human => HumanFormatter::new().write_flags(&mut stdout_stream(color), &engine),
        OutputFormat::Jsonl => {
            let formatter = JsonlFormatter::new();
            formatter.write_to_stdout(&formatter.format_flags(&engine))
        }
    };

    match written {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    }
}

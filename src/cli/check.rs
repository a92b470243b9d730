//! Check command implementation
//!
//! Loads the rules file, reports the flag count or the first problem found.
//!
//! Exit code:
//! - 0: rules file is valid
//! - 2: rules file could not be read
//! - 3: rules file has a syntax or schema error

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::cli::common::{EXIT_SUCCESS, exit_code_for, load_engine, stdout_stream};
use crate::output::{HumanFormatter, JsonlFormatter};
use std::path::Path;

/// Run the check command
pub fn run_check(rules: &Path, format: OutputFormat, color: ColorChoice) -> i32 {
    let source = rules.display().to_string();
    let loaded = load_engine(rules);

    let (summary, exit_code) = match &loaded {
        Ok(engine) => (Ok(engine.len()), EXIT_SUCCESS),
        Err(e) => (Err(e.to_string()), exit_code_for(e)),
    };

    let written = match format {
        OutputFormat::Human => {
            HumanFormatter::new().write_check(&mut stdout_stream(color), &source, &summary)
        }
        OutputFormat::Jsonl => {
            let formatter = JsonlFormatter::new();
            formatter.write_to_stdout(&formatter.format_check(&source, &summary))
        }
    };

    if let Err(e) = written {
        tracing::warn!(error = %e, "failed to write check output");
    }

    exit_code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::common::{EXIT_ERROR, EXIT_PARSE_ERROR};
    use std::fs;
    use tempfile::TempDir;

    fn run(content: Option<&str>) -> i32 {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("flags.yaml");
        if let Some(content) = content {
            fs::write(&path, content).unwrap();
        }
        run_check(&path, OutputFormat::Jsonl, ColorChoice::Never)
    }

    #[test]
    fn test_check_valid() {
        assert_eq!(run(Some("flags:\n  beta:\n    enabled: true\n")), EXIT_SUCCESS);
    }

    #[test]
    fn test_check_syntax_error() {
        assert_eq!(run(Some("flags: [oops\n")), EXIT_PARSE_ERROR);
    }

    #[test]
    fn test_check_schema_error() {
        assert_eq!(run(Some("flags:\n  beta:\n    plans: [pro]\n")), EXIT_PARSE_ERROR);
    }

    #[test]
    fn test_check_missing_file() {
        assert_eq!(run(None), EXIT_ERROR);
    }
}

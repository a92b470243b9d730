//! Common helper functions shared across CLI commands

use crate::cli::args::ColorChoice;
use crate::engine::RulesEngine;
use crate::error::FlagError;
use std::io::IsTerminal;
use std::path::Path;
use termcolor::StandardStream;

/// Process exit codes
pub const EXIT_SUCCESS: i32 = 0;
/// `eval` only: the flag is off
pub const EXIT_FLAG_OFF: i32 = 1;
pub const EXIT_ERROR: i32 = 2;
pub const EXIT_PARSE_ERROR: i32 = 3;

/// Load the rules file
///
/// # Errors
///
/// Returns `FlagError::Io` if the file cannot be read, `FlagError::Parse`
/// or `FlagError::Validation` if it is invalid.
pub(crate) fn load_engine(path: &Path) -> Result<RulesEngine, FlagError> {
    if !path.exists() {
        return Err(FlagError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "rules file not found. Run 'flaggate init' to create one.",
            ),
        });
    }

    RulesEngine::load_from_path(path)
}

/// Exit code for a failed command
pub(crate) fn exit_code_for(error: &FlagError) -> i32 {
    if error.is_config_content_error() {
        EXIT_PARSE_ERROR
    } else {
        EXIT_ERROR
    }
}

/// Print an error to stderr and return its exit code
pub(crate) fn report_error(error: &FlagError) -> i32 {
    eprintln!("Error: {}", error);
    exit_code_for(error)
}

/// Stdout stream honoring the color choice
pub(crate) fn stdout_stream(color: ColorChoice) -> StandardStream {
    let choice = match color {
        ColorChoice::Always => termcolor::ColorChoice::Always,
        ColorChoice::Never => termcolor::ColorChoice::Never,
        ColorChoice::Auto if std::io::stdout().is_terminal() => termcolor::ColorChoice::Auto,
        ColorChoice::Auto => termcolor::ColorChoice::Never,
    };
    StandardStream::stdout(choice)
}

//! Error types for flaggate
//!
//! Each pipeline stage has its own error enum so callers can match on the
//! stage that failed. [`FlagError`] wraps all of them for the public
//! `load`/`evaluate` entry points.

use crate::types::{ContextField, SourceFormat};
use std::fmt;
use std::path::PathBuf;

/// A 1-based position in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Source text is not well-formed in its serialization grammar
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {} syntax{}: {}", .format, location_suffix(.location), .message)]
pub struct ParseError {
    /// Grammar the source was parsed with
    pub format: SourceFormat,

    /// Message reported by the underlying parser
    pub message: String,

    /// Where the problem was detected, if the parser reports it
    pub location: Option<SourceLocation>,
}

fn location_suffix(location: &Option<SourceLocation>) -> String {
    location
        .map(|location| format!(" at {location}"))
        .unwrap_or_default()
}

/// Source parsed, but does not describe a valid rule set
///
/// `path` is a dotted field path such as `flags.new-checkout.plans[1]`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Expected a mapping
    #[error("{path}: expected a mapping, found {found}")]
    NotAMapping { path: String, found: String },

    /// Required field is absent
    #[error("{path}: missing required field '{field}'")]
    MissingField { path: String, field: String },

    /// Field is not part of the schema
    #[error("{path}: unknown field '{field}'")]
    UnknownField { path: String, field: String },

    /// Field has the wrong type
    #[error("{path}: expected {expected}, found {found}")]
    InvalidType {
        path: String,
        expected: &'static str,
        found: String,
    },

    /// Plan value is not one of free, pro, enterprise
    #[error("{path}: invalid plan '{value}' (expected one of: free, pro, enterprise)")]
    InvalidPlan { path: String, value: String },

    /// String value is empty
    #[error("{path}: value must be a non-empty string")]
    EmptyValue { path: String },

    /// Flag name is empty or not a string
    #[error("{path}: invalid flag name {name}")]
    InvalidFlagName { path: String, name: String },
}

impl ValidationError {
    /// Returns the field path the error refers to
    pub fn path(&self) -> &str {
        match self {
            Self::NotAMapping { path, .. }
            | Self::MissingField { path, .. }
            | Self::UnknownField { path, .. }
            | Self::InvalidType { path, .. }
            | Self::InvalidPlan { path, .. }
            | Self::EmptyValue { path }
            | Self::InvalidFlagName { path, .. } => path,
        }
    }
}

/// User context passed to an evaluation is incomplete
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    /// A required context attribute is missing or empty
    #[error("user context is missing required field '{0}'")]
    MissingField(ContextField),

    /// The context plan is not a recognized plan
    #[error("user context has invalid plan '{0}' (expected one of: free, pro, enterprise)")]
    InvalidPlan(String),
}

/// The engine handle is used incorrectly
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// Evaluation attempted before any rule set was loaded
    #[error("no rules have been loaded; load a configuration before evaluating flags")]
    NotLoaded,

    /// A rule set was already installed in this slot
    #[error("rules are already loaded; a loaded rule set cannot be replaced")]
    AlreadyLoaded,
}

/// Top-level error type for flaggate
#[derive(Debug, thiserror::Error)]
pub enum FlagError {
    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Evaluation error
    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// I/O error while reading a rules file
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FlagError {
    /// Returns true for errors caused by the content of a rules file
    pub fn is_config_content_error(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::Validation(_))
    }
}

#![forbid(unsafe_code)]

//! Immutable handle over a validated rule set
//!
//! A `RulesEngine` only comes into existence after both parsing and
//! validation succeed, so a half-loaded rule set is never observable.

use crate::config::{parse, validate};
use crate::engine::evaluator::{self, Decision};
use crate::error::{EvaluationError, FlagError};
use crate::rules::{FeatureFlagRule, RulesConfiguration};
use crate::types::{SourceFormat, UserContext};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Loaded, read-only rule set
///
/// Cloning is cheap (the rules are shared behind an `Arc`) and the engine is
/// `Send + Sync`, so one engine can serve any number of threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulesEngine {
    configuration: Arc<RulesConfiguration>,
}

impl RulesEngine {
    /// Load rules from YAML source text
    ///
    /// # Errors
    ///
    /// Returns `FlagError::Parse` for malformed YAML and
    /// `FlagError::Validation` for schema violations.
    pub fn load(source: &str) -> Result<Self, FlagError> {
        Self::load_with_format(source, SourceFormat::Yaml)
    }

    /// Load rules from source text in the given format
    pub fn load_with_format(source: &str, format: SourceFormat) -> Result<Self, FlagError> {
        let tree = parse(source, format)?;
        let configuration = validate(&tree)?;
        Ok(Self::from_configuration(configuration))
    }

    /// Load rules from a file
    ///
    /// The format is picked from the extension (see [`SourceFormat::from_path`]).
    ///
    /// # Errors
    ///
    /// Returns `FlagError::Io` if the file cannot be read, otherwise the
    /// same errors as [`RulesEngine::load`].
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, FlagError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| FlagError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let engine = Self::load_with_format(&source, SourceFormat::from_path(path))?;
        tracing::debug!(path = %path.display(), flags = engine.len(), "loaded rules file");
        Ok(engine)
    }

    /// Wrap an already validated configuration
    pub fn from_configuration(configuration: RulesConfiguration) -> Self {
        Self {
            configuration: Arc::new(configuration),
        }
    }

    /// Get the rule for a flag (exact, case-sensitive name)
    pub fn rule(&self, flag_name: &str) -> Option<&FeatureFlagRule> {
        self.configuration.get(flag_name)
    }

    pub fn contains(&self, flag_name: &str) -> bool {
        self.configuration.contains(flag_name)
    }

    /// Flag names in sorted order
    pub fn flag_names(&self) -> Vec<&str> {
        self.configuration.flag_names()
    }

    pub fn configuration(&self) -> &RulesConfiguration {
        &self.configuration
    }

    pub fn len(&self) -> usize {
        self.configuration.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configuration.is_empty()
    }

    /// Evaluate a flag for a user; see [`evaluator::evaluate`]
    pub fn evaluate(&self, flag_name: &str, context: &UserContext) -> Result<bool, EvaluationError> {
        evaluator::evaluate(self, flag_name, context)
    }

    /// Evaluate a flag and report which step decided it; see [`evaluator::explain`]
    pub fn explain(
        &self,
        flag_name: &str,
        context: &UserContext,
    ) -> Result<Decision, EvaluationError> {
        evaluator::explain(self, flag_name, context)
    }
}

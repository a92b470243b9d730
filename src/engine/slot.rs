#![forbid(unsafe_code)]

//! Write-once holder for the process's rule set
//!
//! Applications that load their rules at startup and evaluate from many
//! places keep an `EngineSlot` (often in a `static`). Evaluating an empty slot
//! is reported as `ConfigurationError::NotLoaded` rather than silently
//! treating every flag as unknown.

use crate::engine::{Decision, RulesEngine};
use crate::error::{ConfigurationError, FlagError};
use crate::types::{SourceFormat, UserContext};
use std::path::Path;
use std::sync::OnceLock;

/// Holds at most one [`RulesEngine`], installed once
#[derive(Debug, Default)]
pub struct EngineSlot {
    engine: OnceLock<RulesEngine>,
}

impl EngineSlot {
    /// Creates an empty slot
    pub const fn new() -> Self {
        Self {
            engine: OnceLock::new(),
        }
    }

    /// Install a loaded engine
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::AlreadyLoaded` if the slot is occupied.
    pub fn install(&self, engine: RulesEngine) -> Result<&RulesEngine, ConfigurationError> {
        let flags = engine.len();
        self.engine
            .set(engine)
            .map_err(|_| ConfigurationError::AlreadyLoaded)?;
        tracing::debug!(flags, "installed rules engine");
        self.engine.get().ok_or(ConfigurationError::NotLoaded)
    }

    /// Parse, validate and install YAML rules
    ///
    /// On any failure the slot is left untouched.
    pub fn load(&self, source: &str) -> Result<&RulesEngine, FlagError> {
        self.load_with_format(source, SourceFormat::Yaml)
    }

    /// Parse, validate and install rules in the given format
    pub fn load_with_format(
        &self,
        source: &str,
        format: SourceFormat,
    ) -> Result<&RulesEngine, FlagError> {
        self.ensure_empty()?;
        let engine = RulesEngine::load_with_format(source, format).inspect_err(|e| {
            tracing::warn!(error = %e, "failed to load rules");
        })?;
        Ok(self.install(engine)?)
    }

    /// Parse, validate and install rules from a file
    pub fn load_from_path(&self, path: impl AsRef<Path>) -> Result<&RulesEngine, FlagError> {
        self.ensure_empty()?;
        let path = path.as_ref();
        let engine = RulesEngine::load_from_path(path).inspect_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "failed to load rules file");
        })?;
        Ok(self.install(engine)?)
    }

    /// The installed engine
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::NotLoaded` if nothing was installed yet.
    pub fn engine(&self) -> Result<&RulesEngine, ConfigurationError> {
        self.engine.get().ok_or(ConfigurationError::NotLoaded)
    }

    pub fn is_loaded(&self) -> bool {
        self.engine.get().is_some()
    }

    /// Evaluate a flag against the installed engine
    ///
    /// # Errors
    ///
    /// Returns `FlagError::Configuration` for an empty slot and
    /// `FlagError::Evaluation` for an incomplete context.
    pub fn evaluate(&self, flag_name: &str, context: &UserContext) -> Result<bool, FlagError> {
        Ok(self.engine()?.evaluate(flag_name, context)?)
    }

    /// Like [`EngineSlot::evaluate`], reporting the deciding step
    pub fn explain(&self, flag_name: &str, context: &UserContext) -> Result<Decision, FlagError> {
        Ok(self.engine()?.explain(flag_name, context)?)
    }

    fn ensure_empty(&self) -> Result<(), ConfigurationError> {
        if self.is_loaded() {
            return Err(ConfigurationError::AlreadyLoaded);
        }
        Ok(())
    }
}

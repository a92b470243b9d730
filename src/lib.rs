#![forbid(unsafe_code)]

//! flaggate: declarative feature flag rules
//!
//! Rules are written in YAML (or TOML), parsed into an untyped tree,
//! validated into an immutable [`RulesEngine`], and evaluated per user with
//! a fixed, short-circuiting decision order.
//!
//! ```
//! use flaggate::{UserContext, evaluate, load};
//!
//! let engine = load(
//!     r#"
//! flags:
//!   new-checkout:
//!     enabled: true
//!     plans: [pro, enterprise]
//! "#,
//! )?;
//!
//! let user = UserContext::from_parts("u1", "PRO", "US");
//! assert!(evaluate(&engine, "new-checkout", &user)?);
//! assert!(!evaluate(&engine, "unknown-flag", &user)?);
//! # Ok::<(), flaggate::FlagError>(())
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod rules;
pub mod types;

use std::path::Path;

// Re-export error types for convenient access
pub use error::{
    ConfigurationError, EvaluationError, FlagError, ParseError, SourceLocation, ValidationError,
};

// Re-export core domain types for convenient access
pub use engine::{Decision, EngineSlot, RulesEngine};
pub use rules::{FeatureFlagRule, RulesConfiguration};
pub use types::{ContextField, Plan, SourceFormat, UserContext};

/// Load a rules engine from YAML source text
///
/// # Errors
///
/// Returns `FlagError::Parse` or `FlagError::Validation`.
pub fn load(source: &str) -> Result<RulesEngine, FlagError> {
    RulesEngine::load(source)
}

/// Load a rules engine from a YAML or TOML file
///
/// # Errors
///
/// Returns `FlagError::Io`, `FlagError::Parse` or `FlagError::Validation`.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RulesEngine, FlagError> {
    RulesEngine::load_from_path(path)
}

/// Evaluate `flag_name` for `context`
///
/// Unknown flags evaluate to `false`.
///
/// # Errors
///
/// Returns `EvaluationError` if the context is missing a user id, plan or
/// region.
pub fn evaluate(
    engine: &RulesEngine,
    flag_name: &str,
    context: &UserContext,
) -> Result<bool, EvaluationError> {
    engine::evaluate(engine, flag_name, context)
}

#![forbid(unsafe_code)]

//! Flag rule definitions and the rule set

mod registry;
mod rule;

// Re-export core types
pub use registry::RulesConfiguration;
pub use rule::FeatureFlagRule;

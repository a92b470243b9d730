#![forbid(unsafe_code)]

//! Flag evaluation
//!
//! Evaluation is a pure function of the engine, the flag name and the user
//! context. The checks run in a fixed order and stop at the first one that
//! decides the outcome:
//!
//! 1. unknown flag → off
//! 2. user on the blocklist → off
//! 3. user on the allowlist → on (skips every later check, including `enabled`)
//! 4. `enabled: false` → off
//! 5. plan not in `plans` → off
//! 6. region not in `regions` → off
//! 7. otherwise → on

use crate::engine::RulesEngine;
use crate::error::EvaluationError;
use crate::types::UserContext;
use serde::Serialize;
use std::fmt;

/// The evaluation step that decided a flag's outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Flag is not in the configuration (fail-safe default)
    UnknownFlag,
    /// User id is on the blocklist
    Blocklisted,
    /// User id is on the allowlist
    Allowlisted,
    /// Rule has `enabled: false`
    Disabled,
    /// User plan is not in the rule's plans
    PlanMismatch,
    /// User region is not in the rule's regions
    RegionMismatch,
    /// Every restriction passed
    Matched,
}

impl Decision {
    /// Whether the flag is on for this decision
    pub fn enabled(self) -> bool {
        matches!(self, Decision::Allowlisted | Decision::Matched)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Decision::UnknownFlag => "unknown_flag",
            Decision::Blocklisted => "blocklisted",
            Decision::Allowlisted => "allowlisted",
            Decision::Disabled => "disabled",
            Decision::PlanMismatch => "plan_mismatch",
            Decision::RegionMismatch => "region_mismatch",
            Decision::Matched => "matched",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluate a flag for a user and report which step decided it
///
/// # Errors
///
/// Returns `EvaluationError` if the context lacks a user id, plan or region,
/// or names an unrecognized plan. An unknown flag is not an error.
pub fn explain(
    engine: &RulesEngine,
    flag_name: &str,
    context: &UserContext,
) -> Result<Decision, EvaluationError> {
    let user = context.resolve()?;

    let decision = match engine.rule(flag_name) {
        None => Decision::UnknownFlag,
        Some(rule) if rule.blocks(user.user_id) => Decision::Blocklisted,
        Some(rule) if rule.allows(user.user_id) => Decision::Allowlisted,
        Some(rule) if !rule.enabled() => Decision::Disabled,
        Some(rule) if !rule.matches_plan(user.plan) => Decision::PlanMismatch,
        Some(rule) if !rule.matches_region(user.region) => Decision::RegionMismatch,
        Some(_) => Decision::Matched,
    };

    tracing::debug!(
        flag = flag_name,
        user_id = user.user_id,
        decision = %decision,
        "evaluated flag"
    );
    Ok(decision)
}

/// Evaluate a flag for a user
///
/// # Errors
///
/// See [`explain`].
pub fn evaluate(
    engine: &RulesEngine,
    flag_name: &str,
    context: &UserContext,
) -> Result<bool, EvaluationError> {
    explain(engine, flag_name, context).map(Decision::enabled)
}

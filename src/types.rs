#![forbid(unsafe_code)]

//! Core domain types for flaggate
//!
//! This module defines the fundamental types shared by the parser, the
//! validator and the evaluator.

use crate::error::EvaluationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Subscription plans a rule can target
///
/// Plans are matched case-insensitively on input and always stored and
/// displayed in lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Plan {
    Free,
    Pro,
    Enterprise,
}

impl Plan {
    /// All recognized plans, in tier order
    pub const ALL: [Plan; 3] = [Plan::Free, Plan::Pro, Plan::Enterprise];

    /// Returns the lowercase name of the plan
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Pro => "pro",
            Plan::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Plan::ALL
            .into_iter()
            .find(|plan| plan.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("invalid plan '{s}'"))
    }
}

impl TryFrom<String> for Plan {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Serialization grammar of a rules source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// YAML (JSON documents are accepted as a YAML subset)
    #[default]
    Yaml,
    /// TOML
    Toml,
}

impl SourceFormat {
    /// Picks a format from a file extension
    ///
    /// `.toml` selects TOML; everything else (including no extension) is
    /// read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => SourceFormat::Toml,
            _ => SourceFormat::Yaml,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Yaml => f.write_str("YAML"),
            SourceFormat::Toml => f.write_str("TOML"),
        }
    }
}

/// Attributes of a [`UserContext`] that evaluation requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextField {
    UserId,
    Plan,
    Region,
}

impl fmt::Display for ContextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextField::UserId => f.write_str("userId"),
            ContextField::Plan => f.write_str("plan"),
            ContextField::Region => f.write_str("region"),
        }
    }
}

/// The user a flag is evaluated for
///
/// All attributes are optional at construction so that an incomplete context
/// can be reported as an [`EvaluationError`] instead of being unrepresentable
/// at the call site (contexts are often decoded from external input).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    #[serde(alias = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl UserContext {
    /// Creates an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context with all three attributes set
    pub fn from_parts(
        user_id: impl Into<String>,
        plan: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self::new()
            .with_user_id(user_id)
            .with_plan(plan)
            .with_region(region)
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_plan(mut self, plan: impl Into<String>) -> Self {
        self.plan = Some(plan.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Checks that every attribute is present and the plan is recognized
    ///
    /// Empty strings count as missing.
    pub fn resolve(&self) -> Result<ResolvedContext<'_>, EvaluationError> {
        let user_id = required(&self.user_id, ContextField::UserId)?;
        let plan = required(&self.plan, ContextField::Plan)?;
        let region = required(&self.region, ContextField::Region)?;
        let plan = plan
            .parse::<Plan>()
            .map_err(|_| EvaluationError::InvalidPlan(plan.to_string()))?;

        Ok(ResolvedContext {
            user_id,
            plan,
            region,
        })
    }
}

fn required(value: &Option<String>, field: ContextField) -> Result<&str, EvaluationError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(EvaluationError::MissingField(field)),
    }
}

/// A [`UserContext`] that passed [`UserContext::resolve`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedContext<'a> {
    pub user_id: &'a str,
    pub plan: Plan,
    pub region: &'a str,
}

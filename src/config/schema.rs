//! Schema validation and normalization of parsed rules sources
//!
//! Walks a [`Node`] tree once and builds a [`RulesConfiguration`]. The first
//! violation found is returned; nothing is built on failure.

use crate::config::parser::Node;
use crate::error::ValidationError;
use crate::rules::{FeatureFlagRule, RulesConfiguration};
use crate::types::Plan;
use std::collections::HashMap;

const ROOT_PATH: &str = "document";
const FLAGS_KEY: &str = "flags";

const ENABLED: &str = "enabled";
const PLANS: &str = "plans";
const REGIONS: &str = "regions";
const ALLOWLIST: &str = "allowlist";
const BLOCKLIST: &str = "blocklist";

const RULE_FIELDS: [&str; 5] = [ENABLED, PLANS, REGIONS, ALLOWLIST, BLOCKLIST];

/// Validates a parsed tree and produces the typed rule set
///
/// # Errors
///
/// Returns `ValidationError` for the first schema violation, naming the
/// field path and the offending value.
pub fn validate(root: &Node) -> Result<RulesConfiguration, ValidationError> {
    let top = mapping(root, ROOT_PATH)?;

    for (key, _) in top {
        match key.as_str() {
            Some(FLAGS_KEY) => {}
            Some(other) => {
                return Err(ValidationError::UnknownField {
                    path: ROOT_PATH.to_string(),
                    field: other.to_string(),
                });
            }
            None => {
                return Err(ValidationError::InvalidType {
                    path: ROOT_PATH.to_string(),
                    expected: "string key",
                    found: key.describe(),
                });
            }
        }
    }

    let flags = root
        .get(FLAGS_KEY)
        .ok_or_else(|| ValidationError::MissingField {
            path: ROOT_PATH.to_string(),
            field: FLAGS_KEY.to_string(),
        })?;

    let entries = mapping(flags, FLAGS_KEY)?;
    let mut rules = HashMap::with_capacity(entries.len());

    for (name, rule) in entries {
        let name = match name {
            Node::String(s) if !s.is_empty() => s,
            other => {
                return Err(ValidationError::InvalidFlagName {
                    path: FLAGS_KEY.to_string(),
                    name: other.describe(),
                });
            }
        };

        let path = format!("{FLAGS_KEY}.{name}");
        rules.insert(name.clone(), validate_rule(rule, &path)?);
    }

    let configuration: RulesConfiguration = rules.into_iter().collect();
    tracing::debug!(flags = configuration.len(), "validated rules configuration");
    Ok(configuration)
}

fn validate_rule(node: &Node, path: &str) -> Result<FeatureFlagRule, ValidationError> {
    for (key, _) in mapping(node, path)? {
        match key.as_str() {
            Some(field) if RULE_FIELDS.contains(&field) => {}
            Some(field) => {
                return Err(ValidationError::UnknownField {
                    path: path.to_string(),
                    field: field.to_string(),
                });
            }
            None => {
                return Err(ValidationError::InvalidType {
                    path: path.to_string(),
                    expected: "string key",
                    found: key.describe(),
                });
            }
        }
    }

    let enabled = match node.get(ENABLED) {
        Some(Node::Bool(enabled)) => *enabled,
        // `enabled: ~` is as good as missing; it never defaults
        None | Some(Node::Null) => {
            return Err(ValidationError::MissingField {
                path: path.to_string(),
                field: ENABLED.to_string(),
            });
        }
        Some(other) => {
            return Err(ValidationError::InvalidType {
                path: format!("{path}.{ENABLED}"),
                expected: "boolean",
                found: other.describe(),
            });
        }
    };

    let plans = plans(node.get(PLANS), &format!("{path}.{PLANS}"))?;
    let regions = strings(node.get(REGIONS), &format!("{path}.{REGIONS}"))?;
    let allowlist = strings(node.get(ALLOWLIST), &format!("{path}.{ALLOWLIST}"))?;
    let blocklist = strings(node.get(BLOCKLIST), &format!("{path}.{BLOCKLIST}"))?;

    Ok(FeatureFlagRule::new(enabled)
        .with_plans(plans)
        .with_regions(regions)
        .with_allowlist(allowlist)
        .with_blocklist(blocklist))
}

fn mapping<'a>(node: &'a Node, path: &str) -> Result<&'a [(Node, Node)], ValidationError> {
    match node {
        Node::Mapping(entries) => Ok(entries.as_slice()),
        other => Err(ValidationError::NotAMapping {
            path: path.to_string(),
            found: other.kind().to_string(),
        }),
    }
}

/// Items of an optional list field; absent and `null` both yield no items
fn sequence<'a>(node: Option<&'a Node>, path: &str) -> Result<&'a [Node], ValidationError> {
    match node {
        None | Some(Node::Null) => Ok(Default::default()),
        Some(Node::Sequence(items)) => Ok(items.as_slice()),
        Some(other) => Err(ValidationError::InvalidType {
            path: path.to_string(),
            expected: "sequence",
            found: other.describe(),
        }),
    }
}

fn plans(node: Option<&Node>, path: &str) -> Result<Vec<Plan>, ValidationError> {
    sequence(node, path)?
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Node::String(s) => s.parse().map_err(|_| ValidationError::InvalidPlan {
                path: format!("{path}[{i}]"),
                value: s.clone(),
            }),
            other => Err(ValidationError::InvalidPlan {
                path: format!("{path}[{i}]"),
                value: other.describe(),
            }),
        })
        .collect()
}

fn strings<'a>(node: Option<&'a Node>, path: &str) -> Result<Vec<&'a str>, ValidationError> {
    sequence(node, path)?
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Node::String(s) if s.is_empty() => Err(ValidationError::EmptyValue {
                path: format!("{path}[{i}]"),
            }),
            Node::String(s) => Ok(s.as_str()),
            other => Err(ValidationError::InvalidType {
                path: format!("{path}[{i}]"),
                expected: "string",
                found: other.describe(),
            }),
        })
        .collect()
}

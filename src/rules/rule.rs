#![forbid(unsafe_code)]

//! The targeting rule attached to a single feature flag

use crate::types::Plan;
use serde::Serialize;
use std::collections::BTreeSet;

/// Targeting rule for one flag
///
/// A rule is immutable once built. Empty sets are stored as `None`, so
/// "present but empty" never reaches the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureFlagRule {
    enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    plans: Option<BTreeSet<Plan>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    regions: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    allowlist: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    blocklist: Option<BTreeSet<String>>,
}

impl FeatureFlagRule {
    /// Creates a rule with only the enabled gate set
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            plans: None,
            regions: None,
            allowlist: None,
            blocklist: None,
        }
    }

    /// Restricts the rule to the given plans
    pub fn with_plans(mut self, plans: impl IntoIterator<Item = Plan>) -> Self {
        self.plans = non_empty(plans.into_iter().collect());
        self
    }

    /// Restricts the rule to the given regions (matched exactly)
    pub fn with_regions<S: Into<String>>(mut self, regions: impl IntoIterator<Item = S>) -> Self {
        self.regions = non_empty(regions.into_iter().map(Into::into).collect());
        self
    }

    /// Users that always see the flag on (unless blocklisted)
    pub fn with_allowlist<S: Into<String>>(mut self, users: impl IntoIterator<Item = S>) -> Self {
        self.allowlist = non_empty(users.into_iter().map(Into::into).collect());
        self
    }

    /// Users that always see the flag off
    pub fn with_blocklist<S: Into<String>>(mut self, users: impl IntoIterator<Item = S>) -> Self {
        self.blocklist = non_empty(users.into_iter().map(Into::into).collect());
        self
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn plans(&self) -> Option<&BTreeSet<Plan>> {
        self.plans.as_ref()
    }

    pub fn regions(&self) -> Option<&BTreeSet<String>> {
        self.regions.as_ref()
    }

    pub fn allowlist(&self) -> Option<&BTreeSet<String>> {
        self.allowlist.as_ref()
    }

    pub fn blocklist(&self) -> Option<&BTreeSet<String>> {
        self.blocklist.as_ref()
    }

    /// Returns true if the user id is on the blocklist
    pub fn blocks(&self, user_id: &str) -> bool {
        self.blocklist.as_ref().is_some_and(|set| set.contains(user_id))
    }

    /// Returns true if the user id is on the allowlist
    pub fn allows(&self, user_id: &str) -> bool {
        self.allowlist.as_ref().is_some_and(|set| set.contains(user_id))
    }

    /// Returns true if the plan passes the plan restriction (or there is none)
    pub fn matches_plan(&self, plan: Plan) -> bool {
        self.plans.as_ref().is_none_or(|set| set.contains(&plan))
    }

    /// Returns true if the region passes the region restriction (or there is none)
    pub fn matches_region(&self, region: &str) -> bool {
        self.regions.as_ref().is_none_or(|set| set.contains(region))
    }
}

fn non_empty<T: Ord>(set: BTreeSet<T>) -> Option<BTreeSet<T>> {
    if set.is_empty() { None } else { Some(set) }
}

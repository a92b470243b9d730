#![forbid(unsafe_code)]

//! Validated rule set indexed by flag name

use crate::rules::FeatureFlagRule;
use std::collections::HashMap;

/// All rules of a loaded configuration, keyed by exact flag name
///
/// There is no way to add, remove or replace a rule after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RulesConfiguration {
    rules: HashMap<String, FeatureFlagRule>,
}

impl RulesConfiguration {
    /// Get a rule by flag name (case-sensitive)
    pub fn get(&self, flag_name: &str) -> Option<&FeatureFlagRule> {
        self.rules.get(flag_name)
    }

    pub fn contains(&self, flag_name: &str) -> bool {
        self.rules.contains_key(flag_name)
    }

    /// Flag names in sorted order
    pub fn flag_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Iterate over `(name, rule)` pairs in flag name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureFlagRule)> {
        let mut entries: Vec<_> = self
            .rules
            .iter()
            .map(|(name, rule)| (name.as_str(), rule))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<(String, FeatureFlagRule)> for RulesConfiguration {
    fn from_iter<I: IntoIterator<Item = (String, FeatureFlagRule)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RulesConfiguration {
        [
            ("zeta".to_string(), FeatureFlagRule::new(true)),
            ("alpha".to_string(), FeatureFlagRule::new(false)),
            ("Beta".to_string(), FeatureFlagRule::new(true)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let config = sample();
        assert!(config.contains("Beta"));
        assert!(!config.contains("beta"));
        assert_eq!(config.get("alpha"), Some(&FeatureFlagRule::new(false)));
        assert_eq!(config.get("missing"), None);
    }

    #[test]
    fn test_names_are_sorted() {
        let config = sample();
        assert_eq!(config.flag_names(), vec!["Beta", "alpha", "zeta"]);
        let names: Vec<_> = config.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Beta", "alpha", "zeta"]);
    }

    #[test]
    fn test_empty_configuration() {
        let config = RulesConfiguration::default();
        assert!(config.is_empty());
        assert_eq!(config.len(), 0);
        assert!(config.flag_names().is_empty());
    }
}

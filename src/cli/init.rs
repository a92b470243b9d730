//! Write a starter rules file

use crate::types::SourceFormat;
use std::fs;
use std::path::Path;

/// Default content for a new rules file
pub(crate) const DEFAULT_FLAGS_YAML: &str = r#"# Feature flag rules
#
# Each flag needs `enabled`. Every other field is optional; an omitted or
# empty list places no restriction.
#
# Evaluation order (the first match decides):
#   1. unknown flag          -> off
#   2. user in blocklist     -> off
#   3. user in allowlist     -> on (even when enabled is false)
#   4. enabled: false        -> off
#   5. plan not in plans     -> off
#   6. region not in regions -> off
#   7. otherwise             -> on
#
# Plans are free, pro or enterprise (any case). Regions and user ids are
# matched exactly.

flags:
  example-flag:
    enabled: false
    # plans: [pro, enterprise]
    # regions: [US, CA]
    # allowlist: [internal-tester]
    # blocklist: []
"#;

/// Default content for a new `.toml` rules file
pub(crate) const DEFAULT_FLAGS_TOML: &str = r#"# Feature flag rules
#
# Each flag is a [flags.<name>] table and needs `enabled`. Every other field
# is optional; an omitted or empty list places no restriction.
#
# Evaluation order (the first match decides):
#   1. unknown flag          -> off
#   2. user in blocklist     -> off
#   3. user in allowlist     -> on (even when enabled is false)
#   4. enabled = false       -> off
#   5. plan not in plans     -> off
#   6. region not in regions -> off
#   7. otherwise             -> on
#
# Plans are free, pro or enterprise (any case). Regions and user ids are
# matched exactly.

[flags.example-flag]
enabled = false
# plans = ["pro", "enterprise"]
# regions = ["US", "CA"]
# allowlist = ["internal-tester"]
# blocklist = []
"#;

/// Starter content in the format the rules file will be read with
pub(crate) fn default_content(path: &Path) -> &'static str {
    match SourceFormat::from_path(path) {
        SourceFormat::Yaml => DEFAULT_FLAGS_YAML,
        SourceFormat::Toml => DEFAULT_FLAGS_TOML,
    }
}

/// Error type for init command
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Path error
    #[error("Path error: {0}")]
    Path(String),
}

/// What init did with the rules file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    /// File existed and `force` was not given
    Skipped,
    Overwritten,
}

/// Run the init command
///
/// # Arguments
/// * `path` - Rules file to create; a `.toml` path gets TOML content
/// * `force` - If true, overwrite an existing file. If false, leave it alone.
///
/// # Errors
/// Returns `InitError` if the path is a directory or cannot be written.
pub fn run_init(path: &Path, force: bool) -> Result<InitOutcome, InitError> {
    if path.is_dir() {
        return Err(InitError::Path(format!(
            "Path '{}' is a directory",
            path.display()
        )));
    }

    let outcome = if path.exists() {
        if !force {
            return Ok(InitOutcome::Skipped);
        }
        InitOutcome::Overwritten
    } else {
        InitOutcome::Created
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_content(path))?;

    Ok(outcome)
}

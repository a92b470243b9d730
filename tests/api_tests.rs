//! Integration tests for the library API
//!
//! Covers loading from text and files, the decision order, and the
//! write-once engine slot.

mod common;

use common::TestResult;
use flaggate::{
    ConfigurationError, ContextField, Decision, EngineSlot, EvaluationError, FlagError, Plan,
    RulesEngine, SourceFormat, UserContext, ValidationError, evaluate, load, load_from_path,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn user(id: &str, plan: &str, region: &str) -> UserContext {
    UserContext::from_parts(id, plan, region)
}

#[test]
fn test_pro_user_in_us_gets_new_checkout() -> TestResult {
    let engine = load(
        r#"
flags:
  new-checkout:
    enabled: true
    plans: [pro, enterprise]
    regions: [US, CA]
"#,
    )?;

    assert!(evaluate(&engine, "new-checkout", &user("u1", "PRO", "US"))?);
    assert!(!evaluate(&engine, "new-checkout", &user("u1", "free", "US"))?);
    assert!(!evaluate(&engine, "new-checkout", &user("u1", "pro", "EU"))?);
    Ok(())
}

#[test]
fn test_allowlist_overrides_disabled_flag() -> TestResult {
    let engine = load_from_path(fixture("flags.yaml"))?;

    assert!(evaluate(&engine, "beta-dashboard", &user("user-qa", "free", "EU"))?);
    assert!(!evaluate(&engine, "beta-dashboard", &user("user-other", "enterprise", "US"))?);
    Ok(())
}

#[test]
fn test_blocklist_wins_over_everything() -> TestResult {
    let engine = load(
        r#"
flags:
  beta:
    enabled: true
    allowlist: [u1]
    blocklist: [u1]
"#,
    )?;

    assert_eq!(
        engine.explain("beta", &user("u1", "enterprise", "US"))?,
        Decision::Blocklisted
    );
    assert!(!evaluate(&engine, "beta", &user("u1", "enterprise", "US"))?);
    Ok(())
}

#[test]
fn test_unknown_flag_is_off() -> TestResult {
    let engine = load_from_path(fixture("flags.yaml"))?;
    assert_eq!(
        engine.explain("does-not-exist", &user("u1", "pro", "US"))?,
        Decision::UnknownFlag
    );
    assert!(!evaluate(&engine, "does-not-exist", &user("u1", "pro", "US"))?);
    Ok(())
}

#[test]
fn test_unrestricted_flag_is_on_for_everyone() -> TestResult {
    let engine = load_from_path(fixture("flags.yaml"))?;
    for plan in Plan::ALL {
        for region in ["US", "EU", "JP"] {
            assert!(evaluate(&engine, "dark-mode", &user("anyone", plan.as_str(), region))?);
            assert!(evaluate(&engine, "legacy-export", &user("anyone", plan.as_str(), region))?);
        }
    }
    Ok(())
}

#[test]
fn test_incomplete_context_is_an_error() -> TestResult {
    let engine = load_from_path(fixture("flags.yaml"))?;

    let err = evaluate(
        &engine,
        "dark-mode",
        &UserContext::new().with_user_id("u1").with_plan("pro"),
    )
    .unwrap_err();
    assert_eq!(err, EvaluationError::MissingField(ContextField::Region));

    let err = evaluate(&engine, "dark-mode", &user("u1", "gold", "US")).unwrap_err();
    assert_eq!(err, EvaluationError::InvalidPlan("gold".to_string()));
    Ok(())
}

#[test]
fn test_yaml_and_toml_fixtures_agree() -> TestResult {
    let yaml = load_from_path(fixture("flags.yaml"))?;
    let toml = load_from_path(fixture("flags.toml"))?;

    assert_eq!(yaml.flag_names(), toml.flag_names());
    for name in yaml.flag_names() {
        assert_eq!(yaml.rule(name), toml.rule(name), "rule {name} differs");
    }

    let contexts = [
        user("u1", "pro", "US"),
        user("u2", "free", "CA"),
        user("user-banned", "enterprise", "CA"),
        user("user-qa", "free", "EU"),
    ];
    for name in yaml.flag_names() {
        for context in &contexts {
            assert_eq!(yaml.explain(name, context)?, toml.explain(name, context)?);
        }
    }
    Ok(())
}

#[test]
fn test_load_with_explicit_toml_format() -> TestResult {
    let engine = RulesEngine::load_with_format(
        "[flags.beta]\nenabled = true\nregions = [\"US\"]\n",
        SourceFormat::Toml,
    )?;
    assert!(engine.evaluate("beta", &user("u1", "free", "US"))?);
    Ok(())
}

#[test]
fn test_invalid_plan_fixture_reports_path() {
    let err = load_from_path(fixture("invalid_plan.yaml")).unwrap_err();
    match err {
        FlagError::Validation(ValidationError::InvalidPlan { path, value }) => {
            assert_eq!(path, "flags.new-checkout.plans[1]");
            assert_eq!(value, "platinum");
        }
        other => panic!("expected InvalidPlan, got {other:?}"),
    }
}

#[test]
fn test_syntax_error_is_parse_error() {
    match load("flags:\n  beta: [unclosed\n").unwrap_err() {
        FlagError::Parse(parse) => {
            assert_eq!(parse.format, SourceFormat::Yaml);
            assert!(parse.location.is_some());
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_missing_enabled_is_validation_error() {
    let err = load("flags:\n  beta:\n    plans: [pro]\n").unwrap_err();
    assert!(matches!(
        err,
        FlagError::Validation(ValidationError::MissingField { ref field, .. }) if field == "enabled"
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = load_from_path(fixture("no-such-file.yaml")).unwrap_err();
    assert!(matches!(err, FlagError::Io { .. }));
    assert!(!err.is_config_content_error());
}

#[test]
fn test_evaluation_is_deterministic() -> TestResult {
    let engine = load_from_path(fixture("flags.yaml"))?;
    let context = user("u1", "enterprise", "CA");
    let first = engine.explain("new-checkout", &context)?;
    for _ in 0..100 {
        assert_eq!(engine.explain("new-checkout", &context)?, first);
    }
    Ok(())
}

#[test]
fn test_engine_shared_across_threads() -> TestResult {
    let engine = Arc::new(load_from_path(fixture("flags.yaml"))?);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let region = if i % 2 == 0 { "US" } else { "EU" };
                engine.evaluate("new-checkout", &user(&format!("u{i}"), "pro", region))
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let enabled = assert_ok!(handle.join().map_err(|_| "thread panicked"))?;
        assert_eq!(enabled, i % 2 == 0);
    }
    Ok(())
}

#[test]
fn test_engine_slot_lifecycle() -> TestResult {
    let slot = EngineSlot::new();
    let context = user("u1", "pro", "US");

    assert!(matches!(
        slot.evaluate("dark-mode", &context),
        Err(FlagError::Configuration(ConfigurationError::NotLoaded))
    ));

    slot.load_from_path(fixture("flags.yaml"))?;
    assert!(slot.evaluate("dark-mode", &context)?);

    let err = slot.load("flags: {}\n").unwrap_err();
    assert!(matches!(
        err,
        FlagError::Configuration(ConfigurationError::AlreadyLoaded)
    ));
    assert!(slot.evaluate("dark-mode", &context)?);
    Ok(())
}

#[test]
fn test_rule_accessors_reflect_source() -> TestResult {
    let engine = load_from_path(fixture("flags.yaml"))?;
    let rule = assert_some!(engine.rule("new-checkout"));

    assert!(rule.enabled());
    let plans: Vec<Plan> = assert_some!(rule.plans()).iter().copied().collect();
    assert_eq!(plans, vec![Plan::Pro, Plan::Enterprise]);
    assert!(rule.blocks("user-banned"));
    assert!(rule.allowlist().is_none());

    let unrestricted = assert_some!(engine.rule("legacy-export"));
    assert!(unrestricted.plans().is_none());
    assert!(unrestricted.regions().is_none());
    Ok(())
}

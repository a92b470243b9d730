//! Performance benchmarks for flaggate
//!
//! These benchmarks measure:
//! - Loading (parse + validate) rule sets of increasing size
//! - Single flag evaluation on a loaded engine
//! - Batch evaluation of JSON Lines contexts
//!
//! ## Running Benchmarks
//!
//! ```bash
//! cargo bench
//! cargo bench evaluation
//! ```
//!
//! Evaluation is a hash lookup plus set membership checks, so per-call time
//! should stay flat as the rule set grows. Loading scales linearly with the
//! number of flags.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use flaggate::cli::batch::evaluate_batch;
use flaggate::{RulesEngine, SourceFormat, UserContext};

// ============================================================================
// Helper Functions
// ============================================================================

/// YAML rule set with `count` flags mixing every kind of restriction
fn rules_yaml(count: usize) -> String {
    let mut yaml = String::from("flags:\n");
    for i in 0..count {
        yaml.push_str(&format!("  flag-{i}:\n    enabled: {}\n", i % 5 != 0));
        if i % 2 == 0 {
            yaml.push_str("    plans: [pro, enterprise]\n");
        }
        if i % 3 == 0 {
            yaml.push_str("    regions: [US, CA, GB, DE]\n");
        }
        if i % 4 == 0 {
            yaml.push_str(&format!("    allowlist: [qa-{i}, staff-{i}]\n"));
            yaml.push_str(&format!("    blocklist: [banned-{i}]\n"));
        }
    }
    yaml
}

/// Same rules as [`rules_yaml`] in TOML
fn rules_toml(count: usize) -> String {
    let mut toml = String::new();
    for i in 0..count {
        toml.push_str(&format!("[flags.flag-{i}]\nenabled = {}\n", i % 5 != 0));
        if i % 2 == 0 {
            toml.push_str("plans = [\"pro\", \"enterprise\"]\n");
        }
        if i % 3 == 0 {
            toml.push_str("regions = [\"US\", \"CA\", \"GB\", \"DE\"]\n");
        }
        if i % 4 == 0 {
            toml.push_str(&format!("allowlist = [\"qa-{i}\", \"staff-{i}\"]\n"));
            toml.push_str(&format!("blocklist = [\"banned-{i}\"]\n"));
        }
    }
    toml
}

fn contexts_jsonl(count: usize) -> String {
    let plans = ["free", "pro", "enterprise"];
    let regions = ["US", "CA", "EU", "JP"];
    (0..count)
        .map(|i| {
            format!(
                "{{\"user_id\": \"user-{i}\", \"plan\": \"{}\", \"region\": \"{}\"}}\n",
                plans[i % plans.len()],
                regions[i % regions.len()]
            )
        })
        .collect()
}

// ============================================================================
// Loading Benchmarks
// ============================================================================

fn bench_loading(c: &mut Criterion) {
    let mut group = c.benchmark_group("loading");

    for flag_count in [10, 100, 1000].iter() {
        let yaml = rules_yaml(*flag_count);
        let toml = rules_toml(*flag_count);

        group.throughput(Throughput::Elements(*flag_count as u64));

        group.bench_with_input(BenchmarkId::new("yaml", flag_count), &yaml, |b, source| {
            b.iter(|| RulesEngine::load(black_box(source)).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("toml", flag_count), &toml, |b, source| {
            b.iter(|| RulesEngine::load_with_format(black_box(source), SourceFormat::Toml).unwrap());
        });
    }

    group.finish();
}

// ============================================================================
// Evaluation Benchmarks
// ============================================================================

fn bench_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation");
    let engine = RulesEngine::load(&rules_yaml(100)).unwrap();

    let cases = [
        ("matched", "flag-6", UserContext::from_parts("u1", "pro", "US")),
        ("blocklisted", "flag-4", UserContext::from_parts("banned-4", "pro", "US")),
        ("allowlisted", "flag-0", UserContext::from_parts("qa-0", "free", "JP")),
        ("plan_mismatch", "flag-2", UserContext::from_parts("u1", "free", "US")),
        ("unknown_flag", "no-such-flag", UserContext::from_parts("u1", "pro", "US")),
    ];

    for (name, flag, context) in cases.iter() {
        group.bench_function(*name, |b| {
            b.iter(|| engine.evaluate(black_box(flag), black_box(context)).unwrap());
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let engine = RulesEngine::load(&rules_yaml(100)).unwrap();

    for line_count in [100, 10_000].iter() {
        let input = contexts_jsonl(*line_count);
        group.throughput(Throughput::Elements(*line_count as u64));
        group.bench_with_input(BenchmarkId::new("lines", line_count), &input, |b, input| {
            b.iter(|| evaluate_batch(&engine, "flag-6", black_box(input)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_loading, bench_evaluation, bench_batch);
criterion_main!(benches);

#![forbid(unsafe_code)]

//! Human-readable output formatter
//!
//! Writes through `termcolor` so the same code serves colored terminals,
//! plain pipes and in-memory test buffers.

use crate::engine::RulesEngine;
use crate::output::{BatchEntry, Evaluation};
use crate::rules::FeatureFlagRule;
use std::collections::BTreeSet;
use std::io;
use termcolor::{Color, ColorSpec, WriteColor};

/// Human-readable output formatter
pub struct HumanFormatter;

impl HumanFormatter {
    /// Creates a new HumanFormatter
    pub fn new() -> Self {
        HumanFormatter
    }

    /// Write a single evaluation, e.g. `beta [u1]: ON (matched)`
    pub fn write_evaluation(
        &self,
        out: &mut dyn WriteColor,
        evaluation: &Evaluation,
    ) -> io::Result<()> {
        write!(out, "{} [{}]: ", evaluation.flag, evaluation.user_id)?;
        write_state(out, evaluation.enabled())?;
        writeln!(out, " ({})", evaluation.decision)
    }

    /// Write batch results in input order
    pub fn write_batch(&self, out: &mut dyn WriteColor, entries: &[BatchEntry]) -> io::Result<()> {
        for entry in entries {
            match &entry.result {
                Ok(evaluation) => self.write_evaluation(out, evaluation)?,
                Err(message) => {
                    write!(out, "line {}: ", entry.line)?;
                    out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
                    write!(out, "error")?;
                    out.reset()?;
                    writeln!(out, ": {message}")?;
                }
            }
        }
        Ok(())
    }

    /// Write one line per flag, sorted by name
    pub fn write_flags(&self, out: &mut dyn WriteColor, engine: &RulesEngine) -> io::Result<()> {
        if engine.is_empty() {
            return writeln!(out, "No flags are defined.");
        }

        for (name, rule) in engine.configuration().iter() {
            write!(out, "{name}: ")?;
            write_state(out, rule.enabled())?;
            writeln!(out, " ({})", describe_rule(rule))?;
        }
        Ok(())
    }

    /// Write the result of validating a rules file
    pub fn write_check(
        &self,
        out: &mut dyn WriteColor,
        source: &str,
        result: &Result<usize, String>,
    ) -> io::Result<()> {
        write!(out, "{source}: ")?;
        match result {
            Ok(flags) => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
                write!(out, "OK")?;
                out.reset()?;
                let noun = if *flags == 1 { "flag" } else { "flags" };
                writeln!(out, " ({flags} {noun})")
            }
            Err(message) => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
                write!(out, "INVALID")?;
                out.reset()?;
                writeln!(out)?;
                writeln!(out, "  {message}")
            }
        }
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_state(out: &mut dyn WriteColor, enabled: bool) -> io::Result<()> {
    let (label, color) = if enabled {
        ("ON", Color::Green)
    } else {
        ("OFF", Color::Red)
    };
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{label}")?;
    out.reset()
}

/// Summarize the restrictions of a rule in one line
fn describe_rule(rule: &FeatureFlagRule) -> String {
    let mut parts = Vec::new();

    if let Some(plans) = rule.plans() {
        let plans: Vec<&str> = plans.iter().map(|p| p.as_str()).collect();
        parts.push(format!("plans: {}", plans.join(", ")));
    }
    if let Some(regions) = rule.regions() {
        parts.push(format!("regions: {}", join(regions)));
    }
    if let Some(users) = rule.allowlist() {
        parts.push(format!("allowlist: {}", count_users(users)));
    }
    if let Some(users) = rule.blocklist() {
        parts.push(format!("blocklist: {}", count_users(users)));
    }

    if parts.is_empty() {
        "all users".to_string()
    } else {
        parts.join("; ")
    }
}

fn join(values: &BTreeSet<String>) -> String {
    values.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

fn count_users(users: &BTreeSet<String>) -> String {
    match users.len() {
        1 => "1 user".to_string(),
        n => format!("{n} users"),
    }
}

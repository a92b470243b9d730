//! Eval command implementation
//!
//! Evaluates a single flag for a single user.
//!
//! Exit code:
//! - 0: flag is on
//! - 1: flag is off
//! - 2: error (unreadable rules file, incomplete user context)
//! - 3: invalid rules file

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::cli::common::{
    EXIT_ERROR, EXIT_FLAG_OFF, EXIT_SUCCESS, load_engine, report_error, stdout_stream,
};
use crate::engine::RulesEngine;
use crate::error::EvaluationError;
use crate::output::{Evaluation, HumanFormatter, JsonlFormatter};
use crate::types::UserContext;
use std::path::Path;

/// Context attributes given on the command line
#[derive(Debug, Clone, Default)]
pub struct EvalArgs {
    pub user_id: Option<String>,
    pub plan: Option<String>,
    pub region: Option<String>,
}

impl EvalArgs {
    fn to_context(&self) -> UserContext {
        UserContext {
            user_id: self.user_id.clone(),
            plan: self.plan.clone(),
            region: self.region.clone(),
        }
    }
}

/// Run the eval command
pub fn run_eval(
    rules: &Path,
    flag: &str,
    args: &EvalArgs,
    format: OutputFormat,
    color: ColorChoice,
) -> i32 {
    let evaluation = match load_engine(rules)
        .and_then(|engine| Ok(evaluate_one(&engine, flag, &args.to_context())?))
    {
        Ok(evaluation) => evaluation,
        Err(e) => return report_error(&e),
    };

    let written = match format {
        OutputFormat::Human => {
            HumanFormatter::new().write_evaluation(&mut stdout_stream(color), &evaluation)
        }
        OutputFormat::Jsonl => {
            let formatter = JsonlFormatter::new();
            formatter.write_to_stdout(&formatter.format_evaluation(&evaluation))
        }
    };

    match written {
        Ok(()) if evaluation.enabled() => EXIT_SUCCESS,
        Ok(()) => EXIT_FLAG_OFF,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    }
}

/// Evaluate one flag and package the result for output
pub(crate) fn evaluate_one(
    engine: &RulesEngine,
    flag: &str,
    context: &UserContext,
) -> Result<Evaluation, EvaluationError> {
    let decision = engine.explain(flag, context)?;
    Ok(Evaluation {
        flag: flag.to_string(),
        user_id: context.user_id.clone().unwrap_or_default(),
        decision,
    })
}

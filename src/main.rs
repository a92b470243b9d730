//! flaggate CLI entry point

use clap::Parser;
use flaggate::cli::common::{EXIT_ERROR, EXIT_SUCCESS};
use flaggate::cli::eval::EvalArgs;
use flaggate::cli::init::InitOutcome;
use flaggate::cli::{Command, args::Cli};
use std::process;

fn main() {
    let cli = Cli::parse();
    flaggate::cli::logging::init_logging(cli.verbose);

    let exit_code = match cli.command {
        Command::Init { force } => match flaggate::cli::init::run_init(&cli.rules, force) {
            Ok(outcome) => {
                let path = cli.rules.display();
                match outcome {
                    InitOutcome::Created => println!("Created {path}."),
                    InitOutcome::Overwritten => println!("Overwrote {path}."),
                    InitOutcome::Skipped => {
                        println!("{path} already exists; use --force to overwrite it.")
                    }
                }
                EXIT_SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                EXIT_ERROR
            }
        },
        Command::Check => flaggate::cli::check::run_check(&cli.rules, cli.format, cli.color),
        Command::List => flaggate::cli::list::run_list(&cli.rules, cli.format, cli.color),
        Command::Eval {
            flag,
            user_id,
            plan,
            region,
        } => flaggate::cli::eval::run_eval(
            &cli.rules,
            &flag,
            &EvalArgs {
                user_id,
                plan,
                region,
            },
            cli.format,
            cli.color,
        ),
        Command::Batch { flag, contexts } => flaggate::cli::batch::run_batch(
            &cli.rules,
            &flag,
            contexts.as_deref(),
            cli.format,
            cli.color,
        ),
    };

    process::exit(exit_code);
}

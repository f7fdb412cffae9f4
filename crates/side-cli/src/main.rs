mod cli_args;
mod loader;

use std::fs;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context as _};
use clap::Parser;
use side_core::Outcome;
use side_runtime::{CommandRegistry, ExecutionContext, TestCase};
use tracing_subscriber::EnvFilter;

use cli_args::Cli;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(outcome) if outcome.is_success() => ExitCode::SUCCESS,
        Ok(outcome) => {
            eprintln!("verdict: {outcome}");
            ExitCode::FAILURE
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<Outcome> {
    let text = fs::read_to_string(&cli.script)
        .with_context(|| format!("failed to read {}", cli.script.display()))?;
    let name = cli
        .script
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "script".to_string());

    let registry = CommandRegistry::builtin();
    let mut case = TestCase::with_script(cli.script.to_string_lossy(), name, &cli.base_url);
    for parsed in loader::parse_script(&text) {
        case.add_new_command(&registry, &parsed.name, &parsed.args)
            .with_context(|| format!("failed to build command \"{}\"", parsed.name))?;
    }

    let mut context = ExecutionContext::with_speed(Duration::from_millis(cli.speed_ms));
    for assignment in &cli.set {
        let Some((variable, value)) = assignment.split_once('=') else {
            bail!("--set expects NAME=VALUE, got \"{assignment}\"");
        };
        context.vars_mut().set(variable, value);
    }

    let outcome = case.execute(&mut context);

    if cli.log_json {
        let rendered = serde_json::to_string_pretty(context.log().commands())
            .context("failed to render the command log")?;
        println!("{rendered}");
    } else {
        for entry in context.log().entries() {
            println!("{}", entry.message);
        }
    }
    if let Some(duration) = context.stop_watch().duration() {
        eprintln!("{case}: {outcome} ({:.3}s)", duration.as_secs_f64());
    }

    Ok(outcome)
}

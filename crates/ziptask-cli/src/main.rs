//! ziptask CLI - zip and unzip tasks for local use and scripting.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use ziptask_core::TaskContext;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    if let Err(err) = logging::init_tracing(cli.verbose, cli.quiet) {
        eprintln!("Error: {err:?}");
        return ExitCode::FAILURE;
    }

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match run(&cli, &*formatter) {
        Ok(code) => code,
        Err(err) => {
            formatter.format_error(cli.command.operation(), &err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &cli::Cli, formatter: &dyn output::OutputFormatter) -> Result<ExitCode> {
    if let cli::Commands::Completion(args) = &cli.command {
        commands::completion::execute(args.shell);
        return Ok(ExitCode::SUCCESS);
    }

    let ctx = session_context(cli.session_dir.as_deref())?;
    tracing::debug!(session_dir = %ctx.session_dir().display(), "session context");

    let outcome = match &cli.command {
        cli::Commands::Zip(args) => commands::zip::execute(args, &ctx, formatter),
        cli::Commands::Unzip(args) => commands::unzip::execute(args, &ctx, formatter),
        cli::Commands::List(args) => commands::list::execute(args, formatter),
        cli::Commands::Verify(args) => return commands::verify::execute(args, formatter),
        cli::Commands::Run(args) => commands::run::execute(args, &ctx, formatter),
        cli::Commands::Completion(_) => Ok(()),
    };
    outcome.map(|()| ExitCode::SUCCESS)
}

fn session_context(session_dir: Option<&Path>) -> Result<TaskContext> {
    match session_dir {
        Some(dir) if !dir.as_os_str().is_empty() => Ok(TaskContext::new(dir)),
        _ => TaskContext::from_env().context("failed to determine the session directory"),
    }
}

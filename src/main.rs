use anyhow::{Context, Result};

use pdga_rating_estimator::cli::Cli;
use pdga_rating_estimator::{OutputFormat, handle_completions, handle_estimate, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    execute_command(cli)
}

fn execute_command(cli: Cli) -> Result<()> {
    if let Some(shell) = cli.completions {
        handle_completions(shell);
        return Ok(());
    }

    let format = OutputFormat::from_cli(&cli);
    let pdga_number = cli.pdga_number.context("a PDGA number is required")?;
    handle_estimate(pdga_number, cli.what_if, format)
}

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod rate_limiter;
pub mod rating;
pub mod report;
pub mod services;

use std::io::IsTerminal;

use anyhow::Result;
use chrono::Utc;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::api::PdgaClient;
use crate::config::AppConfig;
use crate::services::{EstimateRequest, EstimationService};

pub fn interpret() -> Cli {
    Cli::parse()
}

/// How the report reaches stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text { color: bool },
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text {
                color: !cli.no_color && std::io::stdout().is_terminal(),
            }
        }
    }
}

pub fn handle_estimate(pdga_number: u32, what_if: Vec<i32>, format: OutputFormat) -> Result<()> {
    let config = AppConfig::from_env();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let client = PdgaClient::new(&config.scraper)?;
    let mut service = EstimationService::new(client, config);
    let request = EstimateRequest {
        pdga_number,
        what_if,
        now: Utc::now().timestamp(),
    };
    let report = runtime.block_on(service.run(&request))?;

    match format {
        OutputFormat::Json => println!("{}", report.render_json()?),
        OutputFormat::Text { color } => print!("{}", report.render_text(color)),
    }
    Ok(())
}

pub fn handle_completions(shell: Shell) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
}

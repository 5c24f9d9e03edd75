mod chart;
mod cli;
mod config;
mod display;
mod error;
mod export;
mod log;
mod menu;
mod models;
mod report;
mod storage;
mod store;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    log::init_logging(cli.verbose);
    let result = cli::run(cli);
    if let Err(e) = &result {
        tracing::error!(error = %e, "expense tracker failed");
    }
    result
}

use crate::config::AppConfig;
use crate::menu::Menu;
use crate::store::ExpenseStore;
use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "expenses")]
#[command(about = "Personal expense tracker with an interactive menu")]
pub struct Cli {
    /// Directory holding settings.json (defaults to the platform data directory)
    #[arg(long)]
    pub home: Option<PathBuf>,

    /// Expense data file, overriding the one named in settings
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn run(cli: Cli) -> Result<()> {
    let cfg = AppConfig::load(cli.home)?;
    debug!(settings = %cfg.settings_path().display(), "loaded settings");

    let data_file = cli
        .data_file
        .unwrap_or_else(|| cfg.settings.paths.data_file.clone());
    let (mut store, warnings) = ExpenseStore::open(&data_file, cfg.settings.ids.policy)?;

    let stdin = io::stdin();
    let mut menu = Menu::new(
        &mut store,
        stdin.lock(),
        io::stdout(),
        cfg.settings.ui.currency_symbol.clone(),
        cfg.settings.paths.export_file.clone(),
    );
    menu.warn_all(&warnings)?;
    menu.run()
}

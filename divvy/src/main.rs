mod bootstrap;
mod cli;
mod commands;

use std::{borrow::Cow, process};

use bootstrap::AppConfig;
use clap::Parser;
use cli::Cli;
use divvy_application::LedgerService;
use divvy_infrastructure::{JsonFileLedgerStore, SystemClock};

type CliResult<T> = Result<T, Cow<'static, str>>;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env(&cli.global).map_err(|err| err.to_string())?;
    bootstrap::init_logging();

    let store = JsonFileLedgerStore::open(&config.data_dir).map_err(|err| {
        format!(
            "Failed to open ledger at '{}': {err}",
            config.data_dir.display()
        )
    })?;
    let clock = SystemClock;
    let service = LedgerService::new(&store, &clock).with_roster_capacity(config.max_participants);

    tracing::debug!(dir = %store.dir().display(), command = ?cli.command, "Running command");

    let output = commands::execute(cli.command, &service, &config)?;
    print!("{output}");
    Ok(())
}

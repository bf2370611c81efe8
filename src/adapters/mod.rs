#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod commands;

#[cfg(feature = "cli")]
use clap::Parser;

/// Log to stderr so `--json` output on stdout stays parseable.
#[cfg(feature = "cli")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(feature = "cli")]
pub fn run() -> Result<(), crate::error::AppError> {
    use crate::adapters::cli::{Args, Command};
    use crate::adapters::commands::{self, Output};
    use crate::storage::FileStore;

    init_tracing();

    let args = Args::parse();
    let out = Output { json: args.json };
    let mut store = FileStore::new(&args.data_dir);

    match args.command {
        Command::Solve(solve) => commands::solve(&solve, &mut store, &out),
        Command::Ph(ph) => commands::ph(&ph, &out),
        Command::Vpd(vpd) => commands::vpd(&vpd, &out),
        Command::Salts => commands::salts(&out),
        Command::Targets { system } => commands::targets(system, &out),
        Command::Recipes(cmd) => commands::recipes(cmd, &mut store, &out),
        Command::Inventory(cmd) => commands::inventory(cmd, &mut store, &out),
        Command::Watering(cmd) => commands::watering(cmd, &mut store, &out),
        Command::Zones(cmd) => commands::zones(cmd, &mut store, &out),
        Command::Reminder(cmd) => commands::reminder(cmd, &mut store, &out),
    }
}

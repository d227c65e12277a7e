mod app;
mod cli;
mod config;
mod consts;
mod error;
mod output;
mod sample;
mod session;
mod shutdown;
mod utils;

use std::io;

use clap::Parser;

use cli::Cli;
use config::Config;
use error::AppError;
use shutdown::Shutdown;

fn main() {
    let cli = Cli::parse();
    let loaded = Config::load();
    let cli = cli.with_config(&loaded.config);

    init_logging(cli.debug);
    if let Some(path) = &loaded.source {
        log::debug!("Loaded config from {}", path.display());
    }
    for (path, reason) in &loaded.skipped {
        log::warn!("Failed to parse {}: {reason}", path.display());
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let settings = cli.into_settings()?;
    log::debug!("resolved settings: {settings:?}");

    let shutdown = Shutdown::install()?;
    app::run(&settings, &shutdown, io::stdout())?;
    Ok(())
}

/// Diagnostics go to stderr so stdout stays a mirror of the log file.
/// `RUST_LOG` overrides the level chosen here.
fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

//! vrfkey - lifecycle manager for password-protected VRF keys.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vrfkey::cli::output;
use vrfkey::cli::{execute, Cli};
use vrfkey::core::constants;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("vrfkey=debug")
        } else {
            EnvFilter::new("vrfkey=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli.command, cli.home) {
        output::error(&e.to_string());
        if let Some(hint) = e.hint() {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}

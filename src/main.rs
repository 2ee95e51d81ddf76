//! Checkout CLI
//!
//! Prompts for pricing rules and baskets on stdin and prints checkout totals.

use std::{io, process};

use tracing::error;
use tracing_subscriber::EnvFilter;

use checkout::{config::CheckoutConfig, session::CheckoutSession};

/// Checkout CLI entry point
pub fn main() {
    let config = CheckoutConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    // Logs go to stderr so they never interleave with prompts on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let currency = config.currency().unwrap_or_else(|e| {
        error!("{e}");
        process::exit(1);
    });

    let stdin = io::stdin();
    let stdout = io::stdout();

    let mut session = CheckoutSession::new(stdin.lock(), stdout.lock(), currency);

    if let Err(e) = session.run() {
        error!("{e}");
        process::exit(1);
    }
}

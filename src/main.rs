//! posindex CLI entry point
//!
//! Installs logging on stderr, delegates to `cli::run` and exits non-zero on
//! failure. Stdout carries only the JSON response.

use posindex::cli;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

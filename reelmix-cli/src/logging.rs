//! Logging setup for the CLI.
//!
//! The application uses the `log` facade with `env_logger` as the backend.
//! `RUST_LOG` overrides the default `info` level:
//! - RUST_LOG=debug: detailed diagnostics including full external commands
//! - RUST_LOG=warn: only per-item failures and setup problems

use env_logger::Env;

/// Initializes env_logger with `info` as the default filter so batch
/// progress is visible without configuration.
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

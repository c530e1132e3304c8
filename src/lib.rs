//! Redirect sources for content items and the post-save reconciliation that
//! keeps the redirect store in step with them.

pub mod adapters;
pub mod canonical;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod host;
pub mod ports;
pub mod reconcile;
pub mod redirect;
pub mod source;
pub mod store;

use clap::Parser;

use crate::config::Settings;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing, settings loading or
/// command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    let settings = Settings::load().map_err(|err| err.to_string())?;
    init_tracing(&settings);
    commands::dispatch(&cli.command, &settings)
}

/// Installs the stderr log subscriber. `REDIRECT_LOG` wins over the
/// configured filter; a second call is a no-op.
fn init_tracing(settings: &Settings) {
    let filter = tracing_subscriber::EnvFilter::try_from_env("REDIRECT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

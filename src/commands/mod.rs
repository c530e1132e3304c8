//! Command dispatch and handlers.

pub mod canonical;
pub mod list;
pub mod lookup;
pub mod save;

use crate::cli::Command;
use crate::config::Settings;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler using live adapters.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command, settings: &Settings) -> Result<(), String> {
    let ctx = ServiceContext::live();
    dispatch_with_context(command, &ctx, settings)
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    settings: &Settings,
) -> Result<(), String> {
    match command {
        Command::Save(args) => save::run(ctx, settings, args),
        Command::List => list::run(ctx, settings),
        Command::Lookup { path } => lookup::run(ctx, settings, path),
        Command::Canonical { path } => {
            canonical::run(path);
            Ok(())
        }
    }
}

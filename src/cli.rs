//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `redirect-source`.
#[derive(Debug, Parser)]
#[command(name = "redirect-source", version, about = "Reconcile content redirect sources")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Reconcile the redirect source of a content item that was just saved.
    Save(SaveArgs),
    /// List stored redirects.
    List,
    /// Show redirects whose source path matches exactly.
    Lookup {
        /// Source path to look up.
        path: String,
    },
    /// Print the canonical form of an internal path.
    Canonical {
        /// Path to canonicalize.
        path: String,
    },
}

/// Arguments describing the saved item and its redirect source.
#[derive(Debug, Args)]
pub struct SaveArgs {
    /// Id of the saved item.
    #[arg(long)]
    pub id: u64,
    /// The item's own path, e.g. `node/5`.
    #[arg(long)]
    pub internal_path: String,
    /// Redirect source path.
    #[arg(long)]
    pub source: String,
    /// Query parameter on the source, repeatable.
    #[arg(long = "query", value_name = "KEY=VALUE")]
    pub query: Vec<String>,
    /// Item title, copied to the redirect.
    #[arg(long)]
    pub title: Option<String>,
    /// The item was inserted by this save.
    #[arg(long)]
    pub new: bool,
    /// The item is configuration only and is not reconciled.
    #[arg(long)]
    pub config_entity: bool,
}

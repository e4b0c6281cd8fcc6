use clap::{Parser, Subcommand};
use lockbox_core::Method;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "lockbox", about = "Talk to the encrypted database executor")]
pub struct Cli {
    #[arg(long, default_value = "lockbox.toml")]
    pub config: String,
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, Subcommand)]
pub enum ShellCommand {
    /// Report whether the database is unlocked.
    Status,
    /// Open or create the database with an encryption key.
    Init {
        #[arg(long)]
        key: String,
    },
    /// Forget the key; with --purge also delete the data.
    Reset {
        #[arg(long)]
        purge: bool,
    },
    /// Run one statement.
    Exec {
        sql: String,
        #[arg(long, default_value = "all")]
        method: Method,
        /// JSON scalar; anything that is not valid JSON is bound as text.
        #[arg(long = "param")]
        params: Vec<String>,
    },
    /// Run a JSON array of {sql, params, method} in one round-trip.
    Batch { file: PathBuf },
}

// src/cli.rs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "rcs",
    version,
    about = "Diagnostic CLI for the remote configuration synchronizer",
    long_about = "Inspect and drive the remote configuration synchronizer: fetch the \
remote document once, show the resolved values and the raw payload of the last \
successful fetch, and manage the endpoint override."
)]
pub struct Cli {
    /// JSON file backing the persistent store
    #[arg(short, long, value_name = "FILE", env = "RCS_STORE", default_value = "remote-config.json")]
    pub store: PathBuf,

    /// Log level, used when RUST_LOG is not set
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch the remote document once and print the resolved configuration
    Fetch,

    /// Show the effective endpoint and any stored override
    Endpoint,

    /// Set the endpoint override (validated before it is stored)
    SetEndpoint {
        /// Absolute URL, e.g. https://example.workers.dev/
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Clear the endpoint override and fall back to the default endpoint
    ClearEndpoint,
}

// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Subcommands:
// - serve: run the HTTP API
// - languages: print the language list once and exit
// - language: print one language's example once and exit
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "hello-world-api",
    version,
    about = "An HTTP API over a GitHub collection of \"hello world\" programs",
    long_about = "hello-world-api reads the README of a \"hello world\" collection on GitHub, \
                  lists every language it links to, and serves the example file of any one of them."
)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// Where to load configuration from (shared by every subcommand)
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Directory holding the TOML config files
    #[arg(long, global = true, default_value = "config")]
    pub config_dir: PathBuf,

    /// Config file names (without .toml) to merge, in order
    ///
    /// Example: --config env --config testing
    #[arg(long = "config", global = true, default_value = "env")]
    pub configs: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API server
    ///
    /// Example: hello-world-api serve --port 3000
    Serve {
        /// Port to listen on (overrides server.port from the config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print every language listed in the README
    ///
    /// Example: hello-world-api languages --json
    Languages {
        #[command(flatten)]
        source: SourceArgs,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print one language and its example file
    ///
    /// Example: hello-world-api language Go
    Language {
        /// Language name, matched ignoring case
        name: String,

        #[command(flatten)]
        source: SourceArgs,

        /// Output results in JSON format
        #[arg(long)]
        json: bool,
    },
}

// Which repository to read and how to authenticate
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// GitHub repository URL, overriding the configured repository
    /// (e.g., https://github.com/leachim6/hello-world)
    #[arg(long)]
    pub repo: Option<String>,

    /// GitHub token for a higher rate limit
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

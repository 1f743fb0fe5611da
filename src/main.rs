// src/main.rs
// =============================================================================
// This is the entry point of hello-world-api.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load the layered TOML configuration
// 3. Set up logging (tracing, filtered with RUST_LOG)
// 4. Dispatch to the subcommand: run the server, or answer one query
// 5. Exit with proper code (0 = success, 1 = language not found, 2 = error)
// =============================================================================

mod cache;
mod catalog;
mod cli;
mod config;
mod github;
mod languages;
mod server;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use catalog::LanguageCode;
use cli::{Cli, Commands, SourceArgs};
use config::Config;
use github::GitHubClient;
use languages::Language;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    // The server logs at info by default; one-shot commands stay quiet
    // unless RUST_LOG asks for more
    let default_level = match cli.command {
        Commands::Serve { .. } => "info",
        _ => "warn",
    };
    init_tracing(default_level);

    let mut config = config::load_configs(&cli.config.config_dir, &cli.config.configs)?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            let state = server::AppState::new(config)?;
            server::serve(state).await?;
            Ok(0)
        }
        Commands::Languages { source, json } => handle_languages(&config, &source, json).await,
        Commands::Language { name, source, json } => {
            handle_language(&config, &source, &name, json).await
        }
    }
}

// Logs go to stderr so --json output on stdout stays clean
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Handles the 'languages' subcommand
async fn handle_languages(config: &Config, source: &SourceArgs, json: bool) -> Result<i32> {
    let (client, owner, repo) = connect(config, source)?;
    if !json {
        println!("🔍 Reading languages from {}/{}\n", owner, repo);
    }

    let languages = match catalog::fetch_languages(&client, &owner, &repo).await {
        Err(e) if e.is_not_found() => {
            return Err(anyhow!("Repository {}/{} or its README was not found", owner, repo));
        }
        result => result.context("Failed to fetch the README")?,
    };

    print_languages(&languages, json)?;
    Ok(0)
}

// Handles the 'language' subcommand
async fn handle_language(config: &Config, source: &SourceArgs, name: &str, json: bool) -> Result<i32> {
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow!("Language name must not be empty"));
    }

    let (client, owner, repo) = connect(config, source)?;

    match catalog::fetch_language(&client, &owner, &repo, name).await? {
        Some(found) => {
            print_language(&found, json)?;
            Ok(0)
        }
        None => {
            eprintln!("❌ Language '{}' not found in {}/{}", name, owner, repo);
            Ok(1)
        }
    }
}

// Builds a GitHub client and picks the repository to read
fn connect(config: &Config, source: &SourceArgs) -> Result<(GitHubClient, String, String)> {
    let (owner, repo) = match &source.repo {
        Some(url) => github::parse_github_url(url)
            .ok_or_else(|| anyhow!("Not a GitHub repository URL: {}", url))?,
        None => (config.repository.user.clone(), config.repository.name.clone()),
    };

    let http = github::build_http_client(config.github.timeout())?;
    let client = GitHubClient::new(http, &config.github.api_url)?
        .with_token(source.token.as_deref().and_then(github::token_from_header));

    Ok((client, owner, repo))
}

// Prints the language list either as a table or JSON
fn print_languages(languages: &[Language], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(languages)?);
        return Ok(());
    }

    println!("{:<40} {:<20}", "LANGUAGE", "EXTENSION");
    println!("{}", "=".repeat(60));

    for language in languages {
        // Truncate long names so the columns line up
        let name = if language.name.chars().count() > 37 {
            format!("{}...", language.name.chars().take(37).collect::<String>())
        } else {
            language.name.clone()
        };

        println!("{:<40} {:<20}", name, language.extension);
    }

    println!();
    println!("📋 Total: {}", languages.len());
    Ok(())
}

// Prints one language and its example file
fn print_language(found: &LanguageCode, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(found)?);
        return Ok(());
    }

    println!("📄 {} ({})", found.language.name, found.code.path);
    println!("{}", "=".repeat(60));
    println!("{}", found.code.content);
    Ok(())
}

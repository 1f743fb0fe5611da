// src/config.rs
// =============================================================================
// This file loads the server configuration from TOML files.
//
// Config files live in one directory (config/ by default) and are named
// without their extension:
//   config/env.toml      <- the base settings
//   config/testing.toml  <- overrides for a test run
//
// Several names can be given; they are merged in order, so later files win.
// Tables are merged key by key, so an override file only needs the keys it
// changes. Every field has a default, so an empty file is a valid config.
// =============================================================================

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use toml::{Table, Value};

use crate::github::DEFAULT_API_URL;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub repository: RepositoryConfig,
    pub github: GitHubConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

// The repository holding the "hello world" collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    pub user: String,
    pub name: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            user: "leachim6".to_string(),
            name: "hello-world".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub api_url: String,
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        GitHubConfig {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

impl GitHubConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            enabled: false,
            ttl_secs: 300,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

// Loads and merges the named config files from a directory
//
// Parameters:
//   dir: directory holding the files
//   names: file names without the ".toml" extension, in merge order
//
// Returns: the merged Config, or an error if any file is missing or invalid
pub fn load_configs(dir: &Path, names: &[String]) -> Result<Config> {
    let mut merged = Table::new();

    for name in names {
        let path = dir.join(format!("{}.toml", name));
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let table: Table = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        merge_tables(&mut merged, table);
    }

    let config: Config = Value::Table(merged)
        .try_into()
        .context("Config has invalid values")?;
    Ok(config)
}

// Recursively merges `overlay` into `base`; overlay values win
fn merge_tables(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(Value::Table(existing)), Value::Table(incoming)) => merge_tables(existing, incoming),
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

//! Configuration file handling.
//!
//! A TOML file at `~/.config/diy-planner/config.toml` with a resolution
//! chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the database path
pub const DATABASE_ENV: &str = "DIY_PLANNER_DB";

pub const DEFAULT_DATABASE: &str = "diy_planner.db";

pub const DEFAULT_HEIGHT_FT: f64 = 8.0;

/// Filter used when neither `RUST_LOG` nor the config file sets one
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub database: Option<PathBuf>,
    /// Height assumed when dimensions give only width and length
    pub default_height_ft: f64,
    pub log_level: String,
    /// Tools the user owns, used when `--tool` is not given
    pub tools: Vec<String>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            database: None,
            default_height_ft: DEFAULT_HEIGHT_FT,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            tools: Vec::new(),
        }
    }
}

/// Return the config directory.
///
/// `$XDG_CONFIG_HOME/diy-planner` or `~/.config/diy-planner`, on every platform.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("diy-planner");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("diy-planner")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load a config file. A missing file gives the defaults.
pub fn load(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    parse(&contents).with_context(|| format!("failed to parse config file at {}", path.display()))
}

pub fn parse(contents: &str) -> Result<ConfigFile> {
    Ok(toml::from_str(contents)?)
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub database: PathBuf,
    pub default_height_ft: f64,
    pub log_level: String,
    pub tools: Vec<String>,
}

impl PlannerConfig {
    /// Resolve using the chain: CLI flag > env var > config file > default.
    pub fn resolve(cli_database: Option<PathBuf>, file: ConfigFile) -> Self {
        let env_database = std::env::var(DATABASE_ENV).ok();
        Self::resolve_with_env(cli_database, env_database, file)
    }

    fn resolve_with_env(
        cli_database: Option<PathBuf>,
        env_database: Option<String>,
        file: ConfigFile,
    ) -> Self {
        let database = cli_database
            .or_else(|| env_database.filter(|v| !v.is_empty()).map(PathBuf::from))
            .or(file.database)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE));

        Self {
            database,
            default_height_ft: file.default_height_ft,
            log_level: file.log_level,
            tools: file.tools,
        }
    }
}

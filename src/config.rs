//! Runtime configuration.
//!
//! Each setting is resolved in order: command-line flag, environment
//! variable, the optional `config.json` in the user's config directory, then
//! the built-in default.
//!
//! - `MACHINE_DB` - transcript database path
//! - `MACHINE_ASSETS_DIR` - directory holding the ASCII-art rewards
//! - `MACHINE_SEED` - seed for reward draws (random when unset)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.json";
const DB_FILE: &str = "operator_logs.db";
const ASSETS_DIR: &str = "ascii_art";

pub const ENV_DB: &str = "MACHINE_DB";
pub const ENV_ASSETS_DIR: &str = "MACHINE_ASSETS_DIR";
pub const ENV_SEED: &str = "MACHINE_SEED";

/// Settings as they may appear in `config.json`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    pub database_path: Option<PathBuf>,
    pub assets_dir: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl FileConfig {
    /// Load from the user's config directory.
    /// Returns an empty config if the file doesn't exist or fails to parse.
    pub fn load() -> Self {
        let Some(path) = config_file_path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load {}, using defaults: {:#}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config = serde_json::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub database_path: Option<PathBuf>,
    pub assets_dir: Option<PathBuf>,
    pub seed: Option<u64>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_path: PathBuf,
    pub assets_dir: PathBuf,
    /// `None` seeds reward draws from entropy.
    pub seed: Option<u64>,
}

impl Config {
    pub fn resolve(overrides: Overrides) -> Result<Self> {
        let env = EnvConfig::from_env()?;
        Self::layered(overrides, env, FileConfig::load())
    }

    fn layered(overrides: Overrides, env: EnvConfig, file: FileConfig) -> Result<Self> {
        let database_path = match overrides
            .database_path
            .or(env.database_path)
            .or(file.database_path)
        {
            Some(path) => path,
            None => default_database_path()?,
        };

        let assets_dir = overrides
            .assets_dir
            .or(env.assets_dir)
            .or(file.assets_dir)
            .unwrap_or_else(default_assets_dir);

        let seed = overrides.seed.or(env.seed).or(file.seed);

        Ok(Self {
            database_path,
            assets_dir,
            seed,
        })
    }
}

#[derive(Debug, Default)]
struct EnvConfig {
    database_path: Option<PathBuf>,
    assets_dir: Option<PathBuf>,
    seed: Option<u64>,
}

impl EnvConfig {
    fn from_env() -> Result<Self> {
        let seed = match std::env::var(ENV_SEED) {
            Ok(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("{ENV_SEED} must be an unsigned integer, got {raw:?}"))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            database_path: std::env::var_os(ENV_DB).map(PathBuf::from),
            assets_dir: std::env::var_os(ENV_ASSETS_DIR).map(PathBuf::from),
            seed,
        })
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "the-machine")
}

fn config_file_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

pub fn default_database_path() -> Result<PathBuf> {
    let dirs = project_dirs().ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(dirs.data_dir().join(DB_FILE))
}

/// `ascii_art/` beside the executable, else `./ascii_art`.
pub fn default_assets_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(ASSETS_DIR)))
        .filter(|dir| dir.is_dir())
        .unwrap_or_else(|| PathBuf::from(ASSETS_DIR))
}

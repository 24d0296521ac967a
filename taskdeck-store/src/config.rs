//! Configuration system for the `TaskDeck` store service.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/taskdeck-store/config.toml`)
//! 4. Compiled defaults

use std::path::PathBuf;

use taskdeck_proto::task::MAX_TASK_NAME_LENGTH;

/// Errors that can occur when loading store service configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure for the store service.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct StoreConfigFile {
    server: ServerFileConfig,
}

/// `[server]` section of the store config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ServerFileConfig {
    bind_addr: Option<String>,
    max_name_len: Option<usize>,
}

// ---------------------------------------------------------------------------
// CLI arguments
// ---------------------------------------------------------------------------

/// CLI arguments for the store service.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "TaskDeck task store service")]
pub struct StoreCliArgs {
    /// Address to bind the store service to.
    #[arg(short, long, env = "STORE_ADDR")]
    pub bind: Option<String>,

    /// Path to config file (default: `~/.config/taskdeck-store/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum task name length in characters.
    #[arg(long)]
    pub max_name_len: Option<usize>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "STORE_LOG")]
    pub log_level: String,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Fully resolved store service configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Address to bind the service to (e.g., `0.0.0.0:9200`).
    pub bind_addr: String,
    /// Maximum allowed task name length in characters.
    pub max_name_len: usize,
    /// Log level filter string.
    pub log_level: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:9200".to_string(),
            max_name_len: MAX_TASK_NAME_LENGTH,
            log_level: "info".to_string(),
        }
    }
}

impl StoreConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// If `--config` is given and the file does not exist, returns an error.
    /// If no `--config` is given, the default path is tried and missing file
    /// is treated as empty config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit config file cannot be read
    /// or parsed.
    pub fn load(cli: &StoreCliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Resolve a `StoreConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default.
    #[must_use]
    fn resolve(cli: &StoreCliArgs, file: &StoreConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: cli
                .bind
                .clone()
                .or_else(|| file.server.bind_addr.clone())
                .unwrap_or(defaults.bind_addr),
            max_name_len: cli
                .max_name_len
                .or(file.server.max_name_len)
                .unwrap_or(defaults.max_name_len),
            log_level: cli.log_level.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file for the store service.
fn load_config_file(
    explicit_path: Option<&std::path::Path>,
) -> Result<StoreConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(StoreConfigFile::default());
        };
        config_dir.join("taskdeck-store").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoreConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}

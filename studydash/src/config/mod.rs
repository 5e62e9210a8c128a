//! Configuration for the dashboard.
//!
//! Layered with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/studydash/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::format::{Item, StrftimeItems};
use studydash_core::task::MAX_TASK_NAME_LENGTH;

/// Errors that can occur when loading configuration.
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

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    storage: StorageFileConfig,
    ui: UiFileConfig,
    tasks: TasksFileConfig,
}

/// `[storage]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct StorageFileConfig {
    data_dir: Option<PathBuf>,
    ephemeral: Option<bool>,
}

/// `[ui]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    tick_interval_ms: Option<u64>,
    time_format: Option<String>,
    date_format: Option<String>,
}

/// `[tasks]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct TasksFileConfig {
    max_name_len: Option<usize>,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Default clock panel time format.
pub const DEFAULT_TIME_FORMAT: &str = "%I:%M:%S %p";

/// Default clock panel date format.
pub const DEFAULT_DATE_FORMAT: &str = "%A, %B %-d, %Y";

/// Fully resolved dashboard configuration.
#[derive(Debug, Clone)]
pub struct DashConfig {
    // -- Storage --
    /// Directory holding the snapshot files. `None` if no data directory
    /// could be determined.
    pub data_dir: Option<PathBuf>,
    /// Keep everything in memory; nothing survives exit.
    pub ephemeral: bool,

    // -- UI --
    /// How often the stopwatch is advanced and the clock redrawn.
    pub tick_interval: Duration,
    /// Clock panel time format (chrono).
    pub time_format: String,
    /// Clock panel date format (chrono).
    pub date_format: String,

    // -- Tasks --
    /// Maximum task name length in characters.
    pub max_task_name_len: usize,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            ephemeral: false,
            tick_interval: Duration::from_secs(1),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            max_task_name_len: MAX_TASK_NAME_LENGTH,
        }
    }
}

impl DashConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// If `--config` is given and the file does not exist, returns an
    /// error. Otherwise the default path
    /// (`~/.config/studydash/config.toml`) is tried and silently ignored if
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be read or parsed.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Defaults with CLI overrides applied, for when the file is unusable.
    #[must_use]
    pub fn from_cli(cli: &CliArgs) -> Self {
        Self::resolve(cli, &ConfigFile::default())
    }

    /// Priority: CLI > file > default.
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            data_dir: cli
                .data_dir
                .clone()
                .or_else(|| file.storage.data_dir.clone())
                .or(defaults.data_dir),
            ephemeral: cli.ephemeral || file.storage.ephemeral.unwrap_or(defaults.ephemeral),
            tick_interval: file
                .ui
                .tick_interval_ms
                .filter(|ms| *ms > 0)
                .map_or(defaults.tick_interval, Duration::from_millis),
            time_format: checked_format(
                cli.time_format
                    .as_deref()
                    .or(file.ui.time_format.as_deref()),
                &defaults.time_format,
                "time_format",
            ),
            date_format: checked_format(
                file.ui.date_format.as_deref(),
                &defaults.date_format,
                "date_format",
            ),
            max_task_name_len: file
                .tasks
                .max_name_len
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_task_name_len),
        }
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Terminal study dashboard")]
pub struct CliArgs {
    /// Path to config file (default: `~/.config/studydash/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory for saved tasks, timer and materials.
    #[arg(long, env = "STUDYDASH_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Keep state in memory only.
    #[arg(long)]
    pub ephemeral: bool,

    /// Clock display format (chrono format string).
    #[arg(long)]
    pub time_format: Option<String>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "STUDYDASH_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/studydash.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Returns `true` if chrono can render `fmt` without error.
#[must_use]
pub fn is_valid_format(fmt: &str) -> bool {
    !StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error))
}

/// `fmt` if it is a usable chrono format, otherwise `default`.
pub(crate) fn checked_format(fmt: Option<&str>, default: &str, field: &str) -> String {
    match fmt {
        Some(fmt) if is_valid_format(fmt) => fmt.to_string(),
        Some(fmt) => {
            tracing::warn!(field, format = fmt, "invalid clock format, using default");
            default.to_string()
        }
        None => default.to_string(),
    }
}

fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("studydash"))
}

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist. Otherwise the default
/// path is tried and a missing file is treated as empty config.
fn load_config_file(explicit_path: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        p.to_path_buf()
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(ConfigFile::default());
        };
        config_dir.join("studydash").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if explicit_path.is_none() && e.kind() == std::io::ErrorKind::NotFound => {
            Ok(ConfigFile::default())
        }
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}

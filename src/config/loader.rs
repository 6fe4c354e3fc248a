//! Configuration file loading with precedence handling.

use crate::model::SearchMode;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Default search service base URL.
pub const DEFAULT_HOST: &str = "https://localhost:9200";

/// Default index the search templates run against.
pub const DEFAULT_INDEX: &str = "event-data-index_v1";

/// Default basic-auth user.
pub const DEFAULT_USERNAME: &str = "admin";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A `[keybindings]` entry names an unknown action or key.
    #[error("Invalid key binding for '{action}': {reason}")]
    InvalidKeyBinding {
        /// Action name as written in the config.
        action: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/clearcheck/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Search service base URL.
    #[serde(default)]
    pub host: Option<String>,

    /// Index name.
    #[serde(default)]
    pub index: Option<String>,

    /// Basic-auth user.
    #[serde(default)]
    pub username: Option<String>,

    /// Basic-auth password.
    #[serde(default)]
    pub password: Option<String>,

    /// Request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Directory `selected_records.xlsx` is written to.
    #[serde(default)]
    pub export_dir: Option<PathBuf>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Mode selected at startup, as a template id (`exclusion_search`).
    #[serde(default)]
    pub default_mode: Option<SearchMode>,

    /// Whether to render colors.
    #[serde(default)]
    pub color: Option<bool>,

    /// Key overrides, action name to key (`export = "ctrl+s"`).
    #[serde(default)]
    pub keybindings: Option<BTreeMap<String, String>>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Search service base URL.
    pub host: String,
    /// Index name.
    pub index: String,
    /// Basic-auth user; empty disables auth.
    pub username: String,
    /// Basic-auth password.
    pub password: Option<String>,
    /// Request timeout in seconds (at least 1).
    pub timeout_secs: u64,
    /// Export directory.
    pub export_dir: PathBuf,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Mode selected at startup.
    pub default_mode: SearchMode,
    /// Whether to render colors.
    pub color: bool,
    /// Key overrides applied on top of the default bindings.
    pub keybindings: BTreeMap<String, String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            index: DEFAULT_INDEX.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            export_dir: PathBuf::from("."),
            log_file_path: default_log_path(),
            default_mode: SearchMode::default(),
            color: true,
            keybindings: BTreeMap::new(),
        }
    }
}

// Logged at startup, so the password must never be printed.
impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("host", &self.host)
            .field("index", &self.index)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("export_dir", &self.export_dir)
            .field("log_file_path", &self.log_file_path)
            .field("default_mode", &self.default_mode)
            .field("color", &self.color)
            .field("keybindings", &self.keybindings)
            .finish()
    }
}

/// Values given on the command line. `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--host`
    pub host: Option<String>,
    /// `--index`
    pub index: Option<String>,
    /// `--mode`
    pub mode: Option<SearchMode>,
    /// `--timeout`
    pub timeout_secs: Option<u64>,
    /// `--export-dir`
    pub export_dir: Option<PathBuf>,
    /// `--no-color`
    pub no_color: bool,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/clearcheck/clearcheck.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("clearcheck").join("clearcheck.log")
    } else {
        PathBuf::from("clearcheck.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/clearcheck/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("clearcheck").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `CLEARCHECK_CONFIG` environment variable
/// 3. Default path `~/.config/clearcheck/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("CLEARCHECK_CONFIG") {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(
                "CLEARCHECK_CONFIG is set but empty".to_string(),
            ));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        host: config.host.unwrap_or(defaults.host),
        index: config.index.unwrap_or(defaults.index),
        username: config.username.unwrap_or(defaults.username),
        password: config.password.or(defaults.password),
        timeout_secs: config
            .timeout_secs
            .unwrap_or(defaults.timeout_secs)
            .max(1),
        export_dir: config.export_dir.unwrap_or(defaults.export_dir),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        default_mode: config.default_mode.unwrap_or(defaults.default_mode),
        color: config.color.unwrap_or(defaults.color),
        keybindings: config.keybindings.unwrap_or(defaults.keybindings),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `CLEARCHECK_HOST`, `CLEARCHECK_INDEX`
/// - `CLEARCHECK_USERNAME`, `CLEARCHECK_PASSWORD`
/// - `NO_COLOR` (any non-empty value disables color)
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(host) = std::env::var("CLEARCHECK_HOST") {
        config.host = host;
    }
    if let Ok(index) = std::env::var("CLEARCHECK_INDEX") {
        config.index = index;
    }
    if let Ok(username) = std::env::var("CLEARCHECK_USERNAME") {
        config.username = username;
    }
    if let Ok(password) = std::env::var("CLEARCHECK_PASSWORD") {
        config.password = Some(password);
    }
    if std::env::var("NO_COLOR").is_ok_and(|v| !v.is_empty()) {
        config.color = false;
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(index) = cli.index {
        config.index = index;
    }
    if let Some(mode) = cli.mode {
        config.default_mode = mode;
    }
    if let Some(timeout) = cli.timeout_secs {
        config.timeout_secs = timeout.max(1);
    }
    if let Some(dir) = cli.export_dir {
        config.export_dir = dir;
    }
    if cli.no_color {
        config.color = false;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

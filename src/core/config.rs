//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.bobacom/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BobacomConfig {
    #[serde(default)]
    pub serial: SerialConfig,
    #[serde(default)]
    pub transcript: TranscriptConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SerialConfig {
    pub baud_rate: Option<u32>,
    pub write_timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TranscriptConfig {
    pub scrollback_lines: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BAUD_RATE: u32 = 9600;
pub const DEFAULT_SCROLLBACK_LINES: usize = 10_000;
pub const DEFAULT_WRITE_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_LOG_FILE: &str = "bobacom.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

const BAUD_RATE_ENV: &str = "BOBACOM_BAUD_RATE";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub baud_rate: u32,
    pub write_timeout: Duration,
    pub scrollback_lines: usize,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.bobacom/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".bobacom").join("config.toml"))
}

/// Load config from `~/.bobacom/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `BobacomConfig::default()`.
pub fn load_config() -> Result<BobacomConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(BobacomConfig::default())
        }
    }
}

/// Load config from an explicit path, generating a default file if missing.
pub fn load_config_from(path: &Path) -> Result<BobacomConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(BobacomConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: BobacomConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Bobacom Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [serial]
# baud_rate = 9600                   # Or set BOBACOM_BAUD_RATE, or pass -b
# write_timeout_ms = 5000

# [transcript]
# scrollback_lines = 10000           # Oldest lines are dropped past this

# [logging]
# level = "debug"                    # "off", "error", "warn", "info", "debug", "trace"
# file = "bobacom.log"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_baud_rate` is the `-b` flag (None = not specified).
pub fn resolve(config: &BobacomConfig, cli_baud_rate: Option<u32>) -> ResolvedConfig {
    let env_baud_rate = std::env::var(BAUD_RATE_ENV).ok().and_then(|raw| {
        raw.trim()
            .parse::<u32>()
            .inspect_err(|e| warn!("Ignoring {}={:?}: {}", BAUD_RATE_ENV, raw, e))
            .ok()
    });
    resolve_with_env(config, env_baud_rate, cli_baud_rate)
}

fn resolve_with_env(
    config: &BobacomConfig,
    env_baud_rate: Option<u32>,
    cli_baud_rate: Option<u32>,
) -> ResolvedConfig {
    // Baud rate: CLI → env → config → default
    let baud_rate = cli_baud_rate
        .or(env_baud_rate)
        .or(config.serial.baud_rate)
        .unwrap_or(DEFAULT_BAUD_RATE);

    let log_level = match config.logging.level.as_deref() {
        Some(raw) => raw.parse::<LevelFilter>().unwrap_or_else(|_| {
            warn!("Unknown log level {:?}, using {}", raw, DEFAULT_LOG_LEVEL);
            DEFAULT_LOG_LEVEL
        }),
        None => DEFAULT_LOG_LEVEL,
    };

    ResolvedConfig {
        baud_rate,
        write_timeout: Duration::from_millis(
            config
                .serial
                .write_timeout_ms
                .unwrap_or(DEFAULT_WRITE_TIMEOUT_MS),
        ),
        scrollback_lines: config
            .transcript
            .scrollback_lines
            .unwrap_or(DEFAULT_SCROLLBACK_LINES)
            .max(1),
        log_level,
        log_file: PathBuf::from(
            config
                .logging
                .file
                .as_deref()
                .unwrap_or(DEFAULT_LOG_FILE),
        ),
    }
}

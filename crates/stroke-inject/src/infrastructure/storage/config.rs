//! TOML-based configuration for the injector.
//!
//! Reads and writes [`InjectorConfig`] at the platform-appropriate path:
//! - Windows:  `%APPDATA%\StrokeInject\config.toml`
//! - Linux:    `$XDG_CONFIG_HOME/stroke-inject/config.toml`
//! - macOS:    `~/Library/Application Support/StrokeInject/config.toml`
//!
//! A `--config <path>` argument bypasses the platform directory through
//! [`load_config_from`] / [`save_config_to`].
//!
//! ```toml
//! [timing]
//! delay_after_press_ms = 50
//! delay_after_release_ms = 50
//!
//! [typing]
//! unmapped = "skip"
//!
//! [driver]
//! required_files = [
//!     "C:/Windows/System32/drivers/keyboard.sys",
//!     "C:/Windows/System32/drivers/mouse.sys",
//! ]
//! library = "interception.dll"
//!
//! [logging]
//! log_level = "info"
//! ```
//!
//! Every field has a serde default, so a missing file, a missing section or
//! a missing key all fall back to the values above.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::sequencer::UnmappedPolicy;
use crate::application::timing::{
    TimingConfig, DEFAULT_DELAY_AFTER_PRESS, DEFAULT_DELAY_AFTER_RELEASE,
};

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level injector configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InjectorConfig {
    #[serde(default)]
    pub timing: TimingSection,
    #[serde(default)]
    pub typing: TypingSection,
    #[serde(default)]
    pub driver: DriverConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default phase delays, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimingSection {
    #[serde(default = "default_delay_after_press_ms")]
    pub delay_after_press_ms: u64,
    #[serde(default = "default_delay_after_release_ms")]
    pub delay_after_release_ms: u64,
}

/// Batch typing behaviour.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TypingSection {
    /// What `print_text` / `send_keys` do with a character the layout lacks.
    #[serde(default)]
    pub unmapped: UnmappedPolicy,
}

/// Where the Interception driver lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DriverConfig {
    /// Files that must exist before the library is loaded.
    #[serde(default = "default_required_files")]
    pub required_files: Vec<PathBuf>,
    /// Library name or path passed to the loader.
    #[serde(default = "default_library")]
    pub library: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_delay_after_press_ms() -> u64 {
    DEFAULT_DELAY_AFTER_PRESS.as_millis() as u64
}
fn default_delay_after_release_ms() -> u64 {
    DEFAULT_DELAY_AFTER_RELEASE.as_millis() as u64
}
fn default_required_files() -> Vec<PathBuf> {
    vec![
        PathBuf::from("C:/Windows/System32/drivers/keyboard.sys"),
        PathBuf::from("C:/Windows/System32/drivers/mouse.sys"),
    ]
}
fn default_library() -> PathBuf {
    PathBuf::from("interception.dll")
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TimingSection {
    fn default() -> Self {
        Self {
            delay_after_press_ms: default_delay_after_press_ms(),
            delay_after_release_ms: default_delay_after_release_ms(),
        }
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            required_files: default_required_files(),
            library: default_library(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl TimingSection {
    pub fn to_timing(&self) -> TimingConfig {
        TimingConfig {
            delay_after_press: Duration::from_millis(self.delay_after_press_ms),
            delay_after_release: Duration::from_millis(self.delay_after_release_ms),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the base directory cannot
/// be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads the config from the platform path.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<InjectorConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads the config at `path`, returning defaults if the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<InjectorConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(InjectorConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Writes the config to the platform path.
///
/// # Errors
///
/// See [`save_config_to`].
pub fn save_config(config: &InjectorConfig) -> Result<PathBuf, ConfigError> {
    let path = config_file_path()?;
    save_config_to(config, &path)?;
    Ok(path)
}

/// Writes `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(config: &InjectorConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the platform config directory including the `StrokeInject` component.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("StrokeInject"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("stroke-inject"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("StrokeInject")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

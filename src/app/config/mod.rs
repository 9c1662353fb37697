// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user settings to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[synthesis]` - Backend selection, endpoint, timeout and preview latency
//! - `[export]` - Download format
//!
//! ```toml
//! [synthesis]
//! backend = "http"
//! endpoint = "https://styles.example.com/v1/transfer"
//! timeout_secs = 60
//!
//! [export]
//! format = "png"
//! ```
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config-dir` CLI flag or `STYLE_CLONE_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use style_clone::app::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! config.synthesis.timeout_secs = Some(90);
//!
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::domain::generation::{GenerationTimeout, PreviewDelay};
use crate::error::{Error, Result};
use crate::media::ExportFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// =============================================================================
// Section Structs
// =============================================================================

/// Which synthesis backend serves generation requests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisBackend {
    /// Offline local preview.
    #[default]
    Preview,
    /// Remote service at `synthesis.endpoint`.
    Http,
}

/// Synthesis backend settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SynthesisConfig {
    #[serde(default)]
    pub backend: SynthesisBackend,

    /// Service URL for the `http` backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Seconds before an unanswered request fails.
    #[serde(default = "default_timeout_secs", skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Simulated latency of the preview backend in milliseconds.
    #[serde(
        default = "default_preview_delay_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub preview_delay_ms: Option<u64>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            backend: SynthesisBackend::default(),
            endpoint: None,
            timeout_secs: default_timeout_secs(),
            preview_delay_ms: default_preview_delay_ms(),
        }
    }
}

impl SynthesisConfig {
    /// Effective timeout, clamped to the supported range.
    #[must_use]
    pub fn timeout(&self) -> GenerationTimeout {
        self.timeout_secs
            .map(GenerationTimeout::new)
            .unwrap_or_default()
    }

    /// Effective preview latency, clamped to the supported range.
    #[must_use]
    pub fn preview_delay(&self) -> PreviewDelay {
        self.preview_delay_ms
            .map(PreviewDelay::new)
            .unwrap_or_default()
    }
}

/// Download settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportConfig {
    /// Format name: `png`, `jpg`/`jpeg` or `webp`.
    #[serde(default = "default_export_format", skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: default_export_format(),
        }
    }
}

impl ExportConfig {
    /// Configured format, or PNG when unset or unrecognized.
    #[must_use]
    pub fn format(&self) -> ExportFormat {
        self.format
            .as_deref()
            .and_then(ExportFormat::from_extension)
            .unwrap_or_default()
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_timeout_secs() -> Option<u64> {
    Some(DEFAULT_TIMEOUT_SECS)
}

fn default_preview_delay_ms() -> Option<u64> {
    Some(DEFAULT_PREVIEW_DELAY_MS)
}

fn default_export_format() -> Option<String> {
    Some(DEFAULT_EXPORT_FORMAT.to_string())
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(paths::SETTINGS_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "settings file ignored");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

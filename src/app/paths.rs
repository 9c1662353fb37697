// SPDX-License-Identifier: MPL-2.0
//! Resolves where the preference store and the settings file live.
//!
//! # Path Resolution Order
//!
//! Directories are resolved in the following priority order:
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **CLI arguments** (`--data-dir`, `--config-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variables** (`STYLE_CLONE_DATA_DIR`, `STYLE_CLONE_CONFIG_DIR`)
//! 4. **Platform default** - via `dirs` crate, with [`APP_NAME`] appended
//!
//! # Usage
//!
//! CLI overrides should be initialized once at startup:
//! ```ignore
//! paths::init_cli_overrides(flags.data_dir, flags.config_dir)?;
//! ```

use crate::error::{Error, Result};
use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
pub const APP_NAME: &str = "StyleClone";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "STYLE_CLONE_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "STYLE_CLONE_CONFIG_DIR";

/// Preference store file name within the data directory.
pub const PREFERENCES_FILE: &str = "preferences.cbor";

/// Dialog state file name within the data directory.
pub const STATE_FILE: &str = "state.cbor";

/// Settings file name within the config directory.
pub const SETTINGS_FILE: &str = "settings.toml";

static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Initializes CLI overrides for data and config directories.
///
/// Call once at startup, before any path is resolved.
///
/// # Errors
///
/// Returns an error if the overrides were already initialized.
pub fn init_cli_overrides(data_dir: Option<String>, config_dir: Option<String>) -> Result<()> {
    CLI_DATA_DIR
        .set(data_dir.map(PathBuf::from))
        .map_err(|_| Error::Config("CLI data dir override already initialized".into()))?;
    CLI_CONFIG_DIR
        .set(config_dir.map(PathBuf::from))
        .map_err(|_| Error::Config("CLI config dir override already initialized".into()))?;
    Ok(())
}

/// Walks the resolution chain for one directory kind.
fn resolve_dir(
    override_path: Option<PathBuf>,
    cli: &OnceLock<Option<PathBuf>>,
    env_var: &str,
    platform: fn() -> Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Some(path) = cli.get().and_then(Clone::clone) {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(env_var) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    platform().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Returns the application data directory path.
///
/// Platform defaults:
/// - Linux: `~/.local/share/StyleClone/`
/// - macOS: `~/Library/Application Support/StyleClone/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\StyleClone\`
///
/// Returns `None` if the data directory cannot be determined.
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

/// Returns the application data directory path with an optional override.
pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve_dir(override_path, &CLI_DATA_DIR, ENV_DATA_DIR, dirs::data_dir)
}

/// Returns the application config directory path.
///
/// Platform defaults:
/// - Linux: `~/.config/StyleClone/`
/// - macOS: `~/Library/Application Support/StyleClone/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\StyleClone\`
///
/// Returns `None` if the config directory cannot be determined.
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the application config directory path with an optional override.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve_dir(override_path, &CLI_CONFIG_DIR, ENV_CONFIG_DIR, dirs::config_dir)
}

/// Full path of the preference store.
pub fn preferences_file_path(data_dir_override: Option<PathBuf>) -> Option<PathBuf> {
    get_app_data_dir_with_override(data_dir_override).map(|dir| dir.join(PREFERENCES_FILE))
}

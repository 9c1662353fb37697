// SPDX-License-Identifier: MPL-2.0
//! Process-wide log output.
//!
//! Logs go to stderr through a `tracing-subscriber` fmt layer. The filter is
//! taken from `--log-level` when given, otherwise from `RUST_LOG`, otherwise
//! [`DEFAULT_FILTER`].

use crate::error::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Filter used when neither `--log-level` nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "style_clone=info,warn";

/// Builds the filter directive set.
///
/// # Errors
///
/// Returns an error if `directive` is not a valid filter.
pub fn build_filter(directive: Option<&str>) -> Result<EnvFilter> {
    match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .map_err(|e| Error::Config(format!("invalid log level '{directive}': {e}"))),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a subscriber is already set.
pub fn init(directive: Option<&str>) -> Result<()> {
    let filter = build_filter(directive)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| Error::Config(format!("logging already initialized: {e}")))
}

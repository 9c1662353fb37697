// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration constants.
//!
//! # Categories
//!
//! - **Synthesis**: Backend timeout and offline preview latency
//! - **Export**: Download format
//! - **Window**: Initial and minimum window size

use crate::domain::generation::newtypes::{preview_delay_bounds, timeout_bounds};

// ==========================================================================
// Synthesis Defaults
// ==========================================================================

/// Default generation timeout (in seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = timeout_bounds::DEFAULT_SECS;

/// Minimum generation timeout (in seconds).
pub const MIN_TIMEOUT_SECS: u64 = timeout_bounds::MIN_SECS;

/// Maximum generation timeout (in seconds).
pub const MAX_TIMEOUT_SECS: u64 = timeout_bounds::MAX_SECS;

/// Default simulated latency of the offline preview backend (in milliseconds).
pub const DEFAULT_PREVIEW_DELAY_MS: u64 = preview_delay_bounds::DEFAULT_MS;

/// Maximum simulated latency (in milliseconds).
pub const MAX_PREVIEW_DELAY_MS: u64 = preview_delay_bounds::MAX_MS;

// ==========================================================================
// Export Defaults
// ==========================================================================

/// Default download format name.
pub const DEFAULT_EXPORT_FORMAT: &str = "png";

// ==========================================================================
// Window Defaults
// ==========================================================================

/// Initial window width in logical pixels.
pub const WINDOW_DEFAULT_WIDTH: f32 = 1100.0;

/// Initial window height in logical pixels.
pub const WINDOW_DEFAULT_HEIGHT: f32 = 760.0;

/// Minimum window width in logical pixels.
pub const MIN_WINDOW_WIDTH: f32 = 720.0;

/// Minimum window height in logical pixels.
pub const MIN_WINDOW_HEIGHT: f32 = 560.0;

// ==========================================================================
// Compile-time validation
// ==========================================================================

const _: () = {
    assert!(MIN_TIMEOUT_SECS > 0);
    assert!(DEFAULT_TIMEOUT_SECS >= MIN_TIMEOUT_SECS);
    assert!(DEFAULT_TIMEOUT_SECS <= MAX_TIMEOUT_SECS);

    assert!(DEFAULT_PREVIEW_DELAY_MS <= MAX_PREVIEW_DELAY_MS);
    assert!(DEFAULT_PREVIEW_DELAY_MS / 1000 < DEFAULT_TIMEOUT_SECS);

    assert!(MIN_WINDOW_WIDTH <= WINDOW_DEFAULT_WIDTH);
    assert!(MIN_WINDOW_HEIGHT <= WINDOW_DEFAULT_HEIGHT);
};

// SPDX-License-Identifier: MPL-2.0
//! Generation newtypes.
//!
//! This module provides type-safe wrappers for timing values,
//! ensuring they are always within valid ranges.

use std::time::Duration;

// =============================================================================
// Timeout Bounds
// =============================================================================

/// Generation timeout bounds (5 seconds to 10 minutes).
pub mod timeout_bounds {
    /// Minimum timeout in seconds.
    pub const MIN_SECS: u64 = 5;
    /// Maximum timeout in seconds.
    pub const MAX_SECS: u64 = 600;
    /// Default timeout in seconds.
    pub const DEFAULT_SECS: u64 = 30;
}

// =============================================================================
// GenerationTimeout
// =============================================================================

/// Upper bound on how long a single generation request may stay in flight.
///
/// Once elapsed, the request is abandoned and the session moves to the
/// failed phase with a timeout detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationTimeout(u64);

impl GenerationTimeout {
    /// Creates a new timeout, clamping to the valid range.
    #[must_use]
    pub fn new(secs: u64) -> Self {
        Self(secs.clamp(timeout_bounds::MIN_SECS, timeout_bounds::MAX_SECS))
    }

    /// Returns the value in seconds.
    #[must_use]
    pub fn secs(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl Default for GenerationTimeout {
    fn default() -> Self {
        Self(timeout_bounds::DEFAULT_SECS)
    }
}

// =============================================================================
// Preview Delay Bounds
// =============================================================================

/// Simulated latency bounds for the offline preview backend (0 to 60 seconds).
pub mod preview_delay_bounds {
    /// Minimum delay in milliseconds.
    pub const MIN_MS: u64 = 0;
    /// Maximum delay in milliseconds.
    pub const MAX_MS: u64 = 60_000;
    /// Default delay in milliseconds.
    pub const DEFAULT_MS: u64 = 3_000;
}

// =============================================================================
// PreviewDelay
// =============================================================================

/// Latency the offline preview backend waits before answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewDelay(u64);

impl PreviewDelay {
    /// Creates a new delay, clamping to the valid range.
    #[must_use]
    pub fn new(millis: u64) -> Self {
        Self(millis.clamp(preview_delay_bounds::MIN_MS, preview_delay_bounds::MAX_MS))
    }

    #[must_use]
    pub fn millis(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for PreviewDelay {
    fn default() -> Self {
        Self(preview_delay_bounds::DEFAULT_MS)
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Preference persistence ports.
//!
//! Two small capabilities back the theme preference: a persistent key-value
//! facility and a read-only view of the operating system's appearance.

use crate::error::Result;

/// Persistent string key-value storage.
///
/// Reads and writes are synchronous and complete before returning.
pub trait KeyValueStore: Send {
    /// Returns the stored value for `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage exists but cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value could not be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Read-only "prefers dark" signal from the environment.
pub trait AmbientAppearance: Send {
    /// Returns `Some(true)` for a dark preference, `Some(false)` for light,
    /// and `None` when the environment does not say.
    fn prefers_dark(&self) -> Option<bool>;
}

/// Fixed ambient answer, for headless runs and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedAppearance(pub Option<bool>);

impl AmbientAppearance for FixedAppearance {
    fn prefers_dark(&self) -> Option<bool> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_appearance_reports_its_value() {
        assert_eq!(FixedAppearance(Some(true)).prefers_dark(), Some(true));
        assert_eq!(FixedAppearance::default().prefers_dark(), None);
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Theme preference persistence.

use crate::application::port::{AmbientAppearance, KeyValueStore};
use crate::error::Result;
use std::fmt;

/// Key under which the theme is persisted.
pub const THEME_KEY: &str = "theme";

/// Light or dark presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    #[must_use]
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            ThemePreference::Dark
        } else {
            ThemePreference::Light
        }
    }

    /// Interprets a stored value. Only `"dark"` means dark.
    #[must_use]
    pub fn from_stored(value: &str) -> Self {
        Self::from_dark(value == "dark")
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == ThemePreference::Dark
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        Self::from_dark(!self.is_dark())
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads and writes the theme preference.
///
/// Resolution on load: stored value, then the ambient system signal, then
/// light.
pub struct PreferenceStore {
    store: Box<dyn KeyValueStore>,
    ambient: Box<dyn AmbientAppearance>,
}

impl PreferenceStore {
    #[must_use]
    pub fn new(store: Box<dyn KeyValueStore>, ambient: Box<dyn AmbientAppearance>) -> Self {
        Self { store, ambient }
    }

    /// Resolves the effective preference.
    ///
    /// A store that cannot be read is treated like an empty one.
    #[must_use]
    pub fn load(&self) -> ThemePreference {
        match self.store.get(THEME_KEY) {
            Ok(Some(value)) => return ThemePreference::from_stored(&value),
            Ok(None) => {}
            Err(err) => tracing::warn!(error = %err, "theme preference unreadable"),
        }

        match self.ambient.prefers_dark() {
            Some(dark) => ThemePreference::from_dark(dark),
            None => ThemePreference::Light,
        }
    }

    /// Persists the preference before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write.
    pub fn save(&mut self, value: ThemePreference) -> Result<()> {
        self.store.set(THEME_KEY, value.as_str())
    }
}

impl fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreferenceStore").finish_non_exhaustive()
    }
}

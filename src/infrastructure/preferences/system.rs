// SPDX-License-Identifier: MPL-2.0
//! Operating system appearance via `dark-light`.

use crate::application::port::AmbientAppearance;

/// Queries the desktop's light/dark setting on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAppearance;

impl AmbientAppearance for SystemAppearance {
    fn prefers_dark(&self) -> Option<bool> {
        match dark_light::detect() {
            Ok(dark_light::Mode::Dark) => Some(true),
            Ok(dark_light::Mode::Light) => Some(false),
            Ok(dark_light::Mode::Unspecified) => None,
            Err(err) => {
                tracing::debug!(error = %err, "system theme detection failed");
                None
            }
        }
    }
}

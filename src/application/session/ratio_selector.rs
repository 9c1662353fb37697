// SPDX-License-Identifier: MPL-2.0
//! Output aspect ratio selection.

use crate::domain::generation::AspectRatio;
use crate::error::SessionError;

/// Holds the one selected [`AspectRatio`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatioSelector {
    current: AspectRatio,
}

impl RatioSelector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a ratio by its `W:H` label.
    ///
    /// An unknown label is a caller bug: it is logged and the selection is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidRatio`] if `value` is not a supported label.
    pub fn select(&mut self, value: &str) -> Result<AspectRatio, SessionError> {
        match AspectRatio::from_label(value) {
            Some(ratio) => {
                self.select_ratio(ratio);
                Ok(ratio)
            }
            None => {
                tracing::error!(value, "rejected unsupported aspect ratio");
                Err(SessionError::InvalidRatio(value.to_string()))
            }
        }
    }

    pub fn select_ratio(&mut self, ratio: AspectRatio) {
        if ratio != self.current {
            tracing::debug!(from = %self.current, to = %ratio, "aspect ratio changed");
        }
        self.current = ratio;
    }

    #[must_use]
    pub fn current(&self) -> AspectRatio {
        self.current
    }

    /// All selectable ratios, in display order.
    #[must_use]
    pub fn options(&self) -> &'static [AspectRatio] {
        &AspectRatio::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selection_is_square() {
        assert_eq!(RatioSelector::new().current(), AspectRatio::Square);
    }

    #[test]
    fn select_by_label() {
        let mut selector = RatioSelector::new();
        assert_eq!(selector.select("9:16"), Ok(AspectRatio::Vertical9x16));
        assert_eq!(selector.current(), AspectRatio::Vertical9x16);
    }

    #[test]
    fn invalid_label_keeps_selection() {
        let mut selector = RatioSelector::new();
        selector.select_ratio(AspectRatio::Landscape4x3);

        assert_eq!(
            selector.select("21:9"),
            Err(SessionError::InvalidRatio("21:9".to_string()))
        );
        assert_eq!(selector.current(), AspectRatio::Landscape4x3);
    }

    #[test]
    fn options_follow_display_order() {
        let selector = RatioSelector::new();
        assert_eq!(selector.options().len(), 5);
        assert_eq!(selector.options()[0], selector.current());
    }
}

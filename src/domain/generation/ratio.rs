// SPDX-License-Identifier: MPL-2.0
//! Output aspect ratios.

use std::fmt;

/// Output aspect ratio, drawn from a fixed ordered set.
///
/// The default is the first element of [`AspectRatio::ALL`] (`1:1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AspectRatio {
    #[default]
    Square,
    Landscape4x3,
    Portrait3x4,
    Widescreen16x9,
    Vertical9x16,
}

impl AspectRatio {
    /// All supported ratios, in display order.
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Landscape4x3,
        AspectRatio::Portrait3x4,
        AspectRatio::Widescreen16x9,
        AspectRatio::Vertical9x16,
    ];

    /// Returns the `W:H` label, e.g. `"16:9"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape4x3 => "4:3",
            AspectRatio::Portrait3x4 => "3:4",
            AspectRatio::Widescreen16x9 => "16:9",
            AspectRatio::Vertical9x16 => "9:16",
        }
    }

    /// Returns the `(width, height)` terms of the ratio.
    #[must_use]
    pub fn terms(self) -> (u32, u32) {
        match self {
            AspectRatio::Square => (1, 1),
            AspectRatio::Landscape4x3 => (4, 3),
            AspectRatio::Portrait3x4 => (3, 4),
            AspectRatio::Widescreen16x9 => (16, 9),
            AspectRatio::Vertical9x16 => (9, 16),
        }
    }

    /// Parses a `W:H` label. Surrounding whitespace is ignored.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|ratio| ratio.label() == label)
    }

    /// Largest `(width, height)` with this ratio that fits inside the given bounds.
    ///
    /// Both returned dimensions are at least 1.
    #[must_use]
    pub fn fit_within(self, max_width: u32, max_height: u32) -> (u32, u32) {
        let (w, h) = self.terms();
        let (w, h) = (u64::from(w), u64::from(h));
        let (max_w, max_h) = (u64::from(max_width.max(1)), u64::from(max_height.max(1)));

        // Scale by whichever axis is the limiting one
        let (width, height) = if max_w * h <= max_h * w {
            (max_w, max_w * h / w)
        } else {
            (max_h * w / h, max_h)
        };

        // Bounded by the u32 inputs, so the casts cannot truncate
        #[allow(clippy::cast_possible_truncation)]
        (width.max(1) as u32, height.max(1) as u32)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Core image types for the domain layer.
//!
//! These types represent pure data without any presentation dependencies.

use std::fmt;
use std::sync::Arc;

/// Identifies which of the two input slots an image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotRole {
    /// The reference whose colours and textures are transferred.
    Style,
    /// The target whose structure is preserved.
    Content,
}

impl SlotRole {
    /// Both roles, in display order.
    pub const ALL: [SlotRole; 2] = [SlotRole::Style, SlotRole::Content];

    /// Short lowercase name used in logs and error messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SlotRole::Style => "style",
            SlotRole::Content => "content",
        }
    }
}

impl fmt::Display for SlotRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 32-byte content hash of an encoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns the first `len` bytes as lowercase hex (at most 64 characters).
    #[must_use]
    pub fn short_hex(&self, len: usize) -> String {
        self.0
            .iter()
            .take(len.min(32))
            .map(|b| format!("{b:02x}"))
            .collect()
    }
}

/// Immutable handle to a decoded image.
///
/// Holds the display-ready encoded bytes (the original file for raster
/// formats, a PNG rasterization for vector input) together with the
/// metadata established while decoding. Cloning is cheap: all clones
/// share the same allocation, so a request snapshot never copies pixels.
///
/// # Example
///
/// ```
/// use style_clone::domain::image::{Fingerprint, ImagePayload};
///
/// let payload = ImagePayload::new(
///     vec![0x89, b'P', b'N', b'G'],
///     "image/png",
///     64,
///     48,
///     Fingerprint::from_bytes([7; 32]),
/// );
///
/// assert_eq!(payload.dimensions(), (64, 48));
/// assert_eq!(payload.mime_type(), "image/png");
/// ```
#[derive(Clone)]
pub struct ImagePayload {
    inner: Arc<PayloadInner>,
}

struct PayloadInner {
    encoded: Vec<u8>,
    mime_type: &'static str,
    width: u32,
    height: u32,
    fingerprint: Fingerprint,
}

impl ImagePayload {
    /// Creates a payload from already validated encoded bytes.
    #[must_use]
    pub fn new(
        encoded: Vec<u8>,
        mime_type: &'static str,
        width: u32,
        height: u32,
        fingerprint: Fingerprint,
    ) -> Self {
        Self {
            inner: Arc::new(PayloadInner {
                encoded,
                mime_type,
                width,
                height,
                fingerprint,
            }),
        }
    }

    /// Returns the encoded bytes.
    #[must_use]
    pub fn encoded_bytes(&self) -> &[u8] {
        &self.inner.encoded
    }

    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        self.inner.mime_type
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        self.inner.fingerprint
    }

    /// Returns `true` if both handles point at the same allocation.
    #[must_use]
    pub fn same_allocation(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Number of live handles to this payload (slots, snapshots, artifacts).
    #[must_use]
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePayload")
            .field("mime_type", &self.inner.mime_type)
            .field("width", &self.inner.width)
            .field("height", &self.inner.height)
            .field("bytes", &self.inner.encoded.len())
            .field("fingerprint", &self.inner.fingerprint.short_hex(6))
            .finish()
    }
}

impl PartialEq for ImagePayload {
    fn eq(&self, other: &Self) -> bool {
        self.same_allocation(other)
            || (self.inner.fingerprint == other.inner.fingerprint
                && self.dimensions() == other.dimensions())
    }
}

impl Eq for ImagePayload {}

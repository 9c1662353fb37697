// SPDX-License-Identifier: MPL-2.0
//! Single-image input slot.

use crate::domain::image::{ImagePayload, SlotRole};
use crate::error::SessionError;
use crate::media::image::decode_payload;

/// Holds zero or one decoded image for one role.
#[derive(Debug, Clone)]
pub struct ImageSlot {
    role: SlotRole,
    payload: Option<ImagePayload>,
}

impl ImageSlot {
    #[must_use]
    pub fn new(role: SlotRole) -> Self {
        Self {
            role,
            payload: None,
        }
    }

    #[must_use]
    pub fn role(&self) -> SlotRole {
        self.role
    }

    /// Decodes `bytes` and replaces the current payload.
    ///
    /// On failure the slot keeps whatever it held before.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::DecodeFailure`] if the bytes are not an image.
    pub fn set(&mut self, bytes: &[u8]) -> Result<ImagePayload, SessionError> {
        let payload = decode_payload(bytes)?;
        self.set_payload(payload.clone());
        Ok(payload)
    }

    /// Replaces the current payload with an already decoded one.
    pub fn set_payload(&mut self, payload: ImagePayload) {
        self.payload = Some(payload);
    }

    /// Releases the payload. Clearing an empty slot does nothing.
    pub fn clear(&mut self) {
        self.payload = None;
    }

    #[must_use]
    pub fn get(&self) -> Option<&ImagePayload> {
        self.payload.as_ref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([0, 128, 255, 255]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("failed to encode png");
        bytes
    }

    #[test]
    fn new_slot_is_empty() {
        let slot = ImageSlot::new(SlotRole::Style);
        assert!(slot.is_empty());
        assert!(slot.get().is_none());
        assert_eq!(slot.role(), SlotRole::Style);
    }

    #[test]
    fn set_replaces_previous_payload() {
        let mut slot = ImageSlot::new(SlotRole::Content);
        slot.set(&png_bytes(2, 2)).expect("first image decodes");
        let second = slot.set(&png_bytes(3, 1)).expect("second image decodes");

        let held = slot.get().expect("slot is populated");
        assert!(held.same_allocation(&second));
        assert_eq!(held.dimensions(), (3, 1));
    }

    #[test]
    fn failed_set_leaves_slot_unchanged() {
        let mut slot = ImageSlot::new(SlotRole::Style);
        let original = slot.set(&png_bytes(2, 2)).expect("image decodes");

        let result = slot.set(b"definitely not an image");
        assert!(matches!(result, Err(SessionError::DecodeFailure(_))));
        assert!(slot.get().expect("still populated").same_allocation(&original));

        let mut empty = ImageSlot::new(SlotRole::Content);
        assert!(empty.set(&[]).is_err());
        assert!(empty.is_empty());
    }

    #[test]
    fn clear_is_idempotent() {
        let mut slot = ImageSlot::new(SlotRole::Style);
        slot.set(&png_bytes(1, 1)).expect("image decodes");
        slot.clear();
        assert!(slot.is_empty());
        slot.clear();
        assert!(slot.is_empty());
    }

    #[test]
    fn get_reflects_last_operation() {
        let mut slot = ImageSlot::new(SlotRole::Content);
        let a = png_bytes(1, 1);
        let b = png_bytes(4, 4);

        let ops: [Option<&[u8]>; 5] = [Some(&a), None, Some(&b), Some(&a), None];
        for op in ops {
            match op {
                Some(bytes) => {
                    let payload = slot.set(bytes).expect("image decodes");
                    assert!(slot.get().expect("populated").same_allocation(&payload));
                }
                None => {
                    slot.clear();
                    assert!(slot.get().is_none());
                }
            }
        }
    }

    #[test]
    fn clearing_releases_the_handle() {
        let mut slot = ImageSlot::new(SlotRole::Style);
        let payload = slot.set(&png_bytes(1, 1)).expect("image decodes");
        assert_eq!(payload.handle_count(), 2);
        slot.clear();
        assert_eq!(payload.handle_count(), 1);
    }
}

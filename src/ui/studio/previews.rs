// SPDX-License-Identifier: MPL-2.0
//! Decoded pixel handles for the slot and result images.
//!
//! Payloads hold encoded bytes; the renderer wants RGBA. `sync` notices
//! payloads whose fingerprint changed and hands back [`DecodeJob`]s for the
//! caller to run off the update thread; finished decodes come back through
//! [`Previews::apply`]. A payload that fails to decode is remembered by
//! fingerprint and not retried.

use crate::application::session::Session;
use crate::domain::image::{Fingerprint, ImagePayload, SlotRole};
use crate::media::to_dynamic_image;
use iced::widget::image::Handle;

/// Which picture a preview belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewTarget {
    Slot(SlotRole),
    Result,
}

/// A payload waiting to be decoded into a handle.
#[derive(Debug, Clone)]
pub struct DecodeJob {
    pub target: PreviewTarget,
    pub payload: ImagePayload,
}

#[derive(Debug, Clone)]
enum Preview {
    Pending(Fingerprint),
    Ready {
        fingerprint: Fingerprint,
        handle: Handle,
    },
    Failed(Fingerprint),
}

impl Preview {
    fn fingerprint(&self) -> Fingerprint {
        match self {
            Preview::Pending(fingerprint)
            | Preview::Ready { fingerprint, .. }
            | Preview::Failed(fingerprint) => *fingerprint,
        }
    }

    fn handle(&self) -> Option<&Handle> {
        match self {
            Preview::Ready { handle, .. } => Some(handle),
            Preview::Pending(_) | Preview::Failed(_) => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Previews {
    style: Option<Preview>,
    content: Option<Preview>,
    result: Option<Preview>,
}

impl Previews {
    /// Brings every entry in line with the session's current payloads and
    /// returns the decodes that are now needed.
    #[must_use]
    pub fn sync(&mut self, session: &Session) -> Vec<DecodeJob> {
        let mut jobs = Vec::new();
        for role in SlotRole::ALL {
            let payload = session.slot(role).get();
            let target = PreviewTarget::Slot(role);
            refresh(self.entry_mut(target), payload, target, &mut jobs);
        }
        let result = session.artifact().map(|a| a.image());
        refresh(&mut self.result, result, PreviewTarget::Result, &mut jobs);
        jobs
    }

    /// Stores a finished decode. Returns `false` if the payload it was made
    /// from is no longer the current one.
    pub fn apply(
        &mut self,
        target: PreviewTarget,
        fingerprint: Fingerprint,
        handle: Option<Handle>,
    ) -> bool {
        let entry = self.entry_mut(target);
        if !matches!(entry, Some(Preview::Pending(pending)) if *pending == fingerprint) {
            return false;
        }
        *entry = Some(match handle {
            Some(handle) => Preview::Ready {
                fingerprint,
                handle,
            },
            None => Preview::Failed(fingerprint),
        });
        true
    }

    #[must_use]
    pub fn slot(&self, role: SlotRole) -> Option<&Handle> {
        let preview = match role {
            SlotRole::Style => &self.style,
            SlotRole::Content => &self.content,
        };
        preview.as_ref().and_then(Preview::handle)
    }

    #[must_use]
    pub fn result(&self) -> Option<&Handle> {
        self.result.as_ref().and_then(Preview::handle)
    }

    fn entry_mut(&mut self, target: PreviewTarget) -> &mut Option<Preview> {
        match target {
            PreviewTarget::Slot(SlotRole::Style) => &mut self.style,
            PreviewTarget::Slot(SlotRole::Content) => &mut self.content,
            PreviewTarget::Result => &mut self.result,
        }
    }
}

/// Decodes a payload into an RGBA handle. Blocking.
#[must_use]
pub fn decode(payload: &ImagePayload) -> Option<Handle> {
    match to_dynamic_image(payload) {
        Ok(image) => {
            let rgba = image.to_rgba8();
            let (width, height) = rgba.dimensions();
            Some(Handle::from_rgba(width, height, rgba.into_raw()))
        }
        Err(err) => {
            tracing::warn!(error = %err, "preview could not be decoded");
            None
        }
    }
}

fn refresh(
    cached: &mut Option<Preview>,
    payload: Option<&ImagePayload>,
    target: PreviewTarget,
    jobs: &mut Vec<DecodeJob>,
) {
    let Some(payload) = payload else {
        *cached = None;
        return;
    };
    let fingerprint = payload.fingerprint();
    if cached.as_ref().is_some_and(|p| p.fingerprint() == fingerprint) {
        return;
    }

    *cached = Some(Preview::Pending(fingerprint));
    jobs.push(DecodeJob {
        target,
        payload: payload.clone(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::decode_payload;
    use image_rs::{ImageFormat, RgbaImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32, shade: u8) -> ImagePayload {
        let image = RgbaImage::from_pixel(width, height, image_rs::Rgba([shade, 0, 0, 255]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode png");
        decode_payload(&bytes).expect("decode png")
    }

    fn payload_with(bytes: &[u8], seed: u8) -> ImagePayload {
        ImagePayload::new(bytes.to_vec(), "image/png", 1, 1, Fingerprint::from_bytes([seed; 32]))
    }

    #[test]
    fn new_payload_schedules_one_decode() {
        let mut cached = None;
        let mut jobs = Vec::new();
        let payload = png(4, 3, 10);
        let target = PreviewTarget::Slot(SlotRole::Style);

        refresh(&mut cached, Some(&payload), target, &mut jobs);
        refresh(&mut cached, Some(&payload), target, &mut jobs);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].target, target);
        assert!(cached.as_ref().and_then(Preview::handle).is_none());

        refresh(&mut cached, None, target, &mut jobs);
        assert!(cached.is_none());
    }

    #[test]
    fn decoded_handle_is_applied_to_current_payload_only() {
        let mut previews = Previews::default();
        let target = PreviewTarget::Slot(SlotRole::Content);
        let first = png(4, 3, 10);
        let second = png(4, 3, 200);
        let mut jobs = Vec::new();

        refresh(previews.entry_mut(target), Some(&first), target, &mut jobs);
        refresh(previews.entry_mut(target), Some(&second), target, &mut jobs);
        assert_eq!(jobs.len(), 2);

        // The first decode finishes after the slot moved on
        assert!(!previews.apply(target, first.fingerprint(), decode(&first)));
        assert!(previews.slot(SlotRole::Content).is_none());

        assert!(previews.apply(target, second.fingerprint(), decode(&second)));
        assert!(previews.slot(SlotRole::Content).is_some());
    }

    #[test]
    fn failed_decode_is_not_retried() {
        let mut previews = Previews::default();
        let broken = payload_with(b"not an image", 7);
        let mut jobs = Vec::new();

        refresh(&mut previews.result, Some(&broken), PreviewTarget::Result, &mut jobs);
        let handle = decode(&broken);
        assert!(handle.is_none());
        assert!(previews.apply(PreviewTarget::Result, broken.fingerprint(), handle));

        refresh(&mut previews.result, Some(&broken), PreviewTarget::Result, &mut jobs);
        assert_eq!(jobs.len(), 1);
        assert!(previews.result().is_none());
    }

    #[test]
    fn unchanged_payload_keeps_the_same_handle() {
        let mut previews = Previews::default();
        let target = PreviewTarget::Slot(SlotRole::Style);
        let payload = png(4, 3, 10);
        let mut jobs = Vec::new();

        refresh(previews.entry_mut(target), Some(&payload), target, &mut jobs);
        previews.apply(target, payload.fingerprint(), decode(&payload));
        let first = previews.slot(SlotRole::Style).map(Handle::id);

        refresh(previews.entry_mut(target), Some(&payload), target, &mut jobs);
        assert_eq!(previews.slot(SlotRole::Style).map(Handle::id), first);
        assert_eq!(jobs.len(), 1);
    }
}

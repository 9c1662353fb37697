// SPDX-License-Identifier: MPL-2.0
//! Offline preview backend.
//!
//! Renders a stand-in result locally: the content image is center-cropped to
//! the requested ratio and washed with the mean colour of the style image.

use crate::application::port::{SynthesisError, SynthesisFuture, Synthesizer};
use crate::domain::generation::{AspectRatio, GenerationRequest, PreviewDelay};
use crate::domain::image::ImagePayload;
use crate::media::image::{fingerprint, to_dynamic_image};
use image_rs::{DynamicImage, GenericImageView, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Share of the style colour mixed into each output pixel.
const TINT_STRENGTH: f32 = 0.35;

/// Edge length of the thumbnail used to sample the style colour.
const STYLE_SAMPLE_EDGE: u32 = 64;

/// Local synthesizer that needs no network access.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewSynthesizer {
    delay: PreviewDelay,
}

impl PreviewSynthesizer {
    #[must_use]
    pub fn new(delay: PreviewDelay) -> Self {
        Self { delay }
    }

    #[must_use]
    pub fn delay(&self) -> PreviewDelay {
        self.delay
    }
}

impl Synthesizer for PreviewSynthesizer {
    fn synthesize(&self, request: GenerationRequest) -> SynthesisFuture {
        let delay = self.delay.as_duration();
        Box::pin(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            tokio::task::spawn_blocking(move || render_preview(&request))
                .await
                .map_err(|e| SynthesisError::ProcessingFailed(e.to_string()))?
        })
    }

    fn name(&self) -> &'static str {
        "preview"
    }
}

/// Renders the preview image for a request.
fn render_preview(request: &GenerationRequest) -> Result<ImagePayload, SynthesisError> {
    let style = to_dynamic_image(request.style_image())
        .map_err(|e| SynthesisError::ProcessingFailed(e.to_string()))?;
    let content = to_dynamic_image(request.content_image())
        .map_err(|e| SynthesisError::ProcessingFailed(e.to_string()))?;

    let tint = mean_colour(&style);
    let mut output = crop_to_ratio(&content, request.ratio()).to_rgba8();
    apply_tint(&mut output, tint);

    let (width, height) = output.dimensions();
    let mut png = Vec::new();
    output
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| SynthesisError::ProcessingFailed(e.to_string()))?;

    let fingerprint = fingerprint(&png);
    Ok(ImagePayload::new(png, "image/png", width, height, fingerprint))
}

fn crop_to_ratio(image: &DynamicImage, ratio: AspectRatio) -> DynamicImage {
    let (src_w, src_h) = image.dimensions();
    let (width, height) = ratio.fit_within(src_w, src_h);
    let x = (src_w - width) / 2;
    let y = (src_h - height) / 2;
    image.crop_imm(x, y, width, height)
}

/// Average RGB of the image, sampled from a small thumbnail.
fn mean_colour(image: &DynamicImage) -> [u8; 3] {
    let sample = image.thumbnail(STYLE_SAMPLE_EDGE, STYLE_SAMPLE_EDGE).to_rgb8();
    let count = u64::from(sample.width()) * u64::from(sample.height());
    if count == 0 {
        return [0, 0, 0];
    }

    let mut sums = [0u64; 3];
    for pixel in sample.pixels() {
        for (sum, channel) in sums.iter_mut().zip(pixel.0) {
            *sum += u64::from(channel);
        }
    }

    // Each average is at most 255
    #[allow(clippy::cast_possible_truncation)]
    let mean = sums.map(|sum| (sum / count) as u8);
    mean
}

fn apply_tint(image: &mut RgbaImage, tint: [u8; 3]) {
    for Rgba([r, g, b, _]) in image.pixels_mut() {
        for (channel, tint) in [r, g, b].into_iter().zip(tint) {
            let mixed =
                f32::from(*channel) * (1.0 - TINT_STRENGTH) + f32::from(tint) * TINT_STRENGTH;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let mixed = mixed.round().clamp(0.0, 255.0) as u8;
            *channel = mixed;
        }
    }
}

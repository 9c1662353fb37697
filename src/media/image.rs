// SPDX-License-Identifier: MPL-2.0
//! Image decoding from raw file bytes (PNG, JPEG, GIF, SVG, etc.).

use crate::domain::image::{Fingerprint, ImagePayload};
use crate::error::{Error, Result, SessionError};
use image_rs::{DynamicImage, GenericImageView};
use resvg::usvg;

/// Number of leading bytes inspected when sniffing for SVG markup.
const SVG_SNIFF_LEN: usize = 1024;

/// Decodes user-supplied bytes into an [`ImagePayload`].
///
/// Raster formats keep their original encoding; SVG documents are rasterized
/// to PNG so every payload can be displayed and re-encoded the same way.
///
/// # Errors
///
/// Returns [`SessionError::DecodeFailure`] if the bytes are empty, are not a
/// recognized image format, are corrupt, or describe an empty image.
pub fn decode_payload(bytes: &[u8]) -> std::result::Result<ImagePayload, SessionError> {
    if bytes.is_empty() {
        return Err(SessionError::DecodeFailure("file is empty".to_string()));
    }

    if looks_like_svg(bytes) {
        let (png, width, height) =
            rasterize_svg(bytes).map_err(|e| SessionError::DecodeFailure(e.to_string()))?;
        let fingerprint = fingerprint(&png);
        return Ok(ImagePayload::new(png, "image/png", width, height, fingerprint));
    }

    let format = image_rs::guess_format(bytes)
        .map_err(|e| SessionError::DecodeFailure(e.to_string()))?;
    let img = image_rs::load_from_memory_with_format(bytes, format)
        .map_err(|e| SessionError::DecodeFailure(e.to_string()))?;

    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(SessionError::DecodeFailure(
            "image has empty dimensions".to_string(),
        ));
    }

    Ok(ImagePayload::new(
        bytes.to_vec(),
        format.to_mime_type(),
        width,
        height,
        fingerprint(bytes),
    ))
}

/// Decodes a payload back into pixels.
///
/// # Errors
///
/// Returns an error if the payload bytes no longer decode (they were
/// validated at construction, so this indicates a foreign payload).
pub fn to_dynamic_image(payload: &ImagePayload) -> Result<DynamicImage> {
    Ok(image_rs::load_from_memory(payload.encoded_bytes())?)
}

/// Computes the content fingerprint of encoded bytes.
#[must_use]
pub fn fingerprint(bytes: &[u8]) -> Fingerprint {
    Fingerprint::from_bytes(*blake3::hash(bytes).as_bytes())
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(SVG_SNIFF_LEN)];
    let text = String::from_utf8_lossy(head);
    let text = text.trim_start_matches('\u{feff}').trim_start();
    (text.starts_with("<svg") || text.starts_with("<?xml")) && text.contains("<svg")
}

/// Rasterizes an SVG document and returns `(png_bytes, width, height)`.
fn rasterize_svg(svg_data: &[u8]) -> Result<(Vec<u8>, u32, u32)> {
    let tree = usvg::Tree::from_data(svg_data, &usvg::Options::default())
        .map_err(|e| Error::Svg(e.to_string()))?;

    let pixmap_size = tree.size().to_int_size();
    let width = pixmap_size.width();
    let height = pixmap_size.height();
    if width == 0 || height == 0 {
        return Err(Error::Svg("SVG has empty dimensions".into()));
    }

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| Error::Svg("Failed to allocate SVG pixmap".into()))?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let png_data = pixmap.encode_png().map_err(|e| Error::Svg(e.to_string()))?;
    Ok((png_data, width, height))
}

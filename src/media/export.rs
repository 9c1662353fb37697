// SPDX-License-Identifier: MPL-2.0
//! Result export to image files.
//!
//! Generated images are re-encoded into one of a small set of download
//! formats (PNG, JPEG, WebP) using the `image` crate.

use crate::domain::image::ImagePayload;
use crate::error::{Result, SessionError};
use crate::media::image::to_dynamic_image;
use chrono::{DateTime, TimeZone};
use image_rs::ImageFormat;
use std::io::Cursor;
use std::path::Path;

/// Prefix of every suggested download file name.
pub const FILE_NAME_PREFIX: &str = "styleclone";

/// Supported download formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// PNG format (lossless, best quality).
    #[default]
    Png,
    /// JPEG format (lossy, smaller file size).
    Jpeg,
    /// WebP format (lossless in the `image` encoder).
    WebP,
}

impl ExportFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::WebP => "webp",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            ExportFormat::Png => ImageFormat::Png,
            ExportFormat::Jpeg => ImageFormat::Jpeg,
            ExportFormat::WebP => ImageFormat::WebP,
        }
    }

    /// Short display name, as used on the download button.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG",
            ExportFormat::Jpeg => "JPEG",
            ExportFormat::WebP => "WebP",
        }
    }

    /// Returns a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG (Lossless)",
            ExportFormat::Jpeg => "JPEG (Lossy)",
            ExportFormat::WebP => "WebP (Modern)",
        }
    }

    /// Returns all supported formats.
    #[must_use]
    pub fn all() -> &'static [ExportFormat] {
        &[ExportFormat::Png, ExportFormat::Jpeg, ExportFormat::WebP]
    }

    /// Detects format from a file extension or format name, case-insensitively.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<ExportFormat> {
        match ext.trim().trim_start_matches('.').to_lowercase().as_str() {
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            "webp" => Some(ExportFormat::WebP),
            _ => None,
        }
    }

    /// Parses a user-facing format name.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnsupportedFormat`] for anything other than
    /// `png`, `jpg`, `jpeg` or `webp`.
    pub fn parse(value: &str) -> std::result::Result<ExportFormat, SessionError> {
        Self::from_extension(value)
            .ok_or_else(|| SessionError::UnsupportedFormat(value.to_string()))
    }

    /// Detects format from file path extension.
    pub fn from_path(path: &Path) -> Option<ExportFormat> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// Encodes a payload into the given format.
///
/// # Errors
///
/// Returns an error if the payload cannot be decoded or re-encoded.
pub fn encode(payload: &ImagePayload, format: ExportFormat) -> Result<Vec<u8>> {
    let image = to_dynamic_image(payload)?;
    let mut bytes = Vec::new();

    // JPEG has no alpha channel
    if format == ExportFormat::Jpeg {
        image_rs::DynamicImage::ImageRgb8(image.to_rgb8())
            .write_to(&mut Cursor::new(&mut bytes), format.image_format())?;
    } else {
        image
            .to_rgba8()
            .write_to(&mut Cursor::new(&mut bytes), format.image_format())?;
    }

    Ok(bytes)
}

/// Encodes a payload and writes it to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if encoding fails or the file cannot be written.
pub fn save_to_file<P: AsRef<Path>>(
    payload: &ImagePayload,
    path: P,
    format: ExportFormat,
) -> Result<()> {
    let bytes = encode(payload, format)?;
    std::fs::write(path.as_ref(), bytes)?;
    Ok(())
}

/// Generates a default download file name.
///
/// Format: `styleclone_{YYYYmmdd_HHMMSS}.{ext}`
#[must_use]
pub fn default_file_name<Tz>(generated_at: &DateTime<Tz>, format: ExportFormat) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}_{}.{}",
        FILE_NAME_PREFIX,
        generated_at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::image::decode_payload;
    use chrono::Utc;
    use image_rs::{GenericImageView, Rgba, RgbaImage};
    use tempfile::tempdir;

    fn sample_payload() -> ImagePayload {
        let image = RgbaImage::from_pixel(4, 3, Rgba([10, 200, 30, 128]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("failed to encode png");
        decode_payload(&bytes).expect("png should decode")
    }

    #[test]
    fn export_format_extensions() {
        assert_eq!(ExportFormat::Png.extension(), "png");
        assert_eq!(ExportFormat::Jpeg.extension(), "jpg");
        assert_eq!(ExportFormat::WebP.extension(), "webp");
    }

    #[test]
    fn export_format_from_extension() {
        assert_eq!(ExportFormat::from_extension("png"), Some(ExportFormat::Png));
        assert_eq!(ExportFormat::from_extension("PNG"), Some(ExportFormat::Png));
        assert_eq!(ExportFormat::from_extension("jpeg"), Some(ExportFormat::Jpeg));
        assert_eq!(ExportFormat::from_extension(".webp"), Some(ExportFormat::WebP));
        assert_eq!(ExportFormat::from_extension("gif"), None);
    }

    #[test]
    fn parse_rejects_unsupported_formats() {
        assert_eq!(ExportFormat::parse("jpg"), Ok(ExportFormat::Jpeg));
        assert_eq!(
            ExportFormat::parse("bmp"),
            Err(SessionError::UnsupportedFormat("bmp".to_string()))
        );
        assert!(ExportFormat::parse("").is_err());
    }

    #[test]
    fn export_format_from_path() {
        assert_eq!(
            ExportFormat::from_path(Path::new("out/result.JPG")),
            Some(ExportFormat::Jpeg)
        );
        assert_eq!(ExportFormat::from_path(Path::new("result")), None);
    }

    #[test]
    fn encode_produces_requested_format() {
        let payload = sample_payload();
        for format in ExportFormat::all() {
            let bytes = encode(&payload, *format).expect("encoding should succeed");
            let detected = image_rs::guess_format(&bytes).expect("format should be detectable");
            assert_eq!(detected, format.image_format());

            let decoded = image_rs::load_from_memory(&bytes).expect("output should decode");
            assert_eq!(decoded.dimensions(), (4, 3));
        }
    }

    #[test]
    fn save_to_file_writes_image() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("result.png");

        save_to_file(&sample_payload(), &path, ExportFormat::Png).expect("save should succeed");

        let written = image_rs::open(&path).expect("written file should decode");
        assert_eq!(written.dimensions(), (4, 3));
    }

    #[test]
    fn save_to_missing_directory_fails() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("missing").join("result.png");
        assert!(save_to_file(&sample_payload(), &path, ExportFormat::Png).is_err());
    }

    #[test]
    fn default_file_name_uses_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            default_file_name(&at, ExportFormat::Png),
            "styleclone_20240309_140507.png"
        );
        assert_eq!(
            default_file_name(&at, ExportFormat::Jpeg),
            "styleclone_20240309_140507.jpg"
        );
    }
}

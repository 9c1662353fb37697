// SPDX-License-Identifier: MPL-2.0
//! Completed generation output.

use crate::domain::generation::{AspectRatio, RequestId};
use crate::domain::image::ImagePayload;
use crate::error::Result;
use crate::media::data_uri::encode_data_uri;
use crate::media::export::{self, ExportFormat};
use chrono::{DateTime, Local};
use std::path::Path;

/// The image produced by a successful generation.
///
/// Immutable once built. It lives inside the controller's succeeded phase
/// and is dropped together with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultArtifact {
    image: ImagePayload,
    ratio: AspectRatio,
    request_id: RequestId,
    generated_at: DateTime<Local>,
}

impl ResultArtifact {
    #[must_use]
    pub fn new(
        image: ImagePayload,
        ratio: AspectRatio,
        request_id: RequestId,
        generated_at: DateTime<Local>,
    ) -> Self {
        Self {
            image,
            ratio,
            request_id,
            generated_at,
        }
    }

    #[must_use]
    pub fn image(&self) -> &ImagePayload {
        &self.image
    }

    #[must_use]
    pub fn ratio(&self) -> AspectRatio {
        self.ratio
    }

    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    #[must_use]
    pub fn generated_at(&self) -> DateTime<Local> {
        self.generated_at
    }

    /// Output rendered as a `data:` URI.
    #[must_use]
    pub fn data_uri(&self) -> String {
        encode_data_uri(&self.image)
    }

    /// Suggested file name, e.g. `styleclone_20240309_140507.png`.
    #[must_use]
    pub fn default_file_name(&self, format: ExportFormat) -> String {
        export::default_file_name(&self.generated_at, format)
    }

    /// Encodes the output without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be re-encoded.
    pub fn encode(&self, format: ExportFormat) -> Result<Vec<u8>> {
        export::encode(&self.image, format)
    }

    /// Writes the output to `destination` in the named format.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnsupportedFormat`] (wrapped) for an unknown
    /// format name, or an I/O error if encoding or writing fails.
    ///
    /// [`SessionError::UnsupportedFormat`]: crate::error::SessionError::UnsupportedFormat
    pub fn download(&self, format: &str, destination: &Path) -> Result<()> {
        let format = ExportFormat::parse(format)?;
        export::save_to_file(&self.image, destination, format)?;
        tracing::info!(
            request = %self.request_id,
            format = format.extension(),
            path = %destination.display(),
            "result downloaded"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, SessionError};
    use crate::media::image::decode_payload;
    use chrono::TimeZone;
    use image_rs::{GenericImageView, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use tempfile::tempdir;

    fn artifact() -> ResultArtifact {
        let image = RgbaImage::from_pixel(6, 6, Rgba([1, 2, 3, 255]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("failed to encode png");
        let payload = decode_payload(&bytes).expect("png should decode");
        let at = Local
            .with_ymd_and_hms(2025, 1, 2, 3, 4, 5)
            .single()
            .expect("unambiguous local time");
        ResultArtifact::new(payload, AspectRatio::Square, RequestId::new(9), at)
    }

    #[test]
    fn download_writes_requested_format() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("out.jpg");

        artifact().download("jpeg", &path).expect("download succeeds");

        let bytes = std::fs::read(&path).expect("file written");
        assert_eq!(image_rs::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
        assert_eq!(image_rs::load_from_memory(&bytes).unwrap().dimensions(), (6, 6));
    }

    #[test]
    fn download_rejects_unknown_format_without_writing() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("out.tga");

        let err = artifact().download("tga", &path).expect_err("tga is unsupported");
        assert!(matches!(
            err,
            Error::Session(SessionError::UnsupportedFormat(ref f)) if f == "tga"
        ));
        assert!(!path.exists());
    }

    #[test]
    fn default_file_name_uses_generation_time() {
        assert_eq!(
            artifact().default_file_name(ExportFormat::Png),
            "styleclone_20250102_030405.png"
        );
    }

    #[test]
    fn data_uri_carries_png_mime_type() {
        assert!(artifact().data_uri().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn encode_does_not_alter_artifact() {
        let artifact = artifact();
        let before = artifact.clone();
        let webp = artifact.encode(ExportFormat::WebP).expect("webp encodes");
        assert!(!webp.is_empty());
        assert_eq!(artifact, before);
    }
}

// SPDX-License-Identifier: MPL-2.0
//! `data:` URI rendering for image payloads.

use crate::domain::image::ImagePayload;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Renders a payload as a base64 `data:` URI.
#[must_use]
pub fn encode_data_uri(payload: &ImagePayload) -> String {
    format!(
        "data:{};base64,{}",
        payload.mime_type(),
        STANDARD.encode(payload.encoded_bytes())
    )
}

/// Splits a base64 `data:` URI into its mime type and decoded bytes.
///
/// Returns `None` for anything that is not a base64 data URI.
#[must_use]
pub fn decode_data_uri(uri: &str) -> Option<(String, Vec<u8>)> {
    let rest = uri.trim().strip_prefix("data:")?;
    let (header, data) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64")?;
    let bytes = STANDARD.decode(data.trim()).ok()?;
    Some((mime.to_string(), bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::image::Fingerprint;

    #[test]
    fn encode_uses_payload_mime_type() {
        let payload = ImagePayload::new(
            b"abc".to_vec(),
            "image/jpeg",
            1,
            1,
            Fingerprint::from_bytes([0; 32]),
        );
        assert_eq!(encode_data_uri(&payload), "data:image/jpeg;base64,YWJj");
    }

    #[test]
    fn decode_splits_mime_and_bytes() {
        let (mime, bytes) =
            decode_data_uri("data:image/png;base64,YWJj").expect("valid uri should decode");
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, b"abc");
    }

    #[test]
    fn decode_rejects_non_base64_uris() {
        assert!(decode_data_uri("https://example.com/a.png").is_none());
        assert!(decode_data_uri("data:image/png,plain").is_none());
        assert!(decode_data_uri("data:image/png;base64,@@@").is_none());
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Image decoding, encoding and export.
//!
//! This module turns user-supplied bytes into [`ImagePayload`]s and turns
//! payloads back into files or `data:` URIs.
//!
//! [`ImagePayload`]: crate::domain::image::ImagePayload

pub mod data_uri;
pub mod export;
pub mod image;

// Re-export commonly used types
pub use data_uri::{decode_data_uri, encode_data_uri};
pub use export::ExportFormat;
pub use image::{decode_payload, to_dynamic_image};

pub mod extensions {
    /// Image file extensions accepted by the open dialogs.
    pub const IMAGE_EXTENSIONS: &[&str] = &[
        "jpg", "jpeg", "png", "gif", "tiff", "tif", "webp", "bmp", "ico", "svg",
    ];

    /// Image format filters for save dialogs
    pub const IMAGE_SAVE_FILTERS: &[(&str, &[&str])] = &[
        ("PNG", &["png"]),
        ("JPEG", &["jpg", "jpeg"]),
        ("WebP", &["webp"]),
    ];
}

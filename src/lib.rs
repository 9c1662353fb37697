// SPDX-License-Identifier: MPL-2.0
//! `style_clone` is a desktop front end for style-transfer image generation,
//! built with the Iced GUI framework.
//!
//! The user picks a style reference and a content image, chooses an output
//! aspect ratio and sends both to a synthesis backend; the result can be
//! previewed, downloaded, or discarded to start over.
//!
//! - [`domain`] - Pure data: payloads, ratios, requests
//! - [`application`] - The session and the ports it talks through
//! - [`infrastructure`] - Synthesis backends and preference storage
//! - [`media`] - Decoding, export and `data:` URIs
//! - [`app`] / [`ui`] - The Iced application

#![doc(html_root_url = "https://docs.rs/style_clone/0.1.0")]

pub mod app;
pub mod application;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod icon;
pub mod infrastructure;
pub mod logging;
pub mod media;
pub mod ui;

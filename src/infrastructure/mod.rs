// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`. These adapters wrap external dependencies like the HTTP
//! client, the operating system theme query, and file I/O.
//!
//! # Available Adapters
//!
//! - [`synthesis`]: Offline preview and HTTP backends (implement [`Synthesizer`])
//! - [`preferences`]: CBOR file store and system appearance (implement
//!   [`KeyValueStore`] and [`AmbientAppearance`])
//!
//! [`Synthesizer`]: crate::application::port::Synthesizer
//! [`KeyValueStore`]: crate::application::port::KeyValueStore
//! [`AmbientAppearance`]: crate::application::port::AmbientAppearance

pub mod preferences;
pub mod synthesis;

// Re-export main types for convenience
pub use preferences::{CborFileStore, MemoryStore, SystemAppearance};
pub use synthesis::{HttpSynthesizer, PreviewSynthesizer};

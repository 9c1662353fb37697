// SPDX-License-Identifier: MPL-2.0
//! Preference adapters implementing [`KeyValueStore`] and [`AmbientAppearance`].
//!
//! [`KeyValueStore`]: crate::application::port::KeyValueStore
//! [`AmbientAppearance`]: crate::application::port::AmbientAppearance

mod store;
mod system;

pub use store::{CborFileStore, MemoryStore};
pub use system::SystemAppearance;

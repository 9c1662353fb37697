// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the session core remains
//! independent of concrete implementations.
//!
//! # Available Ports
//!
//! - [`synthesis`]: The external image-synthesis collaborator
//! - [`preference`]: Persistent key-value storage and the ambient OS appearance
//!
//! # Design Notes
//!
//! - All traits use domain types only (no Iced handles, no HTTP types)
//! - Traits are `Send + Sync` where they cross task boundaries
//! - The synthesis port returns a boxed `'static` future so a request can be
//!   driven by the UI runtime after the session borrow has ended

pub mod preference;
pub mod synthesis;

pub use preference::{AmbientAppearance, FixedAppearance, KeyValueStore};
pub use synthesis::{SynthesisError, SynthesisFuture, Synthesizer};

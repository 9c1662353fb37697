// SPDX-License-Identifier: MPL-2.0
//! Application layer - The session core and the ports it depends on.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`session`]: Input slots, ratio selection, generation lifecycle, theme preference
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The session core only talks to collaborators through these ports
//!
//! # Example
//!
//! ```ignore
//! use style_clone::application::port::synthesis::Synthesizer;
//! use style_clone::infrastructure::PreviewSynthesizer;
//! use std::sync::Arc;
//!
//! let synthesizer: Arc<dyn Synthesizer> = Arc::new(PreviewSynthesizer::default());
//! ```

pub mod port;
pub mod session;

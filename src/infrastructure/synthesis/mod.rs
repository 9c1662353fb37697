// SPDX-License-Identifier: MPL-2.0
//! Synthesis adapters implementing the [`Synthesizer`] port trait.
//!
//! - [`PreviewSynthesizer`]: offline local preview after a simulated latency
//! - [`HttpSynthesizer`]: JSON over HTTP to a remote style-transfer service
//!
//! [`Synthesizer`]: crate::application::port::Synthesizer

mod http;
mod preview;

pub use http::HttpSynthesizer;
pub use preview::PreviewSynthesizer;

// SPDX-License-Identifier: MPL-2.0
//! Generation domain types.
//!
//! Value objects describing a single generation request and the phase of
//! the state machine that drives it.

pub mod newtypes;
pub mod ratio;
pub mod request;

pub use newtypes::{GenerationTimeout, PreviewDelay};
pub use ratio::AspectRatio;
pub use request::{GenerationPhase, GenerationRequest, RequestId};

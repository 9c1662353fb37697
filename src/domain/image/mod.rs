// SPDX-License-Identifier: MPL-2.0
//! Image domain types.
//!
//! This module contains the decoded image handle shared between the input
//! slots, the generation request snapshot and the result artifact.

pub mod types;

// Re-export commonly used types
pub use types::{Fingerprint, ImagePayload, SlotRole};

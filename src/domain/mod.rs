// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core types with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`image`]: Input image types ([`ImagePayload`](image::ImagePayload),
//!   [`SlotRole`](image::SlotRole))
//! - [`generation`]: Generation value objects ([`AspectRatio`](generation::AspectRatio),
//!   [`GenerationRequest`](generation::GenerationRequest),
//!   [`GenerationPhase`](generation::GenerationPhase),
//!   [`GenerationTimeout`](generation::GenerationTimeout))

pub mod generation;
pub mod image;

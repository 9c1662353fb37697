// SPDX-License-Identifier: MPL-2.0
//! Generation request snapshot and phase.

use super::AspectRatio;
use crate::domain::image::ImagePayload;
use std::fmt;

/// Session-local identifier of a generation request.
///
/// Identifiers increase monotonically within a session; an outcome tagged
/// with an older identifier belongs to a request that is no longer current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Returns the identifier that follows this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Inputs frozen at the moment a generation starts.
///
/// The payloads are shared handles, so later changes to the slots replace
/// what the slots point at without touching this snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    id: RequestId,
    style_image: ImagePayload,
    content_image: ImagePayload,
    ratio: AspectRatio,
}

impl GenerationRequest {
    #[must_use]
    pub fn new(
        id: RequestId,
        style_image: ImagePayload,
        content_image: ImagePayload,
        ratio: AspectRatio,
    ) -> Self {
        Self {
            id,
            style_image,
            content_image,
            ratio,
        }
    }

    #[must_use]
    pub fn id(&self) -> RequestId {
        self.id
    }

    #[must_use]
    pub fn style_image(&self) -> &ImagePayload {
        &self.style_image
    }

    #[must_use]
    pub fn content_image(&self) -> &ImagePayload {
        &self.content_image
    }

    #[must_use]
    pub fn ratio(&self) -> AspectRatio {
        self.ratio
    }
}

/// Discrete state of the generation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationPhase {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl GenerationPhase {
    /// Returns `true` for the two phases that end a request cycle.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, GenerationPhase::Succeeded | GenerationPhase::Failed)
    }
}

impl fmt::Display for GenerationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GenerationPhase::Idle => "idle",
            GenerationPhase::Running => "running",
            GenerationPhase::Succeeded => "succeeded",
            GenerationPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Image synthesis port definition.
//!
//! This module defines the [`Synthesizer`] trait, the single opaque contract
//! through which the session reaches the style-transfer backend.
//!
//! # Design Notes
//!
//! - The collaborator may take arbitrarily long or never answer; timeouts and
//!   cancellation are enforced by the caller, not by implementations
//! - The trait is `Send + Sync` so one instance can serve successive requests
//!   from spawned tasks

use crate::domain::generation::GenerationRequest;
use crate::domain::image::ImagePayload;
use futures_util::future::BoxFuture;
use std::fmt;

// =============================================================================
// SynthesisError
// =============================================================================

/// Errors reported by a synthesis collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    /// The backend could not be reached or the connection broke.
    Unreachable(String),

    /// The backend answered with a non-success status.
    Status { code: u16, message: String },

    /// The backend refused the request (invalid input, policy, quota).
    Rejected(String),

    /// The backend answered but the output could not be used.
    InvalidOutput(String),

    /// Local processing failed.
    ProcessingFailed(String),
}

impl SynthesisError {
    /// Whether the failure is likely to go away on retry.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            SynthesisError::Unreachable(_) => true,
            SynthesisError::Status { code, .. } => *code == 429 || *code >= 500,
            SynthesisError::Rejected(_)
            | SynthesisError::InvalidOutput(_)
            | SynthesisError::ProcessingFailed(_) => false,
        }
    }
}

impl fmt::Display for SynthesisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthesisError::Unreachable(msg) => write!(f, "Synthesis backend unreachable: {msg}"),
            SynthesisError::Status { code, message } => {
                write!(f, "Synthesis backend returned {code}: {message}")
            }
            SynthesisError::Rejected(msg) => write!(f, "Request rejected: {msg}"),
            SynthesisError::InvalidOutput(msg) => write!(f, "Invalid synthesis output: {msg}"),
            SynthesisError::ProcessingFailed(msg) => write!(f, "Synthesis failed: {msg}"),
        }
    }
}

impl std::error::Error for SynthesisError {}

// =============================================================================
// Synthesizer Trait
// =============================================================================

/// Future returned by [`Synthesizer::synthesize`].
pub type SynthesisFuture = BoxFuture<'static, Result<ImagePayload, SynthesisError>>;

/// Port for the external image-synthesis backend.
///
/// Implementations receive an immutable request snapshot and resolve to a
/// displayable image or a failure reason.
///
/// # Example
///
/// ```ignore
/// use style_clone::application::port::synthesis::{SynthesisFuture, Synthesizer};
/// use style_clone::domain::generation::GenerationRequest;
///
/// struct Echo;
///
/// impl Synthesizer for Echo {
///     fn synthesize(&self, request: GenerationRequest) -> SynthesisFuture {
///         Box::pin(async move { Ok(request.content_image().clone()) })
///     }
///
///     fn name(&self) -> &'static str {
///         "echo"
///     }
/// }
/// ```
pub trait Synthesizer: Send + Sync {
    /// Starts synthesis for the given request.
    ///
    /// The returned future owns everything it needs; dropping it abandons
    /// the request.
    fn synthesize(&self, request: GenerationRequest) -> SynthesisFuture;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}

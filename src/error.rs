// SPDX-License-Identifier: MPL-2.0
use crate::application::port::synthesis::SynthesisError;
use crate::domain::image::SlotRole;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Svg(String),
    Config(String),
    Preference(String),
    Session(SessionError),
}

/// Errors raised by session operations.
///
/// All of these are recovered locally: the session state is left exactly
/// as it was before the failing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The supplied bytes could not be decoded as an image.
    DecodeFailure(String),

    /// The requested aspect ratio is not one of the supported labels.
    InvalidRatio(String),

    /// A generation was requested while one or both slots are empty.
    PreconditionNotMet { missing: Vec<SlotRole> },

    /// A generation is already in flight.
    AlreadyRunning,

    /// The requested download format is not supported.
    UnsupportedFormat(String),
}

impl SessionError {
    /// Returns the notification key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            SessionError::DecodeFailure(_) => "error-slot-decode-failure",
            SessionError::InvalidRatio(_) => "error-invalid-ratio",
            SessionError::PreconditionNotMet { .. } => "error-generation-missing-input",
            SessionError::AlreadyRunning => "error-generation-already-running",
            SessionError::UnsupportedFormat(_) => "error-download-unsupported-format",
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::DecodeFailure(msg) => write!(f, "Could not decode image: {}", msg),
            SessionError::InvalidRatio(value) => write!(f, "Invalid aspect ratio: {}", value),
            SessionError::PreconditionNotMet { missing } => {
                let names: Vec<&str> = missing.iter().map(|role| role.label()).collect();
                write!(f, "Missing input image: {}", names.join(", "))
            }
            SessionError::AlreadyRunning => write!(f, "A generation is already running"),
            SessionError::UnsupportedFormat(format) => {
                write!(f, "Unsupported download format: {}", format)
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// Terminal failure detail retained by a failed generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The synthesis collaborator reported a failure.
    Collaborator(SynthesisError),

    /// The collaborator did not answer within the configured timeout.
    Timeout(Duration),

    /// The request was cancelled before it resolved.
    Cancelled,
}

impl GenerationError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            GenerationError::Collaborator(_) => "error-generation-failed",
            GenerationError::Timeout(_) => "error-generation-timeout",
            GenerationError::Cancelled => "error-generation-cancelled",
        }
    }

    /// Whether retrying the same inputs has a reasonable chance of success.
    pub fn is_retryable(&self) -> bool {
        match self {
            GenerationError::Collaborator(err) => err.is_transient(),
            GenerationError::Timeout(_) | GenerationError::Cancelled => true,
        }
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Collaborator(err) => write!(f, "{}", err),
            GenerationError::Timeout(after) => {
                write!(f, "Generation timed out after {}s", after.as_secs())
            }
            GenerationError::Cancelled => write!(f, "Generation cancelled"),
        }
    }
}

impl std::error::Error for GenerationError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Svg(e) => write!(f, "SVG Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Preference(e) => write!(f, "Preference Error: {}", e),
            Error::Session(e) => write!(f, "Session Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<SessionError> for Error {
    fn from(err: SessionError) -> Self {
        Error::Session(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

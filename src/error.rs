//! Error types for the `smart_video_info` crate.
//!
//! Errors come in two tiers. [`ExtractionError`] describes a per-file
//! failure and travels inside the normal result channel as a
//! `success: false` payload, so a batch keeps going past a bad file.
//! [`CallError`] describes a malformed method call and is surfaced by the
//! dispatcher as a transport-level error instead of a result.
//!
//! [`FrameworkError`] sits below both: it carries the media framework's own
//! description of a failure up to the extractor, which logs it and then
//! reports one of the fixed [`ExtractionError`] messages.

use std::path::PathBuf;

use ffmpeg_next::Error as FfmpegError;
use thiserror::Error;

/// A per-file extraction failure.
///
/// The `Display` text of each variant is exactly the `error` string placed
/// in the serialized failure payload.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractionError {
    /// The media framework could not be started.
    #[error("failed to initialize media subsystem")]
    SubsystemInit,

    /// The file could not be opened as a media source.
    ///
    /// Missing files, corrupt files and unsupported containers all end up
    /// here without further distinction.
    #[error("failed to open video file")]
    Open {
        /// Path that was passed to the extractor.
        path: PathBuf,
    },
}

/// A malformed or unsupported method call.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CallError {
    /// The argument bag did not have the expected shape.
    #[error("{message}")]
    InvalidArgument {
        /// Human-readable description of what was wrong.
        message: &'static str,
    },

    /// The requested method is not handled by this dispatcher.
    #[error("method {method:?} is not implemented")]
    NotImplemented {
        /// The method name that was requested.
        method: String,
    },

    /// A request line could not be decoded as a method call.
    #[error("malformed method call: {source}")]
    MalformedCall {
        /// Decoder error for the request.
        #[source]
        source: serde_json::Error,
    },

    /// A result record could not be serialized.
    #[error("failed to serialize result: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CallError {
    /// Stable code sent to callers alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            CallError::InvalidArgument { .. } | CallError::MalformedCall { .. } => {
                "INVALID_ARGUMENT"
            }
            CallError::NotImplemented { .. } => "NOT_IMPLEMENTED",
            CallError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    pub(crate) fn invalid_argument(message: &'static str) -> Self {
        CallError::InvalidArgument { message }
    }
}

/// A failure reported by a [`MediaFramework`](crate::MediaFramework)
/// implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct FrameworkError(pub String);

impl From<FfmpegError> for FrameworkError {
    fn from(error: FfmpegError) -> Self {
        FrameworkError(error.to_string())
    }
}

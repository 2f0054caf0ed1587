//! The per-file result envelope.
//!
//! Every extraction produces exactly one [`ExtractionReport`]: either a
//! success carrying [`VideoMetadata`] or a failure carrying the error
//! message. Serialized, it is
//! `{"success":true,"data":{...}}` or `{"success":false,"error":"..."}`.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::ExtractionError;
use crate::metadata::VideoMetadata;

/// Outcome of one extraction, ready to be sent to a caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionReport {
    /// Extraction succeeded.
    Success(VideoMetadata),
    /// Extraction failed; the message is what callers see.
    Failure(String),
}

impl ExtractionReport {
    /// A failure report with an arbitrary message.
    pub fn failure(message: impl Into<String>) -> Self {
        ExtractionReport::Failure(message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionReport::Success(_))
    }

    /// Serialize to the compact JSON payload string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<Result<VideoMetadata, ExtractionError>> for ExtractionReport {
    fn from(result: Result<VideoMetadata, ExtractionError>) -> Self {
        match result {
            Ok(metadata) => ExtractionReport::Success(metadata),
            Err(error) => ExtractionReport::Failure(error.to_string()),
        }
    }
}

impl Serialize for ExtractionReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ExtractionReport", 2)?;
        match self {
            ExtractionReport::Success(metadata) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", metadata)?;
            }
            ExtractionReport::Failure(message) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", message)?;
            }
        }
        state.end()
    }
}

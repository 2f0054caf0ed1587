//! Method-call dispatch.
//!
//! A caller sends a [`MethodCall`]: a method name plus a JSON argument bag.
//! [`Dispatcher::handle`] validates the arguments, runs the extractor once
//! per path, and returns the serialized report(s). Malformed calls fail
//! with a [`CallError`]; per-file failures do not, they come back as
//! `success: false` reports inside an `Ok` value.
//!
//! | Method | Arguments | Result |
//! |---|---|---|
//! | `getInfo` | `{"path": string}` | one report string |
//! | `getBatch` | `{"paths": [string, ...]}` | list of report strings |

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    configuration::{BatchEntryPolicy, DispatcherConfig, NON_STRING_PATH_MESSAGE},
    error::CallError,
    extractor::MetadataExtractor,
    ffmpeg::FfmpegFramework,
    framework::MediaFramework,
    report::ExtractionReport,
};

/// Method name for a single-file request.
pub const GET_INFO: &str = "getInfo";
/// Method name for a multi-file request.
pub const GET_BATCH: &str = "getBatch";

/// One request from a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }

    /// Decode a call from its JSON text.
    pub fn from_json(text: &str) -> Result<Self, CallError> {
        serde_json::from_str(text).map_err(|source| CallError::MalformedCall { source })
    }
}

/// Wire form of a handled call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "payload", rename_all = "camelCase")]
pub enum MethodResponse {
    Success(Value),
    Error { code: String, message: String },
    NotImplemented,
}

impl From<Result<Value, CallError>> for MethodResponse {
    fn from(result: Result<Value, CallError>) -> Self {
        match result {
            Ok(value) => MethodResponse::Success(value),
            Err(CallError::NotImplemented { .. }) => MethodResponse::NotImplemented,
            Err(error) => MethodResponse::Error {
                code: error.code().to_string(),
                message: error.to_string(),
            },
        }
    }
}

/// Routes method calls to a [`MetadataExtractor`].
#[derive(Debug, Clone, Default)]
pub struct Dispatcher<F = FfmpegFramework> {
    extractor: MetadataExtractor<F>,
    config: DispatcherConfig,
}

impl Dispatcher<FfmpegFramework> {
    /// A dispatcher backed by FFmpeg with default settings.
    pub fn ffmpeg() -> Self {
        Self::new(MetadataExtractor::ffmpeg(), DispatcherConfig::default())
    }
}

impl<F: MediaFramework> Dispatcher<F> {
    pub fn new(extractor: MetadataExtractor<F>, config: DispatcherConfig) -> Self {
        Self { extractor, config }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Handle one call.
    ///
    /// # Errors
    ///
    /// [`CallError::InvalidArgument`] if the argument bag has the wrong
    /// shape, [`CallError::NotImplemented`] for unknown methods.
    pub fn handle(&self, call: &MethodCall) -> Result<Value, CallError> {
        log::debug!("Handling method call: {}", call.method);
        match call.method.as_str() {
            GET_INFO => self.get_info(&call.arguments),
            GET_BATCH => self.get_batch(&call.arguments),
            other => Err(CallError::NotImplemented {
                method: other.to_string(),
            }),
        }
    }

    /// [`handle`](Dispatcher::handle), folded into a [`MethodResponse`].
    pub fn respond(&self, call: &MethodCall) -> MethodResponse {
        MethodResponse::from(self.handle(call))
    }

    fn get_info(&self, arguments: &Value) -> Result<Value, CallError> {
        let arguments = argument_map(arguments)?;
        let path = arguments
            .get("path")
            .ok_or(CallError::invalid_argument("Path is required"))?
            .as_str()
            .ok_or(CallError::invalid_argument("Path must be a string"))?;

        let report = self.extractor.report(path);
        Ok(Value::String(report.to_json()?))
    }

    fn get_batch(&self, arguments: &Value) -> Result<Value, CallError> {
        let arguments = argument_map(arguments)?;
        let paths = arguments
            .get("paths")
            .ok_or(CallError::invalid_argument("Paths list is required"))?
            .as_array()
            .filter(|paths| !paths.is_empty())
            .ok_or(CallError::invalid_argument("Paths must be a non-empty list"))?;

        let entries: Vec<Option<&str>> = paths.iter().map(Value::as_str).collect();
        let skipped = entries.iter().filter(|entry| entry.is_none()).count();
        if skipped > 0 {
            log::debug!(
                "{skipped} of {} batch entries are not strings ({:?})",
                entries.len(),
                self.config.batch_entry_policy,
            );
        }

        let reports = self.batch_reports(&entries);
        let results = reports
            .iter()
            .map(|report| report.to_json().map(Value::String))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::Array(results))
    }

    /// Extract every path in order, honouring the parallel setting.
    pub fn batch<S: AsRef<str>>(&self, paths: &[S]) -> Vec<ExtractionReport> {
        let entries: Vec<Option<&str>> = paths.iter().map(|path| Some(path.as_ref())).collect();
        self.batch_reports(&entries)
    }

    fn batch_reports(&self, entries: &[Option<&str>]) -> Vec<ExtractionReport> {
        #[cfg(feature = "rayon")]
        if self.config.parallel_batch {
            return crate::rayon::batch_reports_parallel(
                &self.extractor,
                entries,
                self.config.batch_entry_policy,
            );
        }

        entries
            .iter()
            .filter_map(|entry| batch_entry(&self.extractor, *entry, self.config.batch_entry_policy))
            .collect()
    }
}

/// Report for one batch element, or `None` when the policy drops it.
pub(crate) fn batch_entry<F: MediaFramework>(
    extractor: &MetadataExtractor<F>,
    entry: Option<&str>,
    policy: BatchEntryPolicy,
) -> Option<ExtractionReport> {
    match (entry, policy) {
        (Some(path), _) => Some(extractor.report(path)),
        (None, BatchEntryPolicy::Skip) => None,
        (None, BatchEntryPolicy::Placeholder) => {
            Some(ExtractionReport::failure(NON_STRING_PATH_MESSAGE))
        }
    }
}

fn argument_map(arguments: &Value) -> Result<&Map<String, Value>, CallError> {
    arguments
        .as_object()
        .ok_or(CallError::invalid_argument("Arguments must be a map"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn method_call_deserializes_without_arguments() {
        let call: MethodCall = serde_json::from_str(r#"{"method":"getInfo"}"#).unwrap();
        assert_eq!(call.method, GET_INFO);
        assert_eq!(call.arguments, Value::Null);
    }

    #[test]
    fn malformed_json_is_an_invalid_argument() {
        let error = MethodCall::from_json("{\"arguments\":{}}").unwrap_err();
        assert!(matches!(error, CallError::MalformedCall { .. }));
        assert_eq!(error.code(), "INVALID_ARGUMENT");
        assert!(error.to_string().starts_with("malformed method call: "));
    }

    #[test]
    fn response_wire_format() {
        let success = MethodResponse::Success(json!("{}"));
        assert_eq!(
            serde_json::to_value(&success).unwrap(),
            json!({"status": "success", "payload": "{}"})
        );

        let error = MethodResponse::from(Err(CallError::invalid_argument("Path is required")));
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({
                "status": "error",
                "payload": {"code": "INVALID_ARGUMENT", "message": "Path is required"}
            })
        );

        let not_implemented = MethodResponse::from(Err(CallError::NotImplemented {
            method: "getThumbnail".to_string(),
        }));
        assert_eq!(
            serde_json::to_value(&not_implemented).unwrap(),
            json!({"status": "notImplemented"})
        );
    }
}

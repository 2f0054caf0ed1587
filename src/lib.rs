//! # smart_video_info
//!
//! Read basic technical metadata from local video files: resolution,
//! duration, video codec, bit rate, frame rate, audio properties, container
//! tag and stream count. FFmpeg does the probing, through the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate.
//!
//! ## Quick Start
//!
//! ### Probe a File
//!
//! ```no_run
//! use smart_video_info::MediaProbe;
//!
//! let metadata = MediaProbe::probe("input.mp4").unwrap();
//! println!("{}x{} @ {:.2} fps", metadata.width, metadata.height, metadata.fps);
//! ```
//!
//! ### Produce the JSON Payload
//!
//! ```no_run
//! use smart_video_info::MediaProbe;
//!
//! // {"success":true,"data":{...}} or {"success":false,"error":"..."}
//! let json = MediaProbe::report("input.mp4").to_json().unwrap();
//! println!("{json}");
//! ```
//!
//! ### Dispatch Method Calls
//!
//! ```no_run
//! use serde_json::json;
//! use smart_video_info::{Dispatcher, MethodCall};
//!
//! let dispatcher = Dispatcher::ffmpeg();
//! let call = MethodCall::new("getBatch", json!({"paths": ["a.mp4", "b.mkv"]}));
//! let reports = dispatcher.handle(&call).unwrap();
//! ```
//!
//! ## Failure Model
//!
//! Per-file problems never abort a call. A file that cannot be opened
//! produces a `success: false` report; a missing audio stream simply leaves
//! the audio keys out. Only malformed method calls are reported as
//! [`CallError`]s.
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `rayon` | Parallel batch extraction with one framework session per worker |
//! | `full` | Enables all of the above |
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system.

pub mod configuration;
pub mod dispatcher;
pub mod error;
pub mod extractor;
pub mod ffmpeg;
pub mod format;
pub mod framework;
pub mod metadata;
pub mod probe;
#[cfg(feature = "rayon")]
mod rayon;
pub mod report;

pub use configuration::{BatchEntryPolicy, DispatcherConfig};
pub use dispatcher::{Dispatcher, GET_BATCH, GET_INFO, MethodCall, MethodResponse};
pub use error::{CallError, ExtractionError, FrameworkError};
pub use extractor::{MetadataExtractor, container_tag};
pub use ffmpeg::{
    FfmpegFramework, FfmpegLogLevel, FfmpegSession, FfmpegSource, active_sessions,
    get_ffmpeg_log_level, set_ffmpeg_log_level,
};
pub use format::{UNKNOWN_CODEC, audio_codec_name, video_codec_name};
pub use framework::{
    CodecId, FrameRate, MajorType, MediaFramework, MediaSession, MediaSource, MediaType,
    StreamSelector,
};
pub use metadata::{AudioMetadata, VideoMetadata};
pub use probe::MediaProbe;
pub use report::ExtractionReport;

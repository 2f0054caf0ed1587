//! The media framework seam.
//!
//! [`MetadataExtractor`](crate::MetadataExtractor) never talks to FFmpeg
//! directly. It asks a [`MediaFramework`] for a session, asks the session to
//! open a [`MediaSource`], and reads [`MediaType`] descriptors off that
//! source. [`FfmpegFramework`](crate::FfmpegFramework) is the production
//! implementation; tests script their own.
//!
//! Sessions and sources release whatever they hold when dropped, so an
//! extraction that bails out early still cleans up.

use std::{path::Path, time::Duration};

pub use ffmpeg_next::codec::Id as CodecId;

use crate::error::FrameworkError;

/// Entry point into a platform media framework.
///
/// A framework value may be shared between threads; every extraction still
/// acquires its own [`MediaSession`].
pub trait MediaFramework: Sync {
    /// Session type handed out by [`startup`](MediaFramework::startup).
    type Session: MediaSession;

    /// Start the framework and return a session guard.
    ///
    /// Dropping the guard shuts the session down.
    fn startup(&self) -> Result<Self::Session, FrameworkError>;
}

/// A started framework session.
pub trait MediaSession {
    /// Source type returned by [`open_source`](MediaSession::open_source).
    type Source: MediaSource;

    /// Open a local file as a readable media source.
    fn open_source(&self, path: &Path) -> Result<Self::Source, FrameworkError>;
}

/// An opened media source.
pub trait MediaSource {
    /// Current media type of the selected stream, or `None` when the stream
    /// does not exist or its type cannot be read.
    fn current_media_type(&self, stream: StreamSelector) -> Option<MediaType>;

    /// Whether the stream at `index` exists and has a readable media type.
    ///
    /// Implementations that can answer without building a full
    /// [`MediaType`] should override this.
    fn has_stream(&self, index: usize) -> bool {
        self.current_media_type(StreamSelector::Index(index))
            .is_some()
    }

    /// Presentation duration of the whole container, if known.
    fn duration(&self) -> Option<Duration>;
}

/// Which stream of a source to describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamSelector {
    /// The first video stream, whatever its index.
    FirstVideo,
    /// The first audio stream, whatever its index.
    FirstAudio,
    /// The stream at this zero-based index.
    Index(usize),
}

/// Broad category of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MajorType {
    Video,
    Audio,
    Subtitle,
    Data,
    Attachment,
}

/// Frame-rate ratio as reported by the framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRate {
    pub numerator: u32,
    pub denominator: u32,
}

impl FrameRate {
    pub fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Frames per second; `0.0` when the denominator is zero.
    pub fn frames_per_second(self) -> f64 {
        if self.denominator == 0 {
            0.0
        } else {
            f64::from(self.numerator) / f64::from(self.denominator)
        }
    }
}

/// Descriptor for the current media type of one stream.
///
/// Every attribute is optional: a framework that cannot read one leaves it
/// unset and the extractor falls back to a zero value.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaType {
    /// Stream category.
    pub major: MajorType,
    /// Format identifier, `None` when the framework reports none.
    pub subtype: Option<CodecId>,
    /// Frame `(width, height)` in pixels.
    pub frame_size: Option<(u32, u32)>,
    /// Frame-rate ratio.
    pub frame_rate: Option<FrameRate>,
    /// Average bit rate in bits per second.
    pub average_bitrate: Option<u64>,
    /// Audio sample rate in hertz.
    pub samples_per_second: Option<u32>,
    /// Audio channel count.
    pub channels: Option<u32>,
}

impl MediaType {
    /// An empty descriptor of the given category.
    pub fn new(major: MajorType) -> Self {
        Self {
            major,
            subtype: None,
            frame_size: None,
            frame_rate: None,
            average_bitrate: None,
            samples_per_second: None,
            channels: None,
        }
    }

    /// A video descriptor with the given format identifier.
    pub fn video(subtype: CodecId) -> Self {
        Self::new(MajorType::Video).with_subtype(subtype)
    }

    /// An audio descriptor with the given format identifier.
    pub fn audio(subtype: CodecId) -> Self {
        Self::new(MajorType::Audio).with_subtype(subtype)
    }

    #[must_use]
    pub fn with_subtype(mut self, subtype: CodecId) -> Self {
        self.subtype = Some(subtype);
        self
    }

    #[must_use]
    pub fn with_frame_size(mut self, width: u32, height: u32) -> Self {
        self.frame_size = Some((width, height));
        self
    }

    #[must_use]
    pub fn with_frame_rate(mut self, numerator: u32, denominator: u32) -> Self {
        self.frame_rate = Some(FrameRate::new(numerator, denominator));
        self
    }

    #[must_use]
    pub fn with_average_bitrate(mut self, bits_per_second: u64) -> Self {
        self.average_bitrate = Some(bits_per_second);
        self
    }

    #[must_use]
    pub fn with_samples_per_second(mut self, rate: u32) -> Self {
        self.samples_per_second = Some(rate);
        self
    }

    #[must_use]
    pub fn with_channels(mut self, channels: u32) -> Self {
        self.channels = Some(channels);
        self
    }
}

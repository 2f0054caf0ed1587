//! FFmpeg-backed media framework.
//!
//! [`FfmpegFramework`] implements [`MediaFramework`] on top of
//! libavformat/libavcodec through `ffmpeg-next`. Each session is a
//! [`FfmpegSession`] guard; each opened file is an [`FfmpegSource`] that
//! owns its demuxer context and closes it on drop.
//!
//! FFmpeg also prints its own diagnostics to stderr, independent of the
//! Rust-side `log` output. [`set_ffmpeg_log_level`] tunes that.
//!
//! # Example
//!
//! ```no_run
//! use smart_video_info::{FfmpegLogLevel, MetadataExtractor};
//!
//! smart_video_info::set_ffmpeg_log_level(FfmpegLogLevel::Error);
//! let metadata = MetadataExtractor::ffmpeg().extract("input.mp4")?;
//! # Ok::<(), smart_video_info::ExtractionError>(())
//! ```

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    path::Path,
    str::FromStr,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use ffmpeg_next::{
    Rational,
    codec::{Id, context::Context as CodecContext},
    format::{
        context::Input,
        stream::{Disposition, Stream},
    },
    media::Type,
    util::log::Level,
};

use crate::{
    error::FrameworkError,
    framework::{
        FrameRate, MajorType, MediaFramework, MediaSession, MediaSource, MediaType,
        StreamSelector,
    },
};

static ACTIVE_SESSIONS: AtomicUsize = AtomicUsize::new(0);

/// Number of [`FfmpegSession`] guards currently alive in this process.
pub fn active_sessions() -> usize {
    ACTIVE_SESSIONS.load(Ordering::SeqCst)
}

/// The FFmpeg media framework.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfmpegFramework;

impl MediaFramework for FfmpegFramework {
    type Session = FfmpegSession;

    fn startup(&self) -> Result<FfmpegSession, FrameworkError> {
        // Registers formats and codecs; repeated calls are no-ops.
        ffmpeg_next::init()?;
        let active = ACTIVE_SESSIONS.fetch_add(1, Ordering::SeqCst) + 1;
        log::trace!("FFmpeg session acquired (active={active})");
        Ok(FfmpegSession { _private: () })
    }
}

/// A live FFmpeg session. Dropping it releases the session.
#[derive(Debug)]
pub struct FfmpegSession {
    _private: (),
}

impl Drop for FfmpegSession {
    fn drop(&mut self) {
        let active = ACTIVE_SESSIONS.fetch_sub(1, Ordering::SeqCst) - 1;
        log::trace!("FFmpeg session released (active={active})");
    }
}

impl MediaSession for FfmpegSession {
    type Source = FfmpegSource;

    fn open_source(&self, path: &Path) -> Result<FfmpegSource, FrameworkError> {
        let input = ffmpeg_next::format::input(&path)?;
        log::trace!(
            "Opened {} as {} ({} streams)",
            path.display(),
            input.format().name(),
            input.nb_streams(),
        );
        Ok(FfmpegSource { input })
    }
}

/// An opened FFmpeg demuxer context.
pub struct FfmpegSource {
    input: Input,
}

impl MediaSource for FfmpegSource {
    fn current_media_type(&self, selector: StreamSelector) -> Option<MediaType> {
        let stream = match selector {
            StreamSelector::FirstVideo => self.first_stream_of(Type::Video)?,
            StreamSelector::FirstAudio => self.first_stream_of(Type::Audio)?,
            StreamSelector::Index(index) => self.input.stream(index)?,
        };
        describe_stream(&stream)
    }

    fn has_stream(&self, index: usize) -> bool {
        self.input
            .stream(index)
            .and_then(|stream| major_type(stream.parameters().medium()))
            .is_some()
    }

    fn duration(&self) -> Option<Duration> {
        // AV_TIME_BASE ticks; unknown durations are negative.
        let microseconds = self.input.duration();
        u64::try_from(microseconds)
            .ok()
            .filter(|&value| value > 0)
            .map(Duration::from_micros)
    }
}

impl FfmpegSource {
    fn first_stream_of(&self, medium: Type) -> Option<Stream<'_>> {
        self.input.streams().find(|stream| {
            let stream_medium = stream.parameters().medium();
            stream_medium == medium && !is_cover_art(stream_medium, stream.disposition())
        })
    }
}

/// Embedded artwork is demuxed as a single-picture video stream.
fn is_cover_art(medium: Type, disposition: Disposition) -> bool {
    medium == Type::Video && disposition.contains(Disposition::ATTACHED_PIC)
}

fn major_type(medium: Type) -> Option<MajorType> {
    match medium {
        Type::Video => Some(MajorType::Video),
        Type::Audio => Some(MajorType::Audio),
        Type::Subtitle => Some(MajorType::Subtitle),
        Type::Data => Some(MajorType::Data),
        Type::Attachment => Some(MajorType::Attachment),
        Type::Unknown => None,
    }
}

fn describe_stream(stream: &Stream<'_>) -> Option<MediaType> {
    let parameters = stream.parameters();
    let mut media_type = MediaType::new(major_type(parameters.medium())?);

    let id = parameters.id();
    if id != Id::None {
        media_type.subtype = Some(id);
    }

    match media_type.major {
        MajorType::Video => {
            match CodecContext::from_parameters(parameters)
                .and_then(|context| context.decoder().video())
            {
                Ok(decoder) => {
                    media_type.frame_size = Some((decoder.width(), decoder.height()));
                    media_type.average_bitrate = positive(decoder.bit_rate() as u64);
                }
                Err(error) => {
                    log::debug!("No video decoder for stream {}: {error}", stream.index());
                }
            }
            media_type.frame_rate = Some(frame_rate(stream));
        }
        MajorType::Audio => {
            match CodecContext::from_parameters(parameters)
                .and_then(|context| context.decoder().audio())
            {
                Ok(decoder) => {
                    media_type.samples_per_second = Some(decoder.rate());
                    media_type.channels = Some(u32::from(decoder.channels()));
                    media_type.average_bitrate = positive(decoder.bit_rate() as u64);
                }
                Err(error) => {
                    log::debug!("No audio decoder for stream {}: {error}", stream.index());
                }
            }
        }
        MajorType::Subtitle | MajorType::Data | MajorType::Attachment => {}
    }

    Some(media_type)
}

/// Average frame rate, or the real base rate when no average is recorded.
fn frame_rate(stream: &Stream<'_>) -> FrameRate {
    to_frame_rate(preferred_rate(stream.avg_frame_rate(), stream.rate()))
}

fn preferred_rate(average: Rational, real: Rational) -> Rational {
    if average.numerator() != 0 { average } else { real }
}

fn to_frame_rate(rate: Rational) -> FrameRate {
    FrameRate::new(
        u32::try_from(rate.numerator()).unwrap_or(0),
        u32::try_from(rate.denominator()).unwrap_or(0),
    )
}

fn positive(value: u64) -> Option<u64> {
    (value > 0).then_some(value)
}

/// FFmpeg internal log verbosity.
///
/// Mirrors FFmpeg's `AV_LOG_*` levels, from `Quiet` (nothing) to `Trace`
/// (everything).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FfmpegLogLevel {
    Quiet,
    Panic,
    Fatal,
    Error,
    Warning,
    Info,
    Verbose,
    Debug,
    Trace,
}

impl From<FfmpegLogLevel> for Level {
    fn from(level: FfmpegLogLevel) -> Self {
        match level {
            FfmpegLogLevel::Quiet => Level::Quiet,
            FfmpegLogLevel::Panic => Level::Panic,
            FfmpegLogLevel::Fatal => Level::Fatal,
            FfmpegLogLevel::Error => Level::Error,
            FfmpegLogLevel::Warning => Level::Warning,
            FfmpegLogLevel::Info => Level::Info,
            FfmpegLogLevel::Verbose => Level::Verbose,
            FfmpegLogLevel::Debug => Level::Debug,
            FfmpegLogLevel::Trace => Level::Trace,
        }
    }
}

impl From<Level> for FfmpegLogLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Quiet => FfmpegLogLevel::Quiet,
            Level::Panic => FfmpegLogLevel::Panic,
            Level::Fatal => FfmpegLogLevel::Fatal,
            Level::Error => FfmpegLogLevel::Error,
            Level::Warning => FfmpegLogLevel::Warning,
            Level::Info => FfmpegLogLevel::Info,
            Level::Verbose => FfmpegLogLevel::Verbose,
            Level::Debug => FfmpegLogLevel::Debug,
            Level::Trace => FfmpegLogLevel::Trace,
        }
    }
}

impl FromStr for FfmpegLogLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "quiet" => Ok(FfmpegLogLevel::Quiet),
            "panic" => Ok(FfmpegLogLevel::Panic),
            "fatal" => Ok(FfmpegLogLevel::Fatal),
            "error" => Ok(FfmpegLogLevel::Error),
            "warning" | "warn" => Ok(FfmpegLogLevel::Warning),
            "info" => Ok(FfmpegLogLevel::Info),
            "verbose" => Ok(FfmpegLogLevel::Verbose),
            "debug" => Ok(FfmpegLogLevel::Debug),
            "trace" => Ok(FfmpegLogLevel::Trace),
            other => Err(format!("unsupported FFmpeg log level: {other}")),
        }
    }
}

impl Display for FfmpegLogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            FfmpegLogLevel::Quiet => "quiet",
            FfmpegLogLevel::Panic => "panic",
            FfmpegLogLevel::Fatal => "fatal",
            FfmpegLogLevel::Error => "error",
            FfmpegLogLevel::Warning => "warning",
            FfmpegLogLevel::Info => "info",
            FfmpegLogLevel::Verbose => "verbose",
            FfmpegLogLevel::Debug => "debug",
            FfmpegLogLevel::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Set FFmpeg's own stderr verbosity. Does not affect `log` output.
pub fn set_ffmpeg_log_level(level: FfmpegLogLevel) {
    ffmpeg_next::util::log::set_level(level.into());
}

/// Current FFmpeg stderr verbosity, if it maps to a known level.
pub fn get_ffmpeg_log_level() -> Option<FfmpegLogLevel> {
    ffmpeg_next::util::log::get_level()
        .ok()
        .map(FfmpegLogLevel::from)
}

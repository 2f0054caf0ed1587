//! The metadata extraction routine.
//!
//! [`MetadataExtractor::extract`] starts a framework session, opens the
//! file, reads the first video and first audio descriptors plus a few
//! container attributes, and builds a [`VideoMetadata`]. Only the session
//! start and the open can fail the call; every later read that comes back
//! empty leaves its field at a zero value.

use std::path::Path;

use crate::{
    error::ExtractionError,
    ffmpeg::FfmpegFramework,
    format::{audio_codec_name, video_codec_name},
    framework::{MediaFramework, MediaSession, MediaSource, MediaType, StreamSelector},
    metadata::{AudioMetadata, VideoMetadata},
    report::ExtractionReport,
};

/// Extracts [`VideoMetadata`] from local files through a [`MediaFramework`].
///
/// The extractor holds no per-file state; each call to
/// [`extract`](MetadataExtractor::extract) acquires and releases its own
/// session.
///
/// # Example
///
/// ```no_run
/// use smart_video_info::MetadataExtractor;
///
/// let extractor = MetadataExtractor::ffmpeg();
/// match extractor.extract("clip.mkv") {
///     Ok(metadata) => println!("{} ms, {} streams", metadata.duration_ms, metadata.stream_count),
///     Err(error) => eprintln!("{error}"),
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetadataExtractor<F = FfmpegFramework> {
    framework: F,
}

impl MetadataExtractor<FfmpegFramework> {
    /// An extractor backed by FFmpeg.
    pub fn ffmpeg() -> Self {
        Self::new(FfmpegFramework)
    }
}

impl<F: MediaFramework> MetadataExtractor<F> {
    pub fn new(framework: F) -> Self {
        Self { framework }
    }

    /// The framework this extractor queries.
    pub fn framework(&self) -> &F {
        &self.framework
    }

    /// Extract metadata for one file.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::SubsystemInit`] if the framework cannot be
    /// started and [`ExtractionError::Open`] if the file cannot be opened as
    /// a media source. No other condition fails the call.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<VideoMetadata, ExtractionError> {
        let path = path.as_ref();
        log::debug!("Extracting metadata: {}", path.display());

        let session = self.framework.startup().map_err(|error| {
            log::debug!("Media framework startup failed: {error}");
            ExtractionError::SubsystemInit
        })?;

        // Declared after the session, so it is dropped first.
        let source = session.open_source(path).map_err(|error| {
            log::debug!("Failed to open {}: {error}", path.display());
            ExtractionError::Open {
                path: path.to_path_buf(),
            }
        })?;

        let video = source.current_media_type(StreamSelector::FirstVideo);
        let (width, height) = video
            .as_ref()
            .and_then(|media_type| media_type.frame_size)
            .unwrap_or((0, 0));
        let fps = video
            .as_ref()
            .and_then(|media_type| media_type.frame_rate)
            .map(|rate| rate.frames_per_second())
            .unwrap_or(0.0);
        let bitrate = video
            .as_ref()
            .and_then(|media_type| media_type.average_bitrate)
            .unwrap_or(0);
        let codec = video
            .as_ref()
            .and_then(|media_type| media_type.subtype)
            .map(video_codec_name)
            .unwrap_or_default()
            .to_string();

        let duration_ms = source
            .duration()
            .map(|duration| u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);

        let audio = source
            .current_media_type(StreamSelector::FirstAudio)
            .map(|media_type| describe_audio(&media_type));

        let metadata = VideoMetadata {
            width,
            height,
            duration_ms,
            codec,
            bitrate,
            fps,
            rotation: 0,
            container: container_tag(path),
            audio,
            has_subtitles: false,
            stream_count: count_streams(&source),
        };

        log::info!(
            "Extracted {}: {}x{} @ {:.2} fps [{}], {} ms, audio={}, streams={}",
            path.display(),
            metadata.width,
            metadata.height,
            metadata.fps,
            metadata.codec,
            metadata.duration_ms,
            metadata.has_audio(),
            metadata.stream_count,
        );

        Ok(metadata)
    }

    /// Extract metadata for one file and wrap the outcome in a report.
    pub fn report<P: AsRef<Path>>(&self, path: P) -> ExtractionReport {
        ExtractionReport::from(self.extract(path))
    }
}

fn describe_audio(media_type: &MediaType) -> AudioMetadata {
    AudioMetadata {
        codec: media_type
            .subtype
            .map(audio_codec_name)
            .unwrap_or_default()
            .to_string(),
        sample_rate: media_type.samples_per_second.unwrap_or(0),
        channels: media_type.channels.unwrap_or(0),
    }
}

/// Count stream indices with a readable media type, stopping at the first
/// index without one.
fn count_streams<S: MediaSource>(source: &S) -> u32 {
    let count = (0..)
        .take_while(|&index| source.has_stream(index))
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// The text after the last `.` in the file name, case preserved.
///
/// Returns an empty string when the file name has no `.`.
pub fn container_tag(path: &Path) -> String {
    path.file_name()
        .and_then(|name| {
            name.to_string_lossy()
                .rsplit_once('.')
                .map(|(_, extension)| extension.to_string())
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_tag_keeps_case() {
        assert_eq!(container_tag(Path::new("a/b/movie.MKV")), "MKV");
        assert_eq!(container_tag(Path::new("clip.mp4")), "mp4");
    }

    #[test]
    fn container_tag_without_extension() {
        assert_eq!(container_tag(Path::new("no_extension_file")), "");
        assert_eq!(container_tag(Path::new("")), "");
    }

    #[test]
    fn container_tag_uses_last_dot_of_file_name() {
        assert_eq!(container_tag(Path::new("archive.tar.webm")), "webm");
        assert_eq!(container_tag(Path::new("dir.d/readme")), "");
        assert_eq!(container_tag(Path::new("trailing.")), "");
        assert_eq!(container_tag(Path::new(".hidden")), "hidden");
    }

    struct CountingSource {
        streams: usize,
        descriptions: std::cell::Cell<usize>,
    }

    impl MediaSource for CountingSource {
        fn current_media_type(&self, _stream: StreamSelector) -> Option<MediaType> {
            self.descriptions.set(self.descriptions.get() + 1);
            None
        }

        fn duration(&self) -> Option<std::time::Duration> {
            None
        }

        fn has_stream(&self, index: usize) -> bool {
            index < self.streams
        }
    }

    #[test]
    fn stream_count_does_not_describe_streams() {
        let source = CountingSource {
            streams: 3,
            descriptions: std::cell::Cell::new(0),
        };
        assert_eq!(count_streams(&source), 3);
        assert_eq!(source.descriptions.get(), 0);
    }
}

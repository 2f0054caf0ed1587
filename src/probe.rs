//! One-call probing over FFmpeg.
//!
//! [`MediaProbe`] is a shortcut for the common case: FFmpeg as the media
//! framework, no dispatcher. Each call opens the file, reads its metadata
//! and closes it again.

use std::path::Path;

use crate::error::ExtractionError;
use crate::extractor::MetadataExtractor;
use crate::metadata::VideoMetadata;
use crate::report::ExtractionReport;

/// FFmpeg-backed metadata probe.
///
/// # Example
///
/// ```no_run
/// use smart_video_info::MediaProbe;
///
/// let metadata = MediaProbe::probe("input.mp4")?;
/// println!("{} ms, {} streams", metadata.duration_ms, metadata.stream_count);
/// # Ok::<(), smart_video_info::ExtractionError>(())
/// ```
pub struct MediaProbe;

impl MediaProbe {
    /// Probe one file.
    ///
    /// # Errors
    ///
    /// See [`MetadataExtractor::extract`].
    pub fn probe<P: AsRef<Path>>(path: P) -> Result<VideoMetadata, ExtractionError> {
        MetadataExtractor::ffmpeg().extract(path)
    }

    /// Probe several files in order.
    ///
    /// A file that cannot be probed produces an `Err` entry; the rest of the
    /// batch still runs.
    ///
    /// ```no_run
    /// use smart_video_info::MediaProbe;
    ///
    /// for result in MediaProbe::probe_many(&["a.mp4", "b.mkv"]) {
    ///     match result {
    ///         Ok(meta) => println!("{}x{}", meta.width, meta.height),
    ///         Err(err) => eprintln!("{err}"),
    ///     }
    /// }
    /// ```
    pub fn probe_many<P: AsRef<Path>>(paths: &[P]) -> Vec<Result<VideoMetadata, ExtractionError>> {
        let extractor = MetadataExtractor::ffmpeg();
        paths.iter().map(|path| extractor.extract(path)).collect()
    }

    /// Probe one file and wrap the outcome in an [`ExtractionReport`].
    pub fn report<P: AsRef<Path>>(path: P) -> ExtractionReport {
        MetadataExtractor::ffmpeg().report(path)
    }
}

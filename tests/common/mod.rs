//! Scripted media framework shared by the integration tests.
//!
//! Files are registered by path with a list of stream descriptors and an
//! optional duration. Live sessions and sources are counted so tests can
//! check that every exit path releases what it acquired.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use smart_video_info::{
    CodecId, FrameworkError, MajorType, MediaFramework, MediaSession, MediaSource, MediaType,
    StreamSelector,
};

#[derive(Debug, Default)]
pub struct Counters {
    pub live_sessions: AtomicUsize,
    pub live_sources: AtomicUsize,
    pub startups: AtomicUsize,
    pub opens: AtomicUsize,
}

impl Counters {
    pub fn live_sessions(&self) -> usize {
        self.live_sessions.load(Ordering::SeqCst)
    }

    pub fn live_sources(&self) -> usize {
        self.live_sources.load(Ordering::SeqCst)
    }

    pub fn startups(&self) -> usize {
        self.startups.load(Ordering::SeqCst)
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedFile {
    pub streams: Vec<MediaType>,
    pub duration: Option<Duration>,
}

impl ScriptedFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stream(mut self, media_type: MediaType) -> Self {
        self.streams.push(media_type);
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedFramework {
    files: HashMap<PathBuf, ScriptedFile>,
    fail_startup: bool,
    counters: Arc<Counters>,
}

impl ScriptedFramework {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_startup() -> Self {
        Self {
            fail_startup: true,
            ..Self::default()
        }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, file: ScriptedFile) -> Self {
        self.files.insert(path.into(), file);
        self
    }

    pub fn counters(&self) -> Arc<Counters> {
        Arc::clone(&self.counters)
    }
}

impl MediaFramework for ScriptedFramework {
    type Session = ScriptedSession;

    fn startup(&self) -> Result<ScriptedSession, FrameworkError> {
        if self.fail_startup {
            return Err(FrameworkError("scripted startup failure".to_string()));
        }
        self.counters.startups.fetch_add(1, Ordering::SeqCst);
        self.counters.live_sessions.fetch_add(1, Ordering::SeqCst);
        Ok(ScriptedSession {
            files: self.files.clone(),
            counters: Arc::clone(&self.counters),
            open_sources: Arc::new(AtomicUsize::new(0)),
        })
    }
}

pub struct ScriptedSession {
    files: HashMap<PathBuf, ScriptedFile>,
    counters: Arc<Counters>,
    open_sources: Arc<AtomicUsize>,
}

impl Drop for ScriptedSession {
    fn drop(&mut self) {
        assert_eq!(
            self.open_sources.load(Ordering::SeqCst),
            0,
            "source outlived its session"
        );
        self.counters.live_sessions.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MediaSession for ScriptedSession {
    type Source = ScriptedSource;

    fn open_source(&self, path: &Path) -> Result<ScriptedSource, FrameworkError> {
        let file = self
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| FrameworkError(format!("no such file: {}", path.display())))?;
        self.counters.opens.fetch_add(1, Ordering::SeqCst);
        self.counters.live_sources.fetch_add(1, Ordering::SeqCst);
        self.open_sources.fetch_add(1, Ordering::SeqCst);
        Ok(ScriptedSource {
            file,
            counters: Arc::clone(&self.counters),
            session_sources: Arc::clone(&self.open_sources),
        })
    }
}

pub struct ScriptedSource {
    file: ScriptedFile,
    counters: Arc<Counters>,
    session_sources: Arc<AtomicUsize>,
}

impl Drop for ScriptedSource {
    fn drop(&mut self) {
        self.session_sources.fetch_sub(1, Ordering::SeqCst);
        self.counters.live_sources.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MediaSource for ScriptedSource {
    fn current_media_type(&self, stream: StreamSelector) -> Option<MediaType> {
        let first_of = |major: MajorType| {
            self.file
                .streams
                .iter()
                .find(|media_type| media_type.major == major)
                .cloned()
        };
        match stream {
            StreamSelector::FirstVideo => first_of(MajorType::Video),
            StreamSelector::FirstAudio => first_of(MajorType::Audio),
            StreamSelector::Index(index) => self.file.streams.get(index).cloned(),
        }
    }

    fn duration(&self) -> Option<Duration> {
        self.file.duration
    }
}

/// 1080p H.264 at 30000/1001 fps, 8 Mb/s.
pub fn h264_video() -> MediaType {
    MediaType::video(CodecId::H264)
        .with_frame_size(1920, 1080)
        .with_frame_rate(30_000, 1_001)
        .with_average_bitrate(8_000_000)
}

/// Stereo 48 kHz AAC.
pub fn aac_audio() -> MediaType {
    MediaType::audio(CodecId::AAC)
        .with_samples_per_second(48_000)
        .with_channels(2)
}

/// A framework with a handful of typical files.
pub fn library() -> ScriptedFramework {
    ScriptedFramework::new()
        .with_file(
            "valid.mp4",
            ScriptedFile::new()
                .stream(h264_video())
                .stream(aac_audio())
                .duration(Duration::from_millis(12_345)),
        )
        .with_file(
            "silent.mkv",
            ScriptedFile::new()
                .stream(
                    MediaType::video(CodecId::VP9)
                        .with_frame_size(640, 360)
                        .with_frame_rate(25, 1),
                )
                .duration(Duration::from_secs(3)),
        )
}

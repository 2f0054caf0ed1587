//! Video metadata records.
//!
//! [`VideoMetadata`] is what a successful extraction returns. It serializes
//! to the flat `data` object of the result payload, with camel-cased keys
//! and the audio keys present only when the file has an audio stream.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Technical metadata for one video file.
///
/// Zero values stand in for anything the media framework could not report:
/// a file without a video stream has `width == 0`, `height == 0`, `fps == 0.0`
/// and an empty `codec`.
///
/// # Example
///
/// ```no_run
/// use smart_video_info::MediaProbe;
///
/// let metadata = MediaProbe::probe("input.mp4")?;
/// println!("{}x{} @ {:.2} fps [{}]", metadata.width, metadata.height, metadata.fps, metadata.codec);
/// if let Some(audio) = &metadata.audio {
///     println!("audio: {} Hz, {} ch [{}]", audio.sample_rate, audio.channels, audio.codec);
/// }
/// # Ok::<(), smart_video_info::ExtractionError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[must_use]
pub struct VideoMetadata {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Container duration in whole milliseconds.
    pub duration_ms: u64,
    /// Video codec name (e.g. `"h264"`), `"unknown"`, or empty without video.
    pub codec: String,
    /// Average video bit rate in bits per second.
    pub bitrate: u64,
    /// Frames per second.
    pub fps: f64,
    /// Display rotation in degrees. Not detected; always `0`.
    pub rotation: i32,
    /// File extension without the leading dot, case preserved.
    pub container: String,
    /// First audio stream, if the file has one.
    pub audio: Option<AudioMetadata>,
    /// Whether the file carries subtitles. Not detected; always `false`.
    pub has_subtitles: bool,
    /// Number of contiguous streams, starting at index 0, with a readable
    /// media type.
    pub stream_count: u32,
}

impl VideoMetadata {
    /// Returns `true` if an audio stream descriptor was obtained.
    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }
}

/// Properties of the first audio stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct AudioMetadata {
    /// Codec name (e.g. `"aac"`), `"unknown"`, or empty if unreported.
    pub codec: String,
    /// Sample rate in hertz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u32,
}

impl Serialize for VideoMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("width", &self.width)?;
        map.serialize_entry("height", &self.height)?;
        map.serialize_entry("duration", &self.duration_ms)?;
        map.serialize_entry("codec", &self.codec)?;
        map.serialize_entry("bitrate", &self.bitrate)?;
        map.serialize_entry("fps", &self.fps)?;
        map.serialize_entry("rotation", &self.rotation)?;
        map.serialize_entry("container", &self.container)?;
        if let Some(audio) = &self.audio {
            map.serialize_entry("audioCodec", &audio.codec)?;
            map.serialize_entry("sampleRate", &audio.sample_rate)?;
            map.serialize_entry("channels", &audio.channels)?;
        }
        map.serialize_entry("hasAudio", &self.has_audio())?;
        map.serialize_entry("hasSubtitles", &self.has_subtitles)?;
        map.serialize_entry("streamCount", &self.stream_count)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn sample() -> VideoMetadata {
        VideoMetadata {
            width: 1280,
            height: 720,
            duration_ms: 5_000,
            codec: "h264".to_string(),
            bitrate: 2_500_000,
            fps: 30.0,
            rotation: 0,
            container: "mp4".to_string(),
            audio: Some(AudioMetadata {
                codec: "aac".to_string(),
                sample_rate: 48_000,
                channels: 2,
            }),
            has_subtitles: false,
            stream_count: 2,
        }
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "width": 1280,
                "height": 720,
                "duration": 5000,
                "codec": "h264",
                "bitrate": 2500000,
                "fps": 30.0,
                "rotation": 0,
                "container": "mp4",
                "audioCodec": "aac",
                "sampleRate": 48000,
                "channels": 2,
                "hasAudio": true,
                "hasSubtitles": false,
                "streamCount": 2,
            })
        );
    }

    #[test]
    fn key_order_matches_payload_layout() {
        let text = serde_json::to_string(&sample()).unwrap();
        let width = text.find("\"width\"").unwrap();
        let container = text.find("\"container\"").unwrap();
        let audio_codec = text.find("\"audioCodec\"").unwrap();
        let has_audio = text.find("\"hasAudio\"").unwrap();
        let stream_count = text.find("\"streamCount\"").unwrap();
        assert!(width < container);
        assert!(container < audio_codec);
        assert!(audio_codec < has_audio);
        assert!(has_audio < stream_count);
    }

    #[test]
    fn audio_keys_absent_without_audio() {
        let metadata = VideoMetadata {
            audio: None,
            ..sample()
        };
        assert!(!metadata.has_audio());

        let value = serde_json::to_value(&metadata).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.get("hasAudio"), Some(&Value::Bool(false)));
        assert!(!object.contains_key("audioCodec"));
        assert!(!object.contains_key("sampleRate"));
        assert!(!object.contains_key("channels"));
    }

    #[test]
    fn default_is_all_zero() {
        let metadata = VideoMetadata::default();
        assert_eq!(metadata.width, 0);
        assert_eq!(metadata.fps, 0.0);
        assert!(metadata.codec.is_empty());
        assert!(!metadata.has_audio());
        assert!(!metadata.has_subtitles);
    }
}

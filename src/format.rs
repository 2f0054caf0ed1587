//! Format identifier lookup tables.
//!
//! Only a fixed set of codecs gets a name. Everything else reports
//! [`UNKNOWN_CODEC`], which callers treat as "present but unrecognised"
//! rather than as an error.

use crate::framework::CodecId;

/// Name reported for a format identifier outside the lookup tables.
pub const UNKNOWN_CODEC: &str = "unknown";

/// Name for a video format identifier.
pub fn video_codec_name(id: CodecId) -> &'static str {
    match id {
        CodecId::H264 => "h264",
        CodecId::HEVC => "hevc",
        CodecId::VP8 => "vp8",
        CodecId::VP9 => "vp9",
        CodecId::WMV3 => "wmv3",
        CodecId::MPEG2VIDEO => "mpeg2",
        _ => UNKNOWN_CODEC,
    }
}

/// Name for an audio format identifier.
///
/// Integer PCM in any width or byte order is reported as `"pcm"`; float
/// PCM is not.
pub fn audio_codec_name(id: CodecId) -> &'static str {
    match id {
        CodecId::AAC => "aac",
        CodecId::MP3 => "mp3",
        CodecId::WMAV2 => "wma",
        CodecId::PCM_U8
        | CodecId::PCM_S16LE
        | CodecId::PCM_S16BE
        | CodecId::PCM_S24LE
        | CodecId::PCM_S24BE
        | CodecId::PCM_S32LE
        | CodecId::PCM_S32BE => "pcm",
        _ => UNKNOWN_CODEC,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_video_codecs() {
        assert_eq!(video_codec_name(CodecId::H264), "h264");
        assert_eq!(video_codec_name(CodecId::HEVC), "hevc");
        assert_eq!(video_codec_name(CodecId::VP8), "vp8");
        assert_eq!(video_codec_name(CodecId::VP9), "vp9");
        assert_eq!(video_codec_name(CodecId::WMV3), "wmv3");
        assert_eq!(video_codec_name(CodecId::MPEG2VIDEO), "mpeg2");
    }

    #[test]
    fn unlisted_video_codecs_are_unknown() {
        assert_eq!(video_codec_name(CodecId::AV1), UNKNOWN_CODEC);
        assert_eq!(video_codec_name(CodecId::MPEG4), UNKNOWN_CODEC);
        // Audio identifiers never match the video table.
        assert_eq!(video_codec_name(CodecId::AAC), UNKNOWN_CODEC);
    }

    #[test]
    fn known_audio_codecs() {
        assert_eq!(audio_codec_name(CodecId::AAC), "aac");
        assert_eq!(audio_codec_name(CodecId::MP3), "mp3");
        assert_eq!(audio_codec_name(CodecId::WMAV2), "wma");
        assert_eq!(audio_codec_name(CodecId::PCM_S16LE), "pcm");
        assert_eq!(audio_codec_name(CodecId::PCM_S24BE), "pcm");
    }

    #[test]
    fn unlisted_audio_codecs_are_unknown() {
        assert_eq!(audio_codec_name(CodecId::OPUS), UNKNOWN_CODEC);
        assert_eq!(audio_codec_name(CodecId::FLAC), UNKNOWN_CODEC);
        assert_eq!(audio_codec_name(CodecId::PCM_F32LE), UNKNOWN_CODEC);
    }
}

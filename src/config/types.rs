use medialoop_av::{CodecPair, DecodeOptions, Mp3Options, ToolsConfig, DEFAULT_MP3_BITRATE};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub audio: AudioConfig,

    #[serde(default)]
    pub video: VideoConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AudioConfig {
    /// Bitrate passed to the MP3 encoder (e.g. "192k")
    #[serde(default = "default_mp3_bitrate")]
    pub mp3_bitrate: String,

    /// Resample every decoded track to this rate
    #[serde(default)]
    pub sample_rate: Option<u32>,

    /// Up/down-mix every decoded track to this many channels
    #[serde(default)]
    pub channels: Option<u16>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            mp3_bitrate: default_mp3_bitrate(),
            sample_rate: None,
            channels: None,
        }
    }
}

impl AudioConfig {
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            sample_rate: self.sample_rate,
            channels: self.channels,
        }
    }

    pub fn mp3_options(&self) -> Mp3Options {
        Mp3Options {
            bitrate: self.mp3_bitrate.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VideoConfig {
    #[serde(default = "default_video_codec")]
    pub video_codec: String,

    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            video_codec: default_video_codec(),
            audio_codec: default_audio_codec(),
        }
    }
}

impl VideoConfig {
    pub fn codec_pair(&self) -> CodecPair {
        CodecPair {
            video_codec: self.video_codec.clone(),
            audio_codec: self.audio_codec.clone(),
        }
    }
}

fn default_mp3_bitrate() -> String {
    DEFAULT_MP3_BITRATE.to_string()
}
fn default_video_codec() -> String {
    CodecPair::default().video_codec
}
fn default_audio_codec() -> String {
    CodecPair::default().audio_codec
}

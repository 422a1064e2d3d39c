//! # medialoop-av
//!
//! Audio tracks, video clips and external tool management for medialoop.
//!
//! This crate provides:
//!
//! - **Tool discovery** ([`ToolRegistry`]) -- find `ffmpeg` and `ffprobe`,
//!   honouring configured path overrides.
//! - **Command execution** ([`ToolCommand`]) -- a blocking builder that can
//!   stream bytes into a tool's stdin.
//! - **Probing** ([`probe_media`]) -- container, duration and stream layout
//!   from `ffprobe` JSON.
//! - **Audio** ([`AudioTrack`], [`decode_audio`], [`encode_mp3`]) -- whole
//!   tracks decoded to PCM in memory, sliced, repeated, concatenated and
//!   re-encoded as MP3.
//! - **Video** ([`VideoClip`]) -- trim/loop/replace-audio edits rendered by a
//!   single re-encode.
//!
//! ## Example
//!
//! ```no_run
//! use medialoop_av::{decode_audio, encode_mp3, DecodeOptions, Mp3Options, ToolRegistry, ToolsConfig};
//! use std::path::Path;
//!
//! let tools = ToolRegistry::discover(&ToolsConfig::default());
//! let track = decode_audio(&tools, Path::new("song.mp3"), &DecodeOptions::default())?;
//! encode_mp3(&tools, &track.repeat(3), Path::new("song_x3.mp3"), &Mp3Options::default())?;
//! # Ok::<(), medialoop_av::Error>(())
//! ```

pub mod clip;
pub mod codec;
pub mod command;
mod error;
pub mod probe;
pub mod tools;
pub mod track;

pub use clip::{AudioSource, CodecPair, VideoClip};
pub use codec::{decode_audio, encode_mp3, DecodeOptions, Mp3Options, DEFAULT_MP3_BITRATE};
pub use command::{ToolCommand, ToolOutput};
pub use error::{Error, Result};
pub use probe::{probe_media, MediaInfo};
pub use tools::{ToolConfig, ToolInfo, ToolRegistry, ToolsConfig};
pub use track::AudioTrack;

//! Decoding files into [`AudioTrack`]s and encoding them back to MP3.
//!
//! Both directions pipe raw `s16le` PCM through `ffmpeg`.

use std::ffi::OsString;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::command::ToolCommand;
use crate::probe::probe_media;
use crate::tools::ToolRegistry;
use crate::track::AudioTrack;
use crate::{Error, Result};

/// Default MP3 bitrate for exports.
pub const DEFAULT_MP3_BITRATE: &str = "192k";

/// Optional PCM layout to force while decoding. Unset fields keep the
/// source stream's value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOptions {
    pub sample_rate: Option<u32>,
    pub channels: Option<u16>,
}

/// MP3 export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mp3Options {
    pub bitrate: String,
}

impl Default for Mp3Options {
    fn default() -> Self {
        Self {
            bitrate: DEFAULT_MP3_BITRATE.to_string(),
        }
    }
}

/// Decode the first audio stream of `path` into memory.
pub fn decode_audio(
    tools: &ToolRegistry,
    path: &Path,
    options: &DecodeOptions,
) -> Result<AudioTrack> {
    let info = probe_media(tools, path)?;
    let stream = info
        .audio
        .ok_or_else(|| Error::probe(path, "no audio stream"))?;

    let sample_rate = options.sample_rate.unwrap_or(stream.sample_rate);
    let channels = options.channels.unwrap_or(stream.channels);

    tracing::debug!(
        "decoding {} ({}, {sample_rate} Hz, {channels}ch)",
        path.display(),
        stream.codec
    );

    let mut cmd = ToolCommand::new(tools.ffmpeg()?.to_path_buf());
    cmd.args(decode_args(path, sample_rate, channels));
    let output = cmd.execute()?;

    let track = AudioTrack::from_le_bytes(&output.stdout, sample_rate, channels)?;
    tracing::debug!("decoded {} ms from {}", track.duration_ms(), path.display());
    Ok(track)
}

/// Encode `track` as MP3 at `dest`, overwriting any existing file.
pub fn encode_mp3(
    tools: &ToolRegistry,
    track: &AudioTrack,
    dest: &Path,
    options: &Mp3Options,
) -> Result<()> {
    if track.is_empty() {
        return Err(Error::EmptyTrack {
            path: dest.to_path_buf(),
        });
    }

    tracing::debug!(
        "encoding {} ms to {} at {}",
        track.duration_ms(),
        dest.display(),
        options.bitrate
    );

    let mut cmd = ToolCommand::new(tools.ffmpeg()?.to_path_buf());
    cmd.args(encode_mp3_args(track, dest, options));
    cmd.stdin(track.to_le_bytes());
    cmd.execute()?;
    Ok(())
}

fn decode_args(path: &Path, sample_rate: u32, channels: u16) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-nostdin", "-hide_banner", "-loglevel", "error", "-i"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(path.as_os_str().to_os_string());
    args.extend(
        [
            "-map".to_string(),
            "0:a:0".to_string(),
            "-vn".to_string(),
            "-f".to_string(),
            "s16le".to_string(),
            "-acodec".to_string(),
            "pcm_s16le".to_string(),
            "-ar".to_string(),
            sample_rate.to_string(),
            "-ac".to_string(),
            channels.to_string(),
            "pipe:1".to_string(),
        ]
        .into_iter()
        .map(OsString::from),
    );
    args
}

fn encode_mp3_args(track: &AudioTrack, dest: &Path, options: &Mp3Options) -> Vec<OsString> {
    let mut args: Vec<OsString> = [
        "-hide_banner".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-y".to_string(),
        "-f".to_string(),
        "s16le".to_string(),
        "-ar".to_string(),
        track.sample_rate().to_string(),
        "-ac".to_string(),
        track.channels().to_string(),
        "-i".to_string(),
        "pipe:0".to_string(),
        "-c:a".to_string(),
        "libmp3lame".to_string(),
        "-b:a".to_string(),
        options.bitrate.clone(),
        "-f".to_string(),
        "mp3".to_string(),
    ]
    .into_iter()
    .map(OsString::from)
    .collect();
    args.push(dest.as_os_str().to_os_string());
    args
}

//! Duration and stream probing via the `ffprobe` CLI.
//!
//! Shells out to `ffprobe -v quiet -print_format json -show_format -show_streams`
//! and maps the JSON output into [`MediaInfo`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::command::ToolCommand;
use crate::tools::ToolRegistry;
use crate::{Error, Result};

/// Summary of a media file: container, duration and its first streams.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaInfo {
    pub file_path: PathBuf,
    pub container: String,
    pub duration: Duration,
    pub audio: Option<AudioStream>,
    pub video: Option<VideoStream>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioStream {
    pub codec: String,
    pub sample_rate: u32,
    pub channels: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoStream {
    pub codec: String,
    pub width: u32,
    pub height: u32,
}

impl MediaInfo {
    /// Duration in (fractional) seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration.as_secs_f64()
    }
}

/// Probe a media file.
pub fn probe_media(tools: &ToolRegistry, path: &Path) -> Result<MediaInfo> {
    if !path.exists() {
        return Err(Error::probe(path, "file does not exist"));
    }

    let mut cmd = ToolCommand::new(tools.ffprobe()?.to_path_buf());
    cmd.args([
        "-v",
        "quiet",
        "-print_format",
        "json",
        "-show_format",
        "-show_streams",
    ]);
    cmd.arg(path);

    let output = cmd.execute()?;
    parse_ffprobe_json(path, &output.stdout)
}

// ---------------------------------------------------------------------------
// JSON structures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: Option<FfprobeFormat>,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    format_name: Option<String>,
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    channels: Option<u16>,
    sample_rate: Option<String>,
    duration: Option<String>,
}

/// Parse raw `ffprobe` JSON output for `path`.
pub fn parse_ffprobe_json(path: &Path, json: &[u8]) -> Result<MediaInfo> {
    let ff: FfprobeOutput = serde_json::from_slice(json)
        .map_err(|e| Error::probe(path, format!("ffprobe JSON parse error: {e}")))?;

    let format = ff
        .format
        .ok_or_else(|| Error::probe(path, "ffprobe reported no format section"))?;

    // Container duration first, then the longest stream duration.
    let duration = format
        .duration
        .as_deref()
        .and_then(parse_seconds)
        .or_else(|| {
            ff.streams
                .iter()
                .filter_map(|s| s.duration.as_deref().and_then(parse_seconds))
                .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |a| a.max(d))))
        })
        .ok_or_else(|| Error::probe(path, "no duration reported"))?;
    let duration = Duration::try_from_secs_f64(duration)
        .map_err(|e| Error::probe(path, format!("unusable duration {duration}: {e}")))?;

    let audio = ff
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("audio"))
        .map(|s| -> Result<AudioStream> {
            let sample_rate = s
                .sample_rate
                .as_deref()
                .and_then(|r| r.parse::<u32>().ok())
                .filter(|r| *r > 0)
                .ok_or_else(|| Error::probe(path, "audio stream has no sample rate"))?;
            let channels = s
                .channels
                .filter(|c| *c > 0)
                .ok_or_else(|| Error::probe(path, "audio stream has no channel count"))?;
            Ok(AudioStream {
                codec: s.codec_name.clone().unwrap_or_default(),
                sample_rate,
                channels,
            })
        })
        .transpose()?;

    // Cover art in MP3s shows up as an mjpeg "video" stream; skip it.
    let video = ff
        .streams
        .iter()
        .find(|s| {
            s.codec_type.as_deref() == Some("video")
                && !matches!(s.codec_name.as_deref(), Some("mjpeg" | "png"))
        })
        .map(|s| VideoStream {
            codec: s.codec_name.clone().unwrap_or_default(),
            width: s.width.unwrap_or(0),
            height: s.height.unwrap_or(0),
        });

    Ok(MediaInfo {
        file_path: path.to_path_buf(),
        container: format.format_name.unwrap_or_default(),
        duration,
        audio,
        video,
    })
}

fn parse_seconds(s: &str) -> Option<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d >= 0.0)
}

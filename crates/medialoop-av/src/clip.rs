//! Video clip editing.
//!
//! A [`VideoClip`] describes an edit of a source video (a trim window, an
//! optional loop target, an optional replacement audio track). Nothing is
//! decoded until [`VideoClip::write_videofile`] renders the description with
//! a single `ffmpeg` re-encode.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::command::ToolCommand;
use crate::probe::probe_media;
use crate::tools::ToolRegistry;
use crate::{Error, Result};

/// Video and audio encoders used when re-encoding a clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecPair {
    pub video_codec: String,
    pub audio_codec: String,
}

impl Default for CodecPair {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
        }
    }
}

/// External audio that replaces a clip's own soundtrack.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSource {
    pub path: PathBuf,
    pub duration: f64,
}

impl AudioSource {
    /// Probe `path` for its duration.
    pub fn open(tools: &ToolRegistry, path: &Path) -> Result<Self> {
        let info = probe_media(tools, path)?;
        if info.audio.is_none() {
            return Err(Error::probe(path, "no audio stream"));
        }
        Ok(Self {
            path: path.to_path_buf(),
            duration: info.duration_secs(),
        })
    }
}

/// An edit of a source video.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoClip {
    source: PathBuf,
    source_duration: f64,
    start: f64,
    end: f64,
    looped_to: Option<f64>,
    audio: Option<AudioSource>,
}

impl VideoClip {
    /// Probe `path` and describe the whole file.
    pub fn open(tools: &ToolRegistry, path: &Path) -> Result<Self> {
        let info = probe_media(tools, path)?;
        if info.video.is_none() {
            return Err(Error::probe(path, "no video stream"));
        }
        Self::from_parts(path, info.duration_secs())
    }

    /// Describe a source of known duration (seconds).
    pub fn from_parts(path: impl Into<PathBuf>, duration: f64) -> Result<Self> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(Error::Validation(format!(
                "clip duration must be positive, got {duration}"
            )));
        }
        Ok(Self {
            source: path.into(),
            source_duration: duration,
            start: 0.0,
            end: duration,
            looped_to: None,
            audio: None,
        })
    }

    /// Path of the source video.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Duration of the edited clip in seconds.
    pub fn duration(&self) -> f64 {
        self.looped_to.unwrap_or(self.end - self.start)
    }

    /// Replacement soundtrack, if one was set.
    pub fn audio(&self) -> Option<&AudioSource> {
        self.audio.as_ref()
    }

    /// Keep only `[start, end)` seconds of the current clip.
    pub fn subclip(mut self, start: f64, end: f64) -> Result<Self> {
        if self.looped_to.is_some() {
            return Err(Error::Validation("cannot trim a looped clip".into()));
        }
        let length = self.end - self.start;
        if !(0.0..length).contains(&start) || end <= start || end > length {
            return Err(Error::Validation(format!(
                "subclip [{start}, {end}) outside clip of {length}s"
            )));
        }
        self.end = self.start + end;
        self.start += start;
        Ok(self)
    }

    /// Repeat the clip until it lasts `duration` seconds.
    pub fn loop_to(mut self, duration: f64) -> Result<Self> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(Error::Validation(format!(
                "loop duration must be positive, got {duration}"
            )));
        }
        if self.start != 0.0 || self.end != self.source_duration {
            return Err(Error::Validation("cannot loop a trimmed clip".into()));
        }
        self.looped_to = Some(duration);
        Ok(self)
    }

    /// Replace the clip's soundtrack.
    pub fn with_audio(mut self, audio: AudioSource) -> Self {
        self.audio = Some(audio);
        self
    }

    /// Render the edit to `dest`. The container follows `dest`'s extension.
    pub fn write_videofile(
        &self,
        tools: &ToolRegistry,
        dest: &Path,
        codecs: &CodecPair,
    ) -> Result<()> {
        tracing::info!(
            "rendering {:.3}s of {} to {} ({}/{})",
            self.duration(),
            self.source.display(),
            dest.display(),
            codecs.video_codec,
            codecs.audio_codec
        );

        let mut cmd = ToolCommand::new(tools.ffmpeg()?.to_path_buf());
        cmd.args(self.render_args(dest, codecs));
        cmd.execute()?;
        Ok(())
    }

    /// `ffmpeg` arguments that render this edit.
    pub fn render_args(&self, dest: &Path, codecs: &CodecPair) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-nostdin", "-hide_banner", "-loglevel", "error", "-y"]
            .map(OsString::from)
            .into();

        if self.looped_to.is_some() {
            args.extend(["-stream_loop", "-1"].map(OsString::from));
        } else if self.start > 0.0 {
            args.push("-ss".into());
            args.push(seconds(self.start).into());
        }
        args.push("-i".into());
        args.push(self.source.as_os_str().to_os_string());

        match &self.audio {
            Some(audio) => {
                args.push("-i".into());
                args.push(audio.path.as_os_str().to_os_string());
                args.extend(["-map", "0:v:0", "-map", "1:a:0"].map(OsString::from));
            }
            None => args.extend(["-map", "0:v:0", "-map", "0:a:0?"].map(OsString::from)),
        }

        args.extend(
            [
                "-c:v".to_string(),
                codecs.video_codec.clone(),
                "-c:a".to_string(),
                codecs.audio_codec.clone(),
                "-t".to_string(),
                seconds(self.duration()),
            ]
            .map(OsString::from),
        );
        args.push(dest.as_os_str().to_os_string());
        args
    }
}

fn seconds(s: f64) -> String {
    format!("{s:.3}")
}

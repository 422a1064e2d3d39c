//! Fitting a video to the length of an audio track.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use medialoop_av::{AudioSource, VideoClip};

use super::MediaContext;

/// How the video is fitted to the audio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyncPlan {
    /// Audio is shorter: keep `[0, end)` of the video.
    Trim { end: f64 },
    /// Audio is as long or longer: repeat the video to `duration`.
    Loop { duration: f64 },
}

impl SyncPlan {
    /// Duration of the output in seconds.
    pub fn duration(&self) -> f64 {
        match *self {
            SyncPlan::Trim { end } => end,
            SyncPlan::Loop { duration } => duration,
        }
    }
}

/// Choose between trimming and looping. Equal lengths loop.
pub fn plan_sync(video_secs: f64, audio_secs: f64) -> SyncPlan {
    if audio_secs < video_secs {
        SyncPlan::Trim { end: audio_secs }
    } else {
        SyncPlan::Loop {
            duration: audio_secs,
        }
    }
}

/// Outcome of a sync.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub destination: PathBuf,
    pub plan: SyncPlan,
    pub video_secs: f64,
    pub audio_secs: f64,
}

/// Trim or loop the video at `video` to the length of `audio`, replace its
/// soundtrack with `audio` and re-encode to `dest`.
pub fn sync_video_to_audio(
    ctx: &MediaContext,
    video: &Path,
    audio: &Path,
    dest: &Path,
) -> Result<SyncReport> {
    let clip = VideoClip::open(&ctx.tools, video)
        .with_context(|| format!("Failed to open video {:?}", video))?;
    let soundtrack = AudioSource::open(&ctx.tools, audio)
        .with_context(|| format!("Failed to open audio {:?}", audio))?;

    let video_secs = clip.duration();
    let audio_secs = soundtrack.duration;
    let plan = plan_sync(video_secs, audio_secs);
    tracing::info!(
        "Video {:.3}s, audio {:.3}s: {:?}",
        video_secs,
        audio_secs,
        plan
    );

    let clip = match plan {
        SyncPlan::Trim { end } => clip.subclip(0.0, end)?,
        SyncPlan::Loop { duration } => clip.loop_to(duration)?,
    }
    .with_audio(soundtrack);

    clip.write_videofile(&ctx.tools, dest, &ctx.codecs)
        .with_context(|| format!("Failed to render {:?}", dest))?;
    tracing::info!("Synced video exported: {}", dest.display());

    Ok(SyncReport {
        destination: dest.to_path_buf(),
        plan,
        video_secs,
        audio_secs,
    })
}

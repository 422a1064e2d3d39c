//! Shared helpers for tests that drive the real `ffmpeg` toolchain.
//!
//! Fixtures are synthesized with ffmpeg's `lavfi` sources, so nothing is
//! checked in. Every helper returns `None` when the toolchain (or a needed
//! encoder) is missing and callers skip.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use medialoop::MediaContext;
use medialoop_av::AudioTrack;

/// A context backed by the tools on `PATH`, if both are installed.
pub fn media_context() -> Option<MediaContext> {
    let ctx = MediaContext::default();
    if ctx.tools.ffmpeg().is_ok() && ctx.tools.ffprobe().is_ok() {
        Some(ctx)
    } else {
        eprintln!("ffmpeg/ffprobe not found; skipping");
        None
    }
}

/// Whether the installed ffmpeg lists `name` among its encoders.
pub fn has_encoder(name: &str) -> bool {
    Command::new("ffmpeg")
        .args(["-hide_banner", "-encoders"])
        .output()
        .map(|out| {
            String::from_utf8_lossy(&out.stdout)
                .split_whitespace()
                .any(|word| word == name)
        })
        .unwrap_or(false)
}

fn run_ffmpeg(args: &[&str], out: &Path) -> Option<PathBuf> {
    let status = Command::new("ffmpeg")
        .args(["-nostdin", "-hide_banner", "-loglevel", "error", "-y"])
        .args(args)
        .arg(out)
        .status()
        .ok()?;
    status.success().then(|| out.to_path_buf())
}

/// A stereo 44.1 kHz sine tone encoded as MP3.
pub fn tone_mp3(dir: &Path, name: &str, frequency: u32, seconds: f64) -> Option<PathBuf> {
    let source = format!("sine=frequency={frequency}:sample_rate=44100:duration={seconds}");
    run_ffmpeg(
        &["-f", "lavfi", "-i", &source, "-ac", "2", "-c:a", "libmp3lame", "-b:a", "192k"],
        &dir.join(name),
    )
}

/// A small silent test-pattern video.
pub fn test_video(dir: &Path, name: &str, seconds: f64) -> Option<PathBuf> {
    let source = format!("testsrc=duration={seconds}:size=160x120:rate=10");
    run_ffmpeg(
        &["-f", "lavfi", "-i", &source, "-c:v", "mpeg4", "-pix_fmt", "yuv420p"],
        &dir.join(name),
    )
}

/// Rough frequency of a channel-0 window, from zero crossings.
pub fn dominant_frequency(track: &AudioTrack, start_ms: u64, end_ms: u64) -> f64 {
    let window = track.slice_ms(start_ms..end_ms);
    let channels = usize::from(window.channels());
    let mono: Vec<i16> = window.samples().iter().step_by(channels).copied().collect();
    let crossings = mono
        .windows(2)
        .filter(|pair| (pair[0] < 0) != (pair[1] < 0))
        .count();
    crossings as f64 / 2.0 / window.duration_secs()
}

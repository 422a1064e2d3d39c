//! Looping a track to a target duration or a fixed number of times.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use medialoop_av::{decode_audio, encode_mp3, AudioTrack, Error};

use super::MediaContext;

/// Outcome of a loop operation.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopReport {
    pub destination: PathBuf,
    pub repetitions: usize,
    pub original_secs: f64,
    pub looped_secs: f64,
}

/// Milliseconds in `minutes`, truncated.
pub fn target_ms(minutes: f64) -> medialoop_av::Result<u64> {
    if !minutes.is_finite() || minutes <= 0.0 {
        return Err(Error::Validation(format!(
            "duration must be a positive number of minutes, got {minutes}"
        )));
    }
    let ms = (minutes * 60_000.0).trunc();
    if ms < 1.0 {
        return Err(Error::Validation(format!(
            "{minutes} minutes is shorter than one millisecond"
        )));
    }
    Ok(ms as u64)
}

/// Repeat `track` until it covers `target_ms`, then cut it to exactly that
/// length. Returns the looped track and the number of repetitions used.
///
/// The repetition count is `ceil(target / track length)` computed on whole
/// frames, so the cut never falls short of the target.
pub fn looped_to_duration(
    track: &AudioTrack,
    target_ms: u64,
    source: &Path,
) -> medialoop_av::Result<(AudioTrack, usize)> {
    if track.is_empty() {
        return Err(Error::EmptyTrack {
            path: source.to_path_buf(),
        });
    }

    let repetitions = track
        .frames_in_ms(target_ms)
        .div_ceil(track.frame_count())
        .max(1);

    let mut looped = track.repeat(repetitions);
    looped.truncate_ms(target_ms);
    Ok((looped, repetitions))
}

/// Concatenate `track` with itself `repetitions` times.
pub fn looped_n_times(track: &AudioTrack, repetitions: u32) -> medialoop_av::Result<AudioTrack> {
    if repetitions == 0 {
        return Err(Error::Validation("repetitions must be at least 1".into()));
    }
    Ok(track.repeat(repetitions as usize))
}

/// A decoded and looped track waiting to be exported.
///
/// Splitting the export off lets callers report the durations before the
/// MP3 encode runs.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopedTrack {
    pub track: AudioTrack,
    pub repetitions: usize,
    pub original_secs: f64,
}

impl LoopedTrack {
    pub fn looped_secs(&self) -> f64 {
        self.track.duration_secs()
    }

    /// Encode the looped track as MP3 to `dest`.
    pub fn export(&self, ctx: &MediaContext, dest: &Path) -> Result<LoopReport> {
        encode_mp3(&ctx.tools, &self.track, dest, &ctx.mp3)
            .with_context(|| format!("Failed to export {:?}", dest))?;
        tracing::info!("Looped track exported: {}", dest.display());

        Ok(LoopReport {
            destination: dest.to_path_buf(),
            repetitions: self.repetitions,
            original_secs: self.original_secs,
            looped_secs: self.looped_secs(),
        })
    }
}

/// Decode the MP3 at `source` and loop it to exactly `minutes`.
pub fn prepare_loop_to_duration(
    ctx: &MediaContext,
    source: &Path,
    minutes: f64,
) -> Result<LoopedTrack> {
    let target = target_ms(minutes)?;

    let track = decode_audio(&ctx.tools, source, &ctx.decode)
        .with_context(|| format!("Failed to decode {:?}", source))?;

    let (looped, repetitions) = looped_to_duration(&track, target, source)?;
    tracing::info!(
        "Looping {:?} ({} ms) {} times, cut to {} ms",
        source,
        track.duration_ms(),
        repetitions,
        target
    );

    Ok(LoopedTrack {
        track: looped,
        repetitions,
        original_secs: track.duration_secs(),
    })
}

/// Loop the MP3 at `source` to exactly `minutes` and export it to `dest`.
pub fn loop_to_duration(
    ctx: &MediaContext,
    source: &Path,
    dest: &Path,
    minutes: f64,
) -> Result<LoopReport> {
    prepare_loop_to_duration(ctx, source, minutes)?.export(ctx, dest)
}

/// Decode the MP3 at `source` and repeat it `repetitions` times.
pub fn prepare_loop_n_times(
    ctx: &MediaContext,
    source: &Path,
    repetitions: u32,
) -> Result<LoopedTrack> {
    if repetitions == 0 {
        return Err(Error::Validation("repetitions must be at least 1".into()).into());
    }

    let track = decode_audio(&ctx.tools, source, &ctx.decode)
        .with_context(|| format!("Failed to decode {:?}", source))?;
    tracing::info!("Original duration: {} seconds", track.duration_secs());

    let looped = looped_n_times(&track, repetitions)?;
    tracing::info!("Duration after looping: {} seconds", looped.duration_secs());

    Ok(LoopedTrack {
        track: looped,
        repetitions: repetitions as usize,
        original_secs: track.duration_secs(),
    })
}

/// Repeat the MP3 at `source` `repetitions` times and export it to `dest`.
pub fn loop_n_times(
    ctx: &MediaContext,
    source: &Path,
    dest: &Path,
    repetitions: u32,
) -> Result<LoopReport> {
    prepare_loop_n_times(ctx, source, repetitions)?.export(ctx, dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(duration_ms: u64, rate: u32) -> AudioTrack {
        let frames = (duration_ms * u64::from(rate) / 1000) as usize;
        let samples = (0..frames * 2).map(|i| (i % 1000) as i16).collect();
        AudioTrack::new(samples, rate, 2).unwrap()
    }

    #[test]
    fn target_ms_truncates() {
        assert_eq!(target_ms(0.2).unwrap(), 12_000);
        assert_eq!(target_ms(1.5).unwrap(), 90_000);
        // 0.00001 min = 0.6 ms
        assert!(target_ms(0.00001).is_err());
        assert!(target_ms(0.0).is_err());
        assert!(target_ms(-1.0).is_err());
        assert!(target_ms(f64::INFINITY).is_err());
    }

    #[test]
    fn ten_second_track_to_twelve_seconds() {
        let track = tone(10_000, 44_100);
        let (looped, reps) = looped_to_duration(&track, 12_000, Path::new("a.mp3")).unwrap();
        assert_eq!(reps, 2);
        assert_eq!(looped.duration_ms(), 12_000);
        assert_eq!(looped.frame_count(), 12 * 44_100);
        // Second loop starts again from the top of the source.
        let second = looped.slice_ms(10_000..12_000);
        assert_eq!(second.samples(), track.slice_ms(0..2_000).samples());
    }

    #[test]
    fn exact_multiple_needs_no_extra_loop() {
        let track = tone(3_000, 48_000);
        let (looped, reps) = looped_to_duration(&track, 9_000, Path::new("a.mp3")).unwrap();
        assert_eq!(reps, 3);
        assert_eq!(looped, track.repeat(3));
    }

    #[test]
    fn target_shorter_than_track_cuts_once() {
        let track = tone(10_000, 44_100);
        let (looped, reps) = looped_to_duration(&track, 2_500, Path::new("a.mp3")).unwrap();
        assert_eq!(reps, 1);
        assert_eq!(looped.duration_ms(), 2_500);
    }

    #[test]
    fn odd_length_source_still_reaches_target() {
        // 1234.5 ms worth of frames at 8 kHz.
        let track = AudioTrack::new(vec![7; 9_876 * 2], 8_000, 2).unwrap();
        for target in [1_000, 5_000, 60_000, 61_237] {
            let (looped, _) = looped_to_duration(&track, target, Path::new("a.mp3")).unwrap();
            assert_eq!(looped.frame_count(), track.frames_in_ms(target));
        }
    }

    #[test]
    fn empty_track_is_an_error() {
        let track = AudioTrack::silent(0, 44_100, 2).unwrap();
        let err = looped_to_duration(&track, 1_000, Path::new("empty.mp3")).unwrap_err();
        assert!(matches!(err, Error::EmptyTrack { .. }));
    }

    #[test]
    fn n_times_multiplies_length() {
        let track = tone(2_000, 44_100);
        for n in [1, 2, 7] {
            let looped = looped_n_times(&track, n).unwrap();
            assert_eq!(looped.duration_ms(), 2_000 * u64::from(n));
        }
        assert_eq!(looped_n_times(&track, 1).unwrap(), track);
        assert!(looped_n_times(&track, 0).is_err());
    }

    #[test]
    fn loop_n_times_rejects_zero_before_decoding() {
        let ctx = MediaContext::default();
        let err = loop_n_times(&ctx, Path::new("missing.mp3"), Path::new("out.mp3"), 0)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::Validation(_))
        ));
    }

    #[test]
    fn durations_are_known_before_export() {
        let track = tone(2_000, 44_100);
        let looped = LoopedTrack {
            track: looped_n_times(&track, 3).unwrap(),
            repetitions: 3,
            original_secs: track.duration_secs(),
        };
        assert_eq!(looped.original_secs, 2.0);
        assert_eq!(looped.looped_secs(), 6.0);

        // No ffmpeg registered: the export fails after the durations exist.
        let ctx = MediaContext {
            tools: medialoop_av::ToolRegistry::default(),
            ..MediaContext::default()
        };
        let err = looped.export(&ctx, Path::new("out.mp3")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::ToolNotFound { .. })
        ));
    }
}

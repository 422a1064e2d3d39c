//! End-to-end tests for the four operations against the real toolchain.
//!
//! Each test synthesizes its inputs with ffmpeg and skips when the toolchain
//! is missing. Encoded MP3 lengths carry codec padding, so file durations are
//! checked with a small tolerance; exact arithmetic is covered by unit tests.

mod common;

use medialoop::ops::{self, SyncPlan};
use medialoop_av::{decode_audio, probe_media, DecodeOptions};
use tempfile::tempdir;

const TOLERANCE_MS: f64 = 60.0;

fn assert_close_ms(actual_secs: f64, expected_ms: f64) {
    let actual_ms = actual_secs * 1000.0;
    assert!(
        (actual_ms - expected_ms).abs() <= TOLERANCE_MS,
        "expected ~{expected_ms} ms, got {actual_ms} ms"
    );
}

#[test]
fn loop_ten_seconds_to_twelve() {
    let Some(ctx) = common::media_context() else { return };
    let dir = tempdir().unwrap();
    let Some(source) = common::tone_mp3(dir.path(), "ten.mp3", 440, 10.0) else { return };
    let dest = dir.path().join("twelve.mp3");

    let report = ops::loop_to_duration(&ctx, &source, &dest, 0.2).unwrap();

    assert_eq!(report.repetitions, 2);
    assert_eq!(report.destination, dest);
    assert_close_ms(report.looped_secs, 12_000.0);

    let info = probe_media(&ctx.tools, &dest).unwrap();
    assert_eq!(info.container, "mp3");
    assert_close_ms(info.duration_secs(), 12_000.0);
}

#[test]
fn loop_three_times() {
    let Some(ctx) = common::media_context() else { return };
    let dir = tempdir().unwrap();
    let Some(source) = common::tone_mp3(dir.path(), "two.mp3", 440, 2.0) else { return };
    let dest = dir.path().join("six.mp3");

    let report = ops::loop_n_times(&ctx, &source, &dest, 3).unwrap();

    assert_eq!(report.repetitions, 3);
    assert!((report.looped_secs - 3.0 * report.original_secs).abs() < 1e-9);
    let out = decode_audio(&ctx.tools, &dest, &DecodeOptions::default()).unwrap();
    assert_close_ms(out.duration_secs(), report.looped_secs * 1000.0);
}

#[test]
fn loop_missing_source_fails() {
    let Some(ctx) = common::media_context() else { return };
    let dir = tempdir().unwrap();
    let result = ops::loop_to_duration(
        &ctx,
        &dir.path().join("missing.mp3"),
        &dir.path().join("out.mp3"),
        1.0,
    );
    assert!(result.is_err());
    assert!(!dir.path().join("out.mp3").exists());
}

#[test]
fn concat_keeps_order_and_length() {
    let Some(ctx) = common::media_context() else { return };
    let dir = tempdir().unwrap();
    let Some(_) = common::tone_mp3(dir.path(), "a.mp3", 300, 1.0) else { return };
    let Some(_) = common::tone_mp3(dir.path(), "b.mp3", 1200, 1.0) else { return };
    let Some(_) = common::tone_mp3(dir.path(), "c.mp3", 600, 1.0) else { return };
    let dest = dir.path().join("joined.mp3");

    let report = ops::concat_tracks(&ctx, dir.path(), &["a.mp3", "b.mp3", "c.mp3"], &dest).unwrap();
    assert_eq!(report.inputs.len(), 3);
    assert_eq!(report.inputs[1], dir.path().join("b.mp3"));

    let out = decode_audio(&ctx.tools, &dest, &DecodeOptions::default()).unwrap();
    assert_close_ms(out.duration_secs(), report.total_secs * 1000.0);

    // Sample the middle of each second to stay clear of codec padding.
    let first = common::dominant_frequency(&out, 250, 750);
    let second = common::dominant_frequency(&out, 1_250, 1_750);
    let third = common::dominant_frequency(&out, 2_250, 2_750);
    assert!((first - 300.0).abs() < 50.0, "first segment at {first} Hz");
    assert!((second - 1200.0).abs() < 100.0, "second segment at {second} Hz");
    assert!((third - 600.0).abs() < 60.0, "third segment at {third} Hz");
}

#[test]
fn sync_loops_short_video() {
    let Some(ctx) = common::media_context() else { return };
    if !common::has_encoder("libx264") {
        return;
    }
    let dir = tempdir().unwrap();
    let Some(video) = common::test_video(dir.path(), "five.mp4", 5.0) else { return };
    let Some(audio) = common::tone_mp3(dir.path(), "eight.mp3", 440, 8.0) else { return };
    let dest = dir.path().join("synced.mp4");

    let report = ops::sync_video_to_audio(&ctx, &video, &audio, &dest).unwrap();
    assert!(matches!(report.plan, SyncPlan::Loop { .. }));

    let info = probe_media(&ctx.tools, &dest).unwrap();
    assert!((info.duration_secs() - 8.0).abs() < 0.3, "got {}", info.duration_secs());
    assert_eq!(info.video.unwrap().codec, "h264");
    assert_eq!(info.audio.unwrap().codec, "aac");
}

#[test]
fn sync_trims_long_video() {
    let Some(ctx) = common::media_context() else { return };
    if !common::has_encoder("libx264") {
        return;
    }
    let dir = tempdir().unwrap();
    let Some(video) = common::test_video(dir.path(), "six.mp4", 6.0) else { return };
    let Some(audio) = common::tone_mp3(dir.path(), "three.mp3", 440, 3.0) else { return };
    let dest = dir.path().join("trimmed.mkv");

    let report = ops::sync_video_to_audio(&ctx, &video, &audio, &dest).unwrap();
    assert!(matches!(report.plan, SyncPlan::Trim { .. }));

    let info = probe_media(&ctx.tools, &dest).unwrap();
    assert!((info.duration_secs() - 3.0).abs() < 0.3, "got {}", info.duration_secs());
    assert!(info.container.contains("matroska"));
}

//! Benchmarks for in-memory track operations
//!
//! Looping, truncating and joining decoded PCM without touching ffmpeg.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use medialoop::ops::{concatenate, looped_to_duration};
use medialoop_av::AudioTrack;
use std::path::Path;

fn track(seconds: u64) -> AudioTrack {
    let frames = (seconds * 44_100) as usize;
    let samples = (0..frames * 2).map(|i| (i % 4_096) as i16).collect();
    AudioTrack::new(samples, 44_100, 2).unwrap()
}

fn bench_loop_to_duration(c: &mut Criterion) {
    let source = track(10);
    let mut group = c.benchmark_group("loop_to_duration");

    for minutes in [1u64, 5, 15] {
        let target_ms = minutes * 60_000;
        group.throughput(Throughput::Bytes(target_ms * 44_100 / 1000 * 4));
        group.bench_with_input(BenchmarkId::from_parameter(minutes), &target_ms, |b, &ms| {
            b.iter(|| looped_to_duration(black_box(&source), ms, Path::new("bench.mp3")).unwrap())
        });
    }

    group.finish();
}

fn bench_concatenate(c: &mut Criterion) {
    let mut group = c.benchmark_group("concatenate");

    for count in [2usize, 8, 32] {
        let tracks: Vec<AudioTrack> = (0..count).map(|_| track(3)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &tracks, |b, tracks| {
            b.iter(|| concatenate(black_box(tracks.clone())).unwrap())
        });
    }

    group.finish();
}

fn bench_le_bytes(c: &mut Criterion) {
    let source = track(30);
    let bytes = source.to_le_bytes();

    c.bench_function("to_le_bytes_30s", |b| b.iter(|| black_box(&source).to_le_bytes()));
    c.bench_function("from_le_bytes_30s", |b| {
        b.iter(|| AudioTrack::from_le_bytes(black_box(&bytes), 44_100, 2).unwrap())
    });
}

criterion_group!(
    benches,
    bench_loop_to_duration,
    bench_concatenate,
    bench_le_bytes
);
criterion_main!(benches);

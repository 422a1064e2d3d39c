//! medialoop - loop, join and length-match media files
//!
//! This library crate exposes the operations behind the `medialoop` binary so
//! they can be called directly and exercised by integration tests.

pub mod config;
pub mod ops;

pub use ops::{
    concat_tracks, loop_n_times, loop_to_duration, sync_video_to_audio, MediaContext,
};

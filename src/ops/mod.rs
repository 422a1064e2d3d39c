//! The four media operations.
//!
//! Each operation is a flat, blocking sequence: decode or probe the inputs,
//! do the duration arithmetic, render one output file. The arithmetic lives
//! in small pure functions so it can be exercised without `ffmpeg`.

mod concat;
mod looping;
mod sync;

pub use concat::{concat_tracks, concatenate, ConcatReport};
pub use looping::{
    loop_n_times, loop_to_duration, looped_n_times, looped_to_duration, prepare_loop_n_times,
    prepare_loop_to_duration, target_ms, LoopReport, LoopedTrack,
};
pub use sync::{plan_sync, sync_video_to_audio, SyncPlan, SyncReport};

use medialoop_av::{CodecPair, DecodeOptions, Mp3Options, ToolRegistry};

use crate::config::Config;

/// Everything an operation needs from the environment: resolved tools and
/// encoder settings.
#[derive(Debug, Clone)]
pub struct MediaContext {
    pub tools: ToolRegistry,
    pub decode: DecodeOptions,
    pub mp3: Mp3Options,
    pub codecs: CodecPair,
}

impl MediaContext {
    /// Discover tools and read encoder settings from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self {
            tools: ToolRegistry::discover(&config.tools),
            decode: config.audio.decode_options(),
            mp3: config.audio.mp3_options(),
            codecs: config.video.codec_pair(),
        }
    }
}

impl Default for MediaContext {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

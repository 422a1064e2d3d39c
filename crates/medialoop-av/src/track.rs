//! In-memory decoded audio.
//!
//! An [`AudioTrack`] holds interleaved signed 16-bit PCM. Positions are given
//! in milliseconds and converted to whole frames by truncation, so slicing a
//! track to `n` ms always yields `n * rate / 1000` frames.

use std::ops::Range;

use crate::{Error, Result};

/// Decoded PCM audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioTrack {
    samples: Vec<i16>,
    sample_rate: u32,
    channels: u16,
}

impl AudioTrack {
    /// Build a track from interleaved samples.
    pub fn new(samples: Vec<i16>, sample_rate: u32, channels: u16) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::Validation("sample rate must be non-zero".into()));
        }
        if channels == 0 {
            return Err(Error::Validation("channel count must be non-zero".into()));
        }
        if samples.len() % channels as usize != 0 {
            return Err(Error::Validation(format!(
                "{} samples do not divide into {channels} channels",
                samples.len()
            )));
        }
        Ok(Self {
            samples,
            sample_rate,
            channels,
        })
    }

    /// A silent track of the given length.
    pub fn silent(duration_ms: u64, sample_rate: u32, channels: u16) -> Result<Self> {
        let frames = ms_to_frames(duration_ms, sample_rate);
        Self::new(
            vec![0; frames * channels as usize],
            sample_rate,
            channels,
        )
    }

    /// Build a track from raw little-endian `s16le` bytes.
    ///
    /// A trailing partial sample or frame is dropped.
    pub fn from_le_bytes(bytes: &[u8], sample_rate: u32, channels: u16) -> Result<Self> {
        let mut samples: Vec<i16> = bytes
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect();
        if channels > 0 {
            let whole = samples.len() - samples.len() % channels as usize;
            samples.truncate(whole);
        }
        Self::new(samples, sample_rate, channels)
    }

    /// Serialize to raw little-endian `s16le` bytes.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Number of frames (one sample per channel).
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Length in milliseconds, rounded to the nearest millisecond.
    pub fn duration_ms(&self) -> u64 {
        let frames = self.frame_count() as u64;
        let rate = u64::from(self.sample_rate);
        (frames * 1000 + rate / 2) / rate
    }

    /// Length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.frame_count() as f64 / f64::from(self.sample_rate)
    }

    /// Number of frames spanning `ms` milliseconds at this track's rate.
    pub fn frames_in_ms(&self, ms: u64) -> usize {
        ms_to_frames(ms, self.sample_rate)
    }

    /// Frame index for a millisecond position, clamped to the track length.
    pub fn frame_at_ms(&self, ms: u64) -> usize {
        self.frames_in_ms(ms).min(self.frame_count())
    }

    /// Sub-range `[start, end)` in milliseconds. Out-of-range bounds clamp.
    pub fn slice_ms(&self, range: Range<u64>) -> AudioTrack {
        let start = self.frame_at_ms(range.start);
        let end = self.frame_at_ms(range.end).max(start);
        let ch = self.channels as usize;
        AudioTrack {
            samples: self.samples[start * ch..end * ch].to_vec(),
            sample_rate: self.sample_rate,
            channels: self.channels,
        }
    }

    /// Keep only the first `ms` milliseconds.
    pub fn truncate_ms(&mut self, ms: u64) {
        let end = self.frame_at_ms(ms) * self.channels as usize;
        self.samples.truncate(end);
    }

    /// The track concatenated with itself `times` times. Zero yields an
    /// empty track with the same format.
    pub fn repeat(&self, times: usize) -> AudioTrack {
        AudioTrack {
            samples: self.samples.repeat(times),
            sample_rate: self.sample_rate,
            channels: self.channels,
        }
    }

    /// Append `other` to the end of this track.
    ///
    /// # Errors
    ///
    /// [`Error::FormatMismatch`] if the sample rate or channel count differ.
    pub fn append(&mut self, other: &AudioTrack) -> Result<()> {
        if !self.same_format(other) {
            return Err(Error::FormatMismatch {
                left_rate: self.sample_rate,
                left_channels: self.channels,
                right_rate: other.sample_rate,
                right_channels: other.channels,
            });
        }
        self.samples.extend_from_slice(&other.samples);
        Ok(())
    }

    pub fn same_format(&self, other: &AudioTrack) -> bool {
        self.sample_rate == other.sample_rate && self.channels == other.channels
    }
}

fn ms_to_frames(ms: u64, sample_rate: u32) -> usize {
    (u128::from(ms) * u128::from(sample_rate) / 1000) as usize
}

//! Joining several tracks end to end.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use medialoop_av::{decode_audio, encode_mp3, AudioTrack, Error};

use super::MediaContext;

/// Outcome of a concatenation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConcatReport {
    pub destination: PathBuf,
    pub inputs: Vec<PathBuf>,
    pub total_secs: f64,
}

/// Append every track after the first, in order.
pub fn concatenate<I>(tracks: I) -> medialoop_av::Result<AudioTrack>
where
    I: IntoIterator<Item = AudioTrack>,
{
    let mut tracks = tracks.into_iter();
    let mut acc = tracks
        .next()
        .ok_or_else(|| Error::Validation("no tracks to concatenate".into()))?;
    for track in tracks {
        acc.append(&track)?;
    }
    Ok(acc)
}

/// Decode `base.join(name)` for each name in order, join them and export the
/// result as MP3 to `dest`.
///
/// Names are joined as path components, so `base` is treated as a directory:
/// a base of `/music/set1_` with name `a.mp3` reads `/music/set1_/a.mp3`, not
/// `/music/set1_a.mp3`.
///
/// Inputs must share a sample rate and channel count unless the context
/// forces a decode layout.
pub fn concat_tracks<S: AsRef<Path>>(
    ctx: &MediaContext,
    base: &Path,
    names: &[S],
    dest: &Path,
) -> Result<ConcatReport> {
    if names.is_empty() {
        return Err(Error::Validation("at least one track name is required".into()).into());
    }
    let inputs: Vec<PathBuf> = names.iter().map(|n| base.join(n)).collect();

    let tracks = inputs
        .iter()
        .map(|path| {
            let track = decode_audio(&ctx.tools, path, &ctx.decode)
                .with_context(|| format!("Failed to decode {:?}", path))?;
            tracing::debug!("Decoded {:?} ({} ms)", path, track.duration_ms());
            Ok(track)
        })
        .collect::<Result<Vec<_>>>()?;

    let acc = concatenate(tracks).context("Failed to join tracks")?;

    tracing::info!(
        "Joined {} tracks into {} ms",
        inputs.len(),
        acc.duration_ms()
    );

    encode_mp3(&ctx.tools, &acc, dest, &ctx.mp3)
        .with_context(|| format!("Failed to export {:?}", dest))?;
    tracing::info!("Joined track exported: {}", dest.display());

    Ok(ConcatReport {
        destination: dest.to_path_buf(),
        total_secs: acc.duration_secs(),
        inputs,
    })
}

use std::path::Path;
use std::sync::Arc;

use crate::assets::media::{
    AudioPcm, BACKGROUND_AUDIO, EFFECT_AUDIO, MIX_SAMPLE_RATE, bundled_asset_path,
    decode_audio_f32_stereo,
};
use crate::foundation::error::{TextclipError, TextclipResult};

#[derive(Clone, Debug)]
/// One scheduled audio contribution in timeline sample space.
pub struct AudioSegment {
    /// First output sample frame the segment writes to.
    pub timeline_start_sample: u64,
    /// Output sample frame (exclusive) at which the segment stops.
    pub timeline_end_sample: u64,
    /// Linear gain.
    pub volume: f32,
    /// Sample rate of the source PCM.
    pub source_sample_rate: u32,
    /// Channel count of the source PCM (1 or 2).
    pub source_channels: u16,
    /// Interleaved source samples.
    pub source_interleaved_f32: Arc<Vec<f32>>,
}

impl AudioSegment {
    /// Segment playing `pcm` from its start at `start_sample` for at most `len_samples`.
    pub fn from_pcm(pcm: AudioPcm, start_sample: u64, len_samples: u64, volume: f32) -> Self {
        Self {
            timeline_start_sample: start_sample,
            timeline_end_sample: start_sample.saturating_add(len_samples),
            volume,
            source_sample_rate: pcm.sample_rate,
            source_channels: pcm.channels,
            source_interleaved_f32: Arc::new(pcm.interleaved_f32),
        }
    }
}

#[derive(Clone, Debug)]
/// Audio mixing plan covering a whole clip.
pub struct AudioManifest {
    /// Output sample rate.
    pub sample_rate: u32,
    /// Output channel count.
    pub channels: u16,
    /// Output length in sample frames.
    pub total_samples: u64,
    /// Contributions mixed additively.
    pub segments: Vec<AudioSegment>,
}

/// Number of output sample frames covering `duration_secs`.
pub fn secs_to_samples(duration_secs: f64, sample_rate: u32) -> u64 {
    (duration_secs.max(0.0) * f64::from(sample_rate)).round() as u64
}

/// Plan the clip soundtrack from already decoded sources.
///
/// The background is trimmed to the clip and scaled by `volume`; the effect, when present,
/// starts at t = 0 at unit gain and is cut off at the end of the clip.
pub fn soundtrack_manifest(
    duration_secs: f64,
    background: AudioPcm,
    volume: f32,
    effect: Option<AudioPcm>,
) -> AudioManifest {
    let total_samples = secs_to_samples(duration_secs, MIX_SAMPLE_RATE);
    let mut segments = vec![AudioSegment::from_pcm(background, 0, total_samples, volume)];
    if let Some(effect) = effect {
        segments.push(AudioSegment::from_pcm(effect, 0, total_samples, 1.0));
    }
    AudioManifest {
        sample_rate: MIX_SAMPLE_RATE,
        channels: 2,
        total_samples,
        segments,
    }
}

/// Decode the bundled assets from `assets_dir` and plan the clip soundtrack.
#[tracing::instrument]
pub fn load_soundtrack(
    assets_dir: &Path,
    duration_secs: f64,
    volume: f32,
    effect: bool,
) -> TextclipResult<AudioManifest> {
    if !volume.is_finite() || volume < 0.0 {
        return Err(TextclipError::validation(
            "audio volume must be a finite non-negative number",
        ));
    }
    let background = decode_audio_f32_stereo(
        &bundled_asset_path(assets_dir, BACKGROUND_AUDIO)?,
        MIX_SAMPLE_RATE,
    )?;
    let effect = if effect {
        Some(decode_audio_f32_stereo(
            &bundled_asset_path(assets_dir, EFFECT_AUDIO)?,
            MIX_SAMPLE_RATE,
        )?)
    } else {
        None
    };
    Ok(soundtrack_manifest(duration_secs, background, volume, effect))
}

use std::path::{Path, PathBuf};

use crate::foundation::error::{TextclipError, TextclipResult};

/// Internal audio mixing sample rate used across decode/mix/encode pipeline.
pub const MIX_SAMPLE_RATE: u32 = 48_000;

/// Environment variable overriding the bundled assets directory.
pub const ASSETS_DIR_ENV: &str = "TEXTCLIP_ASSETS_DIR";

/// File name of the bundled background loop.
pub const BACKGROUND_AUDIO: &str = "charkha.mp3";

/// File name of the bundled sound effect played at the start of the clip.
pub const EFFECT_AUDIO: &str = "Sharpwipereverb.m4a";

#[derive(Clone, Debug)]
/// Decoded interleaved floating-point PCM.
pub struct AudioPcm {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
    /// Interleaved `f32` PCM samples.
    pub interleaved_f32: Vec<f32>,
}

impl AudioPcm {
    /// Number of sample frames (one sample per channel).
    pub fn frames(&self) -> usize {
        self.interleaved_f32.len() / usize::from(self.channels.max(1))
    }
}

/// Directory holding the bundled audio assets.
///
/// `TEXTCLIP_ASSETS_DIR` wins when set; otherwise the `assets/` directory shipped next to this
/// crate's manifest.
pub fn default_assets_dir() -> PathBuf {
    std::env::var_os(ASSETS_DIR_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("assets"))
}

/// Locate a bundled asset, failing when the file is missing.
pub fn bundled_asset_path(assets_dir: &Path, name: &str) -> TextclipResult<PathBuf> {
    let path = assets_dir.join(name);
    if !path.is_file() {
        return Err(TextclipError::asset(format!(
            "bundled audio asset '{}' not found (set {ASSETS_DIR_ENV} to override the assets directory)",
            path.display()
        )));
    }
    Ok(path)
}

/// Decode audio from media source to stereo interleaved `f32` PCM.
pub fn decode_audio_f32_stereo(path: &Path, sample_rate: u32) -> TextclipResult<AudioPcm> {
    let out = std::process::Command::new("ffmpeg")
        .args(["-v", "error", "-i"])
        .arg(path)
        .args([
            "-vn",
            "-f",
            "f32le",
            "-acodec",
            "pcm_f32le",
            "-ac",
            "2",
            "-ar",
            &sample_rate.to_string(),
            "pipe:1",
        ])
        .output()
        .map_err(|e| TextclipError::asset(format!("failed to run ffmpeg for audio decode: {e}")))?;

    if !out.status.success() {
        return Err(TextclipError::asset(format!(
            "ffmpeg audio decode failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    if !out.stdout.len().is_multiple_of(4) {
        return Err(TextclipError::asset(
            "decoded audio byte length is not aligned to f32 samples",
        ));
    }
    let mut pcm = Vec::<f32>::with_capacity(out.stdout.len() / 4);
    for chunk in out.stdout.chunks_exact(4) {
        pcm.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }

    tracing::debug!(
        path = %path.display(),
        samples = pcm.len(),
        "decoded audio asset"
    );
    Ok(AudioPcm {
        sample_rate,
        channels: 2,
        interleaved_f32: pcm,
    })
}


// Decoding shells out to `ffmpeg`; it is covered by the integration tests, which skip when the
// tool is unavailable.

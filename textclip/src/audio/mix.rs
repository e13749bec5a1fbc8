use std::path::Path;

use crate::audio::manifest::{AudioManifest, AudioSegment};
use crate::foundation::error::{TextclipError, TextclipResult};

/// Mix all manifest segments into interleaved output PCM, clamped to `[-1, 1]`.
pub fn mix_manifest(manifest: &AudioManifest) -> Vec<f32> {
    let frames = manifest.total_samples as usize;
    let mut out = vec![0.0f32; frames * usize::from(manifest.channels)];

    for seg in &manifest.segments {
        mix_segment(&mut out, manifest, seg);
    }

    for s in &mut out {
        *s = s.clamp(-1.0, 1.0);
    }
    out
}

fn mix_segment(out: &mut [f32], manifest: &AudioManifest, seg: &AudioSegment) {
    let src = seg.source_interleaved_f32.as_ref();
    let src_channels = usize::from(seg.source_channels.max(1));
    let src_frames = src.len() / src_channels;
    if src_frames == 0 || seg.source_sample_rate == 0 {
        return;
    }
    let end = seg.timeline_end_sample.min(manifest.total_samples);
    let out_channels = usize::from(manifest.channels);

    for dst_sample in seg.timeline_start_sample..end {
        let rel_sec =
            ((dst_sample - seg.timeline_start_sample) as f64) / f64::from(manifest.sample_rate);
        let src_pos = rel_sec * f64::from(seg.source_sample_rate);
        let src_frame0 = src_pos.floor() as usize;
        if src_frame0 >= src_frames {
            break;
        }
        let src_frame1 = (src_frame0 + 1).min(src_frames - 1);
        let frac = (src_pos - src_frame0 as f64) as f32;

        let sample = |frame: usize, ch: usize| src[frame * src_channels + ch.min(src_channels - 1)];
        let lerp = |ch: usize| {
            let v0 = sample(src_frame0, ch);
            v0 + (sample(src_frame1, ch) - v0) * frac
        };
        let (l, r) = (lerp(0), lerp(1));

        let dst_idx = dst_sample as usize * out_channels;
        out[dst_idx] += l * seg.volume;
        if out_channels > 1 {
            out[dst_idx + 1] += r * seg.volume;
        }
    }
}

/// Write interleaved `f32` PCM samples to raw little-endian `.f32le` file.
pub fn write_mix_to_f32le_file(samples_interleaved: &[f32], out_path: &Path) -> TextclipResult<()> {
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            TextclipError::encode(format!(
                "failed to create audio mix output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    let mut bytes = Vec::<u8>::with_capacity(samples_interleaved.len() * 4);
    for &sample in samples_interleaved {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    std::fs::write(out_path, bytes).map_err(|e| {
        TextclipError::encode(format!(
            "failed to write mixed audio file '{}': {e}",
            out_path.display()
        ))
    })
}

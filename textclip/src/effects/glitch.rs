use image::RgbImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default maximum slice displacement in pixels.
pub const DEFAULT_GLITCH_INTENSITY: u32 = 20;

/// Probability that a frame is glitched at all.
const GLITCH_PROBABILITY: f64 = 0.3;

/// Randomly displace horizontal slices of `frame` and split a color channel.
///
/// Most frames pass through untouched. Returns `true` when the frame was modified.
pub fn glitch_frame<R: Rng + ?Sized>(frame: &mut RgbImage, intensity: u32, rng: &mut R) -> bool {
    if rng.gen_range(0.0..1.0) > GLITCH_PROBABILITY {
        return false;
    }
    let (w, h) = frame.dimensions();
    if w == 0 || h == 0 {
        return false;
    }

    let max_disp = i64::from(intensity);
    let slices = rng.gen_range(3..=8);
    for _ in 0..slices {
        let slice_h = rng.gen_range(5..=(h / 10).max(5)).min(h);
        let y = rng.gen_range(0..=h - slice_h);
        let disp = rng.gen_range(-max_disp..=max_disp);
        for row in y..y + slice_h {
            roll_row(frame, row, disp, 0..3);
        }
    }

    if rng.gen_range(0.0..1.0) > 0.5 {
        let shift = rng.gen_range(1..=5i64);
        let (channel, disp) = if rng.gen_range(0.0..1.0) > 0.5 {
            (0, shift)
        } else {
            (2, -shift)
        };
        for row in 0..h {
            roll_row(frame, row, disp, channel..channel + 1);
        }
    }
    true
}

/// Rotate `channels` of one row right by `disp` pixels (left when negative), wrapping around.
fn roll_row(frame: &mut RgbImage, row: u32, disp: i64, channels: std::ops::Range<usize>) {
    let w = frame.width() as usize;
    let shift = disp.rem_euclid(w as i64) as usize;
    if shift == 0 {
        return;
    }
    let start = row as usize * w * 3;
    let data: &mut [u8] = &mut *frame;
    let line = &mut data[start..start + w * 3];
    if channels.len() == 3 {
        line.rotate_right(shift * 3);
        return;
    }
    for c in channels {
        let mut plane: Vec<u8> = line.iter().skip(c).step_by(3).copied().collect();
        plane.rotate_right(shift);
        for (px, v) in line.chunks_exact_mut(3).zip(plane) {
            px[c] = v;
        }
    }
}

/// Stateful glitch filter owning its random source.
#[derive(Debug)]
pub struct GlitchEffect {
    intensity: u32,
    rng: StdRng,
}

impl GlitchEffect {
    /// Filter with `intensity` max displacement; `seed` makes the output reproducible.
    pub fn new(intensity: u32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { intensity, rng }
    }

    /// Maximum slice displacement in pixels.
    pub fn intensity(&self) -> u32 {
        self.intensity
    }

    /// Glitch one frame in place. Returns `true` when it was modified.
    pub fn apply(&mut self, frame: &mut RgbImage) -> bool {
        glitch_frame(frame, self.intensity, &mut self.rng)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/glitch.rs"]
mod tests;

use image::RgbImage;

use crate::foundation::error::{TextclipError, TextclipResult};
use crate::foundation::math::{mul_div255_u8, scale_u8};

/// Brightness multiplier at `t` seconds for a clip faded in and out over `fade` seconds.
///
/// `fade <= 0` disables fading.
pub fn fade_factor(t: f64, duration: f64, fade: f64) -> f32 {
    if fade <= 0.0 {
        return 1.0;
    }
    let fade_in = t / fade;
    let fade_out = (duration - t) / fade;
    fade_in.min(fade_out).clamp(0.0, 1.0) as f32
}

/// Composite a premultiplied RGBA8 layer "over" an opaque RGB frame in place.
pub fn over_premul_in_place(frame: &mut RgbImage, layer: &[u8]) -> TextclipResult<()> {
    let px = frame.as_raw().len() / 3;
    if layer.len() != px * 4 {
        return Err(TextclipError::validation(
            "over_premul_in_place expects a layer matching the frame size",
        ));
    }
    for (d, s) in frame.chunks_exact_mut(3).zip(layer.chunks_exact(4)) {
        let sa = s[3];
        if sa == 0 {
            continue;
        }
        let inv = 255u16 - u16::from(sa);
        for i in 0..3 {
            let dc = mul_div255_u8(u16::from(d[i]), inv);
            d[i] = s[i].saturating_add(dc);
        }
    }
    Ok(())
}

/// Fade every channel toward black by `factor` (1 keeps the frame, 0 is black).
pub fn fade_in_place(frame: &mut RgbImage, factor: f32) {
    if factor >= 1.0 {
        return;
    }
    for c in frame.iter_mut() {
        *c = scale_u8(*c, factor);
    }
}

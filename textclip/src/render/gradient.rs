use image::RgbImage;

use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{TextclipError, TextclipResult};

/// A still image held on screen for `duration` seconds.
#[derive(Clone, Debug)]
pub struct BackgroundClip {
    /// Background pixels, sized to the canvas.
    pub image: RgbImage,
    /// How long the background is shown, in seconds.
    pub duration: f64,
}

/// Vertical linear gradient through `stops`, evenly spaced from the top row to the bottom row.
///
/// Channels are interpolated in floating point and truncated to `u8`. A single stop fills the
/// image with that color.
pub fn gradient_image(width: u32, height: u32, stops: &[Rgb8]) -> TextclipResult<RgbImage> {
    if stops.is_empty() {
        return Err(TextclipError::validation(
            "gradient needs at least one color stop",
        ));
    }
    if width == 0 || height == 0 {
        return Err(TextclipError::validation(
            "gradient width/height must be non-zero",
        ));
    }

    let n = stops.len();
    let mut img = RgbImage::new(width, height);
    for y in 0..height {
        let t = if height > 1 {
            f64::from(y) / f64::from(height - 1)
        } else {
            0.0
        };
        let row = image::Rgb(row_color(stops, t * (n - 1) as f64));
        for x in 0..width {
            img.put_pixel(x, y, row);
        }
    }
    Ok(img)
}

fn row_color(stops: &[Rgb8], idx_f: f64) -> [u8; 3] {
    let n = stops.len();
    if n == 1 {
        return stops[0].to_array();
    }
    let idx = (idx_f.floor() as usize).min(n - 2);
    let frac = idx_f - idx as f64;
    let c1 = stops[idx].to_array();
    let c2 = stops[idx + 1].to_array();
    std::array::from_fn(|i| (f64::from(c1[i]) * (1.0 - frac) + f64::from(c2[i]) * frac) as u8)
}

/// Gradient background clip for `canvas`, held for `duration` seconds.
pub fn create_gradient_clip(
    canvas: Canvas,
    stops: &[Rgb8],
    duration: f64,
) -> TextclipResult<BackgroundClip> {
    Ok(BackgroundClip {
        image: gradient_image(canvas.width, canvas.height, stops)?,
        duration,
    })
}

/// Solid-color background clip for `canvas`, held for `duration` seconds.
pub fn solid_clip(canvas: Canvas, color: Rgb8, duration: f64) -> TextclipResult<BackgroundClip> {
    create_gradient_clip(canvas, &[color], duration)
}

#[cfg(test)]
#[path = "../../tests/unit/render/gradient.rs"]
mod tests;

use crate::text::layout::{FontMetrics, LoadedFont, TextLayoutEngine};
use crate::text::wrap::{max_line_width, wrap_text_to_width};

/// Margin kept on each side of the wrap budget during the search, in pixels.
pub const WRAP_MARGIN_PX: f32 = 20.0;

/// Inclusive font size range searched by [`fit_font_size`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontSizeRange {
    /// Smallest size; returned when nothing larger fits.
    pub min: u32,
    /// Largest size tried first.
    pub max: u32,
}

impl FontSizeRange {
    /// Range `[min, max]`. A `max` below `min` searches nothing and yields `min`.
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

impl Default for FontSizeRange {
    fn default() -> Self {
        Self { min: 10, max: 100 }
    }
}

/// Largest size in `range` whose wrapped text fits `max_width` with `padding` on both sides.
///
/// Sizes are tried from `range.max` down to `range.min + 1`; the text is wrapped at
/// `max_width - 2 * WRAP_MARGIN_PX` and accepted once `widest_line + 2 * padding <= max_width`.
/// When no size fits, `range.min` is returned as a best effort.
pub fn fit_font_size<M: FontMetrics + ?Sized>(
    text: &str,
    metrics: &mut M,
    max_width: f32,
    padding: f32,
    range: FontSizeRange,
) -> u32 {
    let budget = max_width - 2.0 * WRAP_MARGIN_PX;
    for size in (range.min.saturating_add(1)..=range.max).rev() {
        let size_px = size as f32;
        let lines = wrap_text_to_width(text, metrics, size_px, budget);
        let widest = max_line_width(&lines, metrics, size_px);
        if widest + 2.0 * padding <= max_width {
            return size;
        }
    }
    range.min
}

/// Outcome of [`autofit`]: the chosen size and the font it was measured with.
#[derive(Clone, Debug)]
pub struct FittedFont {
    /// Chosen font size in pixels.
    pub size: u32,
    /// Font used for measurement (possibly the fallback face).
    pub font: LoadedFont,
}

/// Resolve `font` and search `range` for the largest size fitting `max_width`.
#[tracing::instrument(skip(engine, text), fields(text_len = text.len()))]
pub fn autofit(
    engine: &mut TextLayoutEngine,
    text: &str,
    font: &str,
    max_width: f32,
    padding: f32,
    range: FontSizeRange,
) -> FittedFont {
    let loaded = engine.load_font(font);
    let size = {
        let mut metrics = engine.metrics(&loaded);
        fit_font_size(text, &mut metrics, max_width, padding, range)
    };
    tracing::debug!(size, fallback = loaded.is_fallback(), "autofit font size");
    FittedFont { size, font: loaded }
}

#[cfg(test)]
#[path = "../../tests/unit/text/autofit.rs"]
mod tests;

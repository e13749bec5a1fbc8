use crate::text::layout::FontMetrics;

/// Greedily wrap `text` into lines no wider than `max_width` pixels at `size_px`.
///
/// Tokens are whitespace-separated words. A line always starts with a whole word, even when
/// that word alone overflows `max_width`; words are never split. Empty input yields no lines.
pub fn wrap_text_to_width<M: FontMetrics + ?Sized>(
    text: &str,
    metrics: &mut M,
    size_px: f32,
    max_width: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return lines;
    };

    let mut current = first.to_owned();
    for word in words {
        let candidate = format!("{current} {word}");
        if metrics.text_width(&candidate, size_px) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_owned()));
        }
    }
    lines.push(current);
    lines
}

/// Widest line in `lines`, in pixels.
pub fn max_line_width<M: FontMetrics + ?Sized>(
    lines: &[String],
    metrics: &mut M,
    size_px: f32,
) -> f32 {
    lines
        .iter()
        .map(|line| metrics.text_width(line, size_px))
        .fold(0.0, f32::max)
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;

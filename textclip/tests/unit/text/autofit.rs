use super::*;
use crate::assets::font::FontResolver;
use crate::text::layout::CellMetrics;

fn mono() -> CellMetrics {
    CellMetrics { advance_em: 0.5 }
}

#[test]
fn result_stays_in_range() {
    let range = FontSizeRange::new(10, 120);
    for text in ["", "a", "Sukhbinder Singh", "a much longer caption with many words"] {
        for width in [0.0, 50.0, 300.0, 1920.0, 10_000.0] {
            let size = fit_font_size(text, &mut mono(), width, 30.0, range);
            assert!((range.min..=range.max).contains(&size), "{text} @ {width}: {size}");
        }
    }
}

#[test]
fn picks_largest_fitting_size() {
    // "abcd" is 2px per pixel of size; needs 2*size + 2*10 <= 220.
    let size = fit_font_size("abcd", &mut mono(), 220.0, 10.0, FontSizeRange::new(10, 200));
    assert_eq!(size, 100);
}

#[test]
fn falls_back_to_min_when_nothing_fits() {
    let size = fit_font_size(
        "unbreakable",
        &mut mono(),
        10.0,
        30.0,
        FontSizeRange::new(12, 80),
    );
    assert_eq!(size, 12);
}

#[test]
fn min_is_never_measured_as_a_candidate() {
    struct Counting(Vec<u32>);
    impl FontMetrics for Counting {
        fn text_width(&mut self, _text: &str, size_px: f32) -> f32 {
            self.0.push(size_px as u32);
            f32::INFINITY
        }
    }
    let mut m = Counting(Vec::new());
    let size = fit_font_size("a b", &mut m, 100.0, 0.0, FontSizeRange::new(5, 8));
    assert_eq!(size, 5);
    assert!(m.0.iter().all(|s| (6..=8).contains(s)));
    assert!(m.0.contains(&6));
}

#[test]
fn empty_or_inverted_range_returns_min() {
    assert_eq!(fit_font_size("x", &mut mono(), 1000.0, 0.0, FontSizeRange::new(40, 40)), 40);
    assert_eq!(fit_font_size("x", &mut mono(), 1000.0, 0.0, FontSizeRange::new(40, 20)), 40);
}

#[test]
fn non_increasing_as_width_shrinks() {
    let range = FontSizeRange::new(8, 150);
    let text = "The quick brown fox jumps over the lazy dog";
    let mut previous = u32::MAX;
    let mut width = 2000.0;
    while width > 0.0 {
        let size = fit_font_size(text, &mut mono(), width, 10.0, range);
        assert!(size <= previous, "width {width}: {size} > {previous}");
        previous = size;
        width -= 37.0;
    }
}

#[test]
fn autofit_without_fonts_uses_cell_metrics() {
    let resolver = FontResolver::with_database(usvg::fontdb::Database::new());
    let mut engine = TextLayoutEngine::with_resolver(resolver);
    let fitted = autofit(
        &mut engine,
        "Hello World",
        "Definitely Not A Font",
        1920.0,
        30.0,
        FontSizeRange::new(10, 210),
    );
    assert!(fitted.font.is_fallback());
    assert!((10..=210).contains(&fitted.size));
}

use super::*;
use crate::assets::font::FontResolver;
use kurbo::Point;

fn engine_without_fonts() -> TextLayoutEngine {
    TextLayoutEngine::with_resolver(FontResolver::with_database(usvg::fontdb::Database::new()))
}

fn empty_layer(width: u32, height: u32) -> CaptionLayer {
    let mut engine = engine_without_fonts();
    let font = engine.load_font("missing");
    CaptionLayer::new(
        &mut engine,
        Canvas::new(width, height).unwrap(),
        &["hello".to_owned()],
        &font,
        24.0,
        Rgb8::WHITE,
    )
    .unwrap()
}

#[test]
fn expand_scale_grows_then_holds() {
    assert_eq!(expand_scale(0, 20.0), 1.0);
    assert!((expand_scale(10, 20.0) - 1.05).abs() < 1e-12);
    assert!((expand_scale(20, 20.0) - 1.1).abs() < 1e-12);
    assert!((expand_scale(40, 20.0) - 1.1).abs() < 1e-12);
    assert!((expand_scale(0, 0.0) - 1.1).abs() < 1e-12);
}

#[test]
fn without_a_face_the_layer_is_transparent() {
    let mut layer = empty_layer(16, 8);
    assert!(layer.is_empty());
    assert_eq!(layer.block_size(), (0.0, 0.0));
    let px = layer.render(1.0);
    assert_eq!(px.len(), 16 * 8 * 4);
    assert!(px.iter().all(|b| *b == 0));
}

#[test]
fn placement_scales_about_the_canvas_center() {
    let layer = empty_layer(100, 50);
    let center = Point::new(50.0, 25.0);
    // An empty block sits at the center, so its origin is the fixed point of the scale.
    for scale in [1.0, 1.05, 1.1] {
        let p = layer.placement(scale) * Point::ORIGIN;
        assert!((p - center).hypot() < 1e-9, "scale {scale}: {p:?}");
    }
    let p = layer.placement(2.0) * Point::new(10.0, 0.0);
    assert!((p.x - 70.0).abs() < 1e-9);
}

#[test]
fn oversized_canvas_is_rejected() {
    let mut engine = engine_without_fonts();
    let font = engine.load_font("missing");
    let res = CaptionLayer::new(
        &mut engine,
        Canvas::new(70_000, 10).unwrap(),
        &[],
        &font,
        12.0,
        Rgb8::WHITE,
    );
    assert!(matches!(res, Err(TextclipError::Validation(_))));
}

fn system_font(engine: &mut TextLayoutEngine) -> Option<LoadedFont> {
    let font = engine.load_font("DejaVu Sans");
    font.face.is_some().then_some(font)
}

fn caption(engine: &mut TextLayoutEngine, lines: &[&str], size_px: f32) -> Option<CaptionLayer> {
    let font = system_font(engine)?;
    let lines: Vec<String> = lines.iter().map(|l| (*l).to_owned()).collect();
    Some(
        CaptionLayer::new(
            engine,
            Canvas::new(640, 200).unwrap(),
            &lines,
            &font,
            size_px,
            Rgb8::WHITE,
        )
        .unwrap(),
    )
}

/// Rows and columns holding any pixel with coverage.
fn lit_rows_and_cols(px: &[u8], width: usize) -> (Vec<usize>, Vec<usize>) {
    let mut rows = Vec::new();
    let mut cols = std::collections::BTreeSet::new();
    for (y, row) in px.chunks_exact(width * 4).enumerate() {
        let mut any = false;
        for (x, p) in row.chunks_exact(4).enumerate() {
            if p[3] > 64 {
                any = true;
                cols.insert(x);
            }
        }
        if any {
            rows.push(y);
        }
    }
    (rows, cols.into_iter().collect())
}

fn bands(rows: &[usize]) -> usize {
    rows.windows(2).filter(|w| w[1] != w[0] + 1).count() + usize::from(!rows.is_empty())
}

#[test]
fn glyphs_spread_across_the_centered_block() {
    let mut engine = TextLayoutEngine::new();
    let Some(mut layer) = caption(&mut engine, &["HHHHHHHHHH"], 40.0) else {
        eprintln!("skipping: no system fonts available");
        return;
    };
    let (bw, bh) = layer.block_size();
    assert!(bw > 100.0, "block width {bw}");
    let (rows, cols) = lit_rows_and_cols(layer.render(1.0), 640);
    let (x0, x1) = (cols[0] as f32, *cols.last().unwrap() as f32);
    let (y0, y1) = (rows[0] as f32, *rows.last().unwrap() as f32);

    let ink_w = x1 - x0 + 1.0;
    assert!(ink_w > 0.8 * bw && ink_w <= bw + 2.0, "ink {ink_w} vs block {bw}");
    assert!(((x0 + x1) / 2.0 - 320.0).abs() <= 6.0, "x range {x0}..{x1}");

    let (top, bottom) = (100.0 - bh / 2.0, 100.0 + bh / 2.0);
    assert!(y0 >= top - 1.0 && y1 <= bottom + 1.0, "y range {y0}..{y1} outside {top}..{bottom}");
    assert_eq!(bands(&rows), 1);
}

#[test]
fn wrapped_lines_land_in_separate_bands() {
    let mut engine = TextLayoutEngine::new();
    let Some(mut layer) = caption(&mut engine, &["HHHH", "HHHH"], 40.0) else {
        eprintln!("skipping: no system fonts available");
        return;
    };
    let (_, bh) = layer.block_size();
    let (rows, cols) = lit_rows_and_cols(layer.render(1.0), 640);
    assert_eq!(bands(&rows), 2, "rows {rows:?}");
    let (y0, y1) = (rows[0] as f32, *rows.last().unwrap() as f32);
    assert!(y1 - y0 > bh / 2.0, "lines overlap: {y0}..{y1}, block height {bh}");
    let (x0, x1) = (cols[0] as f32, *cols.last().unwrap() as f32);
    assert!(((x0 + x1) / 2.0 - 320.0).abs() <= 6.0, "x range {x0}..{x1}");
}

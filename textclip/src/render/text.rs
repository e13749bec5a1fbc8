use kurbo::{Affine, Vec2};

use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{TextclipError, TextclipResult};
use crate::text::layout::{LoadedFont, TextBrushRgba8, TextLayoutEngine, layout_extent};

/// Growth of the caption over the clip when expanding.
pub const EXPAND_GROWTH: f64 = 0.1;

/// Scale factor of an expanding caption at `frame` of a clip `total_frames` long.
///
/// Grows linearly from `1.0` to `1.0 + EXPAND_GROWTH` and holds there.
pub fn expand_scale(frame: u64, total_frames: f64) -> f64 {
    if total_frames <= 0.0 {
        return 1.0 + EXPAND_GROWTH;
    }
    1.0 + EXPAND_GROWTH * (frame as f64 / total_frames).min(1.0)
}

struct ShapedCaption {
    layout: parley::Layout<TextBrushRgba8>,
    font: vello_cpu::peniko::FontData,
}

/// Wrapped caption text rasterized onto a transparent canvas-sized layer.
///
/// The block of lines is centered on the canvas; `render` optionally scales it about the canvas
/// center. Pixels are premultiplied RGBA8.
pub struct CaptionLayer {
    canvas: Canvas,
    shaped: Option<ShapedCaption>,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    rendered_scale: Option<f64>,
}

impl CaptionLayer {
    /// Lay out `lines` with `font` at `size_px` in `color`.
    ///
    /// When no font face is available at all the layer stays empty.
    pub fn new(
        engine: &mut TextLayoutEngine,
        canvas: Canvas,
        lines: &[String],
        font: &LoadedFont,
        size_px: f32,
        color: Rgb8,
    ) -> TextclipResult<Self> {
        let width = u16::try_from(canvas.width)
            .map_err(|_| TextclipError::validation("canvas width exceeds 65535"))?;
        let height = u16::try_from(canvas.height)
            .map_err(|_| TextclipError::validation("canvas height exceeds 65535"))?;

        let shaped = match &font.face {
            Some(face) if !lines.is_empty() => {
                let brush = TextBrushRgba8 {
                    r: color.r,
                    g: color.g,
                    b: color.b,
                    a: 255,
                };
                let layout = engine.layout_text(&lines.join("\n"), &face.family, size_px, brush);
                let font = vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(face.face.bytes.as_ref().clone()),
                    face.face.index,
                );
                Some(ShapedCaption { layout, font })
            }
            Some(_) => None,
            None => {
                tracing::warn!("no font face available; caption left empty");
                None
            }
        };

        Ok(Self {
            canvas,
            shaped,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
            rendered_scale: None,
        })
    }

    /// `true` when nothing will ever be drawn.
    pub fn is_empty(&self) -> bool {
        self.shaped.is_none()
    }

    /// Size of the laid-out text block before scaling.
    pub fn block_size(&self) -> (f32, f32) {
        self.shaped
            .as_ref()
            .map(|s| layout_extent(&s.layout))
            .unwrap_or((0.0, 0.0))
    }

    /// Transform placing the block centered on the canvas, scaled by `scale` about the center.
    pub fn placement(&self, scale: f64) -> Affine {
        let (bw, bh) = self.block_size();
        let center = Vec2::new(
            f64::from(self.canvas.width) / 2.0,
            f64::from(self.canvas.height) / 2.0,
        );
        let origin = center - Vec2::new(f64::from(bw) / 2.0, f64::from(bh) / 2.0);
        Affine::translate(center)
            * Affine::scale(scale)
            * Affine::translate(-center)
            * Affine::translate(origin)
    }

    /// Rasterize the caption at `scale`, reusing the previous raster when the scale is unchanged.
    pub fn render(&mut self, scale: f64) -> &[u8] {
        if self.rendered_scale == Some(scale) {
            return self.pixmap.data_as_u8_slice();
        }
        let transform = self.placement(scale);
        self.pixmap.data_as_u8_slice_mut().fill(0);

        if let Some(shaped) = &self.shaped {
            let ctx = &mut self.ctx;
            ctx.reset();
            ctx.set_transform(affine_to_cpu(transform));
            for line in shaped.layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, brush.a,
                    ));
                    // Glyph positions carry the run offset and the line baseline.
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(&shaped.font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
            ctx.flush();
            ctx.render_to_pixmap(&mut self.pixmap);
        }

        self.rendered_scale = Some(scale);
        self.pixmap.data_as_u8_slice()
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;

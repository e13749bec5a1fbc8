use std::borrow::Cow;
use std::collections::HashMap;

use crate::assets::font::{FontFace, FontResolution, FontResolver};

/// Advance of one character, in em, used when no font face exists at all.
const CELL_ADVANCE_EM: f32 = 0.6;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Measures the rendered advance width of text.
pub trait FontMetrics {
    /// Width in pixels of `text` rendered on a single line at `size_px`.
    fn text_width(&mut self, text: &str, size_px: f32) -> f32;
}

/// Fixed-advance metrics: every character is `advance_em * size_px` wide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellMetrics {
    /// Per-character advance in em.
    pub advance_em: f32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            advance_em: CELL_ADVANCE_EM,
        }
    }
}

impl FontMetrics for CellMetrics {
    fn text_width(&mut self, text: &str, size_px: f32) -> f32 {
        text.chars().count() as f32 * self.advance_em * size_px
    }
}

/// A face registered with the layout engine's font collection.
#[derive(Clone, Debug)]
pub struct RegisteredFace {
    /// Backing font data (also needed by the rasterizer).
    pub face: FontFace,
    /// Family name Parley resolves the face under.
    pub family: String,
}

/// A resolved font ready for measurement and layout.
#[derive(Clone, Debug)]
pub struct LoadedFont {
    /// What the requested identifier resolved to.
    pub resolution: FontResolution,
    /// Face actually used: the requested one, the default one, or none.
    pub face: Option<RegisteredFace>,
}

impl LoadedFont {
    /// `true` when rendering uses something other than the requested font.
    pub fn is_fallback(&self) -> bool {
        self.resolution.is_fallback()
    }
}

/// Parley-backed text shaping and measurement.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    resolver: FontResolver,
    loaded: HashMap<String, LoadedFont>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine resolving fonts against the system font database.
    pub fn new() -> Self {
        Self::with_resolver(FontResolver::new())
    }

    /// Construct a layout engine with a custom font resolver.
    pub fn with_resolver(resolver: FontResolver) -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            resolver,
            loaded: HashMap::new(),
        }
    }

    /// Resolve `identifier` (font file path or family name) and register it for layout.
    ///
    /// Never fails: an unresolvable or unparsable font degrades to the default face. Results are
    /// cached per identifier.
    pub fn load_font(&mut self, identifier: &str) -> LoadedFont {
        if let Some(font) = self.loaded.get(identifier) {
            return font.clone();
        }
        let font = self.load_font_uncached(identifier);
        self.loaded.insert(identifier.to_owned(), font.clone());
        font
    }

    fn load_font_uncached(&mut self, identifier: &str) -> LoadedFont {
        let resolution = self.resolver.resolve(identifier);
        let requested = match &resolution {
            FontResolution::Loaded(face) => self.register(face.clone()),
            FontResolution::Fallback => None,
        };
        if let Some(face) = requested {
            return LoadedFont {
                resolution,
                face: Some(face),
            };
        }

        let face = self
            .resolver
            .default_face()
            .and_then(|face| self.register(face));
        tracing::warn!(
            font = identifier,
            default = face.as_ref().map(|f| f.family.as_str()),
            "font could not be resolved, falling back to the default font"
        );
        LoadedFont {
            resolution: FontResolution::Fallback,
            face,
        }
    }

    /// Metrics provider measuring with `font`.
    pub fn metrics<'a>(&'a mut self, font: &'a LoadedFont) -> EngineMetrics<'a> {
        match &font.face {
            Some(face) => EngineMetrics::Shaped {
                engine: self,
                family: &face.family,
            },
            None => EngineMetrics::Cell(CellMetrics::default()),
        }
    }

    /// Shape and lay out plain text with a registered family.
    ///
    /// Only hard breaks (`\n`) start new lines; lines are start-aligned.
    pub fn layout_text(
        &mut self,
        text: &str,
        family: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family.to_owned())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(
            None,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        layout
    }

    fn register(&mut self, face: FontFace) -> Option<RegisteredFace> {
        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(face.bytes.as_ref().clone()),
            None,
        );
        let Some(family_id) = families.first().map(|(id, _)| *id) else {
            tracing::warn!(origin = %face.origin, "no font families registered from font bytes");
            return None;
        };
        let family = self
            .font_ctx
            .collection
            .family_name(family_id)?
            .to_string();
        tracing::debug!(origin = %face.origin, family = %family, "registered font");
        Some(RegisteredFace { face, family })
    }
}

/// Width of the widest line and total line height of a laid-out block, in pixels.
pub fn layout_extent(layout: &parley::Layout<TextBrushRgba8>) -> (f32, f32) {
    let mut w = 0.0f32;
    let mut h = 0.0f32;
    for line in layout.lines() {
        let m = line.metrics();
        w = w.max(m.advance);
        h += m.ascent + m.descent + m.leading;
    }
    (w, h)
}

/// [`FontMetrics`] over a [`TextLayoutEngine`] and a loaded font.
pub enum EngineMetrics<'a> {
    /// Shape with Parley and report the laid-out width.
    Shaped {
        /// Engine doing the shaping.
        engine: &'a mut TextLayoutEngine,
        /// Registered family name.
        family: &'a str,
    },
    /// No face available anywhere; estimate with fixed cells.
    Cell(CellMetrics),
}

impl FontMetrics for EngineMetrics<'_> {
    fn text_width(&mut self, text: &str, size_px: f32) -> f32 {
        match self {
            Self::Shaped { engine, family } => {
                let layout =
                    engine.layout_text(text, family, size_px, TextBrushRgba8::default());
                layout_extent(&layout).0
            }
            Self::Cell(cell) => cell.text_width(text, size_px),
        }
    }
}

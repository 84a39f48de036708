// this_file: crates/gemtype-core/src/traits.rs

//! The contracts between the layout stage, the raster stage and font data
//!
//! - [`FontFace`] - metrics, cmap and outlines of one loaded font
//! - [`OutlineSink`] - receives a glyph outline at pixel scale
//! - [`ProgressSink`] - hears about phase transitions of a page render

use crate::types::GlyphId;

/// Vertical font metrics in font units
///
/// `descent` is negative for fonts whose descenders go below the baseline,
/// matching the sign convention of the `hhea` table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub line_gap: f32,
}

impl VerticalMetrics {
    /// Baseline-to-baseline distance in font units
    pub fn line_height(&self) -> f32 {
        self.ascent - self.descent + self.line_gap
    }
}

/// Glyph ink box in font units, y pointing up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphBounds {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

/// Receives outline segments, coordinates in pixels with y pointing up
pub trait OutlineSink {
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32);
    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32);
    fn close(&mut self);
}

/// Your window into one font
///
/// Fonts are read-only after loading, so one instance can serve every
/// worker thread at once.
///
/// ```ignore
/// struct MyFont;
///
/// impl FontFace for MyFont {
///     fn units_per_em(&self) -> u16 { 1000 }
///     fn glyph_id(&self, ch: char) -> Option<GlyphId> { ch.is_ascii().then_some(ch as u32) }
///     fn advance_width(&self, _glyph_id: GlyphId) -> f32 { 500.0 }
///     fn vertical_metrics(&self) -> VerticalMetrics {
///         VerticalMetrics { ascent: 800.0, descent: -200.0, line_gap: 0.0 }
///     }
///     fn glyph_bounds(&self, _glyph_id: GlyphId) -> Option<GlyphBounds> { None }
///     fn draw_glyph(&self, _: GlyphId, _: f32, _: &mut dyn OutlineSink) -> bool { false }
/// }
/// ```
pub trait FontFace: Send + Sync {
    /// The font's internal coordinate system scale
    fn units_per_em(&self) -> u16;

    /// Find the glyph that represents this character
    ///
    /// Returns None when the font doesn't contain this character.
    fn glyph_id(&self, ch: char) -> Option<GlyphId>;

    /// Horizontal advance in font units
    fn advance_width(&self, glyph_id: GlyphId) -> f32;

    /// Pair adjustment in font units, applied after `left`'s advance
    fn kerning(&self, _left: GlyphId, _right: GlyphId) -> f32 {
        0.0
    }

    fn vertical_metrics(&self) -> VerticalMetrics;

    /// Ink bounds in font units, None for glyphs without ink
    fn glyph_bounds(&self, glyph_id: GlyphId) -> Option<GlyphBounds>;

    /// Draw the outline at `size` pixels per em
    ///
    /// Returns false when the glyph has no outline to draw.
    fn draw_glyph(&self, glyph_id: GlyphId, size: f32, sink: &mut dyn OutlineSink) -> bool;

    /// Font units to pixels at `size` pixels per em
    fn scale_for(&self, size: f32) -> f32 {
        size / f32::from(self.units_per_em().max(1))
    }
}

/// Coarse progress of one page render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadingPhase {
    Layout,
    Rasterizing,
    Done,
}

/// Told about phase transitions so a UI can show where a render is
pub trait ProgressSink: Send + Sync {
    fn phase(&self, phase: LoadingPhase);
}

impl<F> ProgressSink for F
where
    F: Fn(LoadingPhase) + Send + Sync,
{
    fn phase(&self, phase: LoadingPhase) {
        self(phase)
    }
}

/// Sink for callers that don't track progress
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn phase(&self, _phase: LoadingPhase) {}
}

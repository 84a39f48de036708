// this_file: crates/gemtype-fontdb/src/lib.rs

//! Where fonts come to life: loading for gemtype
//!
//! The engine needs exactly two fonts, a proportional primary font and a
//! monospace font for preformatted text and fallback. Both are parsed with
//! `skrifa` and exposed through [`FontFace`].
//!
//! ## Memory Management
//!
//! Fonts store their raw data and create a `FontRef` on demand for parsing.
//! Vertical metrics, which the layout stage asks for on every line, are
//! read once at load time.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use read_fonts::tables::kern::SubtableKind;
use read_fonts::TableProvider;
use skrifa::instance::{LocationRef, Size};
use skrifa::outline::{DrawSettings, OutlinePen};
use skrifa::{FontRef as ReadFontRef, GlyphId, MetadataProvider};

use gemtype_core::{
    error::{FontLoadError, Result},
    traits::{FontFace, GlyphBounds, OutlineSink, VerticalMetrics},
    FontSet,
};

/// A font that's been brought into memory, ready to lay out text
///
/// For TTC collections, the `face_index` specifies which face to use.
pub struct Font {
    data: Vec<u8>,
    face_index: u32,
    units_per_em: u16,
    metrics: VerticalMetrics,
}

impl Font {
    /// Opens a font file from disk and makes it usable
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_index(path, 0)
    }

    /// Opens a specific face from a font file (for TTC collections)
    pub fn from_file_index(path: impl AsRef<Path>, face_index: u32) -> Result<Self> {
        let data = fs::read(path.as_ref())
            .map_err(|_| FontLoadError::FileNotFound(path.as_ref().display().to_string()))?;

        Self::from_data_index(data, face_index)
    }

    /// Turns raw font bytes into something we can work with
    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_data_index(data, 0)
    }

    /// Turns raw font bytes into a specific face (for TTC collections)
    pub fn from_data_index(data: Vec<u8>, face_index: u32) -> Result<Self> {
        let font_ref =
            ReadFontRef::from_index(&data, face_index).map_err(|_| FontLoadError::InvalidData)?;

        let m = font_ref.metrics(Size::unscaled(), LocationRef::default());
        let units_per_em = m.units_per_em;
        if units_per_em == 0 {
            return Err(FontLoadError::InvalidData.into());
        }
        let metrics = VerticalMetrics {
            ascent: m.ascent.abs(),
            descent: -m.descent.abs(),
            line_gap: m.leading.max(0.0),
        };

        log::debug!(
            "Loaded font face {}: {} units/em, {} kerning pairs",
            face_index,
            units_per_em,
            kerning_pairs(&font_ref)
        );

        Ok(Font {
            data,
            face_index,
            units_per_em,
            metrics,
        })
    }

    /// Returns the face index for TTC collections (0 for single fonts)
    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    /// Creates a FontRef on-demand for parsing operations
    fn font_ref(&self) -> Option<ReadFontRef<'_>> {
        ReadFontRef::from_index(&self.data, self.face_index).ok()
    }
}

/// Horizontal `kern` subtables that adjust advances along the line
fn kern_subtables<'a>(font: &ReadFontRef<'a>) -> impl Iterator<Item = SubtableKind<'a>> + 'a {
    font.kern()
        .into_iter()
        .flat_map(|kern| kern.subtables())
        .filter_map(|subtable| subtable.ok())
        .filter(|subtable| subtable.is_horizontal() && !subtable.is_cross_stream())
        .filter_map(|subtable| subtable.kind().ok())
}

/// Number of explicit pairs in format 0 subtables
fn kerning_pairs(font: &ReadFontRef<'_>) -> usize {
    kern_subtables(font)
        .map(|kind| match kind {
            SubtableKind::Format0(table) => table.pairs().len(),
            _ => 0,
        })
        .sum()
}

/// Forwards skrifa's outline callbacks to an [`OutlineSink`]
struct SinkPen<'a> {
    sink: &'a mut dyn OutlineSink,
}

impl OutlinePen for SinkPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.sink.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.sink.line_to(x, y);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.sink.quad_to(cx0, cy0, x, y);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.sink.curve_to(cx0, cy0, cx1, cy1, x, y);
    }

    fn close(&mut self) {
        self.sink.close();
    }
}

impl FontFace for Font {
    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn glyph_id(&self, ch: char) -> Option<u32> {
        self.font_ref()
            .and_then(|font| font.charmap().map(ch))
            .map(|gid| gid.to_u32())
            .filter(|gid| *gid != 0)
    }

    fn advance_width(&self, glyph_id: u32) -> f32 {
        self.font_ref()
            .and_then(|font| {
                font.glyph_metrics(Size::unscaled(), LocationRef::default())
                    .advance_width(GlyphId::new(glyph_id))
            })
            .unwrap_or(0.0)
    }

    fn kerning(&self, left: u32, right: u32) -> f32 {
        let Some(font) = self.font_ref() else {
            return 0.0;
        };
        let (left, right) = (GlyphId::new(left), GlyphId::new(right));
        let total: i32 = kern_subtables(&font)
            .filter_map(|kind| match kind {
                SubtableKind::Format0(table) => table.kerning(left, right),
                SubtableKind::Format2(table) => table.kerning(left, right),
                SubtableKind::Format3(table) => table.kerning(left, right),
                SubtableKind::Format1(_) => None,
            })
            .sum();
        total as f32
    }

    fn vertical_metrics(&self) -> VerticalMetrics {
        self.metrics
    }

    fn glyph_bounds(&self, glyph_id: u32) -> Option<GlyphBounds> {
        let font = self.font_ref()?;
        let bounds = font
            .glyph_metrics(Size::unscaled(), LocationRef::default())
            .bounds(GlyphId::new(glyph_id))?;
        if bounds.x_max <= bounds.x_min || bounds.y_max <= bounds.y_min {
            return None;
        }
        Some(GlyphBounds {
            x_min: bounds.x_min,
            y_min: bounds.y_min,
            x_max: bounds.x_max,
            y_max: bounds.y_max,
        })
    }

    fn draw_glyph(&self, glyph_id: u32, size: f32, sink: &mut dyn OutlineSink) -> bool {
        let Some(font) = self.font_ref() else {
            return false;
        };
        let outlines = font.outline_glyphs();
        let Some(glyph) = outlines.get(GlyphId::new(glyph_id)) else {
            return false;
        };
        let settings = DrawSettings::unhinted(Size::new(size), LocationRef::default());
        let mut pen = SinkPen { sink };
        match glyph.draw(settings, &mut pen) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("Failed to draw glyph {}: {:?}", glyph_id, e);
                false
            },
        }
    }
}

/// Load the primary and monospace fonts into a fallback chain
pub fn load_font_set(primary: impl AsRef<Path>, monospace: impl AsRef<Path>) -> Result<FontSet> {
    let primary = Arc::new(Font::from_file(primary)?);
    let monospace = Arc::new(Font::from_file(monospace)?);
    Ok(FontSet::new(primary, monospace))
}

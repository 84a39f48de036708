// this_file: crates/gemtype-core/src/fonts.rs

//! The ordered font fallback chain

use std::fmt;
use std::sync::Arc;

use crate::traits::FontFace;
use crate::types::{FontId, GlyphId};

/// A glyph together with the font that supplied it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedGlyph {
    pub font: FontId,
    pub glyph: GlyphId,
}

/// Fonts tried in order when a character has to be drawn
///
/// Slot 0 is the primary proportional font and slot 1 the monospace font.
/// A lookup starts at the paragraph's base font and walks the remaining
/// slots in order, so every font can stand in for every other.
#[derive(Clone)]
pub struct FontSet {
    faces: Vec<Arc<dyn FontFace>>,
}

impl FontSet {
    pub fn new(primary: Arc<dyn FontFace>, monospace: Arc<dyn FontFace>) -> Self {
        Self {
            faces: vec![primary, monospace],
        }
    }

    /// The font behind `id`, the primary font for unknown ids
    pub fn face(&self, id: FontId) -> &dyn FontFace {
        let face = self.faces.get(id.0).unwrap_or(&self.faces[0]);
        face.as_ref()
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Candidate order for a lookup starting at `base`
    pub fn candidates(&self, base: FontId) -> impl Iterator<Item = FontId> + '_ {
        let base = if base.0 < self.faces.len() {
            base
        } else {
            FontId::PRIMARY
        };
        std::iter::once(base).chain((0..self.faces.len()).map(FontId).filter(move |id| *id != base))
    }

    /// Find a glyph for `ch`, starting at `base`
    ///
    /// When no font knows the character the base font's `.notdef` is used.
    pub fn resolve(&self, base: FontId, ch: char) -> ResolvedGlyph {
        for id in self.candidates(base) {
            if let Some(glyph) = self.face(id).glyph_id(ch) {
                return ResolvedGlyph { font: id, glyph };
            }
        }
        log::warn!("No font has a glyph for U+{:04X}", ch as u32);
        ResolvedGlyph {
            font: self.candidates(base).next().unwrap_or(FontId::PRIMARY),
            glyph: 0,
        }
    }
}

impl fmt::Debug for FontSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontSet").field("faces", &self.faces.len()).finish()
    }
}

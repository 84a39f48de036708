// this_file: backends/gemtype-layout/src/lib.rs

//! Greedy layout - paragraphs in, positioned glyphs out
//!
//! Every paragraph starts on a fresh line at the left edge. Glyphs are
//! placed left to right with their kerned advances until the next glyph's
//! ink would cross the right edge; then the line is cut, preferably at a
//! word boundary near the end of the line and otherwise mid-word with a
//! synthetic hyphen.
//!
//! Glyphs of the line being built live in a scratch buffer. Cutting a line
//! means committing a prefix of that buffer and rescanning the source text
//! from the cut point, so committed output is never touched again.

use gemtype_core::{
    error::{GemtypeError, Result},
    types::{FontId, GlyphPlacement, LineKind, LinkBox, Paragraph, Rect},
    EngineConfig, FontSet,
};
use gemtype_unicode::{decode, decode_codepoint, validate};

/// Marker drawn in front of link text, taken from the monospace font
pub const LINK_ARROW: char = '\u{2192}';

/// Drawn at the end of a line that was cut mid-word
pub const BREAK_HYPHEN: char = '-';

/// Everything the rasterizer and the hit-tester need from one page
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub glyphs: Vec<GlyphPlacement>,
    pub links: Vec<LinkBox>,
    pub width: u32,
    pub height: u32,
}

/// A place the current line may be cut
#[derive(Debug, Clone, Copy)]
struct BreakPoint {
    /// Scratch glyphs that stay on the line
    keep: usize,
    /// Byte offset the next line starts scanning at
    resume: usize,
    /// Pen position right after the kept glyphs
    x: f32,
}

/// Lays out pages and labels with the configured sizes
pub struct GreedyLayout<'a> {
    fonts: &'a FontSet,
    config: &'a EngineConfig,
}

/// Per-paragraph layout state
struct Cursor<'t> {
    text: &'t [u8],
    kind: LineKind,
    base: FontId,
    size: f32,
    line_height: f32,
    baseline: f32,
    x: f32,
    extent: f32,
    /// Glyphs at the start of the line that can't stand alone (link arrow)
    prefix: usize,
    line: Vec<GlyphPlacement>,
    good: Option<BreakPoint>,
    bad: Option<BreakPoint>,
}

impl<'a> GreedyLayout<'a> {
    pub fn new(fonts: &'a FontSet, config: &'a EngineConfig) -> Self {
        Self { fonts, config }
    }

    /// Lay out classified paragraphs into a column `width` pixels wide
    ///
    /// `scale` is the device scale; point sizes are multiplied by it.
    /// Fails with `InvalidEncoding` if any paragraph or link target isn't
    /// valid UTF-8, in which case nothing is returned. The reported offset
    /// is a document offset, taken from the paragraph's own.
    pub fn layout_page(
        &self,
        paragraphs: &[Paragraph<'_>],
        width: u32,
        scale: f32,
    ) -> Result<PageLayout> {
        log::debug!(
            "Laying out {} paragraphs at width {} scale {}",
            paragraphs.len(),
            width,
            scale
        );

        let mut glyphs = Vec::new();
        let mut links = Vec::new();
        let mut cursor_y = 0.0f32;

        for paragraph in paragraphs {
            let top = cursor_y;
            let extent = self
                .layout_paragraph(
                    paragraph.text,
                    paragraph.kind,
                    width as f32,
                    scale,
                    &mut cursor_y,
                    &mut glyphs,
                )
                .map_err(|e| shift_offset(e, paragraph.offset))?;

            if let (LineKind::Link, Some(target)) = (paragraph.kind, paragraph.link_target) {
                let y = top.round();
                links.push(LinkBox {
                    rect: Rect {
                        x: 0,
                        y: y as i32,
                        width: extent.ceil().max(0.0) as u32,
                        height: (cursor_y.round() - y).max(0.0) as u32,
                    },
                    target: validate(target)
                        .map_err(|e| shift_offset(e, paragraph.target_offset))?
                        .to_owned(),
                });
            }
        }

        Ok(PageLayout {
            glyphs,
            links,
            width,
            height: cursor_y.round().max(0.0) as u32,
        })
    }

    /// Lay out one unwrapped line of medium-heading text
    ///
    /// The layout is exactly as wide as the text's extent.
    pub fn layout_label(&self, text: &str, scale: f32) -> Result<PageLayout> {
        let mut glyphs = Vec::new();
        let mut cursor_y = 0.0f32;
        let extent = self.layout_paragraph(
            text.as_bytes(),
            LineKind::HeadingMedium,
            f32::INFINITY,
            scale,
            &mut cursor_y,
            &mut glyphs,
        )?;

        Ok(PageLayout {
            glyphs,
            links: Vec::new(),
            width: extent.ceil().max(0.0) as u32,
            height: cursor_y.round().max(0.0) as u32,
        })
    }

    /// Returns the widest line extent of the paragraph
    fn layout_paragraph(
        &self,
        text: &[u8],
        kind: LineKind,
        width: f32,
        scale: f32,
        cursor_y: &mut f32,
        out: &mut Vec<GlyphPlacement>,
    ) -> Result<f32> {
        let base = match kind {
            LineKind::Preformatted => FontId::MONOSPACE,
            _ => FontId::PRIMARY,
        };
        let size = self.config.sizes.for_kind(kind) * scale;
        let face = self.fonts.face(base);
        let font_scale = face.scale_for(size);
        let metrics = face.vertical_metrics();

        let mut cursor = Cursor {
            text,
            kind,
            base,
            size,
            line_height: metrics.line_height() * font_scale,
            baseline: *cursor_y + metrics.ascent * font_scale,
            x: 0.0,
            extent: 0.0,
            prefix: 0,
            line: Vec::new(),
            good: None,
            bad: None,
        };

        if kind == LineKind::Link {
            let arrow = self.fonts.resolve(FontId::MONOSPACE, LINK_ARROW);
            let arrow_face = self.fonts.face(arrow.font);
            let advance = arrow_face.advance_width(arrow.glyph) * arrow_face.scale_for(size);
            cursor.line.push(GlyphPlacement {
                font: arrow.font,
                size,
                glyph: arrow.glyph,
                x: 0.0,
                y: cursor.baseline,
                advance,
                kind,
            });
            cursor.x = 2.0 * advance;
            cursor.prefix = 1;
        }

        let dash_advance = self.advance_of(base, BREAK_HYPHEN, size);
        let mut offset = 0;

        while offset < text.len() {
            let (ch, len) = decode(text, offset)?;
            let resolved = self.fonts.resolve(base, ch);
            let glyph_face = self.fonts.face(resolved.font);
            let glyph_scale = glyph_face.scale_for(size);

            let mut units = glyph_face.advance_width(resolved.glyph);
            if offset + len < text.len() {
                let next = decode_codepoint(text, offset + len)?;
                let next = self.fonts.resolve(base, next);
                if next.font == resolved.font {
                    units += glyph_face.kerning(resolved.glyph, next.glyph);
                }
            }
            let advance = units * glyph_scale;

            let ink_width = glyph_face
                .glyph_bounds(resolved.glyph)
                .map_or(0.0, |b| (b.x_max * glyph_scale).ceil() - (b.x_min * glyph_scale).floor());

            if cursor.line.len() > cursor.prefix && cursor.x + dash_advance <= width {
                cursor.bad = Some(BreakPoint {
                    keep: cursor.line.len(),
                    resume: offset,
                    x: cursor.x,
                });
            }

            let placement = GlyphPlacement {
                font: resolved.font,
                size,
                glyph: resolved.glyph,
                x: cursor.x,
                y: cursor.baseline,
                advance,
                kind,
            };

            if cursor.x + ink_width > width {
                if cursor.line.len() <= cursor.prefix {
                    // Nothing to cut yet: the glyph gets a line of its own.
                    cursor.line.push(placement);
                    cursor.x += advance;
                    offset += len;
                    if offset < text.len() {
                        let all = BreakPoint {
                            keep: cursor.line.len(),
                            resume: offset,
                            x: cursor.x,
                        };
                        offset = self.break_line(&mut cursor, all, false, out)?;
                    }
                } else if let Some(good) = cursor.good {
                    offset = self.break_line(&mut cursor, good, false, out)?;
                } else {
                    let bad = cursor.bad.unwrap_or(BreakPoint {
                        keep: cursor.line.len(),
                        resume: offset,
                        x: cursor.x,
                    });
                    offset = self.break_line(&mut cursor, bad, true, out)?;
                }
                continue;
            }

            let wide_enough = cursor.x >= self.config.break_threshold * width;
            cursor.line.push(placement);
            cursor.x += advance;

            if wide_enough {
                match ch {
                    ' ' | '\t' if cursor.line.len() - 1 > cursor.prefix => {
                        cursor.good = Some(BreakPoint {
                            keep: cursor.line.len() - 1,
                            resume: offset + len,
                            x: placement.x,
                        });
                    },
                    '-' => {
                        cursor.good = Some(BreakPoint {
                            keep: cursor.line.len(),
                            resume: offset + len,
                            x: cursor.x,
                        });
                    },
                    _ => {},
                }
            }
            offset += len;
        }

        let line = std::mem::take(&mut cursor.line);
        Self::commit(&mut cursor, line, out)?;

        *cursor_y = cursor.baseline
            + (-metrics.descent + metrics.line_gap) * font_scale;
        Ok(cursor.extent)
    }

    /// Cut the current line at `at` and start the next one
    ///
    /// Returns the byte offset scanning resumes from.
    fn break_line(
        &self,
        cursor: &mut Cursor<'_>,
        at: BreakPoint,
        hyphenate: bool,
        out: &mut Vec<GlyphPlacement>,
    ) -> Result<usize> {
        let mut line = std::mem::take(&mut cursor.line);
        line.truncate(at.keep);

        if hyphenate {
            let dash = self.fonts.resolve(cursor.base, BREAK_HYPHEN);
            let dash_face = self.fonts.face(dash.font);
            line.push(GlyphPlacement {
                font: dash.font,
                size: cursor.size,
                glyph: dash.glyph,
                x: at.x,
                y: cursor.baseline,
                advance: dash_face.advance_width(dash.glyph) * dash_face.scale_for(cursor.size),
                kind: cursor.kind,
            });
        }

        log::trace!(
            "Line break at byte {} of {} ({} glyphs kept{})",
            at.resume,
            cursor.text.len(),
            line.len(),
            if hyphenate { ", hyphenated" } else { "" }
        );

        Self::commit(cursor, line, out)?;

        cursor.x = 0.0;
        cursor.baseline += cursor.line_height;
        cursor.prefix = 0;
        cursor.good = None;
        cursor.bad = None;
        Ok(at.resume)
    }

    fn commit(
        cursor: &mut Cursor<'_>,
        mut line: Vec<GlyphPlacement>,
        out: &mut Vec<GlyphPlacement>,
    ) -> Result<()> {
        if let Some(extent) = line.iter().map(|g| g.x + g.advance).reduce(f32::max) {
            cursor.extent = cursor.extent.max(extent);
        }
        out.try_reserve(line.len())?;
        out.append(&mut line);
        // Hand the allocation back for the next line.
        cursor.line = line;
        Ok(())
    }

    fn advance_of(&self, base: FontId, ch: char, size: f32) -> f32 {
        let resolved = self.fonts.resolve(base, ch);
        let face = self.fonts.face(resolved.font);
        face.advance_width(resolved.glyph) * face.scale_for(size)
    }
}

/// Move a decode error from paragraph to document coordinates
fn shift_offset(err: GemtypeError, start: usize) -> GemtypeError {
    match err {
        GemtypeError::InvalidEncoding { offset } => GemtypeError::InvalidEncoding {
            offset: start + offset,
        },
        other => other,
    }
}

// this_file: backends/gemtype-render-zeno/src/lib.rs

//! Zeno rasterizer - positioned glyphs in, RGBA surface out
//!
//! Outlines are collected twice while a glyph is drawn:
//!
//! 1. **SVG path data** for Zeno's rasterizer (that's what it eats)
//! 2. **kurbo paths** for exact bounding boxes without reparsing
//!
//! Glyph coverage is added onto the surface instead of replacing what is
//! there, clamped at full opacity, so overlapping ink never punches holes.
//! Links then get an underline drawn under each run of link glyphs.

use kurbo::Shape;
use zeno::Mask;

use gemtype_core::{
    error::{GemtypeError, Result},
    traits::OutlineSink,
    types::{GlyphPlacement, LineKind, Surface},
    Color, EngineConfig, FontSet,
};

/// Paints glyph placements with the configured colors
pub struct ZenoRasterizer<'a> {
    fonts: &'a FontSet,
    config: &'a EngineConfig,
}

/// One glyph's coverage, positioned in surface pixels
struct GlyphMask {
    left: i32,
    top: i32,
    width: usize,
    coverage: Vec<u8>,
}

impl<'a> ZenoRasterizer<'a> {
    pub fn new(fonts: &'a FontSet, config: &'a EngineConfig) -> Self {
        Self { fonts, config }
    }

    /// Paint `glyphs` onto a fresh `width` x `height` surface
    ///
    /// `scale` is the device scale the glyphs were laid out at; it sizes
    /// the link underline.
    pub fn rasterize(
        &self,
        glyphs: &[GlyphPlacement],
        width: u32,
        height: u32,
        scale: f32,
    ) -> Result<Surface> {
        log::debug!(
            "Rasterizing {} glyphs onto {}x{}",
            glyphs.len(),
            width,
            height
        );

        let mut surface = Surface::new(width, height)?;

        for glyph in glyphs {
            let Some(mask) = self.render_glyph(glyph, width, height)? else {
                continue;
            };
            let color = self.color_for(glyph.kind);
            for (row, line) in mask.coverage.chunks_exact(mask.width).enumerate() {
                for (col, coverage) in line.iter().enumerate() {
                    surface.accumulate(
                        mask.left + col as i32,
                        mask.top + row as i32,
                        *coverage,
                        color,
                    );
                }
            }
        }

        self.underline_links(&mut surface, glyphs, scale);
        Ok(surface)
    }

    fn color_for(&self, kind: LineKind) -> Color {
        match kind {
            LineKind::Link => self.config.link_color,
            _ => self.config.text_color,
        }
    }

    /// Turns a single glyph outline into a coverage mask
    ///
    /// The mask covers only the part of the glyph inside the surface. Glyphs
    /// without an outline (spaces) or entirely off the surface yield None.
    fn render_glyph(
        &self,
        glyph: &GlyphPlacement,
        surface_width: u32,
        surface_height: u32,
    ) -> Result<Option<GlyphMask>> {
        let face = self.fonts.face(glyph.font);
        let mut builder = ZenoPathBuilder::new(glyph.x, glyph.y);
        if !face.draw_glyph(glyph.glyph, glyph.size, &mut builder) {
            return Ok(None);
        }
        let (path_data, kurbo_path) = builder.finish();
        if path_data.is_empty() {
            return Ok(None);
        }

        let bbox = kurbo_path.bounding_box();
        if !(bbox.x0.is_finite() && bbox.y0.is_finite() && bbox.x1.is_finite() && bbox.y1.is_finite())
        {
            return Ok(None);
        }

        // Clip to the surface; ink outside it would be dropped anyway.
        let left = bbox.x0.floor().max(0.0);
        let top = bbox.y0.floor().max(0.0);
        let right = bbox.x1.ceil().min(f64::from(surface_width));
        let bottom = bbox.y1.ceil().min(f64::from(surface_height));
        if right <= left || bottom <= top {
            return Ok(None);
        }
        let (left, top) = (left as i32, top as i32);
        let width = (right as i64 - i64::from(left)) as usize;
        let height = (bottom as i64 - i64::from(top)) as usize;

        let len = width.checked_mul(height).ok_or(GemtypeError::OutOfMemory)?;
        let mut coverage = Vec::new();
        coverage.try_reserve_exact(len)?;
        coverage.resize(len, 0u8);
        Mask::new(path_data.as_str())
            .size(width as u32, height as u32)
            .offset((-left, -top))
            .render_into(&mut coverage, None);

        Ok(Some(GlyphMask {
            left,
            top,
            width,
            coverage,
        }))
    }

    /// Underline every run of link glyphs that share a baseline
    fn underline_links(&self, surface: &mut Surface, glyphs: &[GlyphPlacement], scale: f32) {
        let color = self.config.link_color;
        let offset = (self.config.underline_offset * scale).ceil() as i32;
        let thickness = ((self.config.underline_thickness * scale).round() as i32).max(1);

        let mut start = 0;
        while start < glyphs.len() {
            let first = glyphs[start];
            let mut end = start + 1;
            if first.kind != LineKind::Link {
                start = end;
                continue;
            }
            while end < glyphs.len() && glyphs[end].kind == LineKind::Link && glyphs[end].y == first.y
            {
                end += 1;
            }
            let last = glyphs[end - 1];

            let x0 = first.x.floor() as i32;
            let x1 = (last.x + last.advance).ceil() as i32;
            let y0 = first.y.round() as i32 + offset;
            for y in y0..y0 + thickness {
                for x in x0..x1 {
                    // Skip ink: stay clear of anything that isn't underline.
                    let left_clear = surface.alpha(x - 1, y) == 0 || surface.is_color(x - 1, y, color);
                    if surface.alpha(x, y) == 0 && surface.alpha(x + 1, y) == 0 && left_clear {
                        surface.put(x, y, color);
                    }
                }
            }
            start = end;
        }
    }
}

/// Builds both an SVG path and a kurbo path from one outline
///
/// Points arrive in pixels relative to the pen with y up; they are stored
/// in surface space with y down.
struct ZenoPathBuilder {
    commands: Vec<String>,      // SVG commands for Zeno
    kurbo_path: kurbo::BezPath, // Path for kurbo's bounds calculation
    origin_x: f32,
    origin_y: f32,
}

impl ZenoPathBuilder {
    fn new(origin_x: f32, origin_y: f32) -> Self {
        Self {
            commands: Vec::new(),
            kurbo_path: kurbo::BezPath::new(),
            origin_x,
            origin_y,
        }
    }

    fn point(&self, x: f32, y: f32) -> (f32, f32) {
        (self.origin_x + x, self.origin_y - y)
    }

    fn finish(self) -> (String, kurbo::BezPath) {
        (self.commands.join(" "), self.kurbo_path)
    }
}

impl OutlineSink for ZenoPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.commands.push(format!("M {:.3},{:.3}", x, y));
        self.kurbo_path.move_to((x as f64, y as f64));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.commands.push(format!("L {:.3},{:.3}", x, y));
        self.kurbo_path.line_to((x as f64, y as f64));
    }

    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        let (cx, cy) = self.point(cx, cy);
        let (x, y) = self.point(x, y);
        self.commands
            .push(format!("Q {:.3},{:.3} {:.3},{:.3}", cx, cy, x, y));
        self.kurbo_path
            .quad_to((cx as f64, cy as f64), (x as f64, y as f64));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let (cx0, cy0) = self.point(cx0, cy0);
        let (cx1, cy1) = self.point(cx1, cy1);
        let (x, y) = self.point(x, y);
        self.commands.push(format!(
            "C {:.3},{:.3} {:.3},{:.3} {:.3},{:.3}",
            cx0, cy0, cx1, cy1, x, y
        ));
        self.kurbo_path.curve_to(
            (cx0 as f64, cy0 as f64),
            (cx1 as f64, cy1 as f64),
            (x as f64, y as f64),
        );
    }

    fn close(&mut self) {
        self.commands.push("Z".to_string());
        self.kurbo_path.close_path();
    }
}

// this_file: crates/gemtype-core/src/lib.rs

//! gemtype core: the shared vocabulary of the text/gemini engine
//!
//! A page goes through three stages before it reaches the screen:
//!
//! 1. **Classification** - raw markup becomes [`types::Paragraph`]s
//! 2. **Layout** - paragraphs become [`types::GlyphPlacement`]s and [`types::LinkBox`]es
//! 3. **Rasterization** - placements become a [`types::Surface`]
//!
//! This crate holds the data that flows between the stages, the
//! [`traits::FontFace`] contract every font implements, the [`FontSet`]
//! fallback chain, engine configuration and the error taxonomy.

pub mod config;
pub mod error;
pub mod fonts;
pub mod traits;

pub use config::{EngineConfig, PointSizes};
pub use error::{GemtypeError, Result};
pub use fonts::{FontSet, ResolvedGlyph};
pub use traits::{FontFace, LoadingPhase, NoProgress, OutlineSink, ProgressSink};

/// The data structures that flow between stages
pub mod types {
    use crate::error::{GemtypeError, Result};
    use crate::Color;

    /// Unique identifier for a glyph within a font
    pub type GlyphId = u32;

    /// Slot of a font in a [`crate::FontSet`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct FontId(pub usize);

    impl FontId {
        pub const PRIMARY: FontId = FontId(0);
        pub const MONOSPACE: FontId = FontId(1);
    }

    /// What a markup line is, decided by its prefix
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum LineKind {
        Text,
        Link,
        Preformatted,
        HeadingBig,
        HeadingMedium,
        HeadingSmall,
        ListItem,
        Quote,
    }

    /// One markup line, borrowing from the document buffer
    ///
    /// The bytes are not validated yet; layout decodes them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Paragraph<'a> {
        pub text: &'a [u8],
        pub link_target: Option<&'a [u8]>,
        pub kind: LineKind,
        /// Where `text` starts in the document, in bytes
        pub offset: usize,
        /// Where the link target starts in the document, in bytes
        pub target_offset: usize,
    }

    /// A glyph that knows exactly where it belongs
    ///
    /// `x` is the pen position and `y` the baseline, both in fractional
    /// pixels from the top-left corner of the surface.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct GlyphPlacement {
        pub font: FontId,
        /// Pixels per em, device scale included
        pub size: f32,
        pub glyph: GlyphId,
        pub x: f32,
        pub y: f32,
        /// Kerned advance in pixels
        pub advance: f32,
        pub kind: LineKind,
    }

    /// Integer pixel rectangle, half-open on the right and bottom edges
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Rect {
        pub x: i32,
        pub y: i32,
        pub width: u32,
        pub height: u32,
    }

    impl Rect {
        pub fn right(&self) -> i32 {
            self.x.saturating_add_unsigned(self.width)
        }

        pub fn bottom(&self) -> i32 {
            self.y.saturating_add_unsigned(self.height)
        }

        pub fn contains(&self, x: i32, y: i32) -> bool {
            x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
        }
    }

    /// A clickable region and where it leads
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct LinkBox {
        pub rect: Rect,
        pub target: String,
    }

    /// RGBA8 pixels, row-major, straight color
    ///
    /// Alpha holds accumulated glyph coverage; the color channels hold the
    /// foreground color of the last glyph drawn on the pixel.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Surface {
        pub width: u32,
        pub height: u32,
        pub data: Vec<u8>,
    }

    impl Surface {
        /// Fully transparent surface
        ///
        /// Fails with `OutOfMemory` instead of aborting when the buffer
        /// can't be had.
        pub fn new(width: u32, height: u32) -> Result<Self> {
            let len = (width as usize)
                .checked_mul(height as usize)
                .and_then(|n| n.checked_mul(4))
                .ok_or(GemtypeError::OutOfMemory)?;
            let mut data = Vec::new();
            data.try_reserve_exact(len)?;
            data.resize(len, 0);
            Ok(Self {
                width,
                height,
                data,
            })
        }

        fn index(&self, x: i32, y: i32) -> Option<usize> {
            if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
                return None;
            }
            Some((y as usize * self.width as usize + x as usize) * 4)
        }

        /// RGBA of a pixel, None outside the surface
        pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
            let i = self.index(x, y)?;
            Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
        }

        /// Alpha of a pixel, 0 outside the surface
        pub fn alpha(&self, x: i32, y: i32) -> u8 {
            self.index(x, y).map_or(0, |i| self.data[i + 3])
        }

        /// Whether the pixel carries ink of exactly this color
        pub fn is_color(&self, x: i32, y: i32, color: Color) -> bool {
            self.pixel(x, y)
                .is_some_and(|p| p[3] > 0 && p[0] == color.r && p[1] == color.g && p[2] == color.b)
        }

        /// Add coverage to a pixel, clamping at full opacity
        pub fn accumulate(&mut self, x: i32, y: i32, coverage: u8, color: Color) {
            if coverage == 0 {
                return;
            }
            if let Some(i) = self.index(x, y) {
                let scaled = (u32::from(coverage) * u32::from(color.a) + 127) / 255;
                self.data[i] = color.r;
                self.data[i + 1] = color.g;
                self.data[i + 2] = color.b;
                self.data[i + 3] = (u32::from(self.data[i + 3]) + scaled).min(255) as u8;
            }
        }

        /// Overwrite a pixel with a solid color
        pub fn put(&mut self, x: i32, y: i32, color: Color) {
            if let Some(i) = self.index(x, y) {
                self.data[i..i + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
            }
        }

        /// Pixels with any coverage
        pub fn inked_pixels(&self) -> usize {
            self.data.chunks_exact(4).filter(|px| px[3] > 0).count()
        }
    }
}

/// Simple RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::rgba(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::rgba(255, 255, 255, 255)
    }
}

// this_file: crates/gemtype/src/engine.rs

//! The engine: fonts, settings and a label cache behind two render calls

use std::path::{Path, PathBuf};
use std::sync::Arc;

use gemtype_core::{
    config::validate_scale,
    error::{GemtypeError, Result},
    traits::{LoadingPhase, ProgressSink},
    types::{LinkBox, Surface},
    Color, EngineConfig, FontSet,
};
use gemtype_fontdb::Font;
use gemtype_layout::{GreedyLayout, PageLayout};
use gemtype_render_zeno::ZenoRasterizer;
use gemtype_unicode::validate;

use crate::LabelCache;

/// Why a page is being laid out
///
/// Both reasons run the same algorithm; the distinction only shows in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutReason {
    /// First layout of a freshly loaded document
    #[default]
    Load,
    /// The window width or device scale changed
    Relayout,
}

/// Target column and device scale for one page render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRequest {
    /// Column width in device pixels
    ///
    /// Zero is allowed: every glyph then gets a line of its own and the
    /// surface has no columns.
    pub width: u32,
    /// Physical to logical pixel ratio
    pub scale: f32,
    pub reason: LayoutReason,
}

impl PageRequest {
    pub fn new(width: u32, scale: f32) -> Self {
        Self {
            width,
            scale,
            reason: LayoutReason::Load,
        }
    }

    /// Same page again at a new size
    pub fn relayout(width: u32, scale: f32) -> Self {
        Self {
            width,
            scale,
            reason: LayoutReason::Relayout,
        }
    }

    fn validate(&self) -> Result<()> {
        validate_scale(self.scale)
    }
}

/// A finished page: pixels plus where the links are
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub surface: Surface,
    pub links: Vec<LinkBox>,
}

impl RenderedPage {
    /// The link under a pointer position, if any
    pub fn link_at(&self, x: i32, y: i32) -> Option<&LinkBox> {
        self.links.iter().find(|link| link.rect.contains(x, y))
    }

    pub fn into_parts(self) -> (Surface, Vec<LinkBox>) {
        (self.surface, self.links)
    }
}

/// Lays out and rasterizes pages and labels
///
/// Fonts and settings are fixed once built. Share one engine between render
/// threads with an `Arc`; only the label cache is mutable, and it locks.
pub struct Engine {
    fonts: FontSet,
    config: EngineConfig,
    labels: LabelCache,
}

impl Engine {
    /// Start building an engine
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Engine with the default look
    pub fn new(fonts: FontSet) -> Result<Self> {
        Self::builder().font_set(fonts).build()
    }

    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn label_cache(&self) -> &LabelCache {
        &self.labels
    }

    /// Classify and lay out a document without drawing it
    pub fn layout(&self, text: &[u8], request: &PageRequest) -> Result<PageLayout> {
        request.validate()?;
        self.layout_unchecked(text, request)
    }

    fn layout_unchecked(&self, text: &[u8], request: &PageRequest) -> Result<PageLayout> {
        // Toggle lines never become paragraphs, so check the whole buffer.
        validate(text)?;
        let paragraphs = gemtype_input::classify(text);
        GreedyLayout::new(&self.fonts, &self.config).layout_page(
            &paragraphs,
            request.width,
            request.scale,
        )
    }

    /// Render a whole document
    ///
    /// `progress` hears `Layout`, then `Rasterizing`, then `Done`. Any
    /// failure aborts the render; no partial surface or links come back.
    pub fn render_page(
        &self,
        text: &[u8],
        request: &PageRequest,
        progress: &dyn ProgressSink,
    ) -> Result<RenderedPage> {
        request.validate()?;
        log::debug!(
            "Rendering {} byte page ({:?}) at width {} scale {}",
            text.len(),
            request.reason,
            request.width,
            request.scale
        );

        progress.phase(LoadingPhase::Layout);
        let layout = self.layout_unchecked(text, request)?;

        progress.phase(LoadingPhase::Rasterizing);
        let surface = ZenoRasterizer::new(&self.fonts, &self.config).rasterize(
            &layout.glyphs,
            layout.width,
            layout.height,
            request.scale,
        )?;

        progress.phase(LoadingPhase::Done);
        log::debug!(
            "Rendered page {}x{} with {} links",
            surface.width,
            surface.height,
            layout.links.len()
        );
        Ok(RenderedPage {
            surface,
            links: layout.links,
        })
    }

    /// Render a one-line label, reusing an earlier render of the same text
    ///
    /// Labels are set as medium headings and are exactly as wide as their
    /// text. Equal text and scale give back the very same surface.
    pub fn render_label(&self, text: &str, scale: f32) -> Result<Arc<Surface>> {
        validate_scale(scale)?;
        self.labels.get_or_render(text, scale, || {
            let layout = GreedyLayout::new(&self.fonts, &self.config).layout_label(text, scale)?;
            ZenoRasterizer::new(&self.fonts, &self.config).rasterize(
                &layout.glyphs,
                layout.width,
                layout.height,
                scale,
            )
        })
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("fonts", &self.fonts)
            .field("config", &self.config)
            .field("labels", &self.labels)
            .finish()
    }
}

/// Build an engine piece by piece
///
/// Fonts come either as a ready [`FontSet`] or as two font files; the
/// files are read by `build()`.
#[derive(Default)]
pub struct EngineBuilder {
    fonts: Option<FontSet>,
    primary_path: Option<PathBuf>,
    monospace_path: Option<PathBuf>,
    config: EngineConfig,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use already loaded fonts
    pub fn font_set(mut self, fonts: FontSet) -> Self {
        self.fonts = Some(fonts);
        self
    }

    /// Proportional font for everything but preformatted text
    pub fn primary_font(mut self, path: impl AsRef<Path>) -> Self {
        self.primary_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Monospace font for preformatted text, link arrows and fallback
    pub fn monospace_font(mut self, path: impl AsRef<Path>) -> Self {
        self.monospace_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.config.text_color = color;
        self
    }

    pub fn link_color(mut self, color: Color) -> Self {
        self.config.link_color = color;
        self
    }

    pub fn build(self) -> Result<Engine> {
        self.config.validate()?;

        let fonts = match (self.fonts, self.primary_path, self.monospace_path) {
            (Some(fonts), None, None) => fonts,
            (None, Some(primary), Some(monospace)) => {
                log::info!(
                    "Loading fonts {} and {}",
                    primary.display(),
                    monospace.display()
                );
                FontSet::new(
                    Arc::new(Font::from_file(&primary)?),
                    Arc::new(Font::from_file(&monospace)?),
                )
            },
            (Some(_), _, _) => {
                return Err(GemtypeError::Config(
                    "give either a font set or font files, not both".into(),
                ))
            },
            (None, None, _) | (None, _, None) => {
                return Err(GemtypeError::Config(
                    "a primary and a monospace font are required".into(),
                ))
            },
        };

        Ok(Engine {
            fonts,
            config: self.config,
            labels: LabelCache::new(),
        })
    }
}

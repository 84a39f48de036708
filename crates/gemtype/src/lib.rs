// this_file: crates/gemtype/src/lib.rs

//! gemtype - text/gemini pages turned into pixels
//!
//! One call takes a raw document through four stages:
//! 1. Classification of markup lines into paragraphs
//! 2. Codepoint decoding, strict and on the fly
//! 3. Greedy layout with word and hyphen breaks and font fallback
//! 4. Rasterization with link underlines
//!
//! # Example
//!
//! ```ignore
//! use gemtype::prelude::*;
//!
//! let engine = Engine::builder()
//!     .primary_font("DejaVuSans.ttf")
//!     .monospace_font("DejaVuSansMono.ttf")
//!     .build()?;
//!
//! let page = engine.render_page(b"# Hello\n=> gemini://example.org/ Home\n", &PageRequest::new(600, 1.0), &NoProgress)?;
//! let banner = engine.render_label("Error: not found", 1.0)?;
//! ```

mod engine;
mod label_cache;

pub use engine::{Engine, EngineBuilder, LayoutReason, PageRequest, RenderedPage};
pub use label_cache::LabelCache;

pub use gemtype_core::{error, traits, types, Color, EngineConfig, FontSet, PointSizes};
pub use gemtype_fontdb as fontdb;
pub use gemtype_input as input;
pub use gemtype_layout::PageLayout;
pub use gemtype_unicode as unicode;

/// Common imports for typical usage
pub mod prelude {
    pub use crate::{Engine, EngineBuilder, LayoutReason, PageRequest, RenderedPage};
    pub use gemtype_core::{
        error::{GemtypeError, Result},
        traits::{LoadingPhase, NoProgress, ProgressSink},
        types::{LinkBox, Rect, Surface},
        Color, EngineConfig,
    };
}

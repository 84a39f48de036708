// this_file: crates/gemtype-export/src/lib.rs

//! Export for rendered pages
//!
//! Surfaces go out as PNG, link boxes as JSON.

pub mod json;
pub mod png;

pub use json::{encode_links, LinkRecord};
pub use png::{encode_png, PngExporter};

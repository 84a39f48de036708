// this_file: crates/gemtype-cli/src/commands/mod.rs

//! Command implementations

pub mod label;
pub mod render;

use std::fs;
use std::path::Path;

use gemtype::error::{ExportError, GemtypeError, Result};
use gemtype::{Color, Engine};
use gemtype_export::PngExporter;

use crate::cli::StyleArgs;

/// Parse `RRGGBB` or `RRGGBBAA`, with or without a leading `#`
pub fn parse_color(color_str: &str) -> Result<Color> {
    let hex = color_str.trim_start_matches('#');
    let invalid = || GemtypeError::Config(format!("Invalid color format: {color_str}"));

    if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
        return Err(GemtypeError::Config(
            "Color must be in RRGGBB or RRGGBBAA format".into(),
        ));
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

    let a = if hex.len() == 8 { channel(6)? } else { 255 };
    Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, a))
}

/// Build an engine from the shared font and color options
pub fn build_engine(style: &StyleArgs) -> Result<Engine> {
    let mut builder = Engine::builder()
        .primary_font(&style.font)
        .monospace_font(&style.mono_font);
    if let Some(color) = &style.text_color {
        builder = builder.text_color(parse_color(color)?);
    }
    if let Some(color) = &style.link_color {
        builder = builder.link_color(parse_color(color)?);
    }
    builder.build()
}

pub fn exporter(style: &StyleArgs) -> Result<PngExporter> {
    let exporter = PngExporter::new();
    Ok(match &style.background {
        Some(color) => exporter.with_background(parse_color(color)?),
        None => exporter,
    })
}

pub fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes)
        .map_err(|e| ExportError::WriteFailed(format!("{}: {}", path.display(), e)).into())
}

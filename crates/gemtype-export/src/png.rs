// this_file: crates/gemtype-export/src/png.rs

//! PNG export format
//!
//! Exports rendered surfaces to PNG format using the `image` crate.

use image::{ImageBuffer, ImageEncoder, RgbaImage};

use gemtype_core::{
    error::{ExportError, Result},
    types::Surface,
    Color,
};

/// Encode a surface as a transparent RGBA PNG
pub fn encode_png(surface: &Surface) -> Result<Vec<u8>> {
    let expected = surface.width as usize * surface.height as usize * 4;
    if surface.data.len() != expected {
        return Err(ExportError::EncodingFailed(format!(
            "Buffer size mismatch: expected {} bytes for {}x{}, got {}",
            expected,
            surface.width,
            surface.height,
            surface.data.len()
        ))
        .into());
    }
    if surface.width == 0 || surface.height == 0 {
        return Err(ExportError::EncodingFailed(format!(
            "PNG needs at least one pixel, surface is {}x{}",
            surface.width, surface.height
        ))
        .into());
    }

    let img: RgbaImage = ImageBuffer::from_raw(surface.width, surface.height, surface.data.clone())
        .ok_or_else(|| ExportError::EncodingFailed("Failed to create image buffer".into()))?;

    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut png_data,
        image::codecs::png::CompressionType::Default,
        image::codecs::png::FilterType::Sub,
    );

    encoder
        .write_image(
            img.as_raw(),
            surface.width,
            surface.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| ExportError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

    Ok(png_data)
}

/// Blend a surface over an opaque background
fn flatten(surface: &Surface, background: Color) -> Surface {
    let mut out = surface.clone();
    for px in out.data.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        let blend = |fg: u8, bg: u8| ((u32::from(fg) * a + u32::from(bg) * (255 - a) + 127) / 255) as u8;
        px[0] = blend(px[0], background.r);
        px[1] = blend(px[1], background.g);
        px[2] = blend(px[2], background.b);
        px[3] = 255;
    }
    out
}

/// PNG exporter for rendered surfaces
///
/// Without a background the PNG keeps the surface's transparency.
///
/// # Examples
///
/// ```
/// use gemtype_core::Color;
/// use gemtype_export::PngExporter;
///
/// let exporter = PngExporter::new().with_background(Color::rgba(0x22, 0x22, 0x22, 0xFF));
/// assert_eq!(exporter.extension(), "png");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PngExporter {
    background: Option<Color>,
}

impl PngExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paint the surface over this color before encoding
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = Some(background);
        self
    }

    pub fn export(&self, surface: &Surface) -> Result<Vec<u8>> {
        match self.background {
            Some(background) => encode_png(&flatten(surface, background)),
            None => encode_png(surface),
        }
    }

    pub fn extension(&self) -> &'static str {
        "png"
    }

    pub fn mime_type(&self) -> &'static str {
        "image/png"
    }
}

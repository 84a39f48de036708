// this_file: crates/gemtype-core/src/config.rs

//! Engine configuration
//!
//! Everything here has a working default; callers usually only touch the
//! colors.

use crate::error::{GemtypeError, Result};
use crate::types::LineKind;
use crate::Color;

/// Point sizes per line kind, before the device scale is applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSizes {
    pub text: f32,
    pub heading_small: f32,
    pub heading_medium: f32,
    pub heading_big: f32,
}

impl PointSizes {
    pub fn for_kind(&self, kind: LineKind) -> f32 {
        match kind {
            LineKind::HeadingBig => self.heading_big,
            LineKind::HeadingMedium => self.heading_medium,
            LineKind::HeadingSmall => self.heading_small,
            LineKind::Text
            | LineKind::Link
            | LineKind::Preformatted
            | LineKind::ListItem
            | LineKind::Quote => self.text,
        }
    }
}

impl Default for PointSizes {
    fn default() -> Self {
        Self {
            text: 16.0,
            heading_small: 20.0,
            heading_medium: 24.0,
            heading_big: 30.0,
        }
    }
}

/// How pages and labels should look
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub sizes: PointSizes,
    /// Color of every glyph that isn't part of a link
    pub text_color: Color,
    /// Color of link glyphs and their underlines
    pub link_color: Color,
    /// Fraction of the width a line must fill before word breaks are taken
    pub break_threshold: f32,
    /// Distance of the underline band below the baseline, in logical pixels
    pub underline_offset: f32,
    /// Underline band height in logical pixels
    pub underline_thickness: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sizes: PointSizes::default(),
            text_color: Color::rgba(0xDD, 0xDD, 0xDD, 0xFF),
            link_color: Color::rgba(0x88, 0xBB, 0xFF, 0xFF),
            break_threshold: 0.8,
            underline_offset: 2.0,
            underline_thickness: 1.0,
        }
    }
}

impl EngineConfig {
    /// Reject settings that could not lay out a page
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            self.sizes.text,
            self.sizes.heading_small,
            self.sizes.heading_medium,
            self.sizes.heading_big,
        ];
        if sizes.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(GemtypeError::Config(format!(
                "point sizes must be positive, got {:?}",
                self.sizes
            )));
        }
        if !(0.0..=1.0).contains(&self.break_threshold) {
            return Err(GemtypeError::Config(format!(
                "break threshold must lie in 0..=1, got {}",
                self.break_threshold
            )));
        }
        if !self.underline_offset.is_finite()
            || !self.underline_thickness.is_finite()
            || self.underline_thickness <= 0.0
        {
            return Err(GemtypeError::Config("invalid underline geometry".into()));
        }
        if self.text_color == self.link_color {
            return Err(GemtypeError::Config(
                "text and link colors must differ".into(),
            ));
        }
        Ok(())
    }
}

/// Reject scales that can't produce a surface
pub fn validate_scale(scale: f32) -> Result<()> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(GemtypeError::Config(format!(
            "scale must be positive and finite, got {scale}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn headings_descend_and_exceed_text() {
        let sizes = PointSizes::default();
        let big = sizes.for_kind(LineKind::HeadingBig);
        let medium = sizes.for_kind(LineKind::HeadingMedium);
        let small = sizes.for_kind(LineKind::HeadingSmall);
        let text = sizes.for_kind(LineKind::Text);
        assert!(big > medium && medium > small && small > text);
        assert_eq!(sizes.for_kind(LineKind::Link), text);
        assert_eq!(sizes.for_kind(LineKind::Preformatted), text);
    }

    #[test]
    fn rejects_equal_colors() {
        let config = EngineConfig {
            link_color: EngineConfig::default().text_color,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(GemtypeError::Config(_))));
    }

    #[test]
    fn rejects_bad_threshold() {
        let config = EngineConfig {
            break_threshold: 1.5,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn scale_must_be_positive() {
        assert!(validate_scale(1.0).is_ok());
        assert!(validate_scale(0.0).is_err());
        assert!(validate_scale(f32::NAN).is_err());
        assert!(validate_scale(-2.0).is_err());
    }
}

//! Font metrics for the layout engine.
//!
//! Labels are set either in the base-14 Helvetica faces, which need nothing
//! embedded, or in a TrueType font loaded from a file or (with the
//! `system-fonts` feature) found by family name through fontdb. The embedded
//! path is what lets addresses outside WinAnsi, such as Japanese or Cyrillic,
//! print as written.
//!
//! ## Platform Abstraction
//!
//! Line breaking only needs advance widths, so it is written against the
//! [`FontMetrics`] trait. [`LabelFonts`] is the production implementation.

mod loader;
mod standard;
mod truetype;

pub use loader::FontSettings;
pub use standard::{StandardFont, StandardFonts};
pub use truetype::{FaceDescriptor, FontFace};

use labelsheet_style::FontWeight;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FontError {
    #[error("Font not found: {family} (weight: {weight:?})")]
    NotFound { family: String, weight: FontWeight },

    #[error("Failed to load font '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Invalid font data: {0}")]
    InvalidData(String),

    #[error("Font parsing error: {0}")]
    ParseError(String),
}

/// Supplies horizontal advances for text measurement.
pub trait FontMetrics {
    /// Advance of `c` in thousandths of an em.
    fn char_width(&self, c: char, weight: FontWeight) -> f32;

    /// Width of `text` set at `font_size` points.
    fn text_width(&self, text: &str, weight: FontWeight, font_size: f32) -> f32 {
        let units: f32 = text.chars().map(|c| self.char_width(c, weight)).sum();
        units * font_size / 1000.0
    }
}

/// The pair of faces a sheet is set in.
///
/// Measurement and rendering must agree on the faces, so the pipeline builds
/// one of these and hands the same value to both.
#[derive(Debug, Clone, Default)]
pub enum LabelFonts {
    #[default]
    Standard,
    Embedded {
        regular: Arc<FontFace>,
        bold: Arc<FontFace>,
    },
}

impl LabelFonts {
    /// Embedded faces. Without a bold face, headings use the regular one.
    pub fn embedded(regular: FontFace, bold: Option<FontFace>) -> Self {
        let regular = Arc::new(regular);
        let bold = bold.map(Arc::new).unwrap_or_else(|| Arc::clone(&regular));
        LabelFonts::Embedded { regular, bold }
    }

    /// The embedded face for `weight`, if any.
    pub fn face(&self, weight: FontWeight) -> Option<&Arc<FontFace>> {
        match self {
            LabelFonts::Standard => None,
            LabelFonts::Embedded { regular, bold } => Some(match weight {
                FontWeight::Regular => regular,
                FontWeight::Bold => bold,
            }),
        }
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self, LabelFonts::Embedded { .. })
    }
}

impl FontMetrics for LabelFonts {
    fn char_width(&self, c: char, weight: FontWeight) -> f32 {
        match self.face(weight) {
            Some(face) => face.char_width(c),
            None => StandardFont::for_weight(weight).char_width(c),
        }
    }
}

/// Full-width scripts: CJK ideographs, kana, hangul and full-width forms.
/// Each of these characters is its own line-break opportunity.
pub fn is_wide(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x11FF
        | 0x2E80..=0x303F
        | 0x3040..=0x30FF
        | 0x3100..=0x9FFF
        | 0xAC00..=0xD7AF
        | 0xF900..=0xFAFF
        | 0xFF00..=0xFFEF
        | 0x20000..=0x2FFFF)
}

/// Paths of the test fonts kept at the workspace root.
#[cfg(test)]
pub(crate) mod fixtures {
    pub const REGULAR: &str = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../tests/fixtures/fonts/LabelTest-Regular.ttf"
    );
    pub const BOLD: &str = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../tests/fixtures/fonts/LabelTest-Bold.ttf"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_fonts() -> LabelFonts {
        let regular = FontFace::from_file(fixtures::REGULAR).unwrap();
        let bold = FontFace::from_file(fixtures::BOLD).unwrap();
        LabelFonts::embedded(regular, Some(bold))
    }

    #[test]
    fn test_standard_fonts_by_default() {
        let fonts = LabelFonts::default();
        assert!(!fonts.is_embedded());
        assert!(fonts.face(FontWeight::Bold).is_none());
        assert_eq!(fonts.char_width('A', FontWeight::Regular), 667.0);
        assert_eq!(fonts.char_width('A', FontWeight::Bold), 722.0);
    }

    #[test]
    fn test_embedded_fonts_measure_with_their_own_advances() {
        let fonts = fixture_fonts();
        assert!(fonts.is_embedded());
        assert_eq!(fonts.char_width('A', FontWeight::Regular), 500.0);
        assert_eq!(fonts.char_width('A', FontWeight::Bold), 600.0);
        assert_eq!(fonts.char_width('東', FontWeight::Regular), 1000.0);
        // 山田 at 10pt: two full-em glyphs
        assert_eq!(fonts.text_width("山田", FontWeight::Regular, 10.0), 20.0);
    }

    #[test]
    fn test_missing_bold_reuses_regular() {
        let regular = FontFace::from_file(fixtures::REGULAR).unwrap();
        let fonts = LabelFonts::embedded(regular, None);
        let (Some(r), Some(b)) = (fonts.face(FontWeight::Regular), fonts.face(FontWeight::Bold))
        else {
            panic!("embedded fonts have faces");
        };
        assert!(Arc::ptr_eq(r, b));
        assert_eq!(fonts.char_width('A', FontWeight::Bold), 500.0);
    }
}

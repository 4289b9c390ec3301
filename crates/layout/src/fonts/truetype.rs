//! TrueType faces read with ttf-parser.
//!
//! The file is parsed once: the Unicode cmap, the advance of every glyph and
//! the descriptor values a PDF writer needs are copied out, and the raw bytes
//! are kept for embedding.

use super::FontError;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use ttf_parser::{Face, GlyphId, name_id};

/// Font-wide values for a PDF font descriptor, in thousandths of an em.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceDescriptor {
    pub ascent: i32,
    pub descent: i32,
    pub cap_height: i32,
    /// `[x_min, y_min, x_max, y_max]`
    pub bbox: [i32; 4],
    pub italic_angle: f32,
    pub fixed_pitch: bool,
}

/// A parsed TrueType font.
pub struct FontFace {
    data: Arc<Vec<u8>>,
    postscript_name: String,
    units_per_em: u16,
    glyphs: HashMap<char, u16>,
    advances: Vec<u16>,
    descriptor: FaceDescriptor,
}

impl fmt::Debug for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFace")
            .field("postscript_name", &self.postscript_name)
            .field("glyphs", &self.advances.len())
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl FontFace {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, FontError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| FontError::LoadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let face = Self::from_bytes(data, 0)?;
        log::debug!(
            "Loaded font '{}' from {} ({} glyphs)",
            face.postscript_name,
            path.display(),
            face.advances.len()
        );
        Ok(face)
    }

    /// Parses face `index` of a font file or collection.
    pub fn from_bytes(data: Vec<u8>, index: u32) -> Result<Self, FontError> {
        let face =
            Face::parse(&data, index).map_err(|e| FontError::ParseError(e.to_string()))?;

        let glyphs = unicode_glyphs(&face);
        if glyphs.is_empty() {
            return Err(FontError::InvalidData(
                "font has no Unicode character map".to_string(),
            ));
        }
        let advances = (0..face.number_of_glyphs())
            .map(|gid| face.glyph_hor_advance(GlyphId(gid)).unwrap_or(0))
            .collect();

        let units_per_em = face.units_per_em();
        let scale = |v: i16| (f32::from(v) * 1000.0 / f32::from(units_per_em)).round() as i32;
        let ascent = scale(face.ascender());
        let bbox = face.global_bounding_box();
        let descriptor = FaceDescriptor {
            ascent,
            descent: scale(face.descender()),
            cap_height: face.capital_height().map(scale).unwrap_or(ascent),
            bbox: [
                scale(bbox.x_min),
                scale(bbox.y_min),
                scale(bbox.x_max),
                scale(bbox.y_max),
            ],
            italic_angle: face.italic_angle(),
            fixed_pitch: face.is_monospaced(),
        };

        let postscript_name = postscript_name(&face).unwrap_or_else(|| "EmbeddedFont".to_string());

        Ok(Self {
            data: Arc::new(data),
            postscript_name,
            units_per_em,
            glyphs,
            advances,
            descriptor,
        })
    }

    pub fn postscript_name(&self) -> &str {
        &self.postscript_name
    }

    /// The font program, for embedding.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn descriptor(&self) -> &FaceDescriptor {
        &self.descriptor
    }

    /// Glyph for `c`. Unmapped whitespace uses the space glyph; anything
    /// else unmapped uses `.notdef` (glyph 0).
    pub fn glyph_id(&self, c: char) -> u16 {
        self.glyphs
            .get(&c)
            .or_else(|| c.is_whitespace().then(|| self.glyphs.get(&' ')).flatten())
            .copied()
            .unwrap_or(0)
    }

    pub fn has_glyph(&self, c: char) -> bool {
        self.glyphs.contains_key(&c)
    }

    /// Advance of glyph `gid` in thousandths of an em.
    pub fn glyph_width(&self, gid: u16) -> f32 {
        let advance = self.advances.get(usize::from(gid)).copied().unwrap_or(0);
        f32::from(advance) * 1000.0 / f32::from(self.units_per_em)
    }

    /// Advance of `c` in thousandths of an em.
    pub fn char_width(&self, c: char) -> f32 {
        self.glyph_width(self.glyph_id(c))
    }
}

/// Unicode code points and their glyphs from every Unicode cmap subtable.
/// Earlier subtables win.
fn unicode_glyphs(face: &Face<'_>) -> HashMap<char, u16> {
    let mut glyphs = HashMap::new();
    let Some(cmap) = face.tables().cmap else {
        return glyphs;
    };
    for subtable in cmap.subtables {
        if !subtable.is_unicode() {
            continue;
        }
        subtable.codepoints(|code| {
            let Some(c) = char::from_u32(code) else {
                return;
            };
            if let Some(gid) = subtable.glyph_index(code) {
                glyphs.entry(c).or_insert(gid.0);
            }
        });
    }
    glyphs
}

/// PostScript name from the `name` table, falling back to the full name and
/// then the family name with spaces removed.
fn postscript_name(face: &Face<'_>) -> Option<String> {
    let lookup = |id: u16| {
        face.names()
            .into_iter()
            .find(|n| n.name_id == id)
            .and_then(|n| n.to_string())
    };
    lookup(name_id::POST_SCRIPT_NAME)
        .or_else(|| lookup(name_id::FULL_NAME).map(|n| n.replace(' ', "")))
        .or_else(|| lookup(name_id::FAMILY).map(|n| n.replace(' ', "")))
        .filter(|n| !n.is_empty())
}

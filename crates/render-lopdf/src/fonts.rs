//! Font resources of a label document.
//!
//! Base-14 faces are referenced by name with `WinAnsiEncoding`. Embedded
//! faces are written as `Type0` fonts over a `CIDFontType2` descendant with
//! `Identity-H` encoding: shown strings carry two-byte glyph ids, and a
//! `ToUnicode` map keeps the text extractable.

use labelsheet_layout::{FontFace, LabelFonts, StandardFont};
use labelsheet_render_core::RenderError;
use labelsheet_render_core::utils::{encode_win_ansi, font_resource_name};
use labelsheet_style::FontWeight;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

const BFCHAR_CHUNK: usize = 100;

/// An embedded face and the glyphs drawn with it.
struct EmbeddedFace {
    face: Arc<FontFace>,
    /// Glyph id to the character it was first drawn for.
    used: BTreeMap<u16, char>,
    missing: BTreeSet<char>,
}

impl EmbeddedFace {
    fn new(face: Arc<FontFace>) -> Self {
        Self {
            face,
            used: BTreeMap::new(),
            missing: BTreeSet::new(),
        }
    }

    fn encode(&mut self, text: &str) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(text.len() * 2);
        for c in text.chars() {
            let gid = self.face.glyph_id(c);
            if gid == 0 {
                self.missing.insert(c);
                self.used.entry(0).or_insert('\u{FFFD}');
            } else {
                self.used.entry(gid).or_insert(c);
            }
            bytes.extend_from_slice(&gid.to_be_bytes());
        }
        bytes
    }
}

/// Tracks the faces a document draws with and writes their font objects.
pub struct FontResources {
    fonts: LabelFonts,
    embedded: Vec<EmbeddedFace>,
    /// Index into `embedded` for regular and bold text.
    slots: [usize; 2],
}

impl FontResources {
    pub fn new(fonts: LabelFonts) -> Self {
        let mut embedded: Vec<EmbeddedFace> = Vec::new();
        let mut slots = [0; 2];
        for (slot, weight) in [FontWeight::Regular, FontWeight::Bold].into_iter().enumerate() {
            let Some(face) = fonts.face(weight) else {
                continue;
            };
            slots[slot] = match embedded.iter().position(|e| Arc::ptr_eq(&e.face, face)) {
                Some(index) => index,
                None => {
                    embedded.push(EmbeddedFace::new(Arc::clone(face)));
                    embedded.len() - 1
                }
            };
        }
        Self {
            fonts,
            embedded,
            slots,
        }
    }

    /// Bytes of a shown string for `text` in the face used for `weight`.
    pub fn encode(&mut self, text: &str, weight: FontWeight) -> Vec<u8> {
        if self.fonts.is_embedded() {
            let slot = self.slots[slot_index(weight)];
            self.embedded[slot].encode(text)
        } else {
            encode_win_ansi(text)
        }
    }

    /// Writes the font objects and returns the `/Font` resource dictionary.
    pub fn write(&self, doc: &mut Document) -> Result<Dictionary, RenderError> {
        let mut font_dict = Dictionary::new();
        if !self.fonts.is_embedded() {
            for font in StandardFont::ALL {
                let font_id = doc.add_object(dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => font.postscript_name(),
                    "Encoding" => "WinAnsiEncoding",
                });
                font_dict.set(font.resource_name(), font_id);
            }
            return Ok(font_dict);
        }

        let mut font_ids = Vec::with_capacity(self.embedded.len());
        for embedded in &self.embedded {
            if !embedded.missing.is_empty() {
                log::warn!(
                    "Font '{}' has no glyph for {:?}; they print as blanks",
                    embedded.face.postscript_name(),
                    embedded.missing
                );
            }
            font_ids.push(write_type0(doc, embedded)?);
        }
        for weight in [FontWeight::Regular, FontWeight::Bold] {
            let font_id = font_ids[self.slots[slot_index(weight)]];
            font_dict.set(font_resource_name(weight), font_id);
        }
        Ok(font_dict)
    }
}

fn slot_index(weight: FontWeight) -> usize {
    match weight {
        FontWeight::Regular => 0,
        FontWeight::Bold => 1,
    }
}

fn write_type0(doc: &mut Document, embedded: &EmbeddedFace) -> Result<ObjectId, RenderError> {
    let face = &embedded.face;
    let name = face.postscript_name();
    let d = face.descriptor();

    // TODO: subset the program to the used glyphs; CJK fonts run to megabytes.
    let mut program = Stream::new(
        dictionary! { "Length1" => face.data().len() as i64 },
        face.data().to_vec(),
    );
    program.compress()?;
    let file_id = doc.add_object(program);

    // Nonsymbolic, plus FixedPitch when monospaced
    let flags: i64 = if d.fixed_pitch { 32 | 1 } else { 32 };
    let descriptor_id = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => name,
        "Flags" => flags,
        "FontBBox" => d.bbox.iter().map(|&v| Object::from(v)).collect::<Vec<_>>(),
        "ItalicAngle" => d.italic_angle,
        "Ascent" => d.ascent,
        "Descent" => d.descent,
        "CapHeight" => d.cap_height,
        "StemV" => 80,
        "MissingWidth" => face.glyph_width(0).round() as i64,
        "FontFile2" => file_id,
    });

    let cid_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => name,
        "CIDSystemInfo" => dictionary! {
            "Registry" => Object::string_literal("Adobe"),
            "Ordering" => Object::string_literal("Identity"),
            "Supplement" => 0,
        },
        "FontDescriptor" => descriptor_id,
        "W" => width_array(face, &embedded.used),
        "CIDToGIDMap" => "Identity",
    });

    let to_unicode_id = doc.add_object(Stream::new(
        dictionary! {},
        to_unicode_cmap(&embedded.used).into_bytes(),
    ));

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => name,
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![Object::Reference(cid_font_id)],
        "ToUnicode" => to_unicode_id,
    });
    log::debug!("Embedded font '{}' ({} glyphs used)", name, embedded.used.len());
    Ok(font_id)
}

/// `/W` entries for the used glyphs, one `first [w1 w2 ...]` group per run
/// of consecutive glyph ids.
fn width_array(face: &FontFace, used: &BTreeMap<u16, char>) -> Vec<Object> {
    let mut array = Vec::new();
    let mut run: Vec<Object> = Vec::new();
    let mut run_start = 0u16;
    let mut previous: Option<u16> = None;

    for &gid in used.keys() {
        if previous.is_some_and(|p| p + 1 != gid) {
            array.push(Object::from(run_start));
            array.push(Object::Array(std::mem::take(&mut run)));
        }
        if run.is_empty() {
            run_start = gid;
        }
        run.push(Object::from(face.glyph_width(gid).round() as i64));
        previous = Some(gid);
    }
    if !run.is_empty() {
        array.push(Object::from(run_start));
        array.push(Object::Array(run));
    }
    array
}

/// A ToUnicode CMap mapping each used glyph id back to its character.
fn to_unicode_cmap(used: &BTreeMap<u16, char>) -> String {
    let mut out = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    let entries: Vec<(&u16, &char)> = used.iter().collect();
    for chunk in entries.chunks(BFCHAR_CHUNK) {
        out.push_str(&format!("{} beginbfchar\n", chunk.len()));
        for (gid, c) in chunk {
            let mut units = [0u16; 2];
            let target: String = c
                .encode_utf16(&mut units)
                .iter()
                .map(|unit| format!("{:04X}", unit))
                .collect();
            out.push_str(&format!("<{:04X}> <{}>\n", gid, target));
        }
        out.push_str("endbfchar\n");
    }

    out.push_str(
        "endcmap\n\
         CMapName currentdict /CMap defineresource pop\n\
         end\n\
         end\n",
    );
    out
}

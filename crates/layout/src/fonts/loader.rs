//! Choosing the label faces from configuration.
//!
//! Explicit font files win over a family name; with neither, labels use the
//! base-14 faces.

use super::{FontError, FontFace, LabelFonts};
use labelsheet_style::FontWeight;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the label faces come from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FontSettings {
    /// TrueType file for regular text.
    pub regular: Option<PathBuf>,
    /// TrueType file for headings. Defaults to the regular face.
    pub bold: Option<PathBuf>,
    /// Installed family to look up when no file is given.
    pub family: Option<String>,
}

impl FontSettings {
    pub fn from_files(regular: impl Into<PathBuf>, bold: Option<PathBuf>) -> Self {
        Self {
            regular: Some(regular.into()),
            bold,
            family: None,
        }
    }

    pub fn from_family(family: impl Into<String>) -> Self {
        Self {
            family: Some(family.into()),
            ..Self::default()
        }
    }

    pub fn is_standard(&self) -> bool {
        self.regular.is_none() && self.bold.is_none() && self.family.is_none()
    }

    /// Makes relative font paths relative to `base` instead of the working
    /// directory.
    pub fn resolve_relative_to(&mut self, base: &Path) {
        for path in [&mut self.regular, &mut self.bold].into_iter().flatten() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    pub fn validate(&self) -> Result<(), FontError> {
        if self.bold.is_some() && self.regular.is_none() {
            return Err(FontError::InvalidData(
                "a bold font file needs a regular font file".to_string(),
            ));
        }
        Ok(())
    }

    /// Reads and parses the configured faces.
    pub fn load(&self) -> Result<LabelFonts, FontError> {
        self.validate()?;
        if let Some(regular) = &self.regular {
            let regular = FontFace::from_file(regular)?;
            let bold = self.bold.as_ref().map(FontFace::from_file).transpose()?;
            return Ok(LabelFonts::embedded(regular, bold));
        }
        match &self.family {
            Some(family) => load_family(family),
            None => Ok(LabelFonts::Standard),
        }
    }
}

#[cfg(feature = "system-fonts")]
fn load_family(family: &str) -> Result<LabelFonts, FontError> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    log::debug!("Searching {} installed faces for '{}'", db.len(), family);
    load_family_from(&db, family)
}

#[cfg(not(feature = "system-fonts"))]
fn load_family(family: &str) -> Result<LabelFonts, FontError> {
    Err(FontError::LoadFailed {
        path: family.to_string(),
        message: "font lookup by family name needs the `system-fonts` feature".to_string(),
    })
}

/// Regular and bold faces of `family`. A family without a bold face uses
/// the regular one for headings.
#[cfg(feature = "system-fonts")]
fn load_family_from(db: &fontdb::Database, family: &str) -> Result<LabelFonts, FontError> {
    let regular_id = query_face(db, family, FontWeight::Regular)?;
    let bold_id = query_face(db, family, FontWeight::Bold)?;

    let regular = face_from_db(db, regular_id, family)?;
    let bold = if bold_id == regular_id {
        log::debug!("'{}' has no bold face; headings use the regular face", family);
        None
    } else {
        Some(face_from_db(db, bold_id, family)?)
    };
    Ok(LabelFonts::embedded(regular, bold))
}

#[cfg(feature = "system-fonts")]
fn query_face(
    db: &fontdb::Database,
    family: &str,
    weight: FontWeight,
) -> Result<fontdb::ID, FontError> {
    let query = fontdb::Query {
        families: &[fontdb::Family::Name(family)],
        weight: map_weight(weight),
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };
    db.query(&query).ok_or_else(|| {
        log::warn!("Font not found: {} {:?}", family, weight);
        FontError::NotFound {
            family: family.to_string(),
            weight,
        }
    })
}

#[cfg(feature = "system-fonts")]
fn face_from_db(
    db: &fontdb::Database,
    id: fontdb::ID,
    family: &str,
) -> Result<FontFace, FontError> {
    db.with_face_data(id, |data, index| FontFace::from_bytes(data.to_vec(), index))
        .ok_or_else(|| FontError::LoadFailed {
            path: family.to_string(),
            message: "font source is no longer readable".to_string(),
        })?
}

#[cfg(feature = "system-fonts")]
fn map_weight(weight: FontWeight) -> fontdb::Weight {
    match weight {
        FontWeight::Regular => fontdb::Weight::NORMAL,
        FontWeight::Bold => fontdb::Weight::BOLD,
    }
}

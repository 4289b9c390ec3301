use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum LayoutError {
    #[error("Invalid grid geometry: {0}")]
    InvalidGrid(String),
    #[error("Invalid text fit settings: {0}")]
    InvalidFitSettings(String),
}

pub mod algorithms;
pub mod config;
pub mod fonts;
pub mod text;

pub use self::algorithms::grid::{GridCell, GridGeometry};
pub use self::algorithms::pagination::{ends_page, page_count};
pub use self::config::FitSettings;
pub use self::fonts::{
    FaceDescriptor, FontError, FontFace, FontMetrics, FontSettings, LabelFonts, StandardFont,
    StandardFonts,
};
pub use self::text::fit::{FitResult, TextStyle, fit_text, measure};
pub use self::text::wrapper::{LineLayout, LineRun, break_lines};

// Re-export geometry types used by callers so they share one definition
pub use labelsheet_types::geometry::{Rect, Size};

#[cfg(test)]
mod test_utils;

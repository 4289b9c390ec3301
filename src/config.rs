//! Sheet configuration: paper, grid, padding, text fitting and grouping.
//!
//! Lengths in configuration files are millimetres; they are converted to PDF
//! points when the pipeline is built. Every field has a default, so a config
//! file only needs to name what it changes.

use crate::error::PipelineError;
use labelsheet_layout::{FitSettings, FontSettings, GridGeometry};
use labelsheet_source::{Aggregation, MissingShipping};
use labelsheet_style::PageSize;
use labelsheet_types::{Size, mm};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Where a label's text block sits inside its cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    /// Block top at the cell top, inset by the padding.
    #[default]
    Top,
    /// Block bottom at the cell bottom, inset by the padding.
    Bottom,
}

/// Grid dimensions, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    pub columns: usize,
    pub rows: usize,
    pub cell_width: f32,
    pub cell_height: f32,
    pub left_margin: f32,
    /// Distance from the bottom page edge to the top of the first row.
    pub top: f32,
    pub horizontal_spacing: f32,
    pub vertical_spacing: f32,
}

impl GridConfig {
    pub fn eight_up() -> Self {
        Self {
            columns: 2,
            rows: 4,
            cell_width: 90.0,
            cell_height: 65.0,
            left_margin: 20.0,
            top: 270.0,
            horizontal_spacing: 10.0,
            vertical_spacing: 5.0,
        }
    }

    pub fn twelve_up() -> Self {
        Self {
            columns: 2,
            rows: 6,
            cell_width: 95.0,
            cell_height: 45.0,
            left_margin: 7.5,
            top: 288.5,
            horizontal_spacing: 5.0,
            vertical_spacing: 2.0,
        }
    }

    /// The grid in PDF points on a page of `page` size.
    pub fn to_geometry(&self, page: Size) -> GridGeometry {
        GridGeometry {
            columns: self.columns,
            rows_per_page: self.rows,
            cell: Size::from_mm(self.cell_width, self.cell_height),
            left_margin: mm(self.left_margin),
            top_y: mm(self.top),
            h_spacing: mm(self.horizontal_spacing),
            v_spacing: mm(self.vertical_spacing),
            page,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::eight_up()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SheetConfig {
    /// Document title stored in the PDF metadata.
    pub title: String,
    pub page_size: PageSize,
    pub aggregation: Aggregation,
    /// Falls back to the aggregation's own default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_shipping: Option<MissingShipping>,
    pub grid: GridConfig,
    /// Inner padding of each cell, in millimetres.
    pub padding: f32,
    pub anchor: Anchor,
    pub fit: FitSettings,
    /// TrueType faces to embed. Unset means the built-in Helvetica.
    #[serde(skip_serializing_if = "FontSettings::is_standard")]
    pub fonts: FontSettings,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self::eight_up()
    }
}

impl SheetConfig {
    /// Eight labels per A4 page, one per order and recipient, with a total
    /// quantity line.
    pub fn eight_up() -> Self {
        Self {
            title: "Shipping Labels".to_string(),
            page_size: PageSize::A4,
            aggregation: Aggregation::QuantitySum,
            missing_shipping: None,
            grid: GridConfig::eight_up(),
            padding: 0.0,
            anchor: Anchor::Top,
            fit: FitSettings::default(),
            fonts: FontSettings::default(),
        }
    }

    /// Twelve labels per A4 page, one per recipient across orders, with
    /// quantities broken down by item category.
    pub fn twelve_up() -> Self {
        Self {
            aggregation: Aggregation::CategoryBucket,
            grid: GridConfig::twelve_up(),
            padding: 3.0,
            anchor: Anchor::Bottom,
            ..Self::eight_up()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON config file. Relative font paths in it are taken
    /// relative to the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            PipelineError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read config from '{}': {}", path.display(), e),
            ))
        })?;
        let mut config = Self::from_json_str(&source)?;
        if let Some(dir) = path.parent() {
            config.fonts.resolve_relative_to(dir);
        }
        Ok(config)
    }

    pub fn missing_shipping(&self) -> MissingShipping {
        self.missing_shipping
            .unwrap_or_else(|| self.aggregation.default_missing_shipping())
    }

    pub fn page(&self) -> Size {
        self.page_size.size_pt()
    }

    pub fn geometry(&self) -> GridGeometry {
        self.grid.to_geometry(self.page())
    }

    /// Cell padding in points.
    pub fn padding_pt(&self) -> f32 {
        mm(self.padding)
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        self.geometry().validate()?;
        self.fit.validate()?;
        self.fonts.validate()?;
        let cell = self.grid.cell_width.min(self.grid.cell_height);
        if self.padding.is_nan() || self.padding < 0.0 || 2.0 * self.padding >= cell {
            return Err(PipelineError::Config(format!(
                "padding of {}mm leaves no room in a {}x{}mm cell",
                self.padding, self.grid.cell_width, self.grid.cell_height
            )));
        }
        Ok(())
    }
}

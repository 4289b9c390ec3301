//! Fixed-grid placement of labels on pages.
//!
//! Coordinates are PDF points with the origin at the bottom-left of the page,
//! so rows move down the page by subtracting from `top_y`.

use crate::LayoutError;
use labelsheet_types::{Rect, Size};

/// Static geometry of a label sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub columns: usize,
    pub rows_per_page: usize,
    /// Size of one label cell.
    pub cell: Size,
    /// Distance from the left page edge to the first column.
    pub left_margin: f32,
    /// Y of the top edge of the first row.
    pub top_y: f32,
    /// Horizontal gap between columns.
    pub h_spacing: f32,
    /// Vertical gap between rows.
    pub v_spacing: f32,
    pub page: Size,
}

/// Where one label goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub page_index: usize,
    pub column: usize,
    pub row: usize,
    /// Left edge of the cell.
    pub x: f32,
    /// Top edge of the cell.
    pub y: f32,
}

impl GridCell {
    pub fn rect(&self, cell: Size) -> Rect {
        Rect::new(self.x, self.y, cell.width, cell.height)
    }
}

impl GridGeometry {
    pub fn per_page(&self) -> usize {
        self.columns * self.rows_per_page
    }

    /// Places label `index`. Labels fill a page left to right, then top to
    /// bottom; label `per_page()` starts the next page in the top-left cell.
    ///
    /// Pure in `index` and the geometry. Callers must have validated the
    /// geometry, as a zero-sized grid has no cells.
    pub fn place(&self, index: usize) -> GridCell {
        let per_page = self.per_page();
        let index_on_page = index % per_page;
        let column = index_on_page % self.columns;
        let row = (index_on_page / self.columns) % self.rows_per_page;
        GridCell {
            page_index: index / per_page,
            column,
            row,
            x: self.left_margin + column as f32 * (self.cell.width + self.h_spacing),
            y: self.top_y - row as f32 * (self.cell.height + self.v_spacing),
        }
    }

    /// Rejects grids with no cells or empty cells. A grid that runs off the
    /// page is allowed but logged, since printers differ in what they clip.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.columns == 0 || self.rows_per_page == 0 {
            return Err(LayoutError::InvalidGrid(format!(
                "grid must have at least one column and row, got {}x{}",
                self.columns, self.rows_per_page
            )));
        }
        if !self.cell.is_positive() {
            return Err(LayoutError::InvalidGrid(format!(
                "cell size must be positive, got {:.1}x{:.1}pt",
                self.cell.width, self.cell.height
            )));
        }
        if self.h_spacing < 0.0 || self.v_spacing < 0.0 {
            return Err(LayoutError::InvalidGrid(
                "cell spacing must not be negative".to_string(),
            ));
        }

        let right = self.left_margin
            + self.columns as f32 * self.cell.width
            + (self.columns - 1) as f32 * self.h_spacing;
        let bottom = self.top_y
            - self.rows_per_page as f32 * self.cell.height
            - (self.rows_per_page - 1) as f32 * self.v_spacing;
        if self.left_margin < 0.0
            || right > self.page.width
            || bottom < 0.0
            || self.top_y > self.page.height
        {
            log::warn!(
                "Label grid spans x {:.1}..{:.1}pt, y {:.1}..{:.1}pt and does not fit a {:.1}x{:.1}pt page.",
                self.left_margin,
                right,
                bottom,
                self.top_y,
                self.page.width,
                self.page.height
            );
        }
        Ok(())
    }
}

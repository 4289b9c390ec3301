//! Row sources and the record-building stages of the label pipeline.
//!
//! This crate provides the `RowSource` trait and its implementations for
//! feeding order rows into the pipeline, plus the two stages that turn those
//! rows into label records:
//!
//! - [`consolidate::forward_fill`]: completes shipping data within each order
//! - [`aggregate::AggregationStrategy`]: groups rows into one record per label
//!
//! ## Available Sources
//!
//! - `CsvRowSource`: an order export in CSV form, schema-checked up front
//! - `VecRowSource`: In-memory vector of rows
//!
//! ## Example
//!
//! ```ignore
//! use labelsheet_source::{CsvRowSource, RowSource, read_all};
//!
//! let mut source = CsvRowSource::from_path("orders.csv", false)?;
//! let rows = read_all(&mut source)?;
//! ```

pub mod aggregate;
pub mod consolidate;
pub mod csv_source;
mod error;

pub use aggregate::{
    Aggregation, AggregationStrategy, CategoryBucket, MissingShipping, QuantitySum,
    extract_category, parse_quantity,
};
pub use consolidate::forward_fill;
pub use csv_source::{
    CsvRowSource, ITEM_NAME_COLUMN, ORDER_COLUMN, QUANTITY_COLUMN, required_columns,
};
pub use error::SourceError;

use labelsheet_types::LineItemRow;

/// A trait for sources that feed order rows into the pipeline.
///
/// Reading is pull-based; a source yields rows in input order and reports
/// a failure for the row it could not read.
pub trait RowSource: Send {
    /// Get the next row, if available.
    ///
    /// Returns `None` when the source is exhausted.
    fn next_row(&mut self) -> Option<Result<LineItemRow, SourceError>>;

    /// Hint about the total number of rows (for progress reporting).
    ///
    /// Returns `None` if the size is unknown.
    fn size_hint(&self) -> Option<usize> {
        None
    }
}

/// Drains a source, stopping at the first error.
pub fn read_all(source: &mut dyn RowSource) -> Result<Vec<LineItemRow>, SourceError> {
    let mut rows = Vec::with_capacity(source.size_hint().unwrap_or(0));
    while let Some(row) = source.next_row() {
        rows.push(row?);
    }
    Ok(rows)
}

/// A row source backed by an in-memory vector.
pub struct VecRowSource {
    rows: std::vec::IntoIter<LineItemRow>,
    len: usize,
}

impl VecRowSource {
    pub fn new(rows: Vec<LineItemRow>) -> Self {
        let len = rows.len();
        Self {
            rows: rows.into_iter(),
            len,
        }
    }
}

impl RowSource for VecRowSource {
    fn next_row(&mut self) -> Option<Result<LineItemRow, SourceError>> {
        self.rows.next().map(Ok)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.len)
    }
}

//! Printable shipping label sheets from e-commerce order exports.
//!
//! Rows from an order export are consolidated per order, grouped into label
//! records, and laid out on a fixed grid of label cells with each label's
//! text shrunk until it fits its cell.
//!
//! ```ignore
//! use labelsheet::{PipelineBuilder, SheetConfig};
//!
//! let pipeline = PipelineBuilder::new()
//!     .with_config(SheetConfig::twelve_up())
//!     .build()?;
//! let sheet = pipeline.generate_to_file("orders.csv", "shipping_labels.pdf")?;
//! println!("{} labels on {} pages", sheet.records.len(), sheet.pages);
//! ```

pub mod config;
pub mod error;
pub mod label;
pub mod pipeline;

pub use config::{Anchor, GridConfig, SheetConfig};
pub use error::PipelineError;
pub use label::compose_label;
pub use pipeline::{LabelPipeline, LabelSheet, PipelineBuilder};

// Re-export the pieces callers configure or feed in
pub use labelsheet_layout::{FitSettings, FontSettings, LabelFonts};
pub use labelsheet_source::{Aggregation, CsvRowSource, MissingShipping, RowSource, VecRowSource};
pub use labelsheet_style::PageSize;
pub use labelsheet_types::{
    ItemSummary, LabelRecord, LineItemRow, OrderId, ShippingField, ShippingFields, ShippingKey,
};

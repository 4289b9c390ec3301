//! The end-to-end label pipeline: rows in, PDF bytes out.
//!
//! ```text
//! RowSource -> forward_fill -> AggregationStrategy -> compose_label
//!           -> fit_text -> GridGeometry::place -> DocumentRenderer
//! ```

use crate::config::{Anchor, GridConfig, SheetConfig};
use crate::error::PipelineError;
use crate::label::compose_label;
use labelsheet_layout::{
    FitSettings, FontSettings, GridGeometry, LabelFonts, ends_page, fit_text, page_count,
};
use labelsheet_render_core::DocumentRenderer;
use labelsheet_render_lopdf::LopdfRenderer;
use labelsheet_source::{
    Aggregation, AggregationStrategy, CsvRowSource, MissingShipping, RowSource, forward_fill,
    read_all,
};
use labelsheet_types::{LabelRecord, LineItemRow, Size};
use std::fs;
use std::path::Path;

/// The output of a pipeline run.
#[derive(Debug, Clone)]
pub struct LabelSheet {
    /// The records that were printed, in print order.
    pub records: Vec<LabelRecord>,
    pub pages: usize,
    pub pdf: Vec<u8>,
}

/// A configured, reusable label pipeline. Holds only immutable configuration
/// and the loaded faces; each run owns its renderer.
#[derive(Debug, Clone)]
pub struct LabelPipeline {
    config: SheetConfig,
    geometry: GridGeometry,
    fonts: LabelFonts,
}

impl LabelPipeline {
    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn fonts(&self) -> &LabelFonts {
        &self.fonts
    }

    pub fn strategy(&self) -> Box<dyn AggregationStrategy> {
        self.config
            .aggregation
            .strategy(self.config.missing_shipping())
    }

    /// Opens a CSV export with the column set this pipeline's aggregation
    /// needs. Fails before reading any row if a column is missing.
    pub fn open_csv<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<CsvRowSource<fs::File>, PipelineError> {
        Ok(CsvRowSource::from_path(
            path,
            self.config.aggregation.requires_item_name(),
        )?)
    }

    /// Consolidates and aggregates rows into label records.
    pub fn build_records(&self, rows: Vec<LineItemRow>) -> Result<Vec<LabelRecord>, PipelineError> {
        let row_count = rows.len();
        let rows = forward_fill(rows);
        let strategy = self.strategy();
        let records = strategy.aggregate(&rows)?;
        log::info!(
            "Aggregated {} rows into {} labels ({})",
            row_count,
            records.len(),
            strategy.name()
        );
        Ok(records)
    }

    /// Lays out and draws `records` with the lopdf backend.
    pub fn render(&self, records: &[LabelRecord]) -> Result<(Vec<u8>, usize), PipelineError> {
        let renderer = LopdfRenderer::with_fonts(
            self.config.page(),
            self.config.title.as_str(),
            self.fonts.clone(),
        );
        self.render_with(records, Box::new(renderer))
    }

    /// Lays out and draws `records` with any backend. Returns the document
    /// bytes and the number of pages.
    pub fn render_with(
        &self,
        records: &[LabelRecord],
        mut renderer: Box<dyn DocumentRenderer>,
    ) -> Result<(Vec<u8>, usize), PipelineError> {
        if records.is_empty() {
            return Err(PipelineError::NoLabels);
        }

        let total = records.len();
        let per_page = self.geometry.per_page();
        let padding = self.config.padding_pt();
        let mut overflowed = 0usize;
        log::debug!(
            "Laying out {} labels over {} pages",
            total,
            page_count(total, per_page)
        );

        for (index, record) in records.iter().enumerate() {
            let cell = self.geometry.place(index);
            let inner = cell.rect(self.geometry.cell).inset(padding);
            let text = compose_label(record);
            let block = fit_text(
                &text,
                Size::new(inner.width, inner.height),
                &self.config.fit,
                &self.fonts,
            );
            if block.overflowed {
                overflowed += 1;
            }

            let top = match self.config.anchor {
                Anchor::Top => inner.y,
                Anchor::Bottom => inner.bottom() + block.height,
            };
            renderer.draw_text(inner.x, top, &block)?;
            log::debug!(
                "Label {} -> page {} column {} row {} at {}pt",
                index,
                cell.page_index,
                cell.column,
                cell.row,
                block.font_size()
            );

            if ends_page(index, total, per_page) {
                renderer.new_page()?;
            }
        }

        if overflowed > 0 {
            log::warn!(
                "{} of {} labels overflow their cells at the minimum font size",
                overflowed,
                total
            );
        }
        let pages = renderer.page_count();
        let pdf = renderer.finish()?;
        Ok((pdf, pages))
    }

    /// Runs the whole pipeline over a row source.
    pub fn generate(&self, source: &mut dyn RowSource) -> Result<LabelSheet, PipelineError> {
        let rows = read_all(source)?;
        let records = self.build_records(rows)?;
        let (pdf, pages) = self.render(&records)?;
        log::info!("Generated {} labels on {} pages", records.len(), pages);
        Ok(LabelSheet {
            records,
            pages,
            pdf,
        })
    }

    /// Reads a CSV export and writes the label PDF to `output`.
    pub fn generate_to_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<LabelSheet, PipelineError> {
        let mut source = self.open_csv(input)?;
        let sheet = self.generate(&mut source)?;
        fs::write(output.as_ref(), &sheet.pdf)?;
        Ok(sheet)
    }
}

/// A builder for creating a `LabelPipeline`.
#[derive(Debug, Clone, Default)]
pub struct PipelineBuilder {
    config: SheetConfig,
}

impl PipelineBuilder {
    /// Creates a builder preset to the eight-up sheet.
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: SheetConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads the configuration from a JSON file.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, PipelineError> {
        self.config = SheetConfig::from_file(path)?;
        Ok(self)
    }

    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.config.aggregation = aggregation;
        self
    }

    pub fn with_missing_shipping(mut self, policy: MissingShipping) -> Self {
        self.config.missing_shipping = Some(policy);
        self
    }

    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.config.grid = grid;
        self
    }

    /// Cell padding in millimetres.
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.config.padding = padding;
        self
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.config.anchor = anchor;
        self
    }

    pub fn with_fit_settings(mut self, fit: FitSettings) -> Self {
        self.config.fit = fit;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn with_fonts(mut self, fonts: FontSettings) -> Self {
        self.config.fonts = fonts;
        self
    }

    /// Validates the configuration, loads the faces and creates the
    /// `LabelPipeline`.
    pub fn build(self) -> Result<LabelPipeline, PipelineError> {
        self.config.validate()?;
        let geometry = self.config.geometry();
        let fonts = self.config.fonts.load()?;
        log::debug!(
            "Built pipeline: {}x{} grid, {:?} aggregation, {} fonts",
            geometry.columns,
            geometry.rows_per_page,
            self.config.aggregation,
            if fonts.is_embedded() { "embedded" } else { "standard" }
        );
        Ok(LabelPipeline {
            config: self.config,
            geometry,
            fonts,
        })
    }
}

use labelsheet_layout::{FontError, LayoutError};
use labelsheet_render_core::RenderError;
use labelsheet_source::SourceError;
use thiserror::Error;

/// A comprehensive error type for the label sheet pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Font error: {0}")]
    Font(#[from] FontError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No labels to print: the input produced no label records")]
    NoLabels,
}

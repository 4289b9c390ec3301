//! Core rendering abstractions for label sheets.
//!
//! This crate provides the fundamental traits and types used by rendering backends:
//! - `DocumentRenderer` trait for the page/text drawing primitives the pipeline needs
//! - Error types for rendering operations
//! - Shared helpers for text encoding and font naming

mod error;
mod traits;
pub mod utils;

pub use error::RenderError;
pub use traits::DocumentRenderer;

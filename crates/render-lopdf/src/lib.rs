//! PDF renderer for label sheets using lopdf.
//!
//! Text is set in the base-14 Helvetica faces with `WinAnsiEncoding` unless
//! TrueType faces are configured, in which case those are embedded whole and
//! addressed by glyph id.

mod fonts;
mod helpers;
mod renderer;

pub use fonts::FontResources;
pub use helpers::block_operations;
pub use renderer::LopdfRenderer;

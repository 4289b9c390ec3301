use crate::error::RenderError;
use labelsheet_layout::FitResult;

/// The drawing primitives a label sheet needs from an output backend.
///
/// A renderer always has an open page. `new_page` closes it and opens the
/// next one; `finish` closes the open page only if something was drawn on it.
pub trait DocumentRenderer {
    /// Ends the current page and starts a fresh one.
    fn new_page(&mut self) -> Result<(), RenderError>;

    /// Draws a fitted text block whose top-left corner is at (`x`, `top`), in
    /// PDF points with a bottom-left origin. Returns the block's height.
    fn draw_text(&mut self, x: f32, top: f32, block: &FitResult) -> Result<f32, RenderError>;

    /// Pages closed so far.
    fn page_count(&self) -> usize;

    /// Seals the document and returns its bytes.
    fn finish(self: Box<Self>) -> Result<Vec<u8>, RenderError>;
}

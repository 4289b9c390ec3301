//! Shrink-to-fit sizing for label text.
//!
//! Line count is a step function of font size and content, so there is no
//! closed form for the size that fits. The search walks down from the default
//! size one point at a time and stops at the first size that fits or at the
//! floor, whichever comes first.

use super::wrapper::{LineLayout, break_lines};
use crate::config::FitSettings;
use crate::fonts::FontMetrics;
use labelsheet_style::RichText;
use labelsheet_types::Size;

const EPSILON: f32 = 0.01;

/// The font size and leading a block is set at. Built fresh for each attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub leading: f32,
}

impl TextStyle {
    pub fn new(font_size: f32, leading_offset: f32) -> Self {
        Self {
            font_size,
            leading: font_size + leading_offset,
        }
    }
}

/// A wrapped block and the size it was set at.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    pub style: TextStyle,
    pub lines: Vec<LineLayout>,
    /// Width of the widest line.
    pub width: f32,
    /// `lines × leading`.
    pub height: f32,
    /// True when even the minimum size did not fit the bounds.
    pub overflowed: bool,
    /// Number of sizes measured.
    pub attempts: u32,
}

impl FitResult {
    pub fn font_size(&self) -> f32 {
        self.style.font_size
    }
}

/// Wraps `text` at `max_width` in `style` and measures the block.
pub fn measure(
    text: &RichText,
    max_width: f32,
    style: TextStyle,
    metrics: &dyn FontMetrics,
) -> (Vec<LineLayout>, Size) {
    let lines = break_lines(text, max_width, style.font_size, metrics);
    let width = lines.iter().map(|l| l.width).fold(0.0, f32::max);
    let height = lines.len() as f32 * style.leading;
    (lines, Size::new(width, height))
}

/// Finds the largest size, stepping down by one point from
/// `settings.default_size`, at which `text` wrapped to `bounds.width` is no
/// taller than `bounds.height`.
///
/// Never fails: at `settings.min_size` the block is returned as-is with
/// `overflowed` set. Takes at most [`FitSettings::max_attempts`] measurements.
pub fn fit_text(
    text: &RichText,
    bounds: Size,
    settings: &FitSettings,
    metrics: &dyn FontMetrics,
) -> FitResult {
    let mut font_size = settings.default_size;
    let mut attempts = 0;
    loop {
        let style = TextStyle::new(font_size, settings.leading_offset);
        let (lines, measured) = measure(text, bounds.width, style, metrics);
        attempts += 1;

        let fits = measured.height <= bounds.height + EPSILON;
        if fits || font_size <= settings.min_size {
            if !fits {
                log::warn!(
                    "Text needs {:.1}pt of height but only {:.1}pt is available at the minimum size {}pt; it will overflow.",
                    measured.height,
                    bounds.height,
                    font_size
                );
            }
            return FitResult {
                style,
                lines,
                width: measured.width,
                height: measured.height,
                overflowed: !fits,
                attempts,
            };
        }
        font_size = (font_size - 1.0).max(settings.min_size);
    }
}

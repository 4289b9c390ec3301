use crate::LayoutError;
use serde::{Deserialize, Serialize};

/// Bounds for the font-size search performed by [`crate::fit_text`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FitSettings {
    /// The size every label starts at, in points.
    ///
    /// Defaults to `10`.
    pub default_size: f32,
    /// The smallest size the search will try. Text that still does not fit at
    /// this size is drawn anyway and overflows its cell.
    ///
    /// Defaults to `5`.
    pub min_size: f32,
    /// Added to the font size to get the line leading.
    ///
    /// Defaults to `2`.
    pub leading_offset: f32,
}

impl Default for FitSettings {
    fn default() -> Self {
        Self {
            default_size: 10.0,
            min_size: 5.0,
            leading_offset: 2.0,
        }
    }
}

impl FitSettings {
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.min_size.is_nan() || self.min_size < 1.0 {
            return Err(LayoutError::InvalidFitSettings(format!(
                "minimum font size must be at least 1pt, got {}",
                self.min_size
            )));
        }
        if self.default_size.is_nan() || self.default_size < self.min_size {
            return Err(LayoutError::InvalidFitSettings(format!(
                "default font size {} is below the minimum {}",
                self.default_size, self.min_size
            )));
        }
        if self.leading_offset.is_nan() || self.leading_offset < 0.0 {
            return Err(LayoutError::InvalidFitSettings(format!(
                "leading offset must not be negative, got {}",
                self.leading_offset
            )));
        }
        Ok(())
    }

    /// Upper bound on the number of measurements one fit can take.
    pub fn max_attempts(&self) -> u32 {
        (self.default_size - self.min_size).ceil() as u32 + 1
    }
}

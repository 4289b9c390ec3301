use crate::fonts::FontMetrics;
use labelsheet_style::FontWeight;

/// Every character is `width` thousandths of an em wide, bold or not, so
/// expected line breaks can be worked out by counting characters.
pub struct FixedPitch(pub f32);

impl FontMetrics for FixedPitch {
    fn char_width(&self, _c: char, _weight: FontWeight) -> f32 {
        self.0
    }
}

/// At 10pt each character is exactly 5pt wide.
pub fn half_em() -> FixedPitch {
    FixedPitch(500.0)
}

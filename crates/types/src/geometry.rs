/// Points per millimetre (PDF user space is 1/72 inch).
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Converts millimetres to PDF points.
pub fn mm(value: f32) -> f32 {
    value * POINTS_PER_MM
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Shrinks the rectangle by `inset` on every side, never below zero size.
    ///
    /// `y` is the top edge in a y-up coordinate space, so the inset moves it down.
    pub fn inset(self, inset: f32) -> Self {
        Self {
            x: self.x + inset,
            y: self.y - inset,
            width: (self.width - 2.0 * inset).max(0.0),
            height: (self.height - 2.0 * inset).max(0.0),
        }
    }

    pub fn bottom(self) -> f32 {
        self.y - self.height
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Builds a size from millimetre dimensions.
    pub fn from_mm(width: f32, height: f32) -> Self {
        Self {
            width: mm(width),
            height: mm(height),
        }
    }

    pub fn is_positive(self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

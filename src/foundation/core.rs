use crate::foundation::error::{CurveError, CurveResult};

pub use kurbo::{BezPath, CubicBez, Line, Point, Rect, Vec2};

/// Edge length of the square editor canvas, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize(pub f64);

impl CanvasSize {
    /// Validate and wrap a canvas edge length.
    pub fn new(px: f64) -> CurveResult<Self> {
        if !px.is_finite() || px <= 0.0 {
            return Err(CurveError::validation("canvas size must be finite and > 0"));
        }
        Ok(Self(px))
    }

    /// Edge length in pixels.
    pub fn px(self) -> f64 {
        self.0
    }
}

/// Map a pixel position inside the canvas to bezier-unit space (y up, origin bottom-left).
pub fn pixel_to_unit(p: Point, canvas: CanvasSize) -> Point {
    Point::new(p.x / canvas.0, 1.0 - p.y / canvas.0)
}

/// Inverse of [`pixel_to_unit`].
pub fn unit_to_pixel(p: Point, canvas: CanvasSize) -> Point {
    Point::new(p.x * canvas.0, (1.0 - p.y) * canvas.0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

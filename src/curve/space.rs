//! Coordinate transforms between bezier-unit, logical and canvas space.
//!
//! The editor always renders a square, padded window around the `[0, 1] x [0, 1]` curve box.
//! Because control points may overshoot on the value axis, that window ([`LogicalBounds`]) is a
//! function of the current control points and is recomputed for every transform instead of
//! being cached.
//!
//! Conventions:
//! - bezier-unit / logical space: +Y is up, the curve runs from `(0, 0)` to `(1, 1)`.
//! - canvas space: +Y is down, origin at the top-left pixel, square canvas.

use crate::curve::bezier::BezierCurve;
use crate::foundation::core::{BezPath, CanvasSize, Line, Point, Rect};
use crate::foundation::error::{CurveError, CurveResult};
use crate::foundation::math::{EPSILON, approx_eq};

const MAX_GRID_LINES: usize = 4096;

/// Viewport tuning. Defaults give an 80% fill with 10% padding around the curve box.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ViewportOpts {
    /// Fraction of the canvas edge covered by the padded logical range.
    pub fill: f64,
    /// Padding added on every side of the centred range, as a fraction of that range.
    pub padding: f64,
}

impl Default for ViewportOpts {
    fn default() -> Self {
        Self {
            fill: 0.8,
            padding: 0.1,
        }
    }
}

/// Square logical window around the curve box, in bezier-unit coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LogicalBounds {
    /// Left edge.
    pub min_x: f64,
    /// Right edge.
    pub max_x: f64,
    /// Bottom edge.
    pub min_y: f64,
    /// Top edge.
    pub max_y: f64,
    /// Edge length; equal to both `max_x - min_x` and `max_y - min_y`.
    pub range: f64,
}

impl LogicalBounds {
    /// Horizontal extent.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Vertical extent.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Whether width and height agree to floating-point precision.
    pub fn is_square(&self) -> bool {
        approx_eq(self.width(), self.height(), EPSILON)
    }

    /// Whether `p` lies inside the window (edges included).
    pub fn contains(&self, p: Point) -> bool {
        (self.min_x..=self.max_x).contains(&p.x) && (self.min_y..=self.max_y).contains(&p.y)
    }
}

/// Stateless coordinate-transform engine.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CurveSpace {
    opts: ViewportOpts,
}

impl CurveSpace {
    /// Build an engine with custom viewport options.
    pub fn new(opts: ViewportOpts) -> CurveResult<Self> {
        if !(opts.fill > 0.0 && opts.fill <= 1.0) {
            return Err(CurveError::validation("viewport fill must be in (0, 1]"));
        }
        if !(opts.padding.is_finite() && opts.padding >= 0.0) {
            return Err(CurveError::validation("viewport padding must be >= 0"));
        }
        Ok(Self { opts })
    }

    /// Options in effect.
    pub fn opts(&self) -> ViewportOpts {
        self.opts
    }

    /// Square, padded window containing the curve box and both control points.
    ///
    /// Only the value axis of `p1`/`p2` matters: x is clamped to `[0, 1]` upstream, so the time
    /// axis is always the unit interval before padding.
    pub fn compute_bounds(&self, p1: Point, p2: Point) -> LogicalBounds {
        let min_y = 0f64.min(p1.y).min(p2.y).min(1.0);
        let max_y = 1f64.max(p1.y).max(p2.y).max(0.0);
        let range = (max_y - min_y).max(1.0);

        // x centres on 0.5. y centres on its own span so overshoot on one side stays visible;
        // without overshoot that span is [0, 1] and the centre is 0.5 as well.
        let half = range / 2.0;
        let pad = range * self.opts.padding;
        let mid_y = (min_y + max_y) / 2.0;
        let min_x = 0.5 - half - pad;
        let max_x = 0.5 + half + pad;
        let min_y = mid_y - half - pad;
        let max_y = mid_y + half + pad;

        LogicalBounds {
            min_x,
            max_x,
            min_y,
            max_y,
            range: max_x - min_x,
        }
    }

    /// Map a logical point to canvas pixels.
    pub fn logical_to_canvas(&self, p: Point, bounds: &LogicalBounds, canvas: CanvasSize) -> Point {
        let (scale, offset) = self.scale_and_offset(bounds, canvas);
        Point::new(
            (p.x - bounds.min_x) * scale + offset,
            (bounds.max_y - p.y) * scale + offset,
        )
    }

    /// Exact inverse of [`CurveSpace::logical_to_canvas`].
    pub fn canvas_to_logical(&self, p: Point, bounds: &LogicalBounds, canvas: CanvasSize) -> Point {
        let (scale, offset) = self.scale_and_offset(bounds, canvas);
        Point::new(
            (p.x - offset) / scale + bounds.min_x,
            bounds.max_y - (p.y - offset) / scale,
        )
    }

    /// Logical rectangle covered by the whole canvas, margins included.
    pub fn visible_region(&self, bounds: &LogicalBounds, canvas: CanvasSize) -> Rect {
        let top_left = self.canvas_to_logical(Point::ZERO, bounds, canvas);
        let bottom_right = self.canvas_to_logical(Point::new(canvas.0, canvas.0), bounds, canvas);
        Rect::from_points(top_left, bottom_right)
    }

    /// Canvas rectangle of the `[0, 1] x [0, 1]` curve box.
    pub fn unit_box(&self, bounds: &LogicalBounds, canvas: CanvasSize) -> Rect {
        Rect::from_points(
            self.logical_to_canvas(Point::ZERO, bounds, canvas),
            self.logical_to_canvas(Point::new(1.0, 1.0), bounds, canvas),
        )
    }

    /// Canvas-space grid lines at multiples of `spacing` logical units, covering the canvas.
    pub fn grid_lines(
        &self,
        bounds: &LogicalBounds,
        canvas: CanvasSize,
        spacing: f64,
    ) -> CurveResult<Vec<Line>> {
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(CurveError::validation("grid spacing must be finite and > 0"));
        }
        let region = self.visible_region(bounds, canvas);
        let steps = |lo: f64, hi: f64| -> Vec<f64> {
            let start = (lo / spacing).floor() as i64;
            let end = (hi / spacing).floor() as i64;
            (start..=end).map(|k| k as f64 * spacing).collect()
        };
        let xs = steps(region.x0, region.x1);
        let ys = steps(region.y0, region.y1);
        if xs.len() + ys.len() > MAX_GRID_LINES {
            return Err(CurveError::validation(format!(
                "grid spacing {spacing} yields more than {MAX_GRID_LINES} lines"
            )));
        }

        let mut lines = Vec::with_capacity(xs.len() + ys.len());
        for x in xs {
            lines.push(Line::new(
                self.logical_to_canvas(Point::new(x, region.y0), bounds, canvas),
                self.logical_to_canvas(Point::new(x, region.y1), bounds, canvas),
            ));
        }
        for y in ys {
            lines.push(Line::new(
                self.logical_to_canvas(Point::new(region.x0, y), bounds, canvas),
                self.logical_to_canvas(Point::new(region.x1, y), bounds, canvas),
            ));
        }
        Ok(lines)
    }

    /// The curve itself in canvas space, ready to hand to a drawing collaborator.
    pub fn curve_path(
        &self,
        curve: BezierCurve,
        bounds: &LogicalBounds,
        canvas: CanvasSize,
    ) -> BezPath {
        let (p1, p2) = curve.control_points();
        let mut path = BezPath::new();
        path.move_to(self.logical_to_canvas(Point::ZERO, bounds, canvas));
        path.curve_to(
            self.logical_to_canvas(p1, bounds, canvas),
            self.logical_to_canvas(p2, bounds, canvas),
            self.logical_to_canvas(Point::new(1.0, 1.0), bounds, canvas),
        );
        path
    }

    fn scale_and_offset(&self, bounds: &LogicalBounds, canvas: CanvasSize) -> (f64, f64) {
        let scale = canvas.0 * self.opts.fill / bounds.range;
        let offset = (canvas.0 - bounds.range * scale) / 2.0;
        (scale, offset)
    }
}

/// [`CurveSpace::compute_bounds`] with default viewport options.
pub fn compute_bounds(p1: Point, p2: Point) -> LogicalBounds {
    CurveSpace::default().compute_bounds(p1, p2)
}

/// [`CurveSpace::logical_to_canvas`] with default viewport options.
pub fn logical_to_canvas(p: Point, bounds: &LogicalBounds, canvas: CanvasSize) -> Point {
    CurveSpace::default().logical_to_canvas(p, bounds, canvas)
}

/// [`CurveSpace::canvas_to_logical`] with default viewport options.
pub fn canvas_to_logical(p: Point, bounds: &LogicalBounds, canvas: CanvasSize) -> Point {
    CurveSpace::default().canvas_to_logical(p, bounds, canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/curve/space.rs"]
mod tests;

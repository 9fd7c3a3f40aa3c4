//! Interactive editing state for the two curve handles.
//!
//! State is a plain value; every pointer, resize or text event produces a new [`EditorState`]
//! through [`EditorState::apply`]. Handles are stored in bezier-unit space, so canvas resizes
//! never distort the curve.

use crate::curve::bezier::BezierCurve;
use crate::curve::space::{CurveSpace, LogicalBounds};
use crate::foundation::core::{CanvasSize, Point};
use crate::foundation::error::CurveResult;
use crate::foundation::math::clamp01;

/// Which control point a drag moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Handle {
    /// Control point `(a, b)`.
    First,
    /// Control point `(c, d)`.
    Second,
}

/// Input events understood by the editor.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum EditorEvent {
    /// Pointer pressed at a canvas position.
    PointerDown(Point),
    /// Pointer moved to a canvas position.
    PointerMove(Point),
    /// Pointer released.
    PointerUp,
    /// Canvas edge length changed.
    Resize(CanvasSize),
    /// Curve replaced from numeric input or a preset. The time axis is clamped to `[0, 1]` and a
    /// non-finite curve is ignored.
    SetCurve(BezierCurve),
}

/// Immutable snapshot of the editor.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EditorState {
    canvas: CanvasSize,
    p1: Point,
    p2: Point,
    drag: Option<Handle>,
}

impl EditorState {
    /// Initial state: handles at `(0.5, 0)` and `(0, 1)`.
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            canvas,
            p1: Point::new(0.5, 0.0),
            p2: Point::new(0.0, 1.0),
            drag: None,
        }
    }

    /// State showing `curve` (not dragging).
    pub fn with_curve(canvas: CanvasSize, curve: BezierCurve) -> Self {
        let (p1, p2) = curve.control_points();
        Self {
            canvas,
            p1,
            p2,
            drag: None,
        }
    }

    /// Canvas edge length.
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// Handle position in bezier-unit space.
    pub fn handle(&self, h: Handle) -> Point {
        match h {
            Handle::First => self.p1,
            Handle::Second => self.p2,
        }
    }

    /// Handle being dragged, if any.
    pub fn active_handle(&self) -> Option<Handle> {
        self.drag
    }

    /// The curve described by the two handles.
    pub fn curve(&self) -> BezierCurve {
        BezierCurve::from_control_points(self.p1, self.p2)
    }

    /// Viewport for the current handles.
    pub fn bounds(&self, space: &CurveSpace) -> LogicalBounds {
        space.compute_bounds(self.p1, self.p2)
    }

    /// Handle positions in canvas pixels, for hit targets and drawing.
    pub fn handle_positions(&self, space: &CurveSpace) -> (Point, Point) {
        let bounds = self.bounds(space);
        (
            space.logical_to_canvas(self.p1, &bounds, self.canvas),
            space.logical_to_canvas(self.p2, &bounds, self.canvas),
        )
    }

    /// Reduce one event into a new state.
    pub fn apply(self, space: &CurveSpace, event: EditorEvent) -> Self {
        match event {
            EditorEvent::PointerDown(at) => {
                let pos = self.pointer_to_unit(space, at);
                let d1 = pos.distance(self.p1);
                let d2 = pos.distance(self.p2);
                let handle = if d1 < d2 {
                    Handle::First
                } else {
                    Handle::Second
                };
                tracing::trace!(?handle, "drag start");
                Self {
                    drag: Some(handle),
                    ..self
                }
            }
            EditorEvent::PointerMove(at) => match self.drag {
                Some(handle) => {
                    let pos = self.pointer_to_unit(space, at);
                    self.with_handle(handle, pos)
                }
                None => self,
            },
            EditorEvent::PointerUp => Self { drag: None, ..self },
            EditorEvent::Resize(canvas) => Self { canvas, ..self },
            EditorEvent::SetCurve(curve) => {
                let (p1, p2) = curve.control_points();
                if !(p1.is_finite() && p2.is_finite()) {
                    tracing::debug!(?curve, "ignoring non-finite curve");
                    return self;
                }
                Self {
                    p1: Point::new(clamp01(p1.x), p1.y),
                    p2: Point::new(clamp01(p2.x), p2.y),
                    drag: None,
                    ..self
                }
            }
        }
    }

    /// Parse curve text and, on success, move both handles to it.
    ///
    /// On failure the error is returned and the caller keeps `self` as the current state.
    pub fn apply_input(self, text: &str) -> CurveResult<Self> {
        let curve = BezierCurve::parse(text)?;
        Ok(self.apply(&CurveSpace::default(), EditorEvent::SetCurve(curve)))
    }

    fn pointer_to_unit(&self, space: &CurveSpace, at: Point) -> Point {
        let bounds = self.bounds(space);
        let pos = space.canvas_to_logical(at, &bounds, self.canvas);
        Point::new(clamp01(pos.x), pos.y)
    }

    fn with_handle(self, handle: Handle, pos: Point) -> Self {
        match handle {
            Handle::First => Self { p1: pos, ..self },
            Handle::Second => Self { p2: pos, ..self },
        }
    }
}

/// Free-function form of [`EditorState::apply`].
pub fn apply_drag(state: EditorState, space: &CurveSpace, event: EditorEvent) -> EditorState {
    state.apply(space, event)
}

#[cfg(test)]
#[path = "../../tests/unit/editor/session.rs"]
mod tests;

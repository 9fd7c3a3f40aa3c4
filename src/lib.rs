//! curvease turns a visually designed cubic-bezier timing curve into keyframe eases
//! (speed + influence) for an animation host.
//!
//! # Pipeline overview
//!
//! 1. **Edit**: an [`EditorState`] tracks the two control points; pointer, resize and text
//!    events are reduced into new states. [`CurveSpace`] maps between bezier-unit, logical and
//!    canvas coordinates around a square, padded viewport ([`LogicalBounds`]).
//! 2. **Validate**: curve text is parsed into a [`BezierCurve`] with per-field errors, then
//!    clamped exactly once into a [`ClampedCurve`].
//! 3. **Convert**: [`EaseConverter`] turns the clamped curve plus keyframe samples into one
//!    [`EasePair`] per dimension per adjacent key pair.
//! 4. **Apply**: [`apply_curve`] reads the selection through a [`HostAccessor`], plans every
//!    write, and hands the host a single [`EasePlan`].
//!
//! Everything except the host boundary is pure: identical inputs give identical outputs.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod curve;
mod ease;
mod editor;
mod foundation;
mod host;

/// Presentation helpers (two-decimal rounding, CSS text).
pub mod format;
/// Named curve presets.
pub mod presets;

pub use curve::bezier::{BezierCurve, ClampOpts, ClampedCurve, FOUR_NUMBERS_HINT};
pub use curve::preview::{
    DEFAULT_PREVIEW_SECS, MAX_PREVIEW_STEPS, PreviewSample, preview_samples,
};
pub use curve::space::{
    CurveSpace, LogicalBounds, ViewportOpts, canvas_to_logical, compute_bounds, logical_to_canvas,
};
pub use ease::convert::{
    EaseConverter, EasePair, KeyValue, KeyframeEase, KeyframeSample, PairEase, average_speeds,
};
pub use editor::session::{EditorEvent, EditorState, Handle, apply_drag};
pub use foundation::core::{
    BezPath, CanvasSize, CubicBez, Line, Point, Rect, Vec2, pixel_to_unit, unit_to_pixel,
};
pub use foundation::error::{CurveError, CurveResult, SelectionIssue};
pub use host::accessor::{
    EasePlan, HostAccessor, KeyEaseWrite, PropertyId, PropertySelection, SelectedKey, Selection,
};
pub use host::apply::{ApplyReport, apply_curve};
pub use host::memory::{DEFAULT_INFLUENCE, InMemoryHost, InMemoryKey, InMemoryProperty};

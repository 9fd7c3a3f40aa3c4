use crate::curve::bezier::BezierCurve;

/// Duration used when the requested preview duration is unusable.
pub const DEFAULT_PREVIEW_SECS: f64 = 2.0;

/// Upper bound on preview intervals; larger requests are clamped to it.
pub const MAX_PREVIEW_STEPS: usize = 10_000;

/// One sample of a timing preview.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PreviewSample {
    /// Seconds since the start of the preview.
    pub time: f64,
    /// Linear progress in `[0, 1]`.
    pub progress: f64,
    /// Eased progress; may leave `[0, 1]` for overshooting curves.
    pub eased: f64,
}

/// Sample `curve` at `steps + 1` evenly spaced instants across `duration_secs`.
///
/// Non-positive or non-finite durations fall back to [`DEFAULT_PREVIEW_SECS`]; `steps` is
/// clamped to `1..=MAX_PREVIEW_STEPS`.
#[tracing::instrument(level = "debug")]
pub fn preview_samples(curve: BezierCurve, duration_secs: f64, steps: usize) -> Vec<PreviewSample> {
    let duration = if duration_secs.is_finite() && duration_secs > 0.0 {
        duration_secs
    } else {
        DEFAULT_PREVIEW_SECS
    };
    let steps = steps.clamp(1, MAX_PREVIEW_STEPS);
    (0..=steps)
        .map(|i| {
            let progress = i as f64 / steps as f64;
            PreviewSample {
                time: duration * progress,
                progress,
                eased: curve.ease_at(progress),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/curve/preview.rs"]
mod tests;

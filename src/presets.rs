//! Named curve presets.
//!
//! Preset files are JSON arrays of `{ "label", "tooltip", "bezier" }` objects, where `bezier` is
//! curve text in the same `a, b, c, d` form the input box accepts.

use std::path::Path;

use anyhow::Context as _;

use crate::curve::bezier::BezierCurve;
use crate::foundation::error::{CurveError, CurveResult};

/// One preset entry.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Preset {
    /// Button label.
    pub label: String,
    /// Hover text.
    #[serde(default)]
    pub tooltip: String,
    /// Curve text, validated lazily by [`Preset::curve`].
    pub bezier: String,
}

impl Preset {
    /// Parse and validate the preset's curve text.
    pub fn curve(&self) -> CurveResult<BezierCurve> {
        BezierCurve::parse(&self.bezier)
    }
}

/// Parse a preset list from JSON text.
pub fn parse_presets(json: &str) -> CurveResult<Vec<Preset>> {
    let presets: Vec<Preset> =
        serde_json::from_str(json).map_err(|e| CurveError::serde(e.to_string()))?;
    tracing::debug!(count = presets.len(), "loaded presets");
    Ok(presets)
}

/// Load a preset list from a JSON file.
pub fn load_presets(path: &Path) -> CurveResult<Vec<Preset>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read presets '{}'", path.display()))?;
    parse_presets(&text)
}

/// Case-insensitive lookup by label.
pub fn find_preset<'a>(presets: &'a [Preset], label: &str) -> Option<&'a Preset> {
    presets.iter().find(|p| p.label.eq_ignore_ascii_case(label))
}

/// Standard CSS timing curves plus an overshooting "back" curve.
pub fn builtin_presets() -> Vec<Preset> {
    [
        ("linear", "Constant speed", "0, 0, 1, 1"),
        ("ease", "CSS default ease", "0.25, 0.1, 0.25, 1"),
        ("ease-in", "Slow start", "0.42, 0, 1, 1"),
        ("ease-out", "Slow end", "0, 0, 0.58, 1"),
        ("ease-in-out", "Slow start and end", "0.42, 0, 0.58, 1"),
        ("back", "Anticipate and overshoot", "0.68, -0.6, 0.32, 1.6"),
    ]
    .into_iter()
    .map(|(label, tooltip, bezier)| Preset {
        label: label.to_string(),
        tooltip: tooltip.to_string(),
        bezier: bezier.to_string(),
    })
    .collect()
}

#[cfg(test)]
#[path = "../tests/unit/presets.rs"]
mod tests;

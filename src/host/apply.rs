use crate::curve::bezier::BezierCurve;
use crate::ease::convert::{EaseConverter, KeyframeSample};
use crate::foundation::error::{CurveError, CurveResult, SelectionIssue};
use crate::host::accessor::{EasePlan, HostAccessor, Selection};

/// Outcome of a successful [`apply_curve`].
#[derive(Clone, Debug, serde::Serialize)]
pub struct ApplyReport {
    /// Properties that received eases.
    pub applied: Vec<String>,
    /// Selected properties skipped for having fewer than two selected keys.
    pub skipped: Vec<String>,
    /// Number of adjacent key pairs converted across all properties.
    pub pairs: usize,
    /// The plan handed to the host.
    pub plan: EasePlan,
}

/// Convert `curve` into eases for every eligible selected property and write them in one call.
///
/// The curve is validated and clamped before the host is touched, so an invalid curve never
/// triggers a read. All eases are computed before the single `write_ease`; a selection that
/// yields nothing to write is reported as [`CurveError::InsufficientSelection`] and the host is
/// not written to.
#[tracing::instrument(skip(host))]
pub fn apply_curve<H: HostAccessor + ?Sized>(
    host: &mut H,
    curve: BezierCurve,
) -> CurveResult<ApplyReport> {
    let clamped = curve.clamped()?;

    let properties = match host.read_selection()? {
        Selection::NoComposition => {
            return Err(CurveError::selection(SelectionIssue::NoComposition));
        }
        Selection::Properties(props) if props.is_empty() => {
            return Err(CurveError::selection(SelectionIssue::NoPropertySelected));
        }
        Selection::Properties(props) => props,
    };

    let mut plan = EasePlan::new();
    let mut applied = Vec::new();
    let mut skipped = Vec::new();
    let mut pairs = 0;

    for mut prop in properties {
        prop.keys.sort_by_key(|k| k.index);
        prop.keys.dedup_by_key(|k| k.index);
        if prop.keys.len() < 2 {
            tracing::debug!(
                property = %prop.name,
                id = prop.id.0,
                keys = prop.keys.len(),
                "skipping property"
            );
            skipped.push(prop.name);
            continue;
        }

        let samples: Vec<KeyframeSample> = prop.keys.iter().map(|k| k.sample.clone()).collect();
        let converted = EaseConverter::convert(&clamped, &samples)?;
        for pair in &converted {
            let first = prop.keys[pair.first].index;
            let second = prop.keys[pair.second].index;
            plan.set_out(prop.id, first, pair.out_ease());
            plan.set_in(prop.id, second, pair.in_ease());
        }
        pairs += converted.len();
        applied.push(prop.name);
    }

    if applied.is_empty() {
        return Err(CurveError::selection(SelectionIssue::NoKeyframesSelected));
    }

    host.write_ease(&plan)?;
    tracing::debug!(properties = applied.len(), pairs, "applied eases");

    Ok(ApplyReport {
        applied,
        skipped,
        pairs,
        plan,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/host/apply.rs"]
mod tests;

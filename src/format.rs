//! Presentation helpers. Values are rounded to two decimals here and nowhere else.

use crate::curve::bezier::BezierCurve;
use crate::ease::convert::{EasePair, KeyframeEase};
use crate::foundation::math::round_to;

/// Decimal places shown to the user.
pub const DISPLAY_DECIMALS: i32 = 2;

/// Round a value for display.
pub fn round2(v: f64) -> f64 {
    round_to(v, DISPLAY_DECIMALS)
}

/// Copy of `curve` with every field rounded for display.
pub fn rounded_curve(curve: BezierCurve) -> BezierCurve {
    BezierCurve::new(
        round2(curve.a),
        round2(curve.b),
        round2(curve.c),
        round2(curve.d),
    )
}

/// `cubic-bezier(a, b, c, d)` with rounded fields, as used in CSS.
pub fn css_timing(curve: BezierCurve) -> String {
    let r = rounded_curve(curve);
    format!("cubic-bezier({}, {}, {}, {})", r.a, r.b, r.c, r.d)
}

/// `a, b, c, d` with rounded fields, the text form accepted by [`BezierCurve::parse`].
pub fn input_text(curve: BezierCurve) -> String {
    let r = rounded_curve(curve);
    format!("{}, {}, {}, {}", r.a, r.b, r.c, r.d)
}

/// Copy of an ease pair with every field rounded for display.
pub fn rounded_pair(pair: &EasePair) -> EasePair {
    EasePair {
        out_speed: round2(pair.out_speed),
        out_influence: round2(pair.out_influence),
        in_speed: round2(pair.in_speed),
        in_influence: round2(pair.in_influence),
    }
}

/// Copy of a key ease with both fields rounded for display.
pub fn rounded_ease(ease: &KeyframeEase) -> KeyframeEase {
    KeyframeEase {
        speed: round2(ease.speed),
        influence: round2(ease.influence),
    }
}

#[cfg(test)]
#[path = "../tests/unit/format.rs"]
mod tests;

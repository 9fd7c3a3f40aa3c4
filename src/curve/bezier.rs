use std::str::FromStr;

use kurbo::{ParamCurve, ParamCurveDeriv};

use crate::foundation::core::{CubicBez, Point};
use crate::foundation::error::{CurveError, CurveResult};
use crate::foundation::math::clamp01;

/// Hint shown when the curve text does not contain exactly four values.
pub const FOUR_NUMBERS_HINT: &str = "Enter four numbers separated by commas (e.g., 0,-1,1,1)";

const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 64;
const SOLVE_EPSILON: f64 = 1e-7;

/// Cubic-bezier timing curve from `(0, 0)` to `(1, 1)` with control points `(a, b)` and `(c, d)`.
///
/// `a` and `c` live on the time axis and must stay inside `[0, 1]`; `b` and `d` live on the value
/// axis and may overshoot in either direction.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BezierCurve {
    /// Time coordinate of the first control point.
    pub a: f64,
    /// Value coordinate of the first control point.
    pub b: f64,
    /// Time coordinate of the second control point.
    pub c: f64,
    /// Value coordinate of the second control point.
    pub d: f64,
}

impl BezierCurve {
    /// The identity timing curve.
    pub const LINEAR: Self = Self {
        a: 0.0,
        b: 0.0,
        c: 1.0,
        d: 1.0,
    };

    /// Build a curve without validating it.
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// Build a curve from two control points in bezier-unit space.
    pub fn from_control_points(p1: Point, p2: Point) -> Self {
        Self::new(p1.x, p1.y, p2.x, p2.y)
    }

    /// Control points `(a, b)` and `(c, d)`.
    pub fn control_points(self) -> (Point, Point) {
        (Point::new(self.a, self.b), Point::new(self.c, self.d))
    }

    /// Parse `"a, b, c, d"` text and validate every field.
    ///
    /// Fails with [`CurveError::Parse`] when the text does not split into four tokens, and with
    /// [`CurveError::Range`] listing every offending field otherwise.
    pub fn parse(input: &str) -> CurveResult<Self> {
        let tokens: Vec<&str> = input.trim().split(',').map(str::trim).collect();
        if tokens.len() != 4 {
            return Err(CurveError::parse(FOUR_NUMBERS_HINT));
        }
        let fields = [
            parse_number(tokens[0]),
            parse_number(tokens[1]),
            parse_number(tokens[2]),
            parse_number(tokens[3]),
        ];
        validate_fields(fields)
    }

    /// Range-check an already numeric curve.
    pub fn validate(self) -> CurveResult<Self> {
        let finite = |v: f64| Some(v).filter(|v| v.is_finite());
        validate_fields([
            finite(self.a),
            finite(self.b),
            finite(self.c),
            finite(self.d),
        ])
    }

    /// Validate and clamp with the default [`ClampOpts`].
    pub fn clamped(self) -> CurveResult<ClampedCurve> {
        self.clamped_with(ClampOpts::default())
    }

    /// Validate, then pull `a` and `c` away from the boundaries that would divide by zero.
    ///
    /// This is the only place clamping happens; everything downstream of a [`ClampedCurve`]
    /// can divide by `a` and `1 - c` freely.
    pub fn clamped_with(self, opts: ClampOpts) -> CurveResult<ClampedCurve> {
        let curve = self.validate()?;
        opts.validate()?;
        Ok(ClampedCurve {
            a: curve.a.max(opts.min_a),
            b: curve.b,
            c: curve.c.min(opts.max_c),
            d: curve.d,
        })
    }

    /// The curve as a kurbo cubic in bezier-unit space, with `a` and `c` clamped to `[0, 1]`.
    pub fn to_cubic(self) -> CubicBez {
        CubicBez::new(
            Point::ZERO,
            Point::new(clamp01(self.a), self.b),
            Point::new(clamp01(self.c), self.d),
            Point::new(1.0, 1.0),
        )
    }

    /// Evaluate the timing function: map linear `progress` in `[0, 1]` to eased progress.
    ///
    /// Solves `x(t) = progress` with Newton iteration, falling back to bisection when the slope
    /// flattens out, then returns `y(t)`. Values of `y` outside `[0, 1]` are preserved so
    /// overshooting curves preview correctly.
    pub fn ease_at(self, progress: f64) -> f64 {
        if !progress.is_finite() || progress <= 0.0 {
            return 0.0;
        }
        if progress >= 1.0 {
            return 1.0;
        }
        let cubic = self.to_cubic();
        let t = solve_t_for_x(&cubic, progress);
        cubic.eval(t).y
    }
}

impl FromStr for BezierCurve {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Default for BezierCurve {
    fn default() -> Self {
        Self::LINEAR
    }
}

/// Clamp limits applied between validation and ease conversion.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ClampOpts {
    /// Smallest `a` allowed into the ease math (`out_speed` divides by `a`).
    pub min_a: f64,
    /// Largest `c` allowed into the ease math (`in_speed` divides by `1 - c`).
    pub max_c: f64,
}

impl Default for ClampOpts {
    fn default() -> Self {
        Self {
            min_a: 0.001,
            max_c: 0.999,
        }
    }
}

impl ClampOpts {
    fn validate(self) -> CurveResult<()> {
        if !(self.min_a > 0.0 && self.min_a <= 1.0) {
            return Err(CurveError::validation("clamp min_a must be in (0, 1]"));
        }
        if !(0.0..1.0).contains(&self.max_c) {
            return Err(CurveError::validation("clamp max_c must be in [0, 1)"));
        }
        Ok(())
    }
}

/// A validated curve whose `a` is strictly positive and whose `c` is strictly below one.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ClampedCurve {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl ClampedCurve {
    /// Clamped `a`.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// `b`, unchanged.
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Clamped `c`.
    pub fn c(&self) -> f64 {
        self.c
    }

    /// `d`, unchanged.
    pub fn d(&self) -> f64 {
        self.d
    }

    /// Outgoing influence in percent: `a * 100`.
    pub fn out_influence(&self) -> f64 {
        self.a * 100.0
    }

    /// Incoming influence in percent: `(1 - c) * 100`.
    pub fn in_influence(&self) -> f64 {
        (1.0 - self.c) * 100.0
    }

    /// Outgoing speed for a segment moving at `avg_speed`.
    pub fn out_speed(&self, avg_speed: f64) -> f64 {
        avg_speed * self.b / self.a
    }

    /// Incoming speed for a segment moving at `avg_speed`.
    pub fn in_speed(&self, avg_speed: f64) -> f64 {
        avg_speed * (1.0 - self.d) / (1.0 - self.c)
    }

    /// The clamped values as a plain curve.
    pub fn curve(&self) -> BezierCurve {
        BezierCurve::new(self.a, self.b, self.c, self.d)
    }
}

fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn validate_fields(fields: [Option<f64>; 4]) -> CurveResult<BezierCurve> {
    let unit = |v: Option<f64>| v.filter(|v| (0.0..=1.0).contains(v));

    let mut errors = Vec::new();
    let a = unit(fields[0]);
    if a.is_none() {
        errors.push("a must be between 0 and 1".to_string());
    }
    if fields[1].is_none() {
        errors.push("b must be a number".to_string());
    }
    let c = unit(fields[2]);
    if c.is_none() {
        errors.push("c must be between 0 and 1".to_string());
    }
    if fields[3].is_none() {
        errors.push("d must be a number".to_string());
    }

    match (a, fields[1], c, fields[3]) {
        (Some(a), Some(b), Some(c), Some(d)) => Ok(BezierCurve { a, b, c, d }),
        _ => Err(CurveError::range(errors)),
    }
}

fn solve_t_for_x(cubic: &CubicBez, x: f64) -> f64 {
    let deriv = cubic.deriv();

    let mut t = x;
    for _ in 0..NEWTON_ITERATIONS {
        let err = cubic.eval(t).x - x;
        if err.abs() < SOLVE_EPSILON {
            return t;
        }
        let dx = deriv.eval(t).x;
        if dx.abs() < SOLVE_EPSILON {
            break;
        }
        let next = t - err / dx;
        if !(0.0..=1.0).contains(&next) {
            break;
        }
        t = next;
    }

    // x(t) is monotone for a, c in [0, 1], so bisection always converges.
    let (mut lo, mut hi) = (0.0, 1.0);
    t = x;
    for _ in 0..BISECTION_ITERATIONS {
        let cx = cubic.eval(t).x;
        if (cx - x).abs() < SOLVE_EPSILON {
            break;
        }
        if cx < x {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }
    t
}

#[cfg(test)]
#[path = "../../tests/unit/curve/bezier.rs"]
mod tests;

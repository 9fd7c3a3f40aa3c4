use crate::curve::bezier::ClampedCurve;
use crate::foundation::error::{CurveError, CurveResult, SelectionIssue};

/// Keyframe value: a scalar or a fixed-length vector (e.g. position).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum KeyValue {
    /// One-dimensional property value.
    Scalar(f64),
    /// Multi-dimensional property value.
    Vector(Vec<f64>),
}

impl KeyValue {
    /// Number of scalar dimensions.
    pub fn dims(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::Vector(v) => v.len(),
        }
    }

    /// Component `j`, if present.
    pub fn component(&self, j: usize) -> Option<f64> {
        match self {
            Self::Scalar(v) => (j == 0).then_some(*v),
            Self::Vector(v) => v.get(j).copied(),
        }
    }

    fn is_finite(&self) -> bool {
        match self {
            Self::Scalar(v) => v.is_finite(),
            Self::Vector(v) => v.iter().all(|c| c.is_finite()),
        }
    }
}

impl From<f64> for KeyValue {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<Vec<f64>> for KeyValue {
    fn from(v: Vec<f64>) -> Self {
        Self::Vector(v)
    }
}

/// A keyframe as read from the host: time in seconds plus value.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyframeSample {
    /// Key time in seconds.
    pub time: f64,
    /// Key value.
    pub value: KeyValue,
}

impl KeyframeSample {
    /// Build a sample from anything convertible into a [`KeyValue`].
    pub fn new(time: f64, value: impl Into<KeyValue>) -> Self {
        Self {
            time,
            value: value.into(),
        }
    }
}

/// One host ease entry for one dimension.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyframeEase {
    /// Target rate of change at the key, in value units per second.
    pub speed: f64,
    /// Share of the neighbouring interval, in percent, over which `speed` dominates.
    pub influence: f64,
}

/// Outgoing and incoming ease for one dimension of one adjacent keyframe pair.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EasePair {
    /// Speed leaving the first key.
    pub out_speed: f64,
    /// Influence leaving the first key.
    pub out_influence: f64,
    /// Speed arriving at the second key.
    pub in_speed: f64,
    /// Influence arriving at the second key.
    pub in_influence: f64,
}

impl EasePair {
    /// Ease applied to the outgoing side of the first key.
    pub fn out_ease(&self) -> KeyframeEase {
        KeyframeEase {
            speed: self.out_speed,
            influence: self.out_influence,
        }
    }

    /// Ease applied to the incoming side of the second key.
    pub fn in_ease(&self) -> KeyframeEase {
        KeyframeEase {
            speed: self.in_speed,
            influence: self.in_influence,
        }
    }
}

/// Eases for one adjacent pair, one [`EasePair`] per dimension.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PairEase {
    /// Position of the first key in the converted slice.
    pub first: usize,
    /// Position of the second key in the converted slice.
    pub second: usize,
    /// Per-dimension eases.
    pub dims: Vec<EasePair>,
}

impl PairEase {
    /// Outgoing ease vector for the first key.
    pub fn out_ease(&self) -> Vec<KeyframeEase> {
        self.dims.iter().map(EasePair::out_ease).collect()
    }

    /// Incoming ease vector for the second key.
    pub fn in_ease(&self) -> Vec<KeyframeEase> {
        self.dims.iter().map(EasePair::in_ease).collect()
    }
}

/// Stateless converter from a clamped curve plus keyframes to host eases.
pub struct EaseConverter;

impl EaseConverter {
    /// Convert every adjacent pair of `samples`.
    ///
    /// `samples` must already be in key order: a time earlier than its predecessor's is a
    /// [`CurveError::Validation`]. Fewer than two samples is an
    /// [`CurveError::InsufficientSelection`], never an empty success.
    #[tracing::instrument(skip(samples), fields(keys = samples.len()))]
    pub fn convert(curve: &ClampedCurve, samples: &[KeyframeSample]) -> CurveResult<Vec<PairEase>> {
        if samples.len() < 2 {
            return Err(CurveError::selection(SelectionIssue::TooFewKeyframes {
                found: samples.len(),
            }));
        }
        validate_samples(samples)?;

        let pairs = samples
            .windows(2)
            .enumerate()
            .map(|(i, w)| -> CurveResult<PairEase> {
                Ok(PairEase {
                    first: i,
                    second: i + 1,
                    dims: Self::convert_pair(curve, &w[0], &w[1])?,
                })
            })
            .collect::<CurveResult<Vec<_>>>()?;
        tracing::debug!(pairs = pairs.len(), "converted keyframe pairs");
        Ok(pairs)
    }

    /// Convert a single pair of keys, one [`EasePair`] per dimension.
    pub fn convert_pair(
        curve: &ClampedCurve,
        k1: &KeyframeSample,
        k2: &KeyframeSample,
    ) -> CurveResult<Vec<EasePair>> {
        let out_influence = curve.out_influence();
        let in_influence = curve.in_influence();
        Ok(average_speeds(k1, k2)?
            .into_iter()
            .map(|avg| EasePair {
                out_speed: curve.out_speed(avg),
                out_influence,
                in_speed: curve.in_speed(avg),
                in_influence,
            })
            .collect())
    }
}

/// Per-dimension average speed between two keys: `|v2 - v1| / |t2 - t1|`, or zero when both
/// keys sit on the same instant.
pub fn average_speeds(k1: &KeyframeSample, k2: &KeyframeSample) -> CurveResult<Vec<f64>> {
    let dims = k1.value.dims();
    if dims != k2.value.dims() {
        return Err(CurveError::validation(format!(
            "keyframe dimensions differ: {} vs {}",
            dims,
            k2.value.dims()
        )));
    }
    let time_diff = (k2.time - k1.time).abs();
    (0..dims)
        .map(|j| {
            let (Some(v1), Some(v2)) = (k1.value.component(j), k2.value.component(j)) else {
                return Err(CurveError::validation("keyframe value is missing a component"));
            };
            Ok(if time_diff != 0.0 {
                (v2 - v1).abs() / time_diff
            } else {
                0.0
            })
        })
        .collect()
}

fn validate_samples(samples: &[KeyframeSample]) -> CurveResult<()> {
    let dims = samples[0].value.dims();
    if dims == 0 {
        return Err(CurveError::validation("keyframe values must have at least one dimension"));
    }
    for (i, s) in samples.iter().enumerate() {
        if !s.time.is_finite() || !s.value.is_finite() {
            return Err(CurveError::validation(format!(
                "keyframe {i} has a non-finite time or value"
            )));
        }
        if s.value.dims() != dims {
            return Err(CurveError::validation(format!(
                "keyframe {i} has {} dimensions, expected {dims}",
                s.value.dims()
            )));
        }
        if i > 0 && s.time < samples[i - 1].time {
            return Err(CurveError::validation(format!(
                "keyframe {i} at {}s precedes keyframe {} at {}s",
                s.time,
                i - 1,
                samples[i - 1].time
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/ease/convert.rs"]
mod tests;

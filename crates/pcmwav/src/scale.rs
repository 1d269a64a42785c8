//! Conversion of input samples to the integer range of a sample width.
//!
//! Floating point input is scaled so that `[-scale, scale]` covers the output
//! range with 0.0 landing exactly on the midpoint. With
//! `c = 2^(bits - 1) - 0.5`, a value `v` becomes
//! `midpoint + round(v / scale * c)`, rounding to nearest with ties toward
//! zero. The input interval that survives without clipping is therefore
//! `[-(1 + 1/c) * scale, scale]`.
//!
//! Integer input is never scaled; out-of-range values are only clamped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::buffer::{FloatBuffer, Frames, SampleBuffer};
use crate::error::{WavError, WavResult};
use crate::wav::SampleWidth;

/// How floating point input is mapped to the output range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScaleRepr", into = "ScaleRepr")]
pub enum Scale {
    /// `[-s, s]` maps to the full output range.
    Fixed(f64),
    /// Pick `s` so the data uses as much of the output range as possible.
    Auto,
}

impl Default for Scale {
    fn default() -> Self {
        Scale::Fixed(1.0)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scale::Fixed(s) => write!(f, "{s}"),
            Scale::Auto => f.write_str("auto"),
        }
    }
}

impl FromStr for Scale {
    type Err = WavError;

    fn from_str(s: &str) -> WavResult<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Scale::Auto);
        }
        let value = s.parse::<f64>().map_err(|_| {
            WavError::invalid_param("scale", format!("'{s}' is neither a number nor \"auto\""))
        })?;
        Scale::Fixed(value).validated()
    }
}

impl Scale {
    fn validated(self) -> WavResult<Self> {
        match self {
            Scale::Fixed(s) if !(s.is_finite() && s > 0.0) => Err(WavError::invalid_param(
                "scale",
                format!("{s} is not a positive finite number"),
            )),
            scale => Ok(scale),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ScaleRepr {
    Number(f64),
    Name(String),
}

impl TryFrom<ScaleRepr> for Scale {
    type Error = WavError;

    fn try_from(repr: ScaleRepr) -> WavResult<Self> {
        match repr {
            ScaleRepr::Number(s) => Scale::Fixed(s).validated(),
            ScaleRepr::Name(name) => name.parse(),
        }
    }
}

impl From<Scale> for ScaleRepr {
    fn from(scale: Scale) -> Self {
        match scale {
            Scale::Fixed(s) => ScaleRepr::Number(s),
            Scale::Auto => ScaleRepr::Name("auto".to_string()),
        }
    }
}

/// What to do when samples had to be clipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipPolicy {
    /// Clip silently.
    Ignore,
    /// Clip and log a warning.
    #[default]
    Warn,
    /// Fail with [`WavError::ClippedData`].
    Raise,
}

impl fmt::Display for ClipPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ClipPolicy::Ignore => "ignore",
            ClipPolicy::Warn => "warn",
            ClipPolicy::Raise => "raise",
        })
    }
}

impl FromStr for ClipPolicy {
    type Err = WavError;

    fn from_str(s: &str) -> WavResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(ClipPolicy::Ignore),
            "warn" => Ok(ClipPolicy::Warn),
            "raise" => Ok(ClipPolicy::Raise),
            other => Err(WavError::invalid_param(
                "clip",
                format!("'{other}' must be one of \"ignore\", \"warn\" or \"raise\""),
            )),
        }
    }
}

impl ClipPolicy {
    /// Applies the policy to the clipping found in one write call.
    pub fn check(self, report: Option<&ClipReport>) -> WavResult<()> {
        let Some(report) = report else {
            return Ok(());
        };
        match self {
            ClipPolicy::Ignore => Ok(()),
            ClipPolicy::Warn => {
                tracing::warn!(
                    clipped = report.clipped,
                    total = report.total,
                    "{report}"
                );
                Ok(())
            }
            ClipPolicy::Raise => Err(WavError::ClippedData {
                report: report.clone(),
            }),
        }
    }
}

/// Clipping aggregated over a whole buffer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipReport {
    /// Number of samples that were clamped.
    pub clipped: usize,
    /// Number of samples converted.
    pub total: usize,
    /// Lowest input value that is not clipped.
    pub lower: f64,
    /// Highest input value that is not clipped.
    pub upper: f64,
    /// Effective scale, for floating point input.
    pub scale: Option<f64>,
}

impl fmt::Display for ClipReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} data values were clipped when converted to the output format",
            self.clipped, self.total
        )?;
        match self.scale {
            Some(scale) => write!(
                f,
                "; with scale={scale}, the interval of input values that will not be clipped is [{}, {}]",
                self.lower, self.upper
            ),
            None => write!(f, "; the output range is [{}, {}]", self.lower, self.upper),
        }
    }
}

/// Integer samples ready for packing, plus any clipping that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Scaled {
    /// Samples within the range of the target width.
    pub samples: SampleBuffer,
    /// Present when at least one sample was clamped.
    pub clip: Option<ClipReport>,
}

/// Distance from the midpoint to the edge of the outermost rounding cell.
pub fn scale_factor(width: SampleWidth) -> f64 {
    2f64.powi(i32::from(width.bits()) - 1) - 0.5
}

/// Rounds to the nearest integer; exact halves go toward zero.
pub fn round_half_toward_zero(x: f64) -> f64 {
    (x.abs() - 0.5).ceil().max(0.0).copysign(x)
}

/// Resolves the effective scale for `samples`.
///
/// `Auto` picks the smallest scale that avoids clipping; all-zero input gets 1.
pub fn effective_scale(samples: &[f64], scale: Option<Scale>, width: SampleWidth) -> WavResult<f64> {
    match scale.unwrap_or_default().validated()? {
        Scale::Fixed(s) => Ok(s),
        Scale::Auto => {
            let c = scale_factor(width);
            let (max_pos, max_neg) = samples.iter().fold((0f64, 0f64), |(pos, neg), &v| {
                (pos.max(v), neg.max(-v))
            });
            let s = max_pos.max(max_neg / (1.0 + 1.0 / c));
            Ok(if s > 0.0 { s } else { 1.0 })
        }
    }
}

/// Scales floating point input to integers of `width`.
///
/// Fails on NaN or infinite samples.
pub fn float_to_integer(
    input: &FloatBuffer,
    width: SampleWidth,
    scale: Option<Scale>,
) -> WavResult<Scaled> {
    if let Some(index) = input.samples().iter().position(|v| !v.is_finite()) {
        return Err(WavError::invalid_param(
            "data",
            format!("sample {index} is {}", input.samples()[index]),
        ));
    }

    let s = effective_scale(input.samples(), scale, width)?;
    let c = scale_factor(width);
    let lower = -(1.0 + 1.0 / c);
    let (min, max, midpoint) = (width.min_value(), width.max_value(), width.midpoint());

    let mut clipped = 0;
    let samples = input.map(|&v| {
        let scaled = v / s;
        if scaled > 1.0 || scaled < lower {
            clipped += 1;
        }
        let y = midpoint.saturating_add(round_half_toward_zero(scaled * c) as i64);
        y.clamp(min, max) as i32
    });

    let clip = (clipped > 0).then(|| ClipReport {
        clipped,
        total: input.len(),
        lower: lower * s,
        upper: s,
        scale: Some(s),
    });
    Ok(Scaled { samples, clip })
}

/// Clamps integer input to the range of `width` without scaling.
pub fn clip_integers(input: &Frames<i64>, width: SampleWidth) -> Scaled {
    let (min, max) = (width.min_value(), width.max_value());

    let mut clipped = 0;
    let samples = input.map(|&v| {
        if !width.contains(v) {
            clipped += 1;
        }
        v.clamp(min, max) as i32
    });

    let clip = (clipped > 0).then(|| ClipReport {
        clipped,
        total: input.len(),
        lower: min as f64,
        upper: max as f64,
        scale: None,
    });
    Scaled { samples, clip }
}

#[cfg(test)]
mod tests;

//! Scalar-or-array point inputs and shape-preserving results.
//!
//! Callers hand in each coordinate either as a single value or as a
//! sequence. The result is a single [`AngleResult`] when every input was a
//! scalar and a sequence as soon as any of them was an array. The two
//! entry frames pair coordinates differently:
//!
//! - native: `y` and `z` must have equal lengths and are zipped; `x` only
//!   decides the output shape.
//! - SW: the three sequences are broadcast cyclically before the frame
//!   transform (see [`FrameTransform::apply_cyclic`]).

use serde::{Deserialize, Serialize};
use std::slice;

use crate::error::{ClearanceError, Result};
use crate::frame::{NativePoint, SwPoint};
use crate::transform::FrameTransform;

/// One coordinate input, either a scalar or a sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coord {
    /// A single value.
    Scalar(f64),
    /// A sequence of values.
    Array(Vec<f64>),
}

impl Coord {
    /// Whether the caller passed a sequence.
    pub fn is_array(&self) -> bool {
        matches!(self, Coord::Array(_))
    }

    /// Values as a slice; a scalar is a slice of length one.
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Coord::Scalar(v) => slice::from_ref(v),
            Coord::Array(values) => values,
        }
    }

    /// Number of values after normalisation.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// True for an empty sequence.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl From<f64> for Coord {
    fn from(v: f64) -> Self {
        Coord::Scalar(v)
    }
}

impl From<Vec<f64>> for Coord {
    fn from(values: Vec<f64>) -> Self {
        Coord::Array(values)
    }
}

impl From<&[f64]> for Coord {
    fn from(values: &[f64]) -> Self {
        Coord::Array(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Coord {
    fn from(values: [f64; N]) -> Self {
        Coord::Array(values.to_vec())
    }
}

/// Clearance result for one measured point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleResult {
    /// Side clearance angle in **degrees**. `NaN` when the point has no
    /// real solution; `±90` when the formula's denominator vanished.
    pub alpha_degrees: f64,
    /// Axial offset shared by the whole batch.
    pub h: f64,
    /// Native-frame axial coordinate of the point on the flank.
    pub x_native: f64,
}

impl AngleResult {
    /// False when the angle is `NaN` or pinned at `±90°` by a vanishing
    /// denominator.
    pub fn has_real_solution(&self) -> bool {
        self.alpha_degrees.is_finite() && self.alpha_degrees.abs() < 90.0
    }
}

/// Results shaped like the caller's input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AngleOutput {
    /// Every input coordinate was a scalar.
    Scalar(AngleResult),
    /// At least one input coordinate was a sequence.
    Sequence(Vec<AngleResult>),
}

impl AngleOutput {
    /// Wrap per-point results, collapsing to a scalar for scalar input.
    ///
    /// Scalar input always produces exactly one result.
    pub(crate) fn from_results(mut results: Vec<AngleResult>, array: bool) -> Self {
        if array {
            AngleOutput::Sequence(results)
        } else {
            debug_assert_eq!(results.len(), 1);
            match results.pop() {
                Some(result) => AngleOutput::Scalar(result),
                None => AngleOutput::Sequence(results),
            }
        }
    }

    /// Whether this is the sequence shape.
    pub fn is_sequence(&self) -> bool {
        matches!(self, AngleOutput::Sequence(_))
    }

    /// Results in input order.
    pub fn results(&self) -> &[AngleResult] {
        match self {
            AngleOutput::Scalar(r) => slice::from_ref(r),
            AngleOutput::Sequence(rs) => rs,
        }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.results().len()
    }

    /// True for an empty sequence.
    pub fn is_empty(&self) -> bool {
        self.results().is_empty()
    }

    /// Shared axial offset, if any point was solved.
    pub fn h(&self) -> Option<f64> {
        self.results().first().map(|r| r.h)
    }

    /// The single result of a scalar call.
    pub fn as_scalar(&self) -> Option<&AngleResult> {
        match self {
            AngleOutput::Scalar(r) => Some(r),
            AngleOutput::Sequence(_) => None,
        }
    }

    /// Consume into a vector of results.
    pub fn into_vec(self) -> Vec<AngleResult> {
        match self {
            AngleOutput::Scalar(r) => vec![r],
            AngleOutput::Sequence(rs) => rs,
        }
    }
}

/// Transverse `(y, z)` pairs of a native-frame request.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeBatch {
    /// `(y, z)` per point, in input order.
    pub pairs: Vec<(f64, f64)>,
    /// Whether the output takes the sequence shape.
    pub array: bool,
}

impl NativeBatch {
    /// Pair up `y` and `z`.
    ///
    /// Fails when their lengths differ; no value is repeated to make them
    /// fit. `x` is not read beyond its shape.
    pub fn new(x: &Coord, y: &Coord, z: &Coord) -> Result<Self> {
        if y.len() != z.len() {
            return Err(ClearanceError::LengthMismatch {
                y: y.len(),
                z: z.len(),
            });
        }
        let pairs = y
            .as_slice()
            .iter()
            .copied()
            .zip(z.as_slice().iter().copied())
            .collect();
        Ok(Self {
            pairs,
            array: x.is_array() || y.is_array() || z.is_array(),
        })
    }
}

/// SW-frame request mapped into native points.
#[derive(Debug, Clone, PartialEq)]
pub struct SwBatch {
    /// Native-frame points, in input order.
    pub points: Vec<NativePoint>,
    /// Whether the output takes the sequence shape.
    pub array: bool,
}

impl SwBatch {
    /// Transform SW coordinates with cyclic broadcasting.
    pub fn new(transform: &FrameTransform, x: &Coord, y: &Coord, z: &Coord) -> Result<Self> {
        let array = x.is_array() || y.is_array() || z.is_array();
        let points = if array {
            transform.apply_cyclic(x.as_slice(), y.as_slice(), z.as_slice())?
        } else {
            let p = SwPoint::new(x.as_slice()[0], y.as_slice()[0], z.as_slice()[0]);
            vec![transform.apply(&p)]
        };
        Ok(Self { points, array })
    }
}

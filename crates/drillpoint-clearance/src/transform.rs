//! SW-frame to native-frame coordinate transform.

use drillpoint_math::LinearMap;
use serde::{Deserialize, Serialize};

use crate::error::{ClearanceError, Result};
use crate::frame::{NativePoint, SwPoint};

/// Row-major coefficients of the default SW to native map.
pub const SW_TO_NATIVE: [[f64; 3]; 3] = [
    [-0.1747159967, 0.6235799837, -0.1867561927],
    [0.3122687596, -0.1413437982, 0.8581431812],
    [0.8697589148, -0.1087945740, -0.4267759731],
];

/// Fixed linear map taking SW-frame points into the native drill frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameTransform {
    map: LinearMap,
}

impl FrameTransform {
    /// Transform from explicit row-major coefficients.
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self {
            map: LinearMap::from_rows(rows),
        }
    }

    /// The underlying linear map.
    pub fn map(&self) -> &LinearMap {
        &self.map
    }

    /// Map one SW point into the native frame.
    pub fn apply(&self, p: &SwPoint) -> NativePoint {
        NativePoint(self.map.apply_point(&p.0))
    }

    /// Map coordinate sequences of possibly different lengths.
    ///
    /// Produces `max(len)` points; point `i` takes `xs[i % xs.len()]`,
    /// `ys[i % ys.len()]` and `zs[i % zs.len()]`, so a single shared value
    /// is repeated against longer sequences. The native-frame entry point
    /// does not broadcast like this.
    pub fn apply_cyclic(&self, xs: &[f64], ys: &[f64], zs: &[f64]) -> Result<Vec<NativePoint>> {
        let n = xs.len().max(ys.len()).max(zs.len());
        if n == 0 {
            return Ok(Vec::new());
        }
        for (axis, values) in [('x', xs), ('y', ys), ('z', zs)] {
            if values.is_empty() {
                return Err(ClearanceError::EmptyCoordinate { axis });
            }
        }

        Ok((0..n)
            .map(|i| {
                let p = SwPoint::new(xs[i % xs.len()], ys[i % ys.len()], zs[i % zs.len()]);
                self.apply(&p)
            })
            .collect())
    }

    /// Inverse transform (native to SW), if the matrix is invertible.
    pub fn inverse(&self) -> Option<Self> {
        self.map.inverse().map(|map| Self { map })
    }
}

impl Default for FrameTransform {
    fn default() -> Self {
        Self::from_rows(SW_TO_NATIVE)
    }
}

#![warn(missing_docs)]

//! Math types for the drillpoint clearance solver.
//!
//! Thin wrappers around nalgebra providing the handful of types the
//! drill-point formulas need: points, a fixed 3x3 linear map
//! between measurement frames, and the tolerance constants that pick
//! degenerate branches.

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A 3x3 linear map (no translation) between two coordinate frames.
///
/// Serialized as three rows, so a config file reads the same way the
/// matrix is written on paper.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[[f64; 3]; 3]", into = "[[f64; 3]; 3]")]
pub struct LinearMap {
    /// The underlying 3x3 matrix.
    pub matrix: Matrix3<f64>,
}

impl LinearMap {
    /// Identity map.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Build a map from row-major coefficients.
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        let [r0, r1, r2] = rows;
        Self {
            matrix: Matrix3::new(
                r0[0], r0[1], r0[2], //
                r1[0], r1[1], r1[2], //
                r2[0], r2[1], r2[2],
            ),
        }
    }

    /// Row-major coefficients of the map.
    pub fn rows(&self) -> [[f64; 3]; 3] {
        let m = &self.matrix;
        [
            [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
            [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
            [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
        ]
    }

    /// Map a point.
    ///
    /// Each output coordinate is accumulated left to right
    /// (`m[r][0]*x + m[r][1]*y + m[r][2]*z`) so results are reproducible
    /// independently of how the matrix product is vectorised.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let m = &self.matrix;
        Point3::new(
            m[(0, 0)] * p.x + m[(0, 1)] * p.y + m[(0, 2)] * p.z,
            m[(1, 0)] * p.x + m[(1, 1)] * p.y + m[(1, 2)] * p.z,
            m[(2, 0)] * p.x + m[(2, 1)] * p.y + m[(2, 2)] * p.z,
        )
    }

    /// Inverse of this map, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }
}

impl Default for LinearMap {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<[[f64; 3]; 3]> for LinearMap {
    fn from(rows: [[f64; 3]; 3]) -> Self {
        Self::from_rows(rows)
    }
}

impl From<LinearMap> for [[f64; 3]; 3] {
    fn from(map: LinearMap) -> Self {
        map.rows()
    }
}

/// Tolerances that decide when a closed-form solve takes a special branch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// A leading quadratic coefficient below this magnitude is treated as
    /// zero and the equation is solved as linear.
    pub degenerate: f64,
    /// Angular distance (radians) from `±π/2` within which an angle counts
    /// as a right angle.
    pub right_angle: f64,
}

impl Tolerance {
    /// Default tolerances (`1e-10` coefficient epsilon, `1e-12` rad).
    pub const DEFAULT: Self = Self {
        degenerate: 1e-10,
        right_angle: 1e-12,
    };

    /// Check if a quadratic's leading coefficient is effectively zero.
    pub fn is_degenerate(&self, coefficient: f64) -> bool {
        coefficient.abs() < self.degenerate
    }

    /// Check if `angle` is `±π/2` within tolerance.
    pub fn is_right_angle(&self, angle: f64) -> bool {
        (angle.abs() - FRAC_PI_2).abs() < self.right_angle
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

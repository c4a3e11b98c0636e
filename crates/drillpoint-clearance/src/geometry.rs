//! Grinding geometry of a conically ground drill point.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

use crate::error::{ClearanceError, Result};

/// Grinding geometry shared by every point of one calculation.
///
/// Lengths use one consistent unit (millimetres in practice); angles are
/// radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeometryParams", into = "GeometryParams")]
pub struct DrillGeometry {
    l: f64,
    d: f64,
    theta: f64,
    beta: f64,
}

/// Serialized form of [`DrillGeometry`], validated on the way in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct GeometryParams {
    l: f64,
    d: f64,
    theta: f64,
    beta: f64,
}

impl DrillGeometry {
    /// Create a geometry from lengths and angles in radians.
    ///
    /// * `l` - axial distance from the grinding-cone apex to the foot of the
    ///   common perpendicular between the drill and cone axes
    /// * `d` - length of that perpendicular (axis offset)
    /// * `theta` - angle between the drill axis and the cone axis
    /// * `beta` - cone half-angle between its axis and the generatrix
    ///
    /// Requires `l > 0`, `d > 0` and finite angles. Angles past `±π/2` are
    /// accepted because the offset solver has a dedicated branch for them.
    pub fn new(l: f64, d: f64, theta: f64, beta: f64) -> Result<Self> {
        if !(l.is_finite() && l > 0.0) {
            return Err(ClearanceError::InvalidGeometry(format!(
                "l must be positive and finite, got {l}"
            )));
        }
        if !(d.is_finite() && d > 0.0) {
            return Err(ClearanceError::InvalidGeometry(format!(
                "d must be positive and finite, got {d}"
            )));
        }
        if !theta.is_finite() || !beta.is_finite() {
            return Err(ClearanceError::InvalidGeometry(format!(
                "angles must be finite, got theta={theta}, beta={beta}"
            )));
        }
        if theta.abs() > FRAC_PI_2 || beta.abs() > FRAC_PI_2 {
            tracing::warn!(theta, beta, "grinding angle beyond a right angle");
        }
        Ok(Self { l, d, theta, beta })
    }

    /// Create a geometry with `theta` and `beta` given in degrees.
    pub fn from_degrees(l: f64, d: f64, theta_deg: f64, beta_deg: f64) -> Result<Self> {
        Self::new(l, d, theta_deg.to_radians(), beta_deg.to_radians())
    }

    /// Axial distance from the cone apex to the axis offset.
    pub fn l(&self) -> f64 {
        self.l
    }

    /// Offset between the drill axis and the cone axis.
    pub fn d(&self) -> f64 {
        self.d
    }

    /// Angle between drill and cone axes (radians).
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Cone half-angle (radians).
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Trigonometric values reused by every solver stage.
    pub fn trig(&self) -> Trig {
        Trig {
            sin_theta: self.theta.sin(),
            cos_theta: self.theta.cos(),
            tan_theta: self.theta.tan(),
            cos_beta: self.beta.cos(),
            tan_beta: self.beta.tan(),
        }
    }
}

impl TryFrom<GeometryParams> for DrillGeometry {
    type Error = ClearanceError;

    fn try_from(p: GeometryParams) -> Result<Self> {
        Self::new(p.l, p.d, p.theta, p.beta)
    }
}

impl From<DrillGeometry> for GeometryParams {
    fn from(g: DrillGeometry) -> Self {
        Self {
            l: g.l,
            d: g.d,
            theta: g.theta,
            beta: g.beta,
        }
    }
}

/// Sines, cosines and tangents of the grinding angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trig {
    /// `sin θ`
    pub sin_theta: f64,
    /// `cos θ`
    pub cos_theta: f64,
    /// `tan θ`
    pub tan_theta: f64,
    /// `cos β`
    pub cos_beta: f64,
    /// `tan β`
    pub tan_beta: f64,
}

impl Trig {
    /// `cos² θ`
    pub fn cos2_theta(&self) -> f64 {
        self.cos_theta * self.cos_theta
    }

    /// `cos² β`
    pub fn cos2_beta(&self) -> f64 {
        self.cos_beta * self.cos_beta
    }
}

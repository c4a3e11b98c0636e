//! Native axial coordinate of a measured flank point.

use drillpoint_math::Tolerance;
use serde::{Deserialize, Serialize};

use crate::geometry::{DrillGeometry, Trig};
use crate::quadratic::ReducedQuadratic;

/// Which case of the projection solve produced the axial value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionBranch {
    /// `|axc|` below the degenerate epsilon: `cxc / (2·bxc)`.
    Linear,
    /// `|θ| = π/2`: the axial value is fixed at zero.
    RightAngle,
    /// General case: root continuous in the sign of `bxc`.
    Quadratic,
}

/// Solved axial value of one point, before scaling by `1 / cos θ`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Raw root of the projection quadratic; this is what the clearance
    /// formula consumes.
    pub raw: f64,
    /// Case that produced it.
    pub branch: ProjectionBranch,
}

impl Projection {
    /// Reported native axial coordinate, `raw / cos θ`.
    pub fn native_axial(&self, trig: &Trig) -> f64 {
        self.raw / trig.cos_theta
    }
}

/// Coefficients of the per-point quadratic `axc·x² − 2·bxc·x + cxc = 0`.
pub fn projection_equation(
    geometry: &DrillGeometry,
    trig: &Trig,
    h: f64,
    y: f64,
    z: f64,
) -> ReducedQuadratic {
    let (l, d) = (geometry.l(), geometry.d());
    let ct2 = trig.cos2_theta();
    let cb2 = trig.cos2_beta();
    let st = trig.sin_theta;

    let along_y = y * st - h;
    let along_l = l * st * st - h;
    let radial = (y - l * st).powi(2) + (z - d).powi(2);

    ReducedQuadratic {
        a: ct2 - cb2,
        b: ct2 * along_y - cb2 * along_l,
        c: ct2 * along_y.powi(2) - cb2 * (along_l.powi(2) + ct2 * radial),
    }
}

/// Solve the projection quadratic for a point with transverse
/// coordinates `(y, z)` given the shared offset `h`.
pub fn solve_projection(
    geometry: &DrillGeometry,
    trig: &Trig,
    h: f64,
    y: f64,
    z: f64,
    tolerance: &Tolerance,
) -> Projection {
    let eq = projection_equation(geometry, trig, h, y, z);

    if tolerance.is_degenerate(eq.a) {
        Projection {
            raw: eq.linear_root(),
            branch: ProjectionBranch::Linear,
        }
    } else if tolerance.is_right_angle(geometry.theta()) {
        Projection {
            raw: 0.0,
            branch: ProjectionBranch::RightAngle,
        }
    } else {
        Projection {
            raw: eq.signed_root(),
            branch: ProjectionBranch::Quadratic,
        }
    }
}

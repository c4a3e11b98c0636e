//! Axial offset `h` between the drill tip and the grinding-cone apex.

use drillpoint_math::Tolerance;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use tracing::debug;

use crate::geometry::DrillGeometry;
use crate::quadratic::ReducedQuadratic;

/// Which case of the offset solve produced `h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OffsetBranch {
    /// `|ah|` below the degenerate epsilon: `h = ch / (2·bh)`.
    Linear,
    /// `ah < 0`: minus root.
    MinusRoot,
    /// `ah ≥ 0` with `|θ| < π/2`: minus root, reached separately from
    /// [`OffsetBranch::MinusRoot`].
    AcuteMinusRoot,
    /// `|θ| = π/2`: `h = l`.
    RightAngle,
    /// `ah ≥ 0` with `|θ| > π/2`: plus root.
    PlusRoot,
}

/// Solved axial offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxialOffset {
    /// The offset `h`; `NaN` when the quadratic has no real root.
    pub value: f64,
    /// Case that produced it.
    pub branch: OffsetBranch,
}

/// Coefficients of `ah·h² − 2·bh·h + ch = 0` for a geometry.
///
/// With `tt = tan²θ` and `tb = tan²β`: `ah = tt − tb`, `bh = tt·l`,
/// `ch = l²·tt + d²`.
pub fn offset_equation(geometry: &DrillGeometry) -> ReducedQuadratic {
    let trig = geometry.trig();
    let (l, d) = (geometry.l(), geometry.d());
    let tt = trig.tan_theta * trig.tan_theta;
    let tb = trig.tan_beta * trig.tan_beta;

    ReducedQuadratic {
        a: tt - tb,
        b: tt * l,
        c: l * l * trig.tan_theta * trig.tan_theta + d * d,
    }
}

/// Solve for the axial offset `h`.
///
/// The five cases are tested in order; the first that matches wins. A
/// negative discriminant is not an error, it yields `h = NaN`.
pub fn solve_axial_offset(geometry: &DrillGeometry, tolerance: &Tolerance) -> AxialOffset {
    let eq = offset_equation(geometry);
    let theta = geometry.theta();
    let right_angle = tolerance.is_right_angle(theta);

    let (value, branch) = if tolerance.is_degenerate(eq.a) {
        (eq.linear_root(), OffsetBranch::Linear)
    } else if eq.a < 0.0 {
        (eq.minus_root(), OffsetBranch::MinusRoot)
    } else if !right_angle && theta.abs() < FRAC_PI_2 {
        (eq.minus_root(), OffsetBranch::AcuteMinusRoot)
    } else if right_angle {
        (geometry.l(), OffsetBranch::RightAngle)
    } else {
        (eq.plus_root(), OffsetBranch::PlusRoot)
    };

    debug!(h = value, ?branch, ah = eq.a, "solved axial offset");
    AxialOffset { value, branch }
}

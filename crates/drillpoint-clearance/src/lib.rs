#![warn(missing_docs)]

//! Side clearance angle of conically ground twist drills.
//!
//! Given the grinding geometry of a drill point and points measured on
//! the ground flank, this crate computes the working side clearance angle
//! α at each point. The solve runs in three closed-form stages:
//!
//! 1. [`offset`] - axial offset `h` between the drill tip and the
//!    grinding-cone apex (one quadratic per geometry)
//! 2. [`projection`] - native axial coordinate of each point (one
//!    quadratic per point)
//! 3. [`clearance`] - `α = atan(−B / A)` from the two
//!
//! Points may be given in the native drill frame or in the SW frame of
//! the CAD export, which [`transform`] maps into the native one.
//!
//! Numeric dead ends (negative discriminants, vanishing denominators) are
//! not errors: they show up as `NaN` or `±90°` in the results, and
//! [`AngleResult::has_real_solution`] tells them apart.
//!
//! # Example
//!
//! ```
//! use drillpoint_clearance::{calculate_angle, AngleOutput};
//!
//! // l, d in mm; theta, beta in radians
//! let out = calculate_angle(85.0879, 5.7064, 0.4363, 0.5935, 0.0, 1.0, 1.0).unwrap();
//! let AngleOutput::Scalar(result) = out else { unreachable!() };
//! assert!((result.alpha_degrees - 15.366).abs() < 1e-3);
//!
//! // Any array input gives one result per (y, z) pair
//! let (ys, zs) = ([1.0, 2.0], [1.0, 3.0]);
//! let out = calculate_angle(85.0879, 5.7064, 0.4363, 0.5935, 0.0, ys, zs).unwrap();
//! assert_eq!(out.len(), 2);
//! ```

pub mod batch;
pub mod calculator;
pub mod clearance;
pub mod config;
mod error;
pub mod frame;
pub mod geometry;
pub mod offset;
pub mod projection;
pub mod quadratic;
pub mod transform;

pub use batch::{AngleOutput, AngleResult, Coord, NativeBatch, SwBatch};
pub use calculator::ClearanceCalculator;
pub use clearance::ClearanceTerms;
pub use config::SolverConfig;
pub use error::{ClearanceError, Result};
pub use frame::{Frame, NativePoint, SwPoint};
pub use geometry::DrillGeometry;
pub use offset::{solve_axial_offset, AxialOffset, OffsetBranch};
pub use projection::{solve_projection, Projection, ProjectionBranch};
pub use transform::{FrameTransform, SW_TO_NATIVE};

pub use drillpoint_math::Tolerance;

/// Clearance angles for native-frame points, with default configuration.
///
/// `theta` and `beta` are radians; the returned angles are degrees. Each
/// of `x`, `y`, `z` may be a scalar or a sequence. `y` and `z` must have
/// equal lengths; that is checked before anything else. `x` only decides
/// whether the result is a scalar or a sequence.
pub fn calculate_angle(
    l: f64,
    d: f64,
    theta: f64,
    beta: f64,
    x: impl Into<Coord>,
    y: impl Into<Coord>,
    z: impl Into<Coord>,
) -> Result<AngleOutput> {
    let batch = NativeBatch::new(&x.into(), &y.into(), &z.into())?;
    let geometry = DrillGeometry::new(l, d, theta, beta)?;
    Ok(ClearanceCalculator::default().calculate_native_batch(&geometry, &batch))
}

/// Clearance angles for SW-frame points, with default configuration.
///
/// Sequences of unequal length are broadcast cyclically, then every point
/// is mapped into the native frame and solved as in [`calculate_angle`].
pub fn calculate_angle_from_sw(
    l: f64,
    d: f64,
    theta: f64,
    beta: f64,
    x: impl Into<Coord>,
    y: impl Into<Coord>,
    z: impl Into<Coord>,
) -> Result<AngleOutput> {
    let geometry = DrillGeometry::new(l, d, theta, beta)?;
    ClearanceCalculator::default().calculate_from_sw(&geometry, &x.into(), &y.into(), &z.into())
}

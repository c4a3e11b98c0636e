//! Clearance calculator: offset once, then every point.

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::batch::{AngleOutput, AngleResult, Coord, NativeBatch, SwBatch};
use crate::clearance::ClearanceTerms;
use crate::config::SolverConfig;
use crate::error::Result;
use crate::frame::{NativePoint, SwPoint};
use crate::geometry::{DrillGeometry, Trig};
use crate::offset::{solve_axial_offset, AxialOffset};
use crate::projection::solve_projection;

/// Side clearance calculator bound to one configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClearanceCalculator {
    config: SolverConfig,
}

impl ClearanceCalculator {
    /// Create a calculator with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Axial offset for a geometry.
    pub fn offset(&self, geometry: &DrillGeometry) -> AxialOffset {
        solve_axial_offset(geometry, &self.config.tolerance)
    }

    /// Clearance for one native point given an already solved offset.
    ///
    /// Only `y` and `z` are read: the axial coordinate is re-derived from
    /// the ground flank, and the derived value is what the result reports.
    pub fn solve_point(
        &self,
        geometry: &DrillGeometry,
        offset: &AxialOffset,
        point: &NativePoint,
    ) -> AngleResult {
        let trig = geometry.trig();
        self.solve_transverse(geometry, &trig, offset.value, point.y(), point.z())
    }

    /// Clearance for one SW point.
    pub fn solve_sw_point(&self, geometry: &DrillGeometry, point: &SwPoint) -> AngleResult {
        let offset = self.offset(geometry);
        let native = self.config.sw_to_native.apply(point);
        self.solve_point(geometry, &offset, &native)
    }

    /// Clearance for native points sharing one geometry, in input order.
    pub fn solve_points(
        &self,
        geometry: &DrillGeometry,
        points: &[NativePoint],
    ) -> Vec<AngleResult> {
        let trig = geometry.trig();
        let h = self.offset(geometry).value;
        self.dispatch(points, |p| self.solve_transverse(geometry, &trig, h, p.y(), p.z()))
    }

    /// Native-frame calculation with scalar-or-array coordinates.
    ///
    /// `y` and `z` must have the same length. The result is a sequence if
    /// any coordinate was passed as an array.
    #[instrument(
        level = "debug",
        skip_all,
        fields(theta = geometry.theta(), beta = geometry.beta())
    )]
    pub fn calculate(
        &self,
        geometry: &DrillGeometry,
        x: &Coord,
        y: &Coord,
        z: &Coord,
    ) -> Result<AngleOutput> {
        let batch = NativeBatch::new(x, y, z)?;
        Ok(self.calculate_native_batch(geometry, &batch))
    }

    /// SW-frame calculation with scalar-or-array coordinates.
    ///
    /// Coordinates are broadcast cyclically and mapped into the native frame
    /// before the native calculation runs.
    #[instrument(
        level = "debug",
        skip_all,
        fields(theta = geometry.theta(), beta = geometry.beta())
    )]
    pub fn calculate_from_sw(
        &self,
        geometry: &DrillGeometry,
        x: &Coord,
        y: &Coord,
        z: &Coord,
    ) -> Result<AngleOutput> {
        let batch = SwBatch::new(&self.config.sw_to_native, x, y, z)?;
        let results = self.solve_points(geometry, &batch.points);
        Ok(AngleOutput::from_results(results, batch.array))
    }

    /// Solve an already shape-checked native batch.
    pub fn calculate_native_batch(
        &self,
        geometry: &DrillGeometry,
        batch: &NativeBatch,
    ) -> AngleOutput {
        let trig = geometry.trig();
        let h = self.offset(geometry).value;
        let results = self.dispatch(&batch.pairs, |&(y, z)| {
            self.solve_transverse(geometry, &trig, h, y, z)
        });
        AngleOutput::from_results(results, batch.array)
    }

    fn dispatch<T, F>(&self, items: &[T], solve: F) -> Vec<AngleResult>
    where
        T: Sync,
        F: Fn(&T) -> AngleResult + Sync + Send,
    {
        if items.len() >= self.config.parallel_threshold {
            debug!(points = items.len(), "solving batch in parallel");
            items.par_iter().map(&solve).collect()
        } else {
            items.iter().map(&solve).collect()
        }
    }

    fn solve_transverse(
        &self,
        geometry: &DrillGeometry,
        trig: &Trig,
        h: f64,
        y: f64,
        z: f64,
    ) -> AngleResult {
        let projection = solve_projection(geometry, trig, h, y, z, &self.config.tolerance);
        let terms = ClearanceTerms::new(geometry, trig, h, projection.raw, y, z);
        AngleResult {
            alpha_degrees: terms.alpha_degrees(),
            h,
            x_native: projection.native_axial(trig),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClearanceError;

    fn geometry() -> DrillGeometry {
        DrillGeometry::new(85.0879, 5.7064, 0.4363, 0.5935).unwrap()
    }

    #[test]
    fn test_scalar_calculation() {
        let calc = ClearanceCalculator::default();
        let out = calc.calculate(&geometry(), &0.0.into(), &1.0.into(), &1.0.into()).unwrap();
        let r = out.as_scalar().unwrap();
        assert!((r.h - 35.38063731100522).abs() < 1e-9);
        assert!((r.alpha_degrees - 15.365984240595091).abs() < 1e-9);
        assert!((r.x_native - -0.8014561334202971).abs() < 1e-9);
    }

    #[test]
    fn test_solve_point_ignores_x() {
        let calc = ClearanceCalculator::default();
        let g = geometry();
        let offset = calc.offset(&g);
        let a = calc.solve_point(&g, &offset, &NativePoint::new(0.0, 2.0, 3.0));
        let b = calc.solve_point(&g, &offset, &NativePoint::new(99.0, 2.0, 3.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let g = geometry();
        let ys: Vec<f64> = (0..64).map(|i| -3.0 + i as f64 * 0.1).collect();
        let zs: Vec<f64> = (0..64).map(|i| 0.5 + i as f64 * 0.05).collect();

        let sequential = ClearanceCalculator::new(SolverConfig {
            parallel_threshold: usize::MAX,
            ..Default::default()
        });
        let parallel = ClearanceCalculator::new(SolverConfig {
            parallel_threshold: 0,
            ..Default::default()
        });

        let x = Coord::from(0.0);
        let (y, z) = (Coord::from(ys), Coord::from(zs));
        let a = sequential.calculate(&g, &x, &y, &z).unwrap();
        let b = parallel.calculate(&g, &x, &y, &z).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_mismatch_reported_before_solving() {
        let calc = ClearanceCalculator::default();
        let err = calc
            .calculate(&geometry(), &0.0.into(), &[1.0, 2.0].into(), &[1.0, 2.0, 3.0].into())
            .unwrap_err();
        assert_eq!(err, ClearanceError::LengthMismatch { y: 2, z: 3 });
    }

    #[test]
    fn test_sw_point_matches_manual_transform() {
        let calc = ClearanceCalculator::default();
        let g = geometry();
        let sw = SwPoint::new(10.0, 20.0, 30.0);
        let direct = calc.solve_sw_point(&g, &sw);
        let native = calc.config().sw_to_native.apply(&sw);
        let out = calc
            .calculate(&g, &native.x().into(), &native.y().into(), &native.z().into())
            .unwrap();
        assert_eq!(direct, *out.as_scalar().unwrap());
        assert!((direct.alpha_degrees - -53.091975057881406).abs() < 1e-8);
    }
}

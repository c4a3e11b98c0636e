//! Property-based tests for the shape rules and the frame transform.

use proptest::prelude::*;

use drillpoint_clearance::{
    calculate_angle, calculate_angle_from_sw, ClearanceCalculator, ClearanceError, Coord,
    DrillGeometry, FrameTransform, NativePoint, SolverConfig, SwPoint,
};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Plausible grinding geometry: lengths in mm, angles in radians.
fn arb_geometry() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (10.0f64..150.0, 0.5f64..20.0, 0.05f64..1.4, 0.05f64..1.4)
}

/// A coordinate in the neighbourhood of a drill point.
fn arb_coord() -> impl Strategy<Value = f64> {
    -50.0f64..50.0
}

fn arb_coords(max: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(arb_coord(), 0..max)
}

// ---------------------------------------------------------------------------
// 1. Native shape: y, z of different lengths always fail
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn mismatched_lengths_always_fail(
        (l, d, theta, beta) in arb_geometry(),
        ys in arb_coords(8),
        zs in arb_coords(8),
        x in arb_coord(),
    ) {
        prop_assume!(ys.len() != zs.len());
        let (ny, nz) = (ys.len(), zs.len());
        let err = calculate_angle(l, d, theta, beta, x, ys, zs).unwrap_err();
        prop_assert_eq!(err, ClearanceError::LengthMismatch { y: ny, z: nz });
    }
}

// ---------------------------------------------------------------------------
// 2. Native shape: array output length equals len(y), in input order
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn array_output_matches_pairs(
        (l, d, theta, beta) in arb_geometry(),
        pairs in prop::collection::vec((arb_coord(), arb_coord()), 0..8),
    ) {
        let ys: Vec<f64> = pairs.iter().map(|p| p.0).collect();
        let zs: Vec<f64> = pairs.iter().map(|p| p.1).collect();
        let out = calculate_angle(l, d, theta, beta, 0.0, ys, zs).unwrap();
        prop_assert!(out.is_sequence());
        prop_assert_eq!(out.len(), pairs.len());

        let g = DrillGeometry::new(l, d, theta, beta).unwrap();
        let calc = ClearanceCalculator::default();
        let offset = calc.offset(&g);
        for (r, &(y, z)) in out.results().iter().zip(&pairs) {
            let single = calc.solve_point(&g, &offset, &NativePoint::new(0.0, y, z));
            // NaN != NaN, so compare bit patterns
            prop_assert_eq!(r.alpha_degrees.to_bits(), single.alpha_degrees.to_bits());
            prop_assert_eq!(r.x_native.to_bits(), single.x_native.to_bits());
        }
    }
}

// ---------------------------------------------------------------------------
// 3. Scalar in, scalar out
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn scalar_inputs_give_scalar_output(
        (l, d, theta, beta) in arb_geometry(),
        (x, y, z) in (arb_coord(), arb_coord(), arb_coord()),
    ) {
        let native = calculate_angle(l, d, theta, beta, x, y, z).unwrap();
        prop_assert!(native.as_scalar().is_some());
        let sw = calculate_angle_from_sw(l, d, theta, beta, x, y, z).unwrap();
        prop_assert!(sw.as_scalar().is_some());
    }
}

// ---------------------------------------------------------------------------
// 4. SW shape: output length is the longest input, never an error
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn sw_broadcast_length_is_max(
        (l, d, theta, beta) in arb_geometry(),
        xs in prop::collection::vec(arb_coord(), 1..6),
        ys in prop::collection::vec(arb_coord(), 1..6),
        zs in prop::collection::vec(arb_coord(), 1..6),
    ) {
        let n = xs.len().max(ys.len()).max(zs.len());
        let out = calculate_angle_from_sw(l, d, theta, beta, xs, ys, zs).unwrap();
        prop_assert_eq!(out.len(), n);
    }
}

// ---------------------------------------------------------------------------
// 5. Transform round trip through the inverse matrix
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn transform_round_trip((x, y, z) in (arb_coord(), arb_coord(), arb_coord())) {
        let t = FrameTransform::default();
        let inv = t.inverse().expect("default transform is invertible");
        let sw = SwPoint::new(x, y, z);
        let back = inv.map().apply_point(&t.apply(&sw).0);
        prop_assert!((back - sw.0).norm() < 1e-9 * (1.0 + sw.0.coords.norm()),
            "round trip drifted: {:?} -> {:?}", sw.0, back);
    }
}

// ---------------------------------------------------------------------------
// 6. Parallel and sequential dispatch agree bit for bit
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn parallel_dispatch_is_identical(
        (l, d, theta, beta) in arb_geometry(),
        pairs in prop::collection::vec((arb_coord(), arb_coord()), 1..32),
    ) {
        let g = DrillGeometry::new(l, d, theta, beta).unwrap();
        let ys: Coord = pairs.iter().map(|p| p.0).collect::<Vec<_>>().into();
        let zs: Coord = pairs.iter().map(|p| p.1).collect::<Vec<_>>().into();
        let x = Coord::from(0.0);

        let seq = ClearanceCalculator::new(SolverConfig {
            parallel_threshold: usize::MAX,
            ..Default::default()
        });
        let par = ClearanceCalculator::new(SolverConfig {
            parallel_threshold: 0,
            ..Default::default()
        });
        let a = seq.calculate(&g, &x, &ys, &zs).unwrap();
        let b = par.calculate(&g, &x, &ys, &zs).unwrap();
        for (ra, rb) in a.results().iter().zip(b.results()) {
            prop_assert_eq!(ra.alpha_degrees.to_bits(), rb.alpha_degrees.to_bits());
        }
    }
}

//! Side clearance angle from the solved offset and projection.

use std::f64::consts::PI;

use crate::geometry::{DrillGeometry, Trig};

/// Numerator and denominator of the clearance angle, `α = atan(−B / A)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearanceTerms {
    /// Denominator `A`.
    pub a: f64,
    /// Numerator `B`.
    pub b: f64,
}

impl ClearanceTerms {
    /// Evaluate `A` and `B` for a point.
    ///
    /// `x_raw` is the projection root before the `1 / cos θ` scaling.
    /// Products are evaluated factor by factor (`t·cos θ·cos θ`, not
    /// `t·cos²θ`).
    pub fn new(
        geometry: &DrillGeometry,
        trig: &Trig,
        h: f64,
        x_raw: f64,
        y: f64,
        z: f64,
    ) -> Self {
        let (l, d) = (geometry.l(), geometry.d());
        let st = trig.sin_theta;
        let ct = trig.cos_theta;
        let cb = trig.cos_beta;

        let r = (y * y + z * z).sqrt();
        let along_y = x_raw - y * st + h;
        let along_l = x_raw - l * st * st + h;

        let a = r * (along_y * ct * ct - along_l * cb * cb) / ct;
        let b = (y * d - z * l * st) * cb * cb + z * along_y * st;

        Self { a, b }
    }

    /// Clearance angle in radians.
    ///
    /// `A = 0` makes the ratio infinite (`±π/2`), or `NaN` when `B` is zero
    /// as well. Neither is coerced.
    pub fn alpha_radians(&self) -> f64 {
        (-self.b / self.a).atan()
    }

    /// Clearance angle in degrees, as `rad · 180 / π`.
    pub fn alpha_degrees(&self) -> f64 {
        self.alpha_radians() * 180.0 / PI
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_regression_terms() {
        let g = DrillGeometry::new(85.0879, 5.7064, 0.4363, 0.5935).unwrap();
        let (h, x_raw) = (35.38063731100522, -0.7263768790435716);
        let t = ClearanceTerms::new(&g, &g.trig(), h, x_raw, 1.0, 1.0);
        assert!((t.a - 23.009157363498964).abs() < 1e-9);
        assert!((t.b - -6.3230836031669195).abs() < 1e-9);
        assert!((t.alpha_degrees() - 15.365984240595091).abs() < 1e-9);
    }

    #[test]
    fn test_zero_denominator_is_right_angle() {
        let t = ClearanceTerms { a: 0.0, b: -2.0 };
        assert_eq!(t.alpha_radians(), FRAC_PI_2);
        let t = ClearanceTerms { a: 0.0, b: 2.0 };
        assert_eq!(t.alpha_radians(), -FRAC_PI_2);
        let t = ClearanceTerms { a: -0.0, b: -2.0 };
        assert_eq!(t.alpha_radians(), -FRAC_PI_2);
    }

    #[test]
    fn test_zero_over_zero_is_nan() {
        let t = ClearanceTerms { a: 0.0, b: 0.0 };
        assert!(t.alpha_degrees().is_nan());
    }

    #[test]
    fn test_nan_projection_propagates() {
        let g = DrillGeometry::new(85.0879, 5.7064, 0.4363, 0.5935).unwrap();
        let t = ClearanceTerms::new(&g, &g.trig(), 35.0, f64::NAN, 1.0, 1.0);
        assert!(t.a.is_nan());
        assert!(t.alpha_degrees().is_nan());
    }

    #[test]
    fn test_point_on_axis_has_zero_denominator() {
        // r = 0 at y = z = 0, while B = 0 too
        let g = DrillGeometry::new(85.0879, 5.7064, 0.4363, 0.5935).unwrap();
        let t = ClearanceTerms::new(&g, &g.trig(), 35.0, -1.0, 0.0, 0.0);
        assert_eq!(t.a, 0.0);
        assert_eq!(t.b, 0.0);
        assert!(t.alpha_degrees().is_nan());
    }
}

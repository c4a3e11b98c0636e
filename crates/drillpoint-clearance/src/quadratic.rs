//! Roots of the reduced quadratic `a·x² − 2·b·x + c = 0`.
//!
//! Both solver stages write their equations with an even middle
//! coefficient, so the roots are `(b ± √(b² − a·c)) / a` and the linear
//! fallback is `c / (2·b)`. A negative discriminant yields `NaN`; nothing
//! here rejects it.

/// Coefficients of `a·x² − 2·b·x + c = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReducedQuadratic {
    /// Leading coefficient.
    pub a: f64,
    /// Half of the (negated) middle coefficient.
    pub b: f64,
    /// Constant term.
    pub c: f64,
}

impl ReducedQuadratic {
    /// Reduced discriminant `b² − a·c`.
    pub fn discriminant(&self) -> f64 {
        self.b * self.b - self.a * self.c
    }

    /// Root `(b − √disc) / a`.
    pub fn minus_root(&self) -> f64 {
        (self.b - self.discriminant().sqrt()) / self.a
    }

    /// Root `(b + √disc) / a`.
    pub fn plus_root(&self) -> f64 {
        (self.b + self.discriminant().sqrt()) / self.a
    }

    /// Root `(b − sgn(b)·√disc) / a` with `sgn(0) = +1`.
    ///
    /// Picks the same root on both sides of `b = 0`.
    pub fn signed_root(&self) -> f64 {
        let sign = if self.b >= 0.0 { 1.0 } else { -1.0 };
        (self.b - sign * self.discriminant().sqrt()) / self.a
    }

    /// Solution when `a` is dropped: `c / (2·b)`.
    pub fn linear_root(&self) -> f64 {
        0.5 * self.c / self.b
    }

    /// Residual `a·x² − 2·b·x + c` at `x`.
    pub fn residual(&self, x: f64) -> f64 {
        self.a * x * x - 2.0 * self.b * x + self.c
    }
}

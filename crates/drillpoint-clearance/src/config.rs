//! Solver configuration.

use drillpoint_math::Tolerance;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ClearanceError, Result};
use crate::transform::FrameTransform;

/// Immutable settings shared by every calculation a solver performs.
///
/// Every field is optional in a TOML file; missing ones take their
/// defaults.
///
/// ```toml
/// parallel_threshold = 4096
/// sw_to_native = [
///     [-0.1747159967, 0.6235799837, -0.1867561927],
///     [0.3122687596, -0.1413437982, 0.8581431812],
///     [0.8697589148, -0.1087945740, -0.4267759731],
/// ]
///
/// [tolerance]
/// degenerate = 1e-10
/// right_angle = 1e-12
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// SW to native frame transform.
    pub sw_to_native: FrameTransform,
    /// Batches with at least this many points are solved on the rayon
    /// thread pool.
    pub parallel_threshold: usize,
    /// Branch-selection tolerances.
    pub tolerance: Tolerance,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            sw_to_native: FrameTransform::default(),
            parallel_threshold: 1024,
            tolerance: Tolerance::DEFAULT,
        }
    }
}

impl SolverConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| ClearanceError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ClearanceError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Serialize to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| ClearanceError::Config(e.to_string()))
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        let tol = &self.tolerance;
        if !(tol.degenerate.is_finite() && tol.degenerate >= 0.0) {
            return Err(ClearanceError::Config(
                "tolerance.degenerate must be finite and non-negative".into(),
            ));
        }
        if !(tol.right_angle.is_finite() && tol.right_angle >= 0.0) {
            return Err(ClearanceError::Config(
                "tolerance.right_angle must be finite and non-negative".into(),
            ));
        }
        if self.sw_to_native.map().rows().iter().flatten().any(|c| !c.is_finite()) {
            return Err(ClearanceError::Config(
                "sw_to_native coefficients must be finite".into(),
            ));
        }
        Ok(())
    }
}

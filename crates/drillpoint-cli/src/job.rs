//! Batch job files.
//!
//! A job names a geometry, the frame its points were measured in, and the
//! coordinates, each a scalar or a list:
//!
//! ```toml
//! frame = "sw"
//! degrees = true
//! x = 0.0
//! y = [1.0, 2.0, 3.0]
//! z = [1.0, 1.5, 2.0]
//!
//! [geometry]
//! l = 85.0879
//! d = 5.7064
//! theta = 25.0
//! beta = 34.0
//! ```
//!
//! JSON files use the same keys.

use anyhow::{bail, Context, Result};
use drillpoint_clearance::{AngleOutput, ClearanceCalculator, Coord, DrillGeometry, Frame};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Geometry as written in a job file; angle unit depends on [`Job::degrees`].
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GeometryInput {
    pub l: f64,
    pub d: f64,
    pub theta: f64,
    pub beta: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    pub geometry: GeometryInput,
    #[serde(default)]
    pub frame: Frame,
    /// Angles in degrees instead of radians.
    #[serde(default)]
    pub degrees: bool,
    pub x: Coord,
    pub y: Coord,
    pub z: Coord,
}

impl Job {
    /// Load a job, picking the format from the file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let parse: fn(&str) -> Result<Self> = match ext.to_lowercase().as_str() {
            "json" => Self::from_json,
            "toml" => Self::from_toml,
            _ => bail!("Unknown job format: {} (expected .json or .toml)", ext),
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let job = parse(&text)?;
        info!(path = %path.display(), frame = ?job.frame, "loaded job");
        Ok(job)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid JSON job")
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid TOML job")
    }

    pub fn geometry(&self) -> Result<DrillGeometry> {
        let g = self.geometry;
        let geometry = if self.degrees {
            DrillGeometry::from_degrees(g.l, g.d, g.theta, g.beta)?
        } else {
            DrillGeometry::new(g.l, g.d, g.theta, g.beta)?
        };
        Ok(geometry)
    }

    pub fn run(&self, calc: &ClearanceCalculator) -> Result<AngleOutput> {
        let geometry = self.geometry()?;
        let output = match self.frame {
            Frame::Native => calc.calculate(&geometry, &self.x, &self.y, &self.z)?,
            Frame::Sw => calc.calculate_from_sw(&geometry, &self.x, &self.y, &self.z)?,
        };
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const NATIVE_JSON: &str = r#"{
        "geometry": { "l": 85.0879, "d": 5.7064, "theta": 0.4363, "beta": 0.5935 },
        "x": 0.0,
        "y": [1.0, 1.0],
        "z": [1.0, -1.0]
    }"#;

    #[test]
    fn test_native_json_job() {
        let job = Job::from_json(NATIVE_JSON).unwrap();
        assert_eq!(job.frame, Frame::Native);
        let out = job.run(&ClearanceCalculator::default()).unwrap();
        assert_eq!(out.len(), 2);
        let alphas: Vec<f64> = out.results().iter().map(|r| r.alpha_degrees).collect();
        assert_relative_eq!(alphas[0], 15.365984240595091, epsilon = 1e-9);
        assert_relative_eq!(alphas[1], -31.18512415451005, epsilon = 1e-9);
    }

    #[test]
    fn test_sw_toml_job_broadcasts() {
        let job = Job::from_toml(
            r#"
            frame = "sw"
            x = 10.0
            y = [20.0, 20.0, 20.0]
            z = 30.0

            [geometry]
            l = 85.0879
            d = 5.7064
            theta = 0.4363
            beta = 0.5935
            "#,
        )
        .unwrap();
        let out = job.run(&ClearanceCalculator::default()).unwrap();
        assert_eq!(out.len(), 3);
        for r in out.results() {
            assert_relative_eq!(r.alpha_degrees, -53.091975057881406, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_degrees_flag() {
        let mut job = Job::from_json(NATIVE_JSON).unwrap();
        job.degrees = true;
        job.geometry.theta = 0.4363_f64.to_degrees();
        job.geometry.beta = 0.5935_f64.to_degrees();
        let g = job.geometry().unwrap();
        assert_relative_eq!(g.theta(), 0.4363, epsilon = 1e-12);
        assert_relative_eq!(g.beta(), 0.5935, epsilon = 1e-12);
    }

    #[test]
    fn test_native_mismatch_surfaces() {
        let job = Job::from_json(
            r#"{
                "geometry": { "l": 85.0879, "d": 5.7064, "theta": 0.4363, "beta": 0.5935 },
                "x": 0.0, "y": [1.0], "z": [1.0, 2.0, 3.0]
            }"#,
        )
        .unwrap();
        let err = job.run(&ClearanceCalculator::default()).unwrap_err();
        assert!(err.to_string().contains("same length"));
    }

    #[test]
    fn test_load_logs_job() {
        let path = std::env::temp_dir().join(format!("drillpoint-job-{}.json", std::process::id()));
        std::fs::write(&path, NATIVE_JSON).unwrap();
        let (job, logs) = crate::capture_logs(|| Job::load(&path));
        std::fs::remove_file(&path).unwrap();

        assert_eq!(job.unwrap().frame, Frame::Native);
        assert!(logs.contains("loaded job"), "logs: {logs}");
        assert!(logs.contains("frame=Native"), "logs: {logs}");
    }

    #[test]
    fn test_unknown_extension() {
        let err = Job::load(Path::new("job.yaml")).unwrap_err();
        assert!(err.to_string().contains("Unknown job format: yaml"));
    }
}

//! Error types for clearance angle calculations.

use thiserror::Error;

/// Errors that can occur before the solver produces any angle.
///
/// Numeric outcomes such as a negative discriminant are not errors; they
/// surface as `NaN` or infinite values inside the results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClearanceError {
    /// The `y` and `z` coordinate sequences of a native-frame batch differ
    /// in length.
    #[error("y and z coordinates must have the same length (y: {y}, z: {z})")]
    LengthMismatch {
        /// Number of `y` values supplied.
        y: usize,
        /// Number of `z` values supplied.
        z: usize,
    },

    /// A coordinate sequence is empty while another one is not, so the
    /// cyclic broadcast of the SW path has nothing to repeat.
    #[error("{axis} coordinate sequence is empty")]
    EmptyCoordinate {
        /// Axis name (`x`, `y` or `z`).
        axis: char,
    },

    /// Drill geometry violates its invariants.
    #[error("invalid drill geometry: {0}")]
    InvalidGeometry(String),

    /// Solver configuration could not be read or is unusable.
    #[error("invalid solver configuration: {0}")]
    Config(String),
}

/// Result type for clearance operations.
pub type Result<T> = std::result::Result<T, ClearanceError>;

//! Points tagged with the coordinate frame they were measured in.

use drillpoint_math::Point3;
use serde::{Deserialize, Serialize};

/// The two coordinate frames the solver understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frame {
    /// Drill-centred frame the clearance formulas are derived in.
    #[default]
    Native,
    /// CAD export frame, mapped to native by a fixed linear transform.
    Sw,
}

/// A point in the native drill frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NativePoint(pub Point3);

/// A point in the SW (CAD export) frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwPoint(pub Point3);

macro_rules! frame_point {
    ($ty:ident) => {
        impl $ty {
            /// Create a point from its coordinates.
            pub fn new(x: f64, y: f64, z: f64) -> Self {
                Self(Point3::new(x, y, z))
            }

            /// X coordinate.
            pub fn x(&self) -> f64 {
                self.0.x
            }

            /// Y coordinate.
            pub fn y(&self) -> f64 {
                self.0.y
            }

            /// Z coordinate.
            pub fn z(&self) -> f64 {
                self.0.z
            }
        }

        impl From<[f64; 3]> for $ty {
            fn from([x, y, z]: [f64; 3]) -> Self {
                Self::new(x, y, z)
            }
        }
    };
}

frame_point!(NativePoint);
frame_point!(SwPoint);

//! Angle conversions.
//!
//! Angles cross every public boundary in degrees; trigonometry and rotations
//! work in radians.

use uom::si::angle::{degree, radian};
use uom::si::f64::Angle;

pub fn degrees_to_radians(deg: f64) -> f64 {
    Angle::new::<degree>(deg).get::<radian>()
}

pub fn radians_to_degrees(rad: f64) -> f64 {
    Angle::new::<radian>(rad).get::<degree>()
}

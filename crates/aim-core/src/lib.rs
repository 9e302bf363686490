//! Core aiming math utilities
//!
//! Includes:
//! - Vector alias & helpers (normalize with fallback, axis rotation)
//! - Segment closest-approach geometry
//! - Physical environment (gravity, air density) and projectile body properties
//! - Solver tunables and JSON configuration
//! - Angle unit conversions
//! - Error type shared by the workspace

use nalgebra::{Rotation3, Unit, Vector3};

pub mod body;
pub mod config;
pub mod env;
pub mod error;
pub mod units;

pub use body::BodyProperties;
pub use config::{AimConfig, SolverConfig};
pub use env::Environment;
pub use error::{AimError, Result};

/// -------------------------
/// Vectors
/// -------------------------

/// Double-precision 3-vector used for positions, velocities, directions and forces.
pub type Vec3 = Vector3<f64>;

/// Normalize `v`, or return `fallback` when `v` has no usable direction.
pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    v.try_normalize(f64::EPSILON).unwrap_or(fallback)
}

/// Rotate `v` by `angle_rad` about `axis` (right-hand rule). `axis` need not be unit length.
pub fn rotate_about(v: Vec3, axis: Vec3, angle_rad: f64) -> Vec3 {
    let axis = Unit::new_normalize(axis);
    Rotation3::from_axis_angle(&axis, angle_rad) * v
}

/// `true` when every component is finite.
pub fn is_finite(v: &Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// -------------------------
/// Segment geometry
/// -------------------------

/// Closest approach of a point to the segment `[start, end]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Approach {
    /// Unclamped segment parameter of the foot of the perpendicular.
    pub t: f64,
    /// Nearest point on the segment (parameter clamped to `[0, 1]`).
    pub nearest: Vec3,
    /// `|point - nearest|`
    pub distance: f64,
}

/// Project `point` onto the segment `[start, end]`.
///
/// A zero-length segment reports `t = 1.0` with `start` as the nearest point,
/// so a body that did not move is never treated as having passed `point`.
pub fn closest_approach(start: Vec3, end: Vec3, point: Vec3) -> Approach {
    let ab = end - start;
    let ap = point - start;
    let len_sq = ab.dot(&ab);

    let t = if len_sq > 0.0 { ap.dot(&ab) / len_sq } else { 1.0 };
    let nearest = start + ab * t.clamp(0.0, 1.0);

    Approach { t, nearest, distance: (point - nearest).norm() }
}

/* ----------------------------------- tests ---------------------------------- */

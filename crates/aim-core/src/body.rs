use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ensure_positive};
use crate::Result;

/// Mass and drag properties of the projectile, fixed for the lifetime of a shot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyProperties {
    /// Mass [kg], always > 0
    pub mass: f64,
    /// Projected area × drag coefficient [m^2]
    pub drag_factor: f64,
}

impl BodyProperties {
    pub fn new(mass: f64, drag_factor: f64) -> Result<Self> {
        ensure_positive("mass", mass)?;
        ensure_non_negative("drag_factor", drag_factor)?;
        Ok(Self { mass, drag_factor })
    }

    /// Drag deceleration magnitude [m/s^2] at `speed` in air of density `rho`.
    ///
    ///   F = ½ ρ |v|² k,   a = F / m
    pub fn drag_acceleration(&self, rho: f64, speed: f64) -> f64 {
        0.5 * rho * speed * speed * self.drag_factor / self.mass
    }
}

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_non_negative};
use crate::{normalize_or, Result, Vec3};

/// Default gravity (m/s^2), +Y up.
pub const GRAVITY: [f64; 3] = [0.0, -9.81, 0.0];
/// Default sea-level air density (kg/m^3)
pub const AIR_DENSITY: f64 = 1.225;

/// Physical environment a shot flies through.
///
/// This is a plain `Copy` value: a search takes one snapshot and uses it for
/// every step of every try, whatever a control surface does in the meantime.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    /// Gravitational acceleration [m/s^2]
    pub gravity: Vec3,
    /// Air density [kg/m^3], 0 disables drag
    pub air_density: f64,
}

impl Default for Environment {
    fn default() -> Self {
        Self { gravity: Vec3::from(GRAVITY), air_density: AIR_DENSITY }
    }
}

impl Environment {
    pub fn new(gravity: Vec3, air_density: f64) -> Result<Self> {
        let env = Self { gravity, air_density };
        env.validate()?;
        Ok(env)
    }

    /// Drag-free environment with the given gravity.
    pub fn vacuum(gravity: Vec3) -> Self {
        Self { gravity, air_density: 0.0 }
    }

    /// Unit vector opposite gravity. With zero gravity there is no physical
    /// "up", so +Y is used.
    pub fn up(&self) -> Vec3 {
        normalize_or(-self.gravity, Vec3::y())
    }

    pub fn validate(&self) -> Result<()> {
        ensure_finite("gravity", &self.gravity)?;
        ensure_non_negative("air_density", self.air_density)
    }
}

//! Solver tunables and the JSON configuration file.
//!
//! ```json
//! {
//!   "environment": { "gravity": [0.0, -9.81, 0.0], "air_density": 1.225 },
//!   "solver": { "hit_threshold": 1e-7, "max_tries": 1000 }
//! }
//! ```
//!
//! Every field is optional and falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ensure_positive};
use crate::{AimError, Environment, Result};

/// Operator-tunable constants of the shot simulator and the angle search.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Closest-approach distance [m] below which a shot counts as a hit
    pub hit_threshold: f64,
    /// Simulated time budget [s] for one shot
    pub max_simulation_time: f64,
    /// Drag factor (area × Cd) given to every projectile
    pub drag_factor: f64,
    /// Upper bound on shots fired by one search
    pub max_tries: u32,
    /// Bracket width [deg] at which the search stops
    pub convergence_epsilon: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            hit_threshold: 1e-7,
            max_simulation_time: 100.0,
            drag_factor: 0.01,
            max_tries: 1000,
            convergence_epsilon: 1e-9,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("hit_threshold", self.hit_threshold)?;
        ensure_non_negative("max_simulation_time", self.max_simulation_time)?;
        ensure_non_negative("drag_factor", self.drag_factor)?;
        ensure_non_negative("convergence_epsilon", self.convergence_epsilon)
    }
}

/// Everything that can be loaded from a configuration file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimConfig {
    pub environment: Environment,
    pub solver: SolverConfig,
}

impl AimConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(AimError::from)
    }

    pub fn validate(&self) -> Result<()> {
        self.environment.validate()?;
        self.solver.validate()
    }
}

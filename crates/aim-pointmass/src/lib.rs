//! aim-pointmass
//!
//! Point-mass shot simulator with a launch-angle search.
//! - One projectile per shot, integrated with a fixed step (trapezoidal position update).
//! - Gravity is constant; drag is quadratic in speed, evaluated at the start of each step.
//! - Each shot ends on the first close approach to the target and is classified
//!   as a hit, a pass above, a pass below, or a timeout.
//! - The angle search brackets the launch angle by bisection on those classifications.
//!
//! Conventions:
//! - Angles are degrees, measured in the vertical plane through shooter and target,
//!   positive *up* from the line of sight.
//! - "Up" is opposite gravity (see [`Environment::up`]).
//!
//! Control flow: [`find_angle`] -> [`simulate_shot`] -> [`integrator::step`].

use aim_core::error::{ensure_finite, ensure_non_negative, ensure_positive};
use aim_core::{AimError, BodyProperties, Environment, Result, SolverConfig, Vec3};

pub mod integrator;
pub mod shot;
pub mod strategy;

pub use integrator::{step, KinematicState, Projectile, VelocityState};
pub use shot::{
    record_trajectory, simulate_shot, simulate_shot_with, ShotOutcome, ShotResult, Trajectory,
    TrajectoryPoint,
};
pub use strategy::{find_angle, find_angle_with, StrategyResult};

/// One fully specified aiming problem.
///
/// The environment and solver tunables are copied in, so a search never sees
/// them change halfway through.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Inputs {
    pub shooter: Vec3,
    pub target: Vec3,
    pub speed: f64, // launch speed (m/s)
    pub mass: f64,  // kg
    pub dt: f64,    // integration time step (s)
    pub env: Environment,
    pub solver: SolverConfig,
}

impl Inputs {
    /// Problem with the default environment and solver tunables.
    pub fn new(shooter: Vec3, target: Vec3, speed: f64, mass: f64, dt: f64) -> Self {
        Self {
            shooter,
            target,
            speed,
            mass,
            dt,
            env: Environment::default(),
            solver: SolverConfig::default(),
        }
    }

    #[must_use]
    pub fn with_env(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    #[must_use]
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// A non-positive (or NaN) `dt` is a `NoTime` outcome, not an error; only an
    /// infinite step is rejected here.
    pub fn validate(&self) -> Result<()> {
        if self.dt.is_infinite() && self.dt.is_sign_positive() {
            return Err(AimError::invalid("dt", "must be finite"));
        }
        ensure_finite("shooter", &self.shooter)?;
        ensure_finite("target", &self.target)?;
        ensure_non_negative("speed", self.speed)?;
        ensure_positive("mass", self.mass)?;
        self.env.validate()?;
        self.solver.validate()?;
        if (self.target - self.shooter).norm() <= f64::EPSILON {
            return Err(AimError::invalid("target", "coincides with the shooter"));
        }
        Ok(())
    }

    pub fn body(&self) -> Result<BodyProperties> {
        BodyProperties::new(self.mass, self.solver.drag_factor)
    }

    /// Unit vector from shooter to target. Only meaningful after [`Inputs::validate`].
    pub fn line_of_sight(&self) -> Vec3 {
        (self.target - self.shooter).normalize()
    }
}

//! Single-shot simulation.
//!
//! A shot launches one projectile from the shooter, rotated `angle` degrees up
//! from the line of sight, and steps it until the first close approach to the
//! target. Every step the last motion segment is tested against the target:
//!
//! - closest approach under `hit_threshold`          -> [`ShotOutcome::Hit`]
//! - foot of the perpendicular before segment end    -> passed it, above or below
//! - `max_simulation_time` used up                   -> [`ShotOutcome::NoTime`]
//!
//! Targets reachable only by a higher, lobbed arc past that first approach are
//! not considered.

use std::fmt;

use aim_core::units::degrees_to_radians;
use aim_core::{closest_approach, normalize_or, rotate_about, AimError, Result, Vec3};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::integrator::{KinematicState, Projectile};
use crate::Inputs;

/// How a shot ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShotOutcome {
    Hit,
    /// Passed above the target.
    TooHigh,
    /// Passed below the target / fell short.
    TooLow,
    /// Time budget used up, no positive time step, or the state overflowed.
    NoTime,
    /// The search decided the target is out of reach.
    NoInRange,
}

impl ShotOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            ShotOutcome::Hit => "HIT",
            ShotOutcome::TooHigh => "TOO_HIGH",
            ShotOutcome::TooLow => "TOO_LOW",
            ShotOutcome::NoTime => "NO_TIME",
            ShotOutcome::NoInRange => "NO_IN_RANGE",
        }
    }

    pub fn is_hit(self) -> bool {
        self == ShotOutcome::Hit
    }
}

impl fmt::Display for ShotOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShotResult {
    pub outcome: ShotOutcome,
    /// Closest approach of the last motion segment to the target [m]
    pub distance: f64,
    /// Simulated time of flight [s]
    pub time: f64,
}

impl ShotResult {
    fn new(outcome: ShotOutcome, distance: f64, time: f64) -> Self {
        Self { outcome, distance, time }
    }

    /// Placeholder "nothing found yet"; any real shot is closer.
    pub(crate) fn unresolved() -> Self {
        Self::new(ShotOutcome::NoTime, f64::INFINITY, 0.0)
    }
}

/// Simulate one shot at `angle_deg`.
pub fn simulate_shot(inputs: &Inputs, angle_deg: f64) -> Result<ShotResult> {
    simulate_shot_with(inputs, angle_deg, |_, _| {})
}

/// Simulate one shot, calling `on_step(state, time)` after every integration step.
///
/// `on_step` only observes; it cannot influence the shot.
pub fn simulate_shot_with<F>(inputs: &Inputs, angle_deg: f64, mut on_step: F) -> Result<ShotResult>
where
    F: FnMut(&KinematicState, f64),
{
    let dt = inputs.dt;
    if dt.is_nan() || dt <= 0.0 {
        return Ok(ShotResult::new(ShotOutcome::NoTime, 0.0, 0.0));
    }
    if !angle_deg.is_finite() {
        return Err(AimError::invalid("angle", format!("must be finite, got {angle_deg}")));
    }
    inputs.validate()?;

    let env = inputs.env;
    let solver = inputs.solver;
    let target = inputs.target;

    let up = env.up();
    let direction = inputs.line_of_sight();
    // Shooting straight along `up` leaves no vertical plane; any horizontal axis will do.
    let right = normalize_or(direction.cross(&up), Vec3::x());
    let launch = rotate_about(direction, right, degrees_to_radians(angle_deg));

    let mut projectile = Projectile::launch(inputs.shooter, launch * inputs.speed, inputs.body()?);

    let mut time = 0.0;
    let mut distance = (target - inputs.shooter).norm();

    while time < solver.max_simulation_time {
        projectile.advance(&env, dt);
        if !projectile.is_finite() {
            // Overflowed; report the last finite state.
            break;
        }
        time += dt;

        on_step(&projectile.state, time);

        let approach = closest_approach(projectile.state.previous_position, projectile.state.position, target);

        if approach.distance < solver.hit_threshold {
            return Ok(finish(angle_deg, ShotOutcome::Hit, approach.distance, time));
        }

        // The target's foot point lies inside this step: the nearest approach
        // has happened, classify now.
        if approach.t < 1.0 {
            let outcome = if (target - approach.nearest).dot(&up) < 0.0 {
                ShotOutcome::TooHigh
            } else {
                ShotOutcome::TooLow
            };
            return Ok(finish(angle_deg, outcome, approach.distance, time));
        }

        distance = approach.distance;
    }

    Ok(finish(angle_deg, ShotOutcome::NoTime, distance, time))
}

fn finish(angle_deg: f64, outcome: ShotOutcome, distance: f64, time: f64) -> ShotResult {
    trace!("shot {angle_deg:.9}°: {outcome} at t={time:.4}s, miss {distance:.3e} m");
    ShotResult::new(outcome, distance, time)
}

/* --------------------------- trajectory preview --------------------------- */

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub time: f64,
    pub position: Vec3,
}

/// A recorded shot: its outcome plus every position visited, launch point first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub result: ShotResult,
    pub points: Vec<TrajectoryPoint>,
}

/// Simulate one shot at `angle_deg` and keep the whole path.
pub fn record_trajectory(inputs: &Inputs, angle_deg: f64) -> Result<Trajectory> {
    let hint = if inputs.dt > 0.0 {
        (inputs.solver.max_simulation_time / inputs.dt).clamp(0.0, 4096.0) as usize
    } else {
        0
    };
    let mut points = Vec::with_capacity(hint + 1);
    points.push(TrajectoryPoint { time: 0.0, position: inputs.shooter });

    let result = simulate_shot_with(inputs, angle_deg, |state, time| {
        points.push(TrajectoryPoint { time, position: state.position });
    })?;

    Ok(Trajectory { result, points })
}

/* ----------------------------------- tests ---------------------------------- */

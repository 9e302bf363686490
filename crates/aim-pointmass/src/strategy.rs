//! Launch-angle search.
//!
//! Bisection over `[0, ceiling]`, where the ceiling is the angle between the line
//! of sight and straight up. Each try is a full [`simulate_shot`]:
//!
//! - `TooHigh` lowers the ceiling, `TooLow` raises the floor;
//! - the closest shot seen so far is kept as `best`, whatever its outcome;
//! - a `TooLow` that is worse than an earlier, lower `TooLow` best means the
//!   rising branch is past its peak: the target is declared out of range.
//!
//! The ceiling comes from a drag-free argument; under strong drag it may not
//! bound the range-maximizing angle.

use aim_core::units::radians_to_degrees;
use aim_core::Result;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::integrator::KinematicState;
use crate::shot::{simulate_shot_with, ShotOutcome, ShotResult};
use crate::Inputs;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    /// Closest shot found; `outcome` tells whether it is a genuine hit.
    pub best: ShotResult,
    /// Launch angle of `best` [deg]
    pub best_angle: f64,
    /// 1-based try that produced `best`
    pub tries: u32,
    /// Shots fired in total
    pub attempts: u32,
}

/// Search for the launch angle that hits the target.
pub fn find_angle(inputs: &Inputs) -> Result<StrategyResult> {
    find_angle_with(inputs, |_, _| {}, |_, _| {})
}

/// As [`find_angle`], reporting every try to `on_shot(result, angle)` and every
/// integration step of every try to `on_step(state, time)`.
pub fn find_angle_with<S, P>(inputs: &Inputs, mut on_shot: S, mut on_step: P) -> Result<StrategyResult>
where
    S: FnMut(&ShotResult, f64),
    P: FnMut(&KinematicState, f64),
{
    inputs.validate()?;

    let solver = inputs.solver;
    let cos_to_up = inputs.line_of_sight().dot(&inputs.env.up()).clamp(-1.0, 1.0);

    let mut min_angle = 0.0;
    let mut max_angle = radians_to_degrees(cos_to_up.acos());
    let mut angle = min_angle;

    let mut search = StrategyResult {
        best: ShotResult::unresolved(),
        best_angle: 0.0,
        tries: 0,
        attempts: 0,
    };

    while search.attempts < solver.max_tries {
        search.attempts += 1;
        let result = simulate_shot_with(inputs, angle, &mut on_step)?;
        on_shot(&result, angle);
        debug!(
            "try {}: {angle:.9}° -> {} (miss {:.3e} m), bracket [{min_angle:.9}, {max_angle:.9}]",
            search.attempts, result.outcome, result.distance
        );

        if result.distance < search.best.distance {
            search.best = result;
            search.best_angle = angle;
            search.tries = search.attempts;
        }

        match result.outcome {
            ShotOutcome::Hit => {
                info!("hit at {angle:.6}° after {} tries", search.attempts);
                return Ok(search);
            }
            ShotOutcome::TooHigh => max_angle = angle,
            ShotOutcome::TooLow => {
                min_angle = angle;
                let best = search.best;
                if best.outcome == ShotOutcome::TooLow
                    && best.distance < result.distance
                    && search.best_angle < angle
                {
                    warn!(
                        "raising the angle to {angle:.6}° made the miss worse than at {:.6}°; target out of range",
                        search.best_angle
                    );
                    search.best.outcome = ShotOutcome::NoInRange;
                    return Ok(search);
                }
            }
            ShotOutcome::NoTime | ShotOutcome::NoInRange => {}
        }

        if max_angle - min_angle < solver.convergence_epsilon {
            info!(
                "bracket converged at {angle:.6}° without a hit; best miss {:.3e} m",
                search.best.distance
            );
            return Ok(search);
        }

        angle = 0.5 * (min_angle + max_angle);
    }

    warn!(
        "gave up after {} tries; best {} at {:.6}°",
        search.attempts, search.best.outcome, search.best_angle
    );
    Ok(search)
}

/* ----------------------------------- tests ---------------------------------- */

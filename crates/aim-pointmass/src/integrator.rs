//! Fixed-step integrator for a single point mass.
//!
//! Per step:
//!   v' = v + g·dt - v̂ · (½ ρ |v|² k / m) · dt     (drag from the start-of-step velocity)
//!   x' = x + ½ (v + v') · dt                       (trapezoidal position update)
//!
//! With ρ = 0 this reproduces the closed-form constant-acceleration motion exactly.

use aim_core::{is_finite, BodyProperties, Environment, Vec3};

/// Position plus the position one step earlier, so the last motion segment can
/// be tested against the target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KinematicState {
    pub position: Vec3,
    pub previous_position: Vec3,
}

impl KinematicState {
    /// State at rest in `position`; both fields start equal.
    pub fn at(position: Vec3) -> Self {
        Self { position, previous_position: position }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityState {
    pub velocity: Vec3,
}

/// Advance one step of length `dt` (> 0).
pub fn step(
    state: &KinematicState,
    velocity: &VelocityState,
    body: &BodyProperties,
    env: &Environment,
    dt: f64,
) -> (KinematicState, VelocityState) {
    let v0 = velocity.velocity;
    let mut v1 = v0 + env.gravity * dt;

    let speed = v0.norm();
    if speed > 0.0 {
        let a_drag = -(v0 / speed) * body.drag_acceleration(env.air_density, speed);
        v1 += a_drag * dt;
    }

    let next = KinematicState {
        previous_position: state.position,
        position: state.position + (v1 + v0) * (0.5 * dt),
    };
    (next, VelocityState { velocity: v1 })
}

/// The one simulated body of a shot. Lives for exactly one trajectory.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projectile {
    pub state: KinematicState,
    pub velocity: VelocityState,
    pub body: BodyProperties,
}

impl Projectile {
    pub fn launch(position: Vec3, velocity: Vec3, body: BodyProperties) -> Self {
        Self {
            state: KinematicState::at(position),
            velocity: VelocityState { velocity },
            body,
        }
    }

    pub fn advance(&mut self, env: &Environment, dt: f64) {
        let (state, velocity) = step(&self.state, &self.velocity, &self.body, env, dt);
        self.state = state;
        self.velocity = velocity;
    }

    /// False once the state has overflowed to infinities or NaN.
    pub fn is_finite(&self) -> bool {
        is_finite(&self.state.position) && is_finite(&self.velocity.velocity)
    }
}

/* ----------------------------------- tests ---------------------------------- */

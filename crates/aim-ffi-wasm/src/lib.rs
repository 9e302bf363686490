// crates/aim-ffi-wasm/src/lib.rs
//
// WASM bindings: trajectory preview + launch-angle solve.

use wasm_bindgen::prelude::*;
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen as swb;

// --- our crates ---
use aim_core::{AimError, Environment, SolverConfig, Vec3};
use aim_pointmass::{self as pm, Inputs, ShotResult};

// Better panic messages in browser console
#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
}

/* --------------------------- Shared DTOs (JS) --------------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JsVec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
impl From<JsVec3> for Vec3 {
    fn from(v: JsVec3) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

/// Physics overrides from the control panel; missing fields keep their defaults.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct JsEnvironment {
    pub gravity: Option<JsVec3>,
    pub air_density: Option<f64>,
}
impl From<JsEnvironment> for Environment {
    fn from(e: JsEnvironment) -> Self {
        let base = Environment::default();
        Environment {
            gravity: e.gravity.map_or(base.gravity, Vec3::from),
            air_density: e.air_density.unwrap_or(base.air_density),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct JsSolver {
    pub hit_threshold: Option<f64>,
    pub max_simulation_time_s: Option<f64>,
    pub drag_factor: Option<f64>,
    pub max_tries: Option<u32>,
    pub convergence_epsilon_deg: Option<f64>,
}
impl From<JsSolver> for SolverConfig {
    fn from(s: JsSolver) -> Self {
        let base = SolverConfig::default();
        SolverConfig {
            hit_threshold: s.hit_threshold.unwrap_or(base.hit_threshold),
            max_simulation_time: s.max_simulation_time_s.unwrap_or(base.max_simulation_time),
            drag_factor: s.drag_factor.unwrap_or(base.drag_factor),
            max_tries: s.max_tries.unwrap_or(base.max_tries),
            convergence_epsilon: s.convergence_epsilon_deg.unwrap_or(base.convergence_epsilon),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsAimInput {
    pub shooter: JsVec3,
    pub target: JsVec3,
    pub speed_ms: f64,
    pub mass_kg: f64,
    pub dt_s: f64,
    #[serde(default)]
    pub env: JsEnvironment,
    #[serde(default)]
    pub solver: JsSolver,
}
impl From<&JsAimInput> for Inputs {
    fn from(inp: &JsAimInput) -> Self {
        Inputs::new(inp.shooter.into(), inp.target.into(), inp.speed_ms, inp.mass_kg, inp.dt_s)
            .with_env(inp.env.into())
            .with_solver(inp.solver.into())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsShot {
    /// "HIT" | "TOO_HIGH" | "TOO_LOW" | "NO_TIME" | "NO_IN_RANGE"
    pub outcome: String,
    pub hit: bool,
    pub distance_m: f64,
    pub time_s: f64,
}
impl From<ShotResult> for JsShot {
    fn from(r: ShotResult) -> Self {
        JsShot { outcome: r.outcome.to_string(), hit: r.outcome.is_hit(), distance_m: r.distance, time_s: r.time }
    }
}

/* ------------------------------- Preview -------------------------------- */

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsPoint {
    pub t: f64,
    pub x: f64, pub y: f64, pub z: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsPreviewResult {
    pub result: JsShot,
    pub points: Vec<JsPoint>,
}

/// Fly one shot at `angle_deg` and return the whole path for drawing.
pub fn preview(input: &JsAimInput, angle_deg: f64) -> Result<JsPreviewResult, AimError> {
    let traj = pm::record_trajectory(&input.into(), angle_deg)?;
    Ok(JsPreviewResult {
        result: traj.result.into(),
        points: traj
            .points
            .into_iter()
            .map(|p| JsPoint { t: p.time, x: p.position.x, y: p.position.y, z: p.position.z })
            .collect(),
    })
}

#[wasm_bindgen]
pub fn preview_shot_js(input: JsValue, angle_deg: f64) -> Result<JsValue, JsValue> {
    let inp: JsAimInput = swb::from_value(input)?;
    let out = preview(&inp, angle_deg).map_err(to_js_error)?;
    swb::to_value(&out).map_err(|e| e.into())
}

/* -------------------------------- Solve --------------------------------- */

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsTry {
    pub angle_deg: f64,
    pub shot: JsShot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsSolveResult {
    pub best: JsShot,
    pub best_angle_deg: f64,
    pub tries: u32,
    pub attempts: u32,
    /// Every try in firing order
    pub shots: Vec<JsTry>,
}

/// Search for the launch angle, keeping a log of every try.
pub fn solve(input: &JsAimInput) -> Result<JsSolveResult, AimError> {
    let mut shots = Vec::new();
    let r = pm::find_angle_with(
        &input.into(),
        |shot, angle| shots.push(JsTry { angle_deg: angle, shot: (*shot).into() }),
        |_, _| {},
    )?;
    Ok(JsSolveResult {
        best: r.best.into(),
        best_angle_deg: r.best_angle,
        tries: r.tries,
        attempts: r.attempts,
        shots,
    })
}

#[wasm_bindgen]
pub fn solve_angle_js(input: JsValue) -> Result<JsValue, JsValue> {
    let inp: JsAimInput = swb::from_value(input)?;
    let out = solve(&inp).map_err(to_js_error)?;
    swb::to_value(&out).map_err(|e| e.into())
}

fn to_js_error(e: AimError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/* -------------------------------- tests --------------------------------- */

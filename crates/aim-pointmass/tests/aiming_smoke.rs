// End-to-end aiming scenarios: drag-free and dragged searches against level,
// raised and unreachable targets.

use aim_core::{Environment, SolverConfig, Vec3};
use aim_pointmass::{find_angle, record_trajectory, simulate_shot, Inputs, ShotOutcome};
use approx::assert_relative_eq;

fn gravity_10() -> Vec3 {
    Vec3::new(0.0, -10.0, 0.0)
}

#[test]
fn level_target_at_max_range_is_hit_at_45_degrees() {
    // v²/g = 10 m: the only solution is the 45° shot.
    let inputs = Inputs::new(Vec3::zeros(), Vec3::new(10.0, 0.0, 0.0), 10.0, 10.0, 1e-4)
        .with_env(Environment::vacuum(gravity_10()));

    let r = find_angle(&inputs).unwrap();

    assert_eq!(r.best.outcome, ShotOutcome::Hit);
    assert_relative_eq!(r.best_angle, 45.0, epsilon = 1e-6);
    assert!(r.attempts <= inputs.solver.max_tries);
    assert_relative_eq!(r.best.time, 2.0_f64.sqrt(), epsilon = 1e-3);
}

#[test]
fn raised_target_is_hit_through_air() {
    let env = Environment { gravity: gravity_10(), air_density: 1.0 };
    let inputs = Inputs::new(Vec3::zeros(), Vec3::new(10.0, 10.0, 10.0), 100.0, 10.0, 1e-4).with_env(env);

    let r = find_angle(&inputs).unwrap();

    assert_eq!(r.best.outcome, ShotOutcome::Hit);
    assert!(r.best.distance < inputs.solver.hit_threshold);
    // Slightly above the line of sight, far below the 54.7° ceiling.
    assert!(r.best_angle > 0.0 && r.best_angle < 5.0, "angle {}", r.best_angle);

    // Replaying the winning angle reproduces the hit.
    let replay = simulate_shot(&inputs, r.best_angle).unwrap();
    assert_eq!(replay, r.best);
}

#[test]
fn drag_puts_max_range_target_out_of_reach() {
    // Same geometry as the 45° case, but air shortens every shot.
    let env = Environment { gravity: gravity_10(), air_density: 1.0 };
    let inputs = Inputs::new(Vec3::zeros(), Vec3::new(10.0, 0.0, 0.0), 10.0, 10.0, 1e-4).with_env(env);

    let r = find_angle(&inputs).unwrap();

    assert_ne!(r.best.outcome, ShotOutcome::Hit);
    assert_eq!(r.best.outcome, ShotOutcome::NoInRange);
    assert_relative_eq!(r.best_angle, 45.0, epsilon = 1e-9);
    assert_eq!(r.tries, 2);
    assert_eq!(r.attempts, 3);
}

#[test]
fn preview_path_lands_where_the_search_aimed() {
    let inputs = Inputs::new(Vec3::zeros(), Vec3::new(40.0, 5.0, 0.0), 30.0, 1.0, 1e-3)
        .with_env(Environment::vacuum(Vec3::new(0.0, -9.81, 0.0)));
    let r = find_angle(&inputs).unwrap();
    assert_eq!(r.best.outcome, ShotOutcome::Hit);

    let traj = record_trajectory(&inputs, r.best_angle).unwrap();
    assert_eq!(traj.result.outcome, ShotOutcome::Hit);

    let last = traj.points.last().unwrap().position;
    assert!((last - inputs.target).norm() < 30.0 * inputs.dt * 2.0);
    // Lower-arc solution: the path never climbs above the apex of a 45° lob.
    let apex = traj.points.iter().map(|p| p.position.y).fold(f64::MIN, f64::max);
    assert!(apex < 30.0 * 30.0 / (4.0 * 9.81));
}

#[test]
fn independent_searches_run_side_by_side() {
    let base = Inputs::new(Vec3::zeros(), Vec3::new(20.0, 0.0, 0.0), 20.0, 1.0, 1e-3)
        .with_env(Environment::vacuum(gravity_10()))
        .with_solver(SolverConfig::default());
    let targets = [Vec3::new(20.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 25.0), Vec3::new(-15.0, 3.0, 5.0)];

    let handles: Vec<_> = targets
        .iter()
        .map(|&target| {
            let inputs = Inputs { target, ..base };
            std::thread::spawn(move || (inputs, find_angle(&inputs).unwrap()))
        })
        .collect();

    for handle in handles {
        let (inputs, threaded) = handle.join().unwrap();
        assert_eq!(threaded, find_angle(&inputs).unwrap());
        assert_eq!(threaded.best.outcome, ShotOutcome::Hit);
    }
}

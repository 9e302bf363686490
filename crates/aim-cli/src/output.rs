// Rendering of shot paths and search results for the terminal.

use std::io::Write;

use aim_pointmass::{ShotResult, StrategyResult, Trajectory};
use anyhow::Result;
use serde_json::json;

use crate::OutputFormat;

pub(crate) fn write_line<W: Write>(out: &mut W, text: &str) -> Result<()> {
    writeln!(out, "{text}")?;
    Ok(())
}

fn csv_f64(v: f64) -> String {
    if v.is_finite() {
        ryu::Buffer::new().format_finite(v).to_owned()
    } else {
        v.to_string()
    }
}

pub(crate) fn write_trajectory<W: Write>(out: &mut W, traj: &Trajectory, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, traj)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            writeln!(out, "time_s,x_m,y_m,z_m")?;
            for p in &traj.points {
                writeln!(
                    out,
                    "{},{},{},{}",
                    csv_f64(p.time),
                    csv_f64(p.position.x),
                    csv_f64(p.position.y),
                    csv_f64(p.position.z)
                )?;
            }
        }
        OutputFormat::Table => {
            writeln!(out, "{:>10} {:>12} {:>12} {:>12}", "Time(s)", "X(m)", "Y(m)", "Z(m)")?;
            writeln!(out, "{}", "-".repeat(49))?;
            for p in &traj.points {
                writeln!(
                    out,
                    "{:>10.3} {:>12.3} {:>12.3} {:>12.3}",
                    p.time, p.position.x, p.position.y, p.position.z
                )?;
            }
            writeln!(out)?;
            write_shot_summary(out, &traj.result)?;
        }
    }
    Ok(())
}

fn write_shot_summary<W: Write>(out: &mut W, shot: &ShotResult) -> Result<()> {
    writeln!(out, "Outcome:  {}", shot.outcome)?;
    writeln!(out, "Distance: {:.6e} m", shot.distance)?;
    writeln!(out, "Time:     {:.3} s", shot.time)?;
    Ok(())
}

/// `tries` is empty unless the caller asked for the full log.
pub(crate) fn write_solution<W: Write>(
    out: &mut W,
    result: &StrategyResult,
    tries: &[(f64, ShotResult)],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let shots: Vec<_> = tries
                .iter()
                .map(|(angle, shot)| json!({ "angle_deg": angle, "shot": shot }))
                .collect();
            let mut doc = json!({
                "best": result.best,
                "best_angle_deg": result.best_angle,
                "tries": result.tries,
                "attempts": result.attempts,
            });
            if !tries.is_empty() {
                doc["shots"] = shots.into();
            }
            serde_json::to_writer_pretty(&mut *out, &doc)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            writeln!(out, "try,angle_deg,outcome,distance_m,time_s")?;
            let rows: Vec<(u32, f64, ShotResult)> = if tries.is_empty() {
                vec![(result.tries, result.best_angle, result.best)]
            } else {
                (1..).zip(tries).map(|(n, &(angle, shot))| (n, angle, shot)).collect()
            };
            for (n, angle, shot) in &rows {
                writeln!(
                    out,
                    "{},{},{},{},{}",
                    n,
                    csv_f64(*angle),
                    shot.outcome,
                    csv_f64(shot.distance),
                    csv_f64(shot.time)
                )?;
            }
        }
        OutputFormat::Table => {
            if !tries.is_empty() {
                writeln!(out, "{:>5} {:>14} {:>12} {:>14} {:>9}", "Try", "Angle(deg)", "Outcome", "Distance(m)", "Time(s)")?;
                writeln!(out, "{}", "-".repeat(58))?;
                for (i, (angle, shot)) in tries.iter().enumerate() {
                    writeln!(
                        out,
                        "{:>5} {:>14.9} {:>12} {:>14.6e} {:>9.3}",
                        i + 1, angle, shot.outcome, shot.distance, shot.time
                    )?;
                }
                writeln!(out)?;
            }
            writeln!(out, "Best angle: {:.9}°", result.best_angle)?;
            writeln!(out, "Best try:   {} of {}", result.tries, result.attempts)?;
            write_shot_summary(out, &result.best)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aim_pointmass::{ShotOutcome, TrajectoryPoint};
    use aim_core::Vec3;

    fn hit() -> ShotResult {
        ShotResult { outcome: ShotOutcome::Hit, distance: 0.0, time: 1.5 }
    }

    fn render<F: FnOnce(&mut Vec<u8>) -> Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn trajectory_csv_has_one_row_per_point() {
        let traj = Trajectory {
            result: hit(),
            points: vec![
                TrajectoryPoint { time: 0.0, position: Vec3::zeros() },
                TrajectoryPoint { time: 0.5, position: Vec3::new(1.0, 2.5, 0.0) },
            ],
        };
        let text = render(|w| write_trajectory(w, &traj, OutputFormat::Csv));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines, ["time_s,x_m,y_m,z_m", "0.0,0.0,0.0,0.0", "0.5,1.0,2.5,0.0"]);
    }

    #[test]
    fn solution_json_includes_shots_only_on_request() {
        let result = StrategyResult { best: hit(), best_angle: 12.5, tries: 3, attempts: 4 };

        let short = render(|w| write_solution(w, &result, &[], OutputFormat::Json));
        let doc: serde_json::Value = serde_json::from_str(&short).unwrap();
        assert_eq!(doc["best"]["outcome"], "HIT");
        assert_eq!(doc["attempts"], 4);
        assert!(doc.get("shots").is_none());

        let log = [(0.0, hit()), (12.5, hit())];
        let long = render(|w| write_solution(w, &result, &log, OutputFormat::Json));
        let doc: serde_json::Value = serde_json::from_str(&long).unwrap();
        assert_eq!(doc["shots"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn try_rows_are_numbered_like_best_try() {
        let miss = ShotResult { outcome: ShotOutcome::TooLow, distance: 2.0, time: 1.0 };
        let result = StrategyResult { best: hit(), best_angle: 10.0, tries: 2, attempts: 2 };
        let log = [(0.0, miss), (10.0, hit())];

        let csv = render(|w| write_solution(w, &result, &log, OutputFormat::Csv));
        let rows: Vec<_> = csv.lines().skip(1).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("1,0.0,TOO_LOW,"));
        assert!(rows[1].starts_with("2,10.0,HIT,"));

        let best_only = render(|w| write_solution(w, &result, &[], OutputFormat::Csv));
        assert!(best_only.lines().nth(1).unwrap().starts_with("2,10.0,HIT,"));

        let table = render(|w| write_solution(w, &result, &log, OutputFormat::Table));
        let best_row = table.lines().find(|l| l.contains("HIT") && !l.starts_with("Outcome")).unwrap();
        assert_eq!(best_row.split_whitespace().next(), Some("2"));
    }

    #[test]
    fn table_reports_best_try() {
        let result = StrategyResult { best: hit(), best_angle: 45.0, tries: 7, attempts: 9 };
        let text = render(|w| write_solution(w, &result, &[], OutputFormat::Table));
        assert!(text.contains("Best try:   7 of 9"));
        assert!(text.contains("Outcome:  HIT"));
    }

    #[test]
    fn non_finite_values_survive_csv() {
        assert_eq!(csv_f64(f64::INFINITY), "inf");
        assert_eq!(csv_f64(0.25), "0.25");
    }
}

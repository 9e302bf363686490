use std::path::PathBuf;

use aim_core::{AimConfig, Vec3};
use aim_pointmass::{find_angle_with, record_trajectory, Inputs, ShotResult};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;

mod output;

#[derive(Parser)]
#[command(name = "ballistic-aim")]
#[command(version)]
#[command(about = "Launch-angle solver for a point-mass projectile under gravity and air drag", long_about = None)]
struct Cli {
    /// JSON file with environment and solver settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log more (-v debug, -vv trace); RUST_LOG wins when set
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fly one shot at a fixed angle and print its path
    Shoot {
        #[command(flatten)]
        shot: ShotArgs,

        /// Launch angle above the line of sight (degrees)
        #[arg(short = 'a', long, default_value = "0.0", allow_hyphen_values = true)]
        angle: f64,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Search for the launch angle that hits the target
    Solve {
        #[command(flatten)]
        shot: ShotArgs,

        /// List every try, not just the best one
        #[arg(long)]
        shots: bool,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Print the effective configuration as JSON
    Config,
}

#[derive(Args, Clone, Debug)]
struct ShotArgs {
    /// Shooter position "x,y,z" (m)
    #[arg(long, default_value = "0,0,0", value_parser = parse_vec3, allow_hyphen_values = true)]
    shooter: Vec3,

    /// Target position "x,y,z" (m)
    #[arg(long, default_value = "100,0,0", value_parser = parse_vec3, allow_hyphen_values = true)]
    target: Vec3,

    /// Launch speed (m/s)
    #[arg(short = 's', long, default_value = "100.0")]
    speed: f64,

    /// Projectile mass (kg)
    #[arg(short = 'm', long, default_value = "1.0")]
    mass: f64,

    /// Integration time step (s)
    #[arg(long, default_value = "0.01")]
    dt: f64,

    /// Gravity "x,y,z" (m/s²), overrides the config file
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    gravity: Option<Vec3>,

    /// Air density (kg/m³), overrides the config file
    #[arg(long)]
    air_density: Option<f64>,

    /// Drag factor, area × Cd (m²), overrides the config file
    #[arg(long)]
    drag_factor: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Csv,
    Json,
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected \"x,y,z\", got \"{s}\""));
    }
    let mut v = [0.0; 3];
    for (slot, part) in v.iter_mut().zip(&parts) {
        *slot = part.parse::<f64>().map_err(|e| format!("bad component \"{part}\": {e}"))?;
    }
    Ok(Vec3::from(v))
}

fn load_config(path: Option<&PathBuf>) -> Result<AimConfig> {
    match path {
        Some(path) => AimConfig::from_path(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(AimConfig::default()),
    }
}

impl ShotArgs {
    fn inputs(&self, mut config: AimConfig) -> Result<Inputs> {
        if let Some(g) = self.gravity {
            config.environment.gravity = g;
        }
        if let Some(rho) = self.air_density {
            config.environment.air_density = rho;
        }
        if let Some(k) = self.drag_factor {
            config.solver.drag_factor = k;
        }
        config.validate().context("invalid settings")?;

        let inputs = Inputs::new(self.shooter, self.target, self.speed, self.mass, self.dt)
            .with_env(config.environment)
            .with_solver(config.solver);
        inputs.validate().context("invalid shot")?;
        Ok(inputs)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_ref())?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Shoot { shot, angle, output } => {
            let inputs = shot.inputs(config)?;
            let traj = record_trajectory(&inputs, angle).context("simulating shot")?;
            info!("shot at {angle}°: {} after {:.3} s", traj.result.outcome, traj.result.time);
            output::write_trajectory(&mut out, &traj, output)?;
        }
        Commands::Solve { shot, shots, output } => {
            let inputs = shot.inputs(config)?;
            let mut log: Vec<(f64, ShotResult)> = Vec::new();
            let result = find_angle_with(&inputs, |r, angle| log.push((angle, *r)), |_, _| {})
                .context("searching launch angle")?;
            let tries = if shots { log.as_slice() } else { &[] };
            output::write_solution(&mut out, &result, tries, output)?;
        }
        Commands::Config => {
            let text = config.to_json_pretty()?;
            output::write_line(&mut out, &text)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vectors() {
        assert_eq!(parse_vec3("1, -2.5,3").unwrap(), Vec3::new(1.0, -2.5, 3.0));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,x,3").is_err());
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "ballistic-aim", "solve", "--target", "-50,0,0", "--gravity", "0,0,-10", "--air-density", "0",
        ])
        .unwrap();
        let Commands::Solve { shot, .. } = cli.command else { panic!("expected solve") };
        let inputs = shot.inputs(AimConfig::default()).unwrap();
        assert_eq!(inputs.target, Vec3::new(-50.0, 0.0, 0.0));
        assert_eq!(inputs.env.gravity, Vec3::new(0.0, 0.0, -10.0));
        assert_eq!(inputs.env.air_density, 0.0);
        assert_eq!(inputs.speed, 100.0);
    }

    #[test]
    fn rejects_shot_on_the_shooter() {
        let cli = Cli::try_parse_from(["ballistic-aim", "shoot", "--target", "0,0,0"]).unwrap();
        let Commands::Shoot { shot, .. } = cli.command else { panic!("expected shoot") };
        assert!(shot.inputs(AimConfig::default()).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

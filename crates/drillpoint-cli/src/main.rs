//! drillpoint CLI - side clearance angle calculator
//!
//! Computes the working side clearance angle of a conically ground twist
//! drill at measured flank points, given in the native drill frame or in
//! the SW frame of a CAD export.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use drillpoint_clearance::{AngleOutput, ClearanceCalculator, Coord, DrillGeometry, SolverConfig};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

mod job;
mod render;

use job::Job;
use render::{render_text, Lang, Range};

#[derive(Parser)]
#[command(name = "drillpoint")]
#[command(about = "Side clearance angle of conically ground twist drills", long_about = None)]
struct Cli {
    /// Solver configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Label language
    #[arg(long, value_enum, default_value_t = Lang::En, global = true)]
    lang: Lang,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Flag each angle as inside or outside [MIN, MAX] degrees
    #[arg(
        long,
        num_args = 2,
        value_names = ["MIN", "MAX"],
        allow_negative_numbers = true,
        global = true
    )]
    range: Option<Vec<f64>>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Points in the native drill frame
    Native(PointArgs),
    /// Points in the SW frame, mapped to native before solving
    Sw(PointArgs),
    /// Run a JSON or TOML job file
    Job {
        /// Path to the job file
        file: PathBuf,
    },
}

#[derive(Args)]
struct PointArgs {
    /// Axial distance from cone apex to the axis offset [mm]
    #[arg(long)]
    l: f64,
    /// Axis offset [mm]
    #[arg(long)]
    d: f64,
    /// Angle between drill and cone axes
    #[arg(long, allow_negative_numbers = true)]
    theta: f64,
    /// Cone half-angle
    #[arg(long, allow_negative_numbers = true)]
    beta: f64,
    /// Angles are given in degrees instead of radians
    #[arg(long)]
    degrees: bool,
    /// Point as x,y,z (repeat for several points)
    #[arg(
        short = 'p',
        long = "point",
        value_parser = parse_point,
        allow_hyphen_values = true,
        required = true
    )]
    points: Vec<[f64; 3]>,
}

impl PointArgs {
    fn geometry(&self) -> Result<DrillGeometry> {
        let geometry = if self.degrees {
            DrillGeometry::from_degrees(self.l, self.d, self.theta, self.beta)?
        } else {
            DrillGeometry::new(self.l, self.d, self.theta, self.beta)?
        };
        Ok(geometry)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let calc = ClearanceCalculator::new(load_config(cli.config.as_deref())?);

    let output = match &cli.command {
        Commands::Native(args) => {
            let (x, y, z) = split_points(&args.points);
            calc.calculate(&args.geometry()?, &x, &y, &z)?
        }
        Commands::Sw(args) => {
            let (x, y, z) = split_points(&args.points);
            calc.calculate_from_sw(&args.geometry()?, &x, &y, &z)?
        }
        Commands::Job { file } => Job::load(file)?.run(&calc)?,
    };

    print_output(&output, &cli)
}

fn log_filter(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

fn load_config(path: Option<&Path>) -> Result<SolverConfig> {
    let Some(path) = path else {
        return Ok(SolverConfig::default());
    };
    let config = SolverConfig::load(path)?;
    info!(
        path = %path.display(),
        parallel_threshold = config.parallel_threshold,
        "loaded solver config"
    );
    Ok(config)
}

fn print_output(output: &AngleOutput, cli: &Cli) -> Result<()> {
    if cli.json {
        let json = serde_json::to_string_pretty(output).context("failed to serialize results")?;
        println!("{json}");
    } else {
        let range = cli.range.as_deref().and_then(parse_range);
        print!("{}", render_text(output, cli.lang, range));
    }
    Ok(())
}

/// Parse `x,y,z`.
fn parse_point(s: &str) -> Result<[f64; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let &[x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z, got '{s}'"));
    };
    let num = |v: &str| v.parse::<f64>().map_err(|e| format!("'{v}': {e}"));
    Ok([num(x)?, num(y)?, num(z)?])
}

fn parse_range(values: &[f64]) -> Option<Range> {
    match *values {
        [min, max] => Some(Range { min, max }),
        _ => None,
    }
}

/// Split points into coordinate columns; a single point stays scalar.
fn split_points(points: &[[f64; 3]]) -> (Coord, Coord, Coord) {
    if let [[x, y, z]] = *points {
        return (x.into(), y.into(), z.into());
    }
    let column = |i: usize| Coord::from(points.iter().map(|p| p[i]).collect::<Vec<_>>());
    (column(0), column(1), column(2))
}

/// Run `f` under a subscriber that records formatted events.
#[cfg(test)]
pub(crate) fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let buffer = Buffer::default();
    let writer = buffer.clone();
    let subscriber = fmt()
        .with_env_filter(EnvFilter::new("info"))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (result, logs)
}

//! Yantra Geometry Tool
//!
//! Generates construction geometry for a Samrat, Rama or Jai Prakash yantra at
//! a site and prints it as JSON. With `--verify` the Samrat hour-line
//! cross-check is printed as a table on stderr.
//!
//! Usage:
//!   cargo run --bin yantra_geometry -- --latitude 26.9124 --longitude 75.7873 --yantra samrat --pretty

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::info;
use yantra::engine::HourLineCheck;
use yantra::{Coordinates, EngineConfig, YantraGeometry, YantraGeometryEngine, YantraKind};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Yantra Geometry Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Computes construction geometry for masonry astronomical instruments",
    long_about = None
)]
struct Args {
    /// Site latitude in degrees, positive north
    #[arg(long, allow_hyphen_values = true)]
    latitude: f64,

    /// Site longitude in degrees, positive east
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    longitude: f64,

    /// Site elevation in meters
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    elevation: f64,

    /// Instrument to generate
    #[arg(long, value_enum, default_value_t = YantraKind::Samrat)]
    yantra: YantraKind,

    /// Samrat base length or Rama/Jai Prakash radius in meters
    #[arg(long)]
    size: Option<f64>,

    /// Samrat gnomon height in meters (defaults to size * tan|latitude|)
    #[arg(long)]
    gnomon_height: Option<f64>,

    /// JSON engine configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long, action = ArgAction::SetTrue)]
    pretty: bool,

    /// Print the Samrat hour-line cross-check to stderr
    #[arg(long, action = ArgAction::SetTrue)]
    verify: bool,
}

/// Prints the hour-line cross-check as a table
fn print_verification(checks: &[HourLineCheck]) {
    eprintln!("\nHour-line cross-check (horizontal dial analogy):");
    eprintln!("--------------------------------------------------------------------");
    eprintln!(
        "{:>4} {:>8} {:>12} {:>12} {:>12} {:>12}",
        "hour", "H (deg)", "analytical", "traced", "deviation", "face dev"
    );
    for check in checks {
        let traced = check
            .traced_angle
            .map_or_else(|| "-".to_string(), |angle| format!("{:.6}", angle));
        let deviation = check
            .deviation
            .map_or_else(|| "-".to_string(), |dev| format!("{:.2e}", dev));
        let face_deviation = check
            .face_deviation
            .map_or_else(|| "-".to_string(), |dev| format!("{:.2e}", dev));
        eprintln!(
            "{:>4} {:>8.1} {:>12.6} {:>12} {:>12} {:>12}",
            check.hour,
            check.hour_angle,
            check.analytical_angle,
            traced,
            deviation,
            face_deviation
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    let engine = YantraGeometryEngine::with_config(config)?;
    let site = Coordinates::new(args.latitude, args.longitude, args.elevation)?;

    let geometry = match (args.yantra, args.gnomon_height) {
        (YantraKind::Samrat, Some(height)) => {
            let base_length = args.size.unwrap_or(engine.config().default_base_length);
            YantraGeometry::Samrat {
                site,
                geometry: engine.generate_samrat(site.latitude, base_length, Some(height))?,
            }
        }
        (kind, _) => engine.generate(&site, kind, args.size)?,
    };
    info!("Generated {} geometry at latitude {}", geometry.kind(), site.latitude);

    if args.verify {
        match &geometry {
            YantraGeometry::Samrat { geometry, .. } => {
                print_verification(&geometry.accuracy_verification)
            }
            other => eprintln!("No hour-line cross-check for {} yantras", other.kind()),
        }
    }

    println!("{}", geometry.to_json(args.pretty)?);
    Ok(())
}

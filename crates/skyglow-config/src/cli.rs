//! Command-line argument parsing for skyglow.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;
use crate::config::Projection;

/// skyglow command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "skyglow", about = "Render a single-scattering sky to PNG")]
pub struct CliArgs {
    /// Image width in pixels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels.
    #[arg(long)]
    pub height: Option<u32>,

    /// Ray layout: perspective, fisheye or equirectangular.
    #[arg(long, value_parser = parse_projection)]
    pub projection: Option<Projection>,

    /// Time of day in [0, 1); 0.5 is noon.
    #[arg(long)]
    pub time_of_day: Option<f64>,

    /// Camera altitude in kilometers.
    #[arg(long)]
    pub altitude: Option<f32>,

    /// Camera pitch in degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub pitch: Option<f32>,

    /// Raymarch steps along each view ray.
    #[arg(long)]
    pub steps: Option<u32>,

    /// Worker threads (0 = one per CPU).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Output PNG path.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_projection(value: &str) -> Result<Projection, String> {
    match value.to_ascii_lowercase().as_str() {
        "perspective" => Ok(Projection::Perspective),
        "fisheye" => Ok(Projection::Fisheye),
        "equirectangular" | "equirect" => Ok(Projection::Equirectangular),
        other => Err(format!("unknown projection `{other}`")),
    }
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.image.width = w;
        }
        if let Some(h) = args.height {
            self.image.height = h;
        }
        if let Some(p) = args.projection {
            self.image.projection = p;
        }
        if let Some(t) = args.time_of_day {
            self.light.time_of_day = t;
        }
        if let Some(a) = args.altitude {
            self.camera.altitude_km = a;
        }
        if let Some(p) = args.pitch {
            self.camera.pitch_deg = p;
        }
        if let Some(s) = args.steps {
            self.scatter.view_step_count = s;
        }
        if let Some(t) = args.threads {
            self.image.threads = t;
        }
        if let Some(ref path) = args.output {
            self.image.output = path.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

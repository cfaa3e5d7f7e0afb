//! Demo binary that renders a sky image to a PNG.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p skyglow-demo` for the default view.
//! Run with `cargo run -p skyglow-demo -- --time-of-day 0.74 --projection fisheye -o dusk.png`
//! for a sunset fisheye.

use std::path::PathBuf;

use clap::Parser;
use glam::Vec3;
use skyglow_config::{CliArgs, Config};
use skyglow_render::{SkyRenderer, sun_direction_from_time, sun_elevation_deg};
use skyglow_scatter::{is_blocked, optical_depth_with};
use tracing::{error, info, warn};

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = match args.config.clone() {
        Some(dir) => dir,
        None => match Config::default_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("{e}, using the working directory");
                PathBuf::from(".")
            }
        },
    };

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    skyglow_log::init_logging(Some(&log_dir), Some(&config));

    demonstrate_sun_path(&config);

    if let Err(e) = render(&config) {
        error!("Render failed: {e}");
        std::process::exit(1);
    }
}

/// Log the optical depth toward the sun from the camera at a few times of day.
fn demonstrate_sun_path(config: &Config) {
    let radius = config.world.radius_km;
    let scale_height = config.world.scale_height_km;
    let origin = Vec3::new(0.0, radius + config.camera.altitude_km, 0.0);
    let length = radius * config.scatter.light_length_world_radii;

    for time_of_day in [0.5, 0.3, 0.26, 0.25, 0.2] {
        let sigma = optical_depth_with(
            origin,
            sun_direction_from_time(time_of_day),
            length,
            Vec3::ZERO,
            radius,
            scale_height,
            &config.scatter,
        );
        let elevation = sun_elevation_deg(time_of_day);
        if is_blocked(sigma) {
            info!(time_of_day, elevation, "Sun path blocked by the ground");
        } else {
            info!(
                time_of_day,
                elevation,
                air_mass = sigma / scale_height,
                "Sun path optical depth"
            );
        }
    }
}

fn render(config: &Config) -> Result<(), skyglow_render::RenderError> {
    let renderer = SkyRenderer::from_config(config)?;
    let image = renderer.render()?;

    let peak = image
        .pixels
        .iter()
        .fold(0.0_f32, |acc, p| acc.max(p.max_element()));
    if peak == 0.0 {
        warn!("Rendered image is completely black");
    }

    image.save_png(&config.image.output, config.image.exposure)?;
    info!(
        path = %config.image.output.display(),
        peak_radiance = peak,
        "Wrote sky image"
    );
    Ok(())
}

//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use skyglow_scatter::{ScatterSettings, ScatteringMedium};

use crate::error::ConfigError;

/// Top-level renderer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Output image settings.
    pub image: ImageConfig,
    /// Camera placement and lens.
    pub camera: CameraConfig,
    /// World size and atmosphere thickness.
    pub world: WorldConfig,
    /// Scattering coefficients of the air.
    pub medium: MediumConfig,
    /// Sun and background light.
    pub light: LightConfig,
    /// Approximation and raymarch tuning.
    pub scatter: ScatterSettings,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// How camera rays are laid out over the image.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Projection {
    /// Pinhole camera with the configured field of view.
    #[default]
    Perspective,
    /// Upward-looking hemisphere, zenith in the center of a square-ish image.
    Fisheye,
    /// Full sphere, longitude across and latitude down.
    Equirectangular,
}

/// Output image configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImageConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Ray layout.
    pub projection: Projection,
    /// Linear exposure multiplier applied before tonemapping.
    pub exposure: f32,
    /// Worker threads (0 = one per CPU).
    pub threads: usize,
    /// Where the PNG is written.
    pub output: PathBuf,
}

/// Camera configuration. Angles are in degrees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Height above the surface in kilometers.
    pub altitude_km: f32,
    /// Heading, measured from +X toward +Z.
    pub yaw_deg: f32,
    /// Elevation above the local horizon.
    pub pitch_deg: f32,
    /// Vertical field of view for the perspective projection.
    pub fov_deg: f32,
}

/// World configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Surface radius in kilometers.
    pub radius_km: f32,
    /// Atmospheric scale height in kilometers.
    pub scale_height_km: f32,
}

/// Scattering coefficients, per kilometer at surface density.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MediumConfig {
    pub beta_ray: [f32; 3],
    pub beta_mie: [f32; 3],
    pub beta_abs: [f32; 3],
    /// Henyey-Greenstein asymmetry for aerosols.
    pub mie_asymmetry: f32,
}

/// Lighting configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightConfig {
    /// Normalized time of day `[0.0, 1.0)`; 0.5 is noon.
    pub time_of_day: f64,
    /// Linear RGB sun intensity.
    pub intensity: [f32; 3],
    /// Linear RGB radiance of whatever lies behind the atmosphere.
    pub background: [f32; 3],
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Also write JSON logs to a file next to the config.
    pub log_to_file: bool,
}

// --- Default implementations ---

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
            projection: Projection::Perspective,
            exposure: 1.0,
            threads: 0,
            output: PathBuf::from("sky.png"),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            altitude_km: 0.1,
            yaw_deg: 0.0,
            pitch_deg: 10.0,
            fov_deg: 75.0,
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            radius_km: 6371.0,
            scale_height_km: 8.0,
        }
    }
}

impl Default for MediumConfig {
    fn default() -> Self {
        Self::from(ScatteringMedium::earth_like())
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            time_of_day: 0.3,
            intensity: [20.0; 3],
            background: [0.0; 3],
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: false,
        }
    }
}

// --- Conversions into the scattering types ---

impl From<ScatteringMedium> for MediumConfig {
    fn from(medium: ScatteringMedium) -> Self {
        Self {
            beta_ray: medium.beta_ray.to_array(),
            beta_mie: medium.beta_mie.to_array(),
            beta_abs: medium.beta_abs.to_array(),
            mie_asymmetry: medium.mie_asymmetry,
        }
    }
}

impl MediumConfig {
    /// Build the medium the scattering functions consume.
    pub fn to_medium(&self) -> ScatteringMedium {
        ScatteringMedium {
            beta_ray: Vec3::from(self.beta_ray),
            beta_mie: Vec3::from(self.beta_mie),
            beta_abs: Vec3::from(self.beta_abs),
            mie_asymmetry: self.mie_asymmetry,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Platform config directory for skyglow, e.g. `~/.config/skyglow`.
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join("skyglow"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-read `config.ron`: returns `Some(new_config)` if it changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

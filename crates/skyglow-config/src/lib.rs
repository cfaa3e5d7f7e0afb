//! Configuration system for skyglow.
//!
//! Provides runtime-configurable settings that persist to disk as RON files.
//! Supports CLI overrides via clap, reload detection, and forward/backward
//! compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, DebugConfig, ImageConfig, LightConfig, MediumConfig, Projection,
    WorldConfig,
};
pub use error::ConfigError;

//! CPU sky rendering on top of `skyglow-scatter`.
//!
//! Turns a [`Config`](skyglow_config::Config) into a camera, a sun and a
//! scattering scene, renders it across a pool of worker threads and writes the
//! tonemapped result as a PNG.

mod camera;
mod error;
mod renderer;
mod sun;
mod tonemap;

pub use camera::SkyCamera;
pub use error::RenderError;
pub use renderer::{HdrImage, SkyRenderer, SkyScene};
pub use sun::{sun_direction_from_time, sun_elevation_deg};
pub use tonemap::tonemap;

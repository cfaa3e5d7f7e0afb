//! Multi-threaded CPU sky renderer.
//!
//! Rows are handed out to a fixed pool of named worker threads over a
//! channel; each pixel is an independent call into the scattering model, so
//! the image is identical no matter how many workers run.

use std::path::Path;
use std::time::Instant;

use crossbeam_channel::unbounded;
use glam::Vec3;
use skyglow_config::Config;
use skyglow_scatter::{
    DirectionalLight, Ray, ScatterSettings, ScatteringMedium, World, sky_radiance_with,
};
use tracing::{debug, info};

use crate::camera::SkyCamera;
use crate::error::RenderError;
use crate::sun::sun_direction_from_time;
use crate::tonemap::tonemap;

/// Everything the scattering model needs apart from the view ray.
#[derive(Clone, Copy, Debug)]
pub struct SkyScene {
    pub world: World,
    pub scale_height: f32,
    pub medium: ScatteringMedium,
    pub light: DirectionalLight,
    pub background: Vec3,
    pub settings: ScatterSettings,
}

impl SkyScene {
    /// Build the scene described by `config`, with the sun placed by time of day.
    pub fn from_config(config: &Config) -> Self {
        let light = DirectionalLight::new(
            sun_direction_from_time(config.light.time_of_day),
            Vec3::from(config.light.intensity),
        );
        Self {
            world: World::new(Vec3::ZERO, config.world.radius_km),
            scale_height: config.world.scale_height_km,
            medium: config.medium.to_medium(),
            light,
            background: Vec3::from(config.light.background),
            settings: config.scatter,
        }
    }

    /// Radiance arriving along `view`.
    pub fn radiance(&self, view: Ray) -> Vec3 {
        sky_radiance_with(
            view,
            self.world,
            self.light,
            self.background,
            self.scale_height,
            &self.medium,
            &self.settings,
        )
    }
}

/// Linear RGB image, rows top to bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct HdrImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Vec3>,
}

impl HdrImage {
    fn black(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec3::ZERO; width as usize * height as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Vec3 {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Tonemapped 8-bit copy of the image.
    pub fn to_rgb8(&self, exposure: f32) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            image::Rgb(tonemap(self.pixel(x, y), exposure))
        })
    }

    /// Tonemap and write as PNG, creating parent directories as needed.
    pub fn save_png(&self, path: &Path, exposure: f32) -> Result<(), RenderError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(RenderError::CreateDir)?;
        }
        self.to_rgb8(exposure)
            .save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}

/// Renders a [`SkyScene`] through a [`SkyCamera`].
#[derive(Clone, Debug)]
pub struct SkyRenderer {
    pub scene: SkyScene,
    pub camera: SkyCamera,
    width: u32,
    height: u32,
    threads: usize,
}

impl SkyRenderer {
    /// Create a renderer. `threads == 0` picks one worker per CPU.
    pub fn new(
        scene: SkyScene,
        camera: SkyCamera,
        width: u32,
        height: u32,
        threads: usize,
    ) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSize { width, height });
        }
        let threads = if threads == 0 {
            num_cpus::get().max(1)
        } else {
            threads
        };
        Ok(Self {
            scene,
            camera,
            width,
            height,
            threads,
        })
    }

    /// Renderer for the scene, camera and image settings in `config`.
    pub fn from_config(config: &Config) -> Result<Self, RenderError> {
        let scene = SkyScene::from_config(config);
        let camera = SkyCamera::from_config(
            &config.camera,
            config.world.radius_km,
            config.image.projection,
        );
        Self::new(
            scene,
            camera,
            config.image.width,
            config.image.height,
            config.image.threads,
        )
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Radiance for one row of the image.
    pub fn render_row(&self, y: u32) -> Vec<Vec3> {
        (0..self.width)
            .map(|x| match self.camera.ray(x, y, self.width, self.height) {
                Some(view) => self.scene.radiance(view),
                None => Vec3::ZERO,
            })
            .collect()
    }

    /// Render the full image across the worker pool.
    pub fn render(&self) -> Result<HdrImage, RenderError> {
        let start = Instant::now();
        let workers = self.threads.min(self.height as usize);
        info!(
            width = self.width,
            height = self.height,
            workers,
            steps = self.scene.settings.view_step_count,
            sun_elevation_deg = sun_elevation_deg_of(&self.scene),
            "Rendering sky"
        );

        let (row_sender, row_receiver) = unbounded::<u32>();
        let (result_sender, result_receiver) = unbounded::<(u32, Vec<Vec3>)>();
        // The receiver outlives this loop, so a send only fails if it was dropped.
        for y in 0..self.height {
            if row_sender.send(y).is_err() {
                break;
            }
        }
        drop(row_sender);

        std::thread::scope(|scope| -> Result<(), RenderError> {
            for index in 0..workers {
                let rows = row_receiver.clone();
                let results = result_sender.clone();
                std::thread::Builder::new()
                    .name(format!("sky-render-{index}"))
                    .spawn_scoped(scope, move || {
                        while let Ok(y) = rows.recv() {
                            if results.send((y, self.render_row(y))).is_err() {
                                break;
                            }
                        }
                    })
                    .map_err(RenderError::Spawn)?;
            }
            Ok(())
        })?;
        drop(result_sender);

        let mut image = HdrImage::black(self.width, self.height);
        let row_len = self.width as usize;
        for (y, row) in result_receiver.iter() {
            let offset = y as usize * row_len;
            image.pixels[offset..offset + row_len].copy_from_slice(&row);
        }

        debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Sky render finished"
        );
        Ok(image)
    }
}

fn sun_elevation_deg_of(scene: &SkyScene) -> f32 {
    scene.light.direction.y.clamp(-1.0, 1.0).asin().to_degrees()
}

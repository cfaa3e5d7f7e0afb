//! Primary ray generation for the three supported projections.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec3;
use skyglow_config::{CameraConfig, Projection};
use skyglow_scatter::Ray;

/// A camera standing on (or above) the world's north pole, +Y up.
#[derive(Clone, Copy, Debug)]
pub struct SkyCamera {
    pub position: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    /// Heading in radians, measured from +X toward +Z.
    pub yaw: f32,
    /// Tangent of half the vertical field of view.
    pub tan_half_fov: f32,
    pub projection: Projection,
}

impl SkyCamera {
    /// Build a camera at `position` looking along `yaw`/`pitch` (degrees).
    pub fn new(
        position: Vec3,
        yaw_deg: f32,
        pitch_deg: f32,
        fov_deg: f32,
        projection: Projection,
    ) -> Self {
        let yaw = yaw_deg.to_radians();
        let pitch = pitch_deg.to_radians().clamp(-FRAC_PI_2 + 1e-3, FRAC_PI_2 - 1e-3);
        let forward = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos());
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward);
        Self {
            position,
            forward,
            right,
            up,
            yaw,
            tan_half_fov: (fov_deg.to_radians() * 0.5).tan(),
            projection,
        }
    }

    /// Camera above a world of `world_radius` centered at the origin.
    pub fn from_config(config: &CameraConfig, world_radius: f32, projection: Projection) -> Self {
        Self::new(
            Vec3::new(0.0, world_radius + config.altitude_km, 0.0),
            config.yaw_deg,
            config.pitch_deg,
            config.fov_deg,
            projection,
        )
    }

    /// The view ray through the center of pixel `(px, py)`.
    ///
    /// Returns `None` for pixels outside a fisheye's image circle.
    pub fn ray(&self, px: u32, py: u32, width: u32, height: u32) -> Option<Ray> {
        let u = (px as f32 + 0.5) / width as f32;
        let v = (py as f32 + 0.5) / height as f32;

        let direction = match self.projection {
            Projection::Perspective => {
                let aspect = width as f32 / height as f32;
                let sx = (2.0 * u - 1.0) * aspect * self.tan_half_fov;
                let sy = (1.0 - 2.0 * v) * self.tan_half_fov;
                (self.forward + self.right * sx + self.up * sy).normalize()
            }
            Projection::Fisheye => {
                let radius = width.min(height) as f32 * 0.5;
                let dx = (px as f32 + 0.5 - width as f32 * 0.5) / radius;
                let dy = (py as f32 + 0.5 - height as f32 * 0.5) / radius;
                let r = (dx * dx + dy * dy).sqrt();
                if r > 1.0 {
                    return None;
                }
                // Equidistant: zenith in the middle, horizon on the rim.
                let zenith = r * FRAC_PI_2;
                let azimuth = dy.atan2(dx) + self.yaw;
                horizontal(azimuth) * zenith.sin() + Vec3::Y * zenith.cos()
            }
            Projection::Equirectangular => {
                let longitude = u * TAU - PI + self.yaw;
                let latitude = FRAC_PI_2 - v * PI;
                horizontal(longitude) * latitude.cos() + Vec3::Y * latitude.sin()
            }
        };

        Some(Ray::new(self.position, direction))
    }
}

fn horizontal(angle: f32) -> Vec3 {
    Vec3::new(angle.cos(), 0.0, angle.sin())
}

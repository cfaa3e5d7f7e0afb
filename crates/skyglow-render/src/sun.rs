//! Sun position from a normalized time of day.
//!
//! `0.0` is midnight, `0.25` dawn, `0.5` noon and `0.75` dusk. The sun
//! circles in the XY plane with +Y as "up" at the camera, rising in +X.

use glam::Vec3;

/// Unit vector from the camera toward the sun at `time_of_day`.
///
/// At noon the sun is straight overhead (+Y), at midnight straight below (−Y).
pub fn sun_direction_from_time(time_of_day: f64) -> Vec3 {
    let angle = (time_of_day.rem_euclid(1.0) as f32) * std::f32::consts::TAU;
    Vec3::new(angle.sin(), -angle.cos(), 0.0).normalize()
}

/// Sun elevation above the horizon in degrees, negative at night.
pub fn sun_elevation_deg(time_of_day: f64) -> f32 {
    sun_direction_from_time(time_of_day).y.clamp(-1.0, 1.0).asin().to_degrees()
}

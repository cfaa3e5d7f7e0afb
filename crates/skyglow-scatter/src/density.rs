//! Height above the surface and exponential air density along a ray.
//!
//! `x` is always the signed distance from closest approach and `z2` the
//! squared closest-approach distance to the world center.

/// Height above a world of radius `world_radius` at distance `x` from closest approach.
#[inline]
pub fn height(x: f32, z2: f32, world_radius: f32) -> f32 {
    (x * x + z2).max(0.0).sqrt() - world_radius
}

/// Rate of change of [`height`] with respect to `x`.
///
/// Undefined at `x = z2 = 0`; callers clamp the result.
#[inline]
pub fn height_slope(x: f32, z2: f32) -> f32 {
    x / (x * x + z2).max(0.0).sqrt()
}

/// Air density at height `h` as a fraction of the surface density.
#[inline]
pub fn density_ratio(h: f32, scale_height: f32) -> f32 {
    (-h / scale_height).exp()
}

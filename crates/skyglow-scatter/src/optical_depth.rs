//! Column density ratio along a 3D line segment through a world's atmosphere.

use glam::Vec3;

use crate::column::{AtmosphereSpan, BIG, column_density_2d};
use crate::geometry::{ray_point_relation, ray_sphere_relation};
use crate::segment::RayFrame;
use crate::settings::ScatterSettings;

/// Column density ratio of air met by a segment starting at `segment_origin`
/// and running `segment_length` along `segment_direction`.
///
/// Returns [`BIG`] when the segment passes through the world, which treats the
/// ground as opaque. Uses [`ScatterSettings::default`].
pub fn optical_depth(
    segment_origin: Vec3,
    segment_direction: Vec3,
    segment_length: f32,
    world_position: Vec3,
    world_radius: f32,
    scale_height: f32,
) -> f32 {
    optical_depth_with(
        segment_origin,
        segment_direction,
        segment_length,
        world_position,
        world_radius,
        scale_height,
        &ScatterSettings::default(),
    )
}

/// [`optical_depth`] with explicit tuning constants.
pub fn optical_depth_with(
    segment_origin: Vec3,
    segment_direction: Vec3,
    segment_length: f32,
    world_position: Vec3,
    world_radius: f32,
    scale_height: f32,
    settings: &ScatterSettings,
) -> f32 {
    let atmosphere_radius = settings.atmosphere_radius(world_radius, scale_height);

    let approach = ray_point_relation(world_position, segment_origin, segment_direction);
    let (z2, x_z) = (approach.z2, approach.x_z);

    let world = ray_sphere_relation(world_radius, z2, x_z);
    let is_obstructed = 0.0 < world.x_exit
        && world.x_exit < segment_length
        && z2 < world_radius * world_radius;
    if is_obstructed {
        return BIG;
    }

    let atmo = ray_sphere_relation(atmosphere_radius, z2, x_z);

    let frame = RayFrame::new(z2, world_radius, scale_height, *settings);
    let span = AtmosphereSpan::new(world.x_exit - x_z, atmo.x_exit - x_z, &frame);

    column_density_2d(0.0 - x_z, segment_length - x_z, &span, &frame)
}

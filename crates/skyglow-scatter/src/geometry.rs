//! Ray geometry against points and spheres, in closest-approach coordinates.
//!
//! Every distance the approximation layer consumes is measured from the
//! point where a ray passes nearest the world center. These helpers produce
//! that frame: [`ray_point_relation`] locates closest approach, and
//! [`ray_sphere_relation`] expresses sphere crossings relative to the ray
//! origin given that closest approach.

use glam::Vec3;

use crate::column::SMALL;

/// A half-line with a unit direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Must be normalized.
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at signed distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// A spherical world: center and surface radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct World {
    pub center: Vec3,
    pub radius: f32,
}

impl World {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Where a ray passes nearest a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayPointRelation {
    /// Squared perpendicular distance from the ray to the point. Never negative.
    pub z2: f32,
    /// Signed distance from the ray origin to closest approach.
    pub x_z: f32,
}

/// How a ray crosses a sphere, as distances from the ray origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaySphereRelation {
    /// Whether the ray pierces the sphere somewhere ahead of its origin.
    pub intersects: bool,
    /// Distance at which the ray enters the sphere.
    pub x_enter: f32,
    /// Distance at which the ray leaves the sphere.
    pub x_exit: f32,
}

/// Locate the closest approach of a ray to `point`.
pub fn ray_point_relation(point: Vec3, ray_origin: Vec3, ray_direction: Vec3) -> RayPointRelation {
    let to_point = point - ray_origin;
    let x_z = to_point.dot(ray_direction);
    // Cancellation can push this a hair below zero for rays aimed at the point.
    let z2 = (to_point.length_squared() - x_z * x_z).max(0.0);
    RayPointRelation { z2, x_z }
}

/// Intersect a ray with a sphere of `sphere_radius` centered on the point
/// that produced `z2`/`x_z`.
///
/// A sphere lying entirely behind the origin does not count as intersected.
/// When the line misses, both distances collapse onto closest approach, the
/// lowest point the ray reaches over the sphere.
pub fn ray_sphere_relation(sphere_radius: f32, z2: f32, x_z: f32) -> RaySphereRelation {
    let r2 = sphere_radius * sphere_radius;
    let half_chord = (r2 - z2).max(SMALL).sqrt();
    let x_exit = x_z + half_chord;
    RaySphereRelation {
        intersects: z2 < r2 && x_exit > 0.0,
        x_enter: x_z - half_chord,
        x_exit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_point_relation_offset_ray() {
        let rel = ray_point_relation(Vec3::ZERO, Vec3::new(-10.0, 3.0, 0.0), Vec3::X);
        assert_eq!(rel.x_z, 10.0);
        assert!((rel.z2 - 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_ray_point_relation_point_behind() {
        let rel = ray_point_relation(Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0), Vec3::X);
        assert_eq!(rel.x_z, -5.0);
        assert_eq!(rel.z2, 0.0);
    }

    #[test]
    fn test_ray_point_relation_never_negative() {
        let origin = Vec3::new(1234.567, -89.01, 6400.3);
        let dir = (-origin).normalize();
        let rel = ray_point_relation(Vec3::ZERO, origin, dir);
        assert!(rel.z2 >= 0.0);
    }

    #[test]
    fn test_sphere_hit() {
        let rel = ray_sphere_relation(5.0, 9.0, 10.0);
        assert!(rel.intersects);
        assert_eq!(rel.x_enter, 6.0);
        assert_eq!(rel.x_exit, 14.0);
    }

    #[test]
    fn test_sphere_miss_collapses_to_closest_approach() {
        let rel = ray_sphere_relation(2.0, 9.0, 10.0);
        assert!(!rel.intersects);
        assert_eq!(rel.x_enter, 10.0);
        assert_eq!(rel.x_exit, 10.0);
    }

    #[test]
    fn test_half_chord_floor_at_closest_approach() {
        let rel = ray_sphere_relation(2.0, 9.0, 0.0);
        assert!(!rel.intersects);
        assert_eq!(rel.x_exit, SMALL.sqrt());
        assert_eq!(rel.x_enter, -SMALL.sqrt());
    }

    #[test]
    fn test_sphere_behind_origin() {
        let rel = ray_sphere_relation(5.0, 9.0, -10.0);
        assert!(!rel.intersects);
        assert_eq!(rel.x_exit, -6.0);
    }

    #[test]
    fn test_origin_inside_sphere() {
        let rel = ray_sphere_relation(10.0, 0.0, 0.0);
        assert!(rel.intersects);
        assert!(rel.x_enter < 0.0 && rel.x_exit > 0.0);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ONE, Vec3::Y);
        assert_eq!(ray.at(2.0), Vec3::new(1.0, 3.0, 1.0));
    }
}

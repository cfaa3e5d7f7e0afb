//! Single-scattering sky color by marching along the view ray.
//!
//! At each step the sample receives sunlight attenuated along a light ray,
//! scatters a share of it toward the camera, and that share is attenuated on
//! its way back along the view ray. Both attenuations come from
//! [`optical_depth_with`], recomputed from scratch for every sample.

use glam::Vec3;

use crate::density::{density_ratio, height};
use crate::geometry::{Ray, World, ray_point_relation, ray_sphere_relation};
use crate::medium::{DirectionalLight, ScatteringMedium};
use crate::optical_depth::optical_depth_with;
use crate::phase::{henyey_greenstein_phase, rayleigh_phase};
use crate::settings::ScatterSettings;

/// Linear RGB radiance reaching the camera along `view`, using
/// [`ScatterSettings::default`].
///
/// `background` is whatever lies behind the atmosphere (space, or the lit
/// ground when the ray hits the world); it is attenuated by the air in front.
pub fn sky_radiance(
    view: Ray,
    world: World,
    light: DirectionalLight,
    background: Vec3,
    scale_height: f32,
    medium: &ScatteringMedium,
) -> Vec3 {
    sky_radiance_with(
        view,
        world,
        light,
        background,
        scale_height,
        medium,
        &ScatterSettings::default(),
    )
}

/// [`sky_radiance`] with explicit tuning constants.
pub fn sky_radiance_with(
    view: Ray,
    world: World,
    light: DirectionalLight,
    background: Vec3,
    scale_height: f32,
    medium: &ScatteringMedium,
    settings: &ScatterSettings,
) -> Vec3 {
    let atmosphere_radius = settings.atmosphere_radius(world.radius, scale_height);

    let cos_scatter_angle = view.direction.dot(light.direction);
    let gamma_ray = rayleigh_phase(cos_scatter_angle);
    let gamma_mie = henyey_greenstein_phase(cos_scatter_angle, medium.mie_asymmetry);

    let approach = ray_point_relation(world.center, view.origin, view.direction);
    let atmo = ray_sphere_relation(atmosphere_radius, approach.z2, approach.x_z);
    let ground = ray_sphere_relation(world.radius, approach.z2, approach.x_z);

    if !atmo.intersects {
        return background;
    }

    let step_count = settings.view_step_count.max(1);
    let view_x_start = atmo.x_enter.max(0.0);
    let view_x_stop = if ground.intersects {
        ground.x_enter
    } else {
        atmo.x_exit
    };
    let view_dx = (view_x_stop - view_x_start) / step_count as f32;
    let light_length = settings.light_length_world_radii * world.radius;

    let scattering = medium.beta_ray * gamma_ray + medium.beta_mie * gamma_mie;

    let mut total = Vec3::ZERO;
    let mut view_sigma = 0.0;
    let mut view_x = view_x_start + 0.5 * view_dx;

    for _ in 0..step_count {
        let light_origin = view.at(view_x);
        let light_h = height(view_x - approach.x_z, approach.z2, world.radius);

        view_sigma = optical_depth_with(
            view.origin,
            view.direction,
            view_x,
            world.center,
            world.radius,
            scale_height,
            settings,
        );
        let light_sigma = optical_depth_with(
            light_origin,
            light.direction,
            light_length,
            world.center,
            world.radius,
            scale_height,
            settings,
        );

        // Loss on both legs times the share scattered toward the camera here.
        let outgoing = medium.transmittance(view_sigma + light_sigma);
        let incoming = view_dx * density_ratio(light_h, scale_height) * scattering;
        total += light.intensity * outgoing * incoming;

        view_x += view_dx;
    }

    total + background * medium.transmittance(view_sigma)
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: f32 = 6371.0;
    const H: f32 = 8.0;

    fn world() -> World {
        World::new(Vec3::ZERO, R)
    }

    fn sun(direction: Vec3) -> DirectionalLight {
        DirectionalLight::new(direction, Vec3::splat(20.0))
    }

    fn camera() -> Vec3 {
        Vec3::new(0.0, R + 0.1, 0.0)
    }

    fn all_finite(c: Vec3) -> bool {
        c.is_finite() && c.min_element() >= 0.0
    }

    #[test]
    fn test_missing_atmosphere_returns_background() {
        let background = Vec3::new(0.01, 0.02, 0.03);
        let view = Ray::new(Vec3::new(-3.0 * R, 2.0 * R, 0.0), Vec3::X);
        let c = sky_radiance(
            view,
            world(),
            sun(Vec3::Y),
            background,
            H,
            &ScatteringMedium::earth_like(),
        );
        assert_eq!(c, background);
    }

    #[test]
    fn test_atmosphere_behind_camera_returns_background() {
        let background = Vec3::splat(0.5);
        let view = Ray::new(Vec3::new(0.0, 2.0 * R, 0.0), Vec3::Y);
        let c = sky_radiance(
            view,
            world(),
            sun(Vec3::Y),
            background,
            H,
            &ScatteringMedium::earth_like(),
        );
        assert_eq!(c, background);
    }

    #[test]
    fn test_vacuum_returns_background_exactly() {
        let background = Vec3::new(0.2, 0.4, 0.8);
        let views = [
            Ray::new(camera(), Vec3::Y),
            Ray::new(camera(), Vec3::new(1.0, 0.3, 0.0).normalize()),
            // From orbit, skimming through the atmosphere above the limb.
            Ray::new(Vec3::new(0.0, 0.0, 2.0 * R), Vec3::new(0.0, 0.58, -1.0).normalize()),
        ];
        for view in views {
            let c = sky_radiance(
                view,
                world(),
                sun(Vec3::new(0.3, 1.0, 0.0).normalize()),
                background,
                H,
                &ScatteringMedium::vacuum(),
            );
            assert_eq!(c, background);
        }
    }

    #[test]
    fn test_noon_sky_is_blue() {
        let look = Vec3::new(1.0, 0.5, 0.0).normalize();
        let c = sky_radiance(
            Ray::new(camera(), look),
            world(),
            sun(Vec3::Y),
            Vec3::ZERO,
            H,
            &ScatteringMedium::earth_like(),
        );
        assert!(all_finite(c));
        assert!(c.z > c.x, "noon sky should be bluer: {c:?}");
    }

    #[test]
    fn test_sunset_is_redder_than_noon() {
        let look = Vec3::new(1.0, 0.5, 0.0).normalize();
        let view = Ray::new(camera(), look);
        let medium = ScatteringMedium::earth_like();
        let noon = sky_radiance(view, world(), sun(Vec3::Y), Vec3::ZERO, H, &medium);
        let sunset = sky_radiance(
            view,
            world(),
            sun(Vec3::new(1.0, 0.01, 0.0).normalize()),
            Vec3::ZERO,
            H,
            &medium,
        );
        let noon_ratio = noon.x / noon.z.max(1e-10);
        let sunset_ratio = sunset.x / sunset.z.max(1e-10);
        assert!(
            sunset_ratio > noon_ratio,
            "sunset red/blue {sunset_ratio:.3} > noon {noon_ratio:.3}"
        );
    }

    #[test]
    fn test_zenith_differs_from_horizon() {
        let medium = ScatteringMedium::earth_like();
        let look = |dir: Vec3| {
            sky_radiance(Ray::new(camera(), dir), world(), sun(Vec3::Y), Vec3::ZERO, H, &medium)
        };
        let up = look(Vec3::Y);
        let across = look(Vec3::X);
        let b_up = up.element_sum();
        let b_across = across.element_sum();
        assert!((b_up - b_across).abs() > b_up * 0.1, "up={b_up}, horizon={b_across}");
    }

    #[test]
    fn test_horizon_tangent_stays_finite() {
        let medium = ScatteringMedium::earth_like();
        let background = Vec3::splat(1.0);
        for sun_dir in [Vec3::Y, Vec3::X, -Vec3::Y, Vec3::new(0.0, 0.02, 1.0).normalize()] {
            // Grazes the surface exactly at the origin of the x axis.
            let view = Ray::new(Vec3::new(-1000.0, R, 0.0), Vec3::X);
            let c = sky_radiance(view, world(), sun(sun_dir), background, H, &medium);
            assert!(all_finite(c), "sun={sun_dir:?} gave {c:?}");
        }
    }

    #[test]
    fn test_ground_hit_attenuates_background() {
        let medium = ScatteringMedium::earth_like();
        let background = Vec3::splat(1.0);
        let view = Ray::new(Vec3::new(0.0, R + 5.0, 0.0), -Vec3::Y);
        let c = sky_radiance(view, world(), sun(Vec3::X), background, H, &medium);
        assert!(all_finite(c));
        // Background passes through ~5 km of dense air; some of it is lost.
        let direct = background * (-medium.extinction() * H * (1.0 - (-5.0 / H).exp())).exp();
        assert!(c.x < background.x + 1.0);
        assert!((c - direct).min_element() >= -1e-3);
    }

    #[test]
    fn test_unlit_sky_is_background_times_view_transmittance() {
        // One step: the background is attenuated by the air up to its midpoint.
        let medium = ScatteringMedium::earth_like();
        let settings = ScatterSettings {
            view_step_count: 1,
            ..Default::default()
        };
        let background = Vec3::new(0.5, 1.0, 2.0);
        let view = Ray::new(camera(), Vec3::Y);
        let dark = DirectionalLight::new(Vec3::Y, Vec3::ZERO);
        let c = sky_radiance_with(view, world(), dark, background, H, &medium, &settings);

        let approach = ray_point_relation(Vec3::ZERO, view.origin, view.direction);
        let atmo = ray_sphere_relation(settings.atmosphere_radius(R, H), approach.z2, approach.x_z);
        let sigma = optical_depth_with(
            view.origin,
            view.direction,
            0.5 * atmo.x_exit,
            Vec3::ZERO,
            R,
            H,
            &settings,
        );
        let expected = background * medium.transmittance(sigma);
        assert!(expected.x < background.x);
        assert!((c - expected).abs().max_element() < 1e-6, "{c:?} vs {expected:?}");
    }

    #[test]
    fn test_night_side_is_dark() {
        let medium = ScatteringMedium::earth_like();
        let c = sky_radiance(
            Ray::new(camera(), Vec3::new(1.0, 0.5, 0.0).normalize()),
            world(),
            sun(-Vec3::Y),
            Vec3::ZERO,
            H,
            &medium,
        );
        assert!(c.max_element() < 1e-6, "{c:?}");
    }

    #[test]
    fn test_no_boundary_discontinuity() {
        let medium = ScatteringMedium::earth_like();
        let angles = [0.01_f32, 0.02, 0.03, 0.04, 0.05];
        let colors: Vec<Vec3> = angles
            .iter()
            .map(|&a| {
                let dir = Vec3::new(a.cos(), a.sin(), 0.0);
                let view = Ray::new(camera(), dir);
                sky_radiance(view, world(), sun(Vec3::Y), Vec3::ZERO, H, &medium)
            })
            .collect();

        for i in 1..colors.len() {
            let diff = (colors[i] - colors[i - 1]).abs().element_sum();
            let avg = colors[i].element_sum().max(1e-6);
            assert!(diff / avg < 0.5, "Discontinuity at index {i}");
        }
    }

    #[test]
    fn test_is_deterministic() {
        let medium = ScatteringMedium::earth_like();
        let view = Ray::new(camera(), Vec3::new(0.2, 0.9, 0.1).normalize());
        let light = sun(Vec3::new(0.0, 0.3, 0.5).normalize());
        let a = sky_radiance(view, world(), light, Vec3::ZERO, H, &medium);
        let b = sky_radiance(view, world(), light, Vec3::ZERO, H, &medium);
        assert_eq!(a, b);
    }

    #[test]
    fn test_more_steps_converge() {
        let medium = ScatteringMedium::earth_like();
        let view = Ray::new(camera(), Vec3::new(1.0, 0.2, 0.0).normalize());
        let light = sun(Vec3::new(0.2, 1.0, 0.0).normalize());
        let fine = ScatterSettings {
            view_step_count: 256,
            ..Default::default()
        };
        let coarse = sky_radiance(view, world(), light, Vec3::ZERO, H, &medium);
        let reference = sky_radiance_with(view, world(), light, Vec3::ZERO, H, &medium, &fine);
        let rel = (coarse - reference).abs().element_sum() / reference.element_sum();
        assert!(rel < 0.1, "16 steps off by {rel}");
    }
}

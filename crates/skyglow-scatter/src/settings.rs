//! Tunable accuracy/performance constants for the optical-depth approximation
//! and the view raymarcher.

use serde::{Deserialize, Serialize};

/// Number of scale heights between the surface and the top of the atmosphere.
///
/// Twelve scale heights is roughly where Earth's official edge of space sits;
/// density there is `exp(-12) ≈ 6e-6` of the surface value.
pub const DEFAULT_ATMOSPHERE_SCALE_HEIGHTS: f32 = 12.0;
/// Fraction into a segment at which the linear height model samples its slope.
pub const DEFAULT_SLOPE_SAMPLE_FRACTION: f32 = 0.5;
/// Fraction into a segment at which the linear height model samples its intercept.
pub const DEFAULT_INTERCEPT_SAMPLE_FRACTION: f32 = 0.2;
/// Midpoint-rule steps taken along each view ray.
pub const DEFAULT_VIEW_STEP_COUNT: u32 = 16;
/// Light rays are traced this many world radii toward the light.
pub const DEFAULT_LIGHT_LENGTH_WORLD_RADII: f32 = 3.0;
/// Smallest slope magnitude the segment approximator will divide by.
pub const DEFAULT_MIN_SLOPE: f32 = 1e-6;

/// Constants shaping the column-density approximation and the raymarch.
///
/// The defaults reproduce the reference numerics exactly; change them only
/// to trade accuracy against cost.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterSettings {
    /// Atmosphere thickness in scale heights.
    pub atmosphere_scale_heights: f32,
    /// Where in a segment the slope of the linear height model is sampled, `[0, 1]`.
    pub slope_sample_fraction: f32,
    /// Where in a segment the intercept of the linear height model is sampled, `[0, 1]`.
    pub intercept_sample_fraction: f32,
    /// Samples taken along the view ray.
    pub view_step_count: u32,
    /// Length of each light ray, in world radii.
    pub light_length_world_radii: f32,
    /// Lower bound on `|m|` in the segment integral `-H/m * exp(-h/H)`.
    pub min_slope: f32,
}

impl Default for ScatterSettings {
    fn default() -> Self {
        Self {
            atmosphere_scale_heights: DEFAULT_ATMOSPHERE_SCALE_HEIGHTS,
            slope_sample_fraction: DEFAULT_SLOPE_SAMPLE_FRACTION,
            intercept_sample_fraction: DEFAULT_INTERCEPT_SAMPLE_FRACTION,
            view_step_count: DEFAULT_VIEW_STEP_COUNT,
            light_length_world_radii: DEFAULT_LIGHT_LENGTH_WORLD_RADII,
            min_slope: DEFAULT_MIN_SLOPE,
        }
    }
}

impl ScatterSettings {
    /// Radius of the atmosphere shell around a world of `world_radius`.
    pub fn atmosphere_radius(&self, world_radius: f32, scale_height: f32) -> f32 {
        world_radius + self.atmosphere_scale_heights * scale_height
    }
}

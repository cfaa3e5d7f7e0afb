//! Closed-form column density over one bounded stretch of a ray.
//!
//! `∫ exp(-sqrt(x² + z²)/H) dx` has no elementary antiderivative, so inside a
//! segment the height is replaced by a straight line `h(x) = m·(x − xb) + b`.
//! The slope `m` is sampled part way into the segment and the intercept `b`
//! a little earlier; with that line the integrand becomes a plain exponential
//! whose antiderivative is `-H/m · exp(-h/H)`.

use crate::density::{height, height_slope};
use crate::settings::ScatterSettings;

/// Per-ray constants shared by every column-density evaluation on that ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayFrame {
    /// Squared closest-approach distance from the ray to the world center.
    pub z2: f32,
    pub world_radius: f32,
    pub scale_height: f32,
    pub settings: ScatterSettings,
}

impl RayFrame {
    pub fn new(z2: f32, world_radius: f32, scale_height: f32, settings: ScatterSettings) -> Self {
        Self {
            z2,
            world_radius,
            scale_height,
            settings,
        }
    }
}

/// Antiderivative of the linearized density, evaluated at `x`.
///
/// The line takes its slope at `xm` and passes through the true height at `xb`.
/// Only differences between two evaluations carry meaning.
pub fn segment_integral_from_samples(x: f32, xm: f32, xb: f32, frame: &RayFrame) -> f32 {
    let h_scale = frame.scale_height;
    let m = clamp_slope(height_slope(xm, frame.z2), frame.settings.min_slope);
    let b = height(xb, frame.z2, frame.world_radius);
    let h = m * (x - xb) + b;
    -h_scale / m * (-h / h_scale).exp()
}

/// Antiderivative of the linearized density for the segment `[xmin, xmin + dx]`.
///
/// `x` is clamped into the segment, so past either end the value is flat and
/// the segment contributes nothing further.
pub fn segment_integral(x: f32, xmin: f32, dx: f32, frame: &RayFrame) -> f32 {
    let xm = xmin + frame.settings.slope_sample_fraction * dx;
    let xb = xmin + frame.settings.intercept_sample_fraction * dx;
    let xmax = xmin + dx;
    segment_integral_from_samples(clamp_between(x, xmin, xmax), xm, xb, frame)
}

/// Keep `|m| >= min_slope`, preserving sign. A zero slope maps to `+min_slope`.
fn clamp_slope(m: f32, min_slope: f32) -> f32 {
    if m.is_nan() || m.abs() < min_slope {
        min_slope.copysign(if m.is_nan() { 1.0 } else { m })
    } else {
        m
    }
}

/// `clamp` that tolerates `lo > hi` the way shading languages do: `min(max(x, lo), hi)`.
fn clamp_between(x: f32, lo: f32, hi: f32) -> f32 {
    x.max(lo).min(hi)
}

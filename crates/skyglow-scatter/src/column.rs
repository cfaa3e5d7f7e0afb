//! Column density ratio between two points on a ray, built from segment approximations.
//!
//! A single straight-line height model only holds over a bounded span, so the
//! atmosphere along a ray is split into thirds between the surface crossing
//! (`x_world`) and the atmosphere crossing (`x_atmo`). The first two thirds get
//! their own linear model; together they approximate the column density from
//! the surface out to any distance. Values for either side of closest approach
//! are mirrored through `|x|` and recombined with a sign.

use crate::segment::{RayFrame, segment_integral};

/// Sentinel column density meaning "this path runs into the ground".
pub const BIG: f32 = 1e20;
/// Floor of the ray-sphere half-chord radicand, so a missed sphere still
/// yields finite crossings at closest approach.
pub const SMALL: f32 = 1e-20;

/// True when `sigma` is the [`BIG`] obstruction sentinel rather than a physical depth.
#[inline]
pub fn is_blocked(sigma: f32) -> bool {
    sigma >= BIG
}

/// Surface and atmosphere crossings of one ray, with the reference column
/// density at the surface.
///
/// Distances are relative to closest approach. Build one per ray; `sigma0`
/// is only valid for the `x_world`/`x_atmo`/`z2` it was computed from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AtmosphereSpan {
    pub x_world: f32,
    pub x_atmo: f32,
    pub sigma0: f32,
}

impl AtmosphereSpan {
    /// Compute the span and its surface reference value for `frame`.
    pub fn new(x_world: f32, x_atmo: f32, frame: &RayFrame) -> Self {
        Self {
            x_world,
            x_atmo,
            sigma0: reference_column_density(x_world, x_atmo, frame),
        }
    }
}

/// Column density from the surface out to `|x|`, offset by `sigma0`.
///
/// Distances below the surface are lifted onto it, so the result is zero
/// at and under `x_world` once `sigma0` is the matching reference value.
pub fn column_density_for_abs_x(
    x: f32,
    x_world: f32,
    x_atmo: f32,
    sigma0: f32,
    frame: &RayFrame,
) -> f32 {
    let x_world = x_world.abs();
    let x_atmo = x_atmo.abs();
    let x = (x.abs() - x_world).max(0.0) + x_world;
    let dx = (x_atmo - x_world) / 3.0;

    let lower = segment_integral(x, x_world, dx, frame);
    let upper = segment_integral(x, x_world + dx, dx, frame);
    lower + upper - sigma0
}

/// The `sigma0` that makes [`column_density_for_abs_x`] read zero at the surface.
pub fn reference_column_density(x_world: f32, x_atmo: f32, frame: &RayFrame) -> f32 {
    column_density_for_abs_x(x_world, x_world, x_atmo, 0.0, frame)
}

/// Column density between `x_start` and `x_stop`, both relative to closest approach.
///
/// Each end saturates at [`BIG`] before the two are combined, which keeps far
/// out-of-atmosphere endpoints from producing `inf - inf`.
pub fn column_density_2d(
    x_start: f32,
    x_stop: f32,
    span: &AtmosphereSpan,
    frame: &RayFrame,
) -> f32 {
    let at = |x: f32| {
        column_density_for_abs_x(x, span.x_world, span.x_atmo, span.sigma0, frame).min(BIG)
    };
    sign(x_stop) * at(x_stop) - sign(x_start) * at(x_start)
}

/// Shading-language `sign`: zero maps to zero, unlike [`f32::signum`].
#[inline]
fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

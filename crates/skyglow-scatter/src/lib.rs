//! Single-scattering sky color through a spherical, exponentially stratified atmosphere.
//!
//! The optical depth of an exponential atmosphere along an arbitrary ray has no
//! closed form, so [`optical_depth`] approximates it piecewise: the height of
//! the ray above the surface is modeled as a straight line over a few segments,
//! each of which integrates exactly. [`sky_radiance`] marches a view ray,
//! combining view-path and light-path optical depths into transmittance and
//! in-scattered light.
//!
//! Everything here is a pure function of its arguments, so calls can be spread
//! across threads or pixels freely.
//!
//! The approximation layers underneath (segments, composed columns) are
//! internal; only the entry points above and the types they take are exported.
//!
//! ```compile_fail
//! use skyglow_scatter::segment::segment_integral;
//! ```

mod column;
mod density;
mod geometry;
mod medium;
mod optical_depth;
mod phase;
mod raymarch;
mod segment;
mod settings;

pub use column::{BIG, SMALL, is_blocked};
pub use geometry::{
    Ray, RayPointRelation, RaySphereRelation, World, ray_point_relation, ray_sphere_relation,
};
pub use medium::{DirectionalLight, ScatteringMedium};
pub use optical_depth::{optical_depth, optical_depth_with};
pub use phase::{henyey_greenstein_phase, rayleigh_phase};
pub use raymarch::{sky_radiance, sky_radiance_with};
pub use settings::{
    DEFAULT_ATMOSPHERE_SCALE_HEIGHTS, DEFAULT_INTERCEPT_SAMPLE_FRACTION,
    DEFAULT_LIGHT_LENGTH_WORLD_RADII, DEFAULT_MIN_SLOPE, DEFAULT_SLOPE_SAMPLE_FRACTION,
    DEFAULT_VIEW_STEP_COUNT, ScatterSettings,
};

//! Normalized scattering phase functions, in terms of the cosine of the scatter angle.

use std::f32::consts::PI;

/// Rayleigh phase function for molecular scattering.
pub fn rayleigh_phase(cos_angle: f32) -> f32 {
    3.0 / (16.0 * PI) * (1.0 + cos_angle * cos_angle)
}

/// Henyey-Greenstein phase function for aerosol (Mie) scattering.
///
/// `g` in `(-1, 1)` is the asymmetry: positive values favor forward scattering.
pub fn henyey_greenstein_phase(cos_angle: f32, g: f32) -> f32 {
    let g2 = g * g;
    (1.0 - g2) / (4.0 * PI * (1.0 + g2 - 2.0 * g * cos_angle).powf(1.5))
}

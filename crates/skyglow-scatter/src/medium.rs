//! Scattering and absorption coefficients of the air, plus the light that drives it.

use glam::Vec3;

/// Per-channel extinction coefficients of an atmosphere at surface density.
///
/// Units are inverse distance in whatever unit the world radius uses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScatteringMedium {
    /// Rayleigh (molecular) scattering.
    pub beta_ray: Vec3,
    /// Mie (aerosol) scattering.
    pub beta_mie: Vec3,
    /// Pure absorption, e.g. ozone.
    pub beta_abs: Vec3,
    /// Henyey-Greenstein asymmetry used for the Mie phase factor.
    pub mie_asymmetry: f32,
}

impl ScatteringMedium {
    /// Earth-like coefficients per kilometer.
    ///
    /// Aerosols share the molecular scale height here, so the Mie coefficient
    /// is scaled down from its sea-level value to keep the total haze similar.
    pub fn earth_like() -> Self {
        Self {
            beta_ray: Vec3::new(5.8e-3, 13.5e-3, 33.1e-3),
            beta_mie: Vec3::splat(4e-3),
            beta_abs: Vec3::new(0.65e-3, 1.881e-3, 0.085e-3),
            mie_asymmetry: 0.76,
        }
    }

    /// No air at all: nothing scatters or absorbs.
    pub fn vacuum() -> Self {
        Self {
            beta_ray: Vec3::ZERO,
            beta_mie: Vec3::ZERO,
            beta_abs: Vec3::ZERO,
            mie_asymmetry: 0.0,
        }
    }

    /// Total extinction: everything that removes light from a path.
    pub fn extinction(&self) -> Vec3 {
        self.beta_ray + self.beta_mie + self.beta_abs
    }

    /// Fraction of light surviving a path of column density ratio `sigma`.
    pub fn transmittance(&self, sigma: f32) -> Vec3 {
        (-self.extinction() * sigma).exp()
    }
}

impl Default for ScatteringMedium {
    fn default() -> Self {
        Self::earth_like()
    }
}

/// An infinitely distant light source such as a sun.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector pointing from the scene toward the light.
    pub direction: Vec3,
    /// Linear RGB intensity arriving at the top of the atmosphere.
    pub intensity: Vec3,
}

impl DirectionalLight {
    pub fn new(direction: Vec3, intensity: Vec3) -> Self {
        Self {
            direction: direction.normalize_or_zero(),
            intensity,
        }
    }
}

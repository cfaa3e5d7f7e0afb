//! HDR to display conversion: exposure, Reinhard, gamma 2.2.

use glam::Vec3;

const GAMMA: f32 = 1.0 / 2.2;

/// Map linear radiance to 8-bit display RGB.
pub fn tonemap(radiance: Vec3, exposure: f32) -> [u8; 3] {
    let c = radiance * exposure;
    let mapped = (c / (Vec3::ONE + c)).max(Vec3::ZERO).powf(GAMMA);
    let to_byte = |v: f32| (v * 255.0 + 0.5).clamp(0.0, 255.0) as u8;
    [to_byte(mapped.x), to_byte(mapped.y), to_byte(mapped.z)]
}

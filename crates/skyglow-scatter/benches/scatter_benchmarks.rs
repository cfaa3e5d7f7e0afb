use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glam::Vec3;
use skyglow_scatter::*;

const R: f32 = 6371.0;
const H: f32 = 8.0;

fn bench_optical_depth_zenith(c: &mut Criterion) {
    let origin = black_box(Vec3::new(0.0, R + 0.1, 0.0));
    c.bench_function("optical_depth_zenith", |bencher| {
        bencher.iter(|| black_box(optical_depth(origin, Vec3::Y, 3.0 * R, Vec3::ZERO, R, H)))
    });
}

fn bench_optical_depth_grazing(c: &mut Criterion) {
    let origin = black_box(Vec3::new(-1000.0, R + 2.0, 0.0));
    c.bench_function("optical_depth_grazing", |bencher| {
        bencher.iter(|| black_box(optical_depth(origin, Vec3::X, 3.0 * R, Vec3::ZERO, R, H)))
    });
}

fn bench_sky_radiance(c: &mut Criterion) {
    let medium = ScatteringMedium::earth_like();
    let world = World::new(Vec3::ZERO, R);
    let light = DirectionalLight::new(Vec3::new(0.3, 1.0, 0.0), Vec3::splat(20.0));
    let view = black_box(Ray::new(
        Vec3::new(0.0, R + 0.1, 0.0),
        Vec3::new(1.0, 0.3, 0.0).normalize(),
    ));
    c.bench_function("sky_radiance_16_steps", |bencher| {
        bencher.iter(|| black_box(sky_radiance(view, world, light, Vec3::ZERO, H, &medium)))
    });
}

fn bench_sky_radiance_64_steps(c: &mut Criterion) {
    let medium = ScatteringMedium::earth_like();
    let world = World::new(Vec3::ZERO, R);
    let light = DirectionalLight::new(Vec3::new(0.3, 1.0, 0.0), Vec3::splat(20.0));
    let settings = ScatterSettings {
        view_step_count: 64,
        ..Default::default()
    };
    let view = black_box(Ray::new(
        Vec3::new(0.0, R + 0.1, 0.0),
        Vec3::new(1.0, 0.3, 0.0).normalize(),
    ));
    c.bench_function("sky_radiance_64_steps", |bencher| {
        bencher.iter(|| {
            black_box(sky_radiance_with(
                view,
                world,
                light,
                Vec3::ZERO,
                H,
                &medium,
                &settings,
            ))
        })
    });
}

criterion_group!(
    benches,
    bench_optical_depth_zenith,
    bench_optical_depth_grazing,
    bench_sky_radiance,
    bench_sky_radiance_64_steps
);
criterion_main!(benches);

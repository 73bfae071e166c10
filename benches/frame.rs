use criterion::{Criterion, black_box, criterion_group, criterion_main};
use raycast_engine::raycast::{cast, cast_exact};
use raycast_engine::shading::pack_rgb;
use raycast_engine::{Engine, Grid, LogicalKey, RayMarch, Texture};

fn bench_frames(c: &mut Criterion) {
    let mut flat = Engine::classic();
    flat.set_key_state(LogicalKey::TurnRight, true);
    c.bench_function("classic_frame", |b| {
        b.iter(|| {
            black_box(flat.on_frame());
        })
    });

    let mut exact = Engine::classic();
    exact.set_ray_march(RayMarch::Exact);
    exact.set_key_state(LogicalKey::TurnRight, true);
    c.bench_function("classic_frame_exact", |b| {
        b.iter(|| {
            black_box(exact.on_frame());
        })
    });

    let pixels = (0..64 * 64)
        .map(|i| if (i / 8 + i / 512) % 2 == 0 { pack_rgb(180, 60, 40) } else { pack_rgb(90, 90, 90) })
        .collect();
    let texture = Texture::from_pixels(64, 64, pixels).expect("64x64 texture");
    let mut textured = Engine::textured(texture);
    textured.set_key_state(LogicalKey::TurnLeft, true);
    c.bench_function("textured_frame", |b| {
        b.iter(|| {
            black_box(textured.on_frame());
        })
    });
}

fn bench_rays(c: &mut Criterion) {
    let grid = Grid::demo_level();
    c.bench_function("cast_fixed_step", |b| {
        b.iter(|| cast(black_box([2.5, 2.5]), black_box(1.2), &grid, 50.0, 0.1))
    });
    c.bench_function("cast_exact", |b| {
        b.iter(|| cast_exact(black_box([2.5, 2.5]), black_box(1.2), &grid, 50.0))
    });
}

criterion_group!(benches, bench_frames, bench_rays);
criterion_main!(benches);

//! Benchmarks for Hald LUT grading.
//!
//! Run with: `cargo bench -p hald-bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use hald_core::PixelBuffer;
use hald_lut::{identity_level, sample, HaldStrip, Interpolation, LutCube};
use hald_ops::{transform_cube, transform_with, GradeOptions};

fn film_cube() -> LutCube {
    LutCube::from_fn(|r, g, b| {
        let (r, g, b) = (identity_level(r) as u32, identity_level(g) as u32, identity_level(b) as u32);
        [((r * 3 + g) / 4) as u8, ((g * 2 + b + r) / 4) as u8, (255 - (b + r) / 2) as u8]
    })
}

fn gradient(width: u32, height: u32) -> PixelBuffer {
    let mut img = PixelBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width.max(1)) as u8;
            let g = (y * 255 / height.max(1)) as u8;
            img.set_pixel(x, y, [r, g, r ^ g, 255]);
        }
    }
    img
}

/// Strip validation and full cube decode.
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    let strip = film_cube().to_strip();

    group.bench_function("strip_validate", |b| {
        b.iter(|| HaldStrip::new(black_box(strip.view())).unwrap())
    });
    group.bench_function("cube_decode", |b| {
        b.iter(|| LutCube::decode(black_box(strip.view())).unwrap())
    });

    group.finish();
}

/// Per-pixel cube evaluation.
fn bench_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample");
    let cube = film_cube();
    let colors: Vec<[u8; 3]> = (0..4096u32)
        .map(|i| [(i * 7) as u8, (i * 13) as u8, (i * 31) as u8])
        .collect();
    group.throughput(Throughput::Elements(colors.len() as u64));

    for method in [Interpolation::Floor, Interpolation::PerAxis, Interpolation::Trilinear] {
        group.bench_with_input(BenchmarkId::new("method", format!("{method:?}")), &colors, |b, c| {
            b.iter(|| c.iter().map(|&rgb| sample(&cube, black_box(rgb), method)).collect::<Vec<_>>())
        });
    }

    group.finish();
}

/// Whole-image grading.
fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");
    group.sample_size(20);

    let cube = film_cube();
    let strip = cube.to_strip();
    let serial = GradeOptions::default().with_parallel(false);
    let parallel = GradeOptions::default().with_parallel(true);

    for (w, h) in [(640u32, 480u32), (1920, 1080)] {
        let src = gradient(w, h);
        let label = format!("{w}x{h}");
        group.throughput(Throughput::Elements((w * h) as u64));

        group.bench_with_input(BenchmarkId::new("strip_serial", &label), &src, |b, s| {
            b.iter(|| transform_with(s.view(), strip.view(), black_box(0.6), &serial).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("strip_parallel", &label), &src, |b, s| {
            b.iter(|| transform_with(s.view(), strip.view(), black_box(0.6), &parallel).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("cube_parallel", &label), &src, |b, s| {
            b.iter(|| transform_cube(s.view(), &cube, black_box(0.6), &parallel).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decode, bench_sample, bench_transform);
criterion_main!(benches);

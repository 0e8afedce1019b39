//! Benchmarks for chromat operations.
//!
//! Run with: `cargo bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use chromat_color::bulk::rgb_image_to_lab;
use chromat_color::prelude::*;
use chromat_core::Image;
use chromat_ops::cluster::dominant_colors;
use chromat_ops::{KMeans, NamedRange, morphology, segment};
use chromat_transfer::srgb;

fn gradient(width: u32, height: u32) -> Image<Rgb8> {
    Image::from_fn(width, height, |x, y| {
        Rgb8::new((x * 255 / width) as u8, (y * 255 / height) as u8, ((x + y) % 256) as u8)
    })
}

/// Benchmark sRGB transfer functions.
fn bench_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer");

    for size in [1000, 10000, 100000].iter() {
        let values: Vec<f64> = (0..*size).map(|i| i as f64 / *size as f64).collect();

        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("srgb_eotf", size), &values, |b, v| {
            b.iter(|| v.iter().map(|&x| srgb::eotf(black_box(x))).collect::<Vec<_>>())
        });

        group.bench_with_input(BenchmarkId::new("srgb_oetf", size), &values, |b, v| {
            b.iter(|| v.iter().map(|&x| srgb::oetf(black_box(x))).collect::<Vec<_>>())
        });
    }

    group.finish();
}

/// Benchmark scalar conversion chains.
fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");

    let pixels: Vec<Rgb8> = gradient(100, 100).into_pixels();
    let labs: Vec<Lab> = pixels.iter().map(|&p| rgb_to_lab(p)).collect();
    group.throughput(Throughput::Elements(pixels.len() as u64));

    group.bench_function("rgb_to_lab", |b| {
        b.iter(|| pixels.iter().map(|&p| rgb_to_lab(black_box(p))).collect::<Vec<_>>())
    });

    group.bench_function("lab_to_rgb", |b| {
        b.iter(|| labs.iter().map(|&l| lab_to_rgb(black_box(l))).collect::<Vec<_>>())
    });

    group.bench_function("rgb_to_hsv", |b| {
        b.iter(|| pixels.iter().map(|&p| rgb_to_hsv(black_box(p))).collect::<Vec<_>>())
    });

    let pipeline = Pipeline::rgb_to_lab().from_bytes();
    group.bench_function("pipeline_rgb_to_lab", |b| {
        b.iter(|| {
            pixels
                .iter()
                .map(|p| pipeline.apply(black_box([p.r as f64, p.g as f64, p.b as f64])))
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

/// Benchmark Delta E metrics.
fn bench_delta_e(c: &mut Criterion) {
    let mut group = c.benchmark_group("delta_e");

    let labs: Vec<Lab> = gradient(100, 100).pixels().iter().map(|&p| rgb_to_lab(p)).collect();
    let reference = Lab::new(50.0, 20.0, 30.0);
    group.throughput(Throughput::Elements(labs.len() as u64));

    for metric in DeltaE::ALL {
        group.bench_function(metric.name(), |b| {
            b.iter(|| {
                labs.iter()
                    .map(|&l| metric.compute(black_box(reference), l))
                    .sum::<f64>()
            })
        });
    }

    group.finish();
}

/// Benchmark image-level operations.
fn bench_image(c: &mut Criterion) {
    let mut group = c.benchmark_group("image");

    for &side in [128u32, 512].iter() {
        let img = gradient(side, side);
        group.throughput(Throughput::Elements((side * side) as u64));

        group.bench_with_input(BenchmarkId::new("rgb_image_to_lab", side), &img, |b, img| {
            b.iter(|| rgb_image_to_lab(black_box(img)))
        });

        group.bench_with_input(BenchmarkId::new("segment_red", side), &img, |b, img| {
            b.iter(|| segment::segment(black_box(img), NamedRange::Red))
        });

        let mask = segment::segment(&img, NamedRange::Green);
        group.bench_with_input(BenchmarkId::new("refine_3_7", side), &mask, |b, mask| {
            b.iter(|| morphology::refine(black_box(mask), 3, 7))
        });
    }

    let small = gradient(64, 64);
    group.bench_function("kmeans_8", |b| {
        b.iter(|| dominant_colors(black_box(&small), 8, &KMeans::default()))
    });

    group.finish();
}

criterion_group!(benches, bench_transfer, bench_convert, bench_delta_e, bench_image);

criterion_main!(benches);

//! Criterion benchmarks for Pixel Incubator critical paths
//!
//! Benchmarks the operations that run on every hatch or page load:
//! - Tint: near-white recolor of template sprites
//! - Color: hex parsing
//! - Generator: creature rolls
//! - Store: collection record decode/encode

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::{Rgb, Rgba, RgbaImage};
use pixel_incubator::color::parse_hex_color;
use pixel_incubator::generator::generate;
use pixel_incubator::store::{decode_collection, encode_collection, Collection};
use pixel_incubator::tint::{tint_near_white, tint_rgba_bytes};
use rand::rngs::StdRng;
use rand::SeedableRng;

// =============================================================================
// Test Data Generators
// =============================================================================

/// Grayscale template: light body with a dark outline every 8th pixel
fn make_template(size: u32) -> RgbaImage {
    RgbaImage::from_fn(size, size, |x, y| {
        if x % 8 == 0 || y % 8 == 0 {
            Rgba([40, 40, 40, 255])
        } else {
            Rgba([235, 235, 235, 255])
        }
    })
}

fn make_collection(count: usize) -> Collection {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|i| generate(&mut rng, 1_700_000_000_000 + i as i64 * 60_000))
        .collect::<Vec<_>>()
        .into()
}

// =============================================================================
// Tint Benchmarks
// =============================================================================

fn bench_tint(c: &mut Criterion) {
    let mut group = c.benchmark_group("tint");
    let target = Rgb([0x29, 0xAD, 0xFF]);

    for size in [32u32, 128, 512].iter() {
        let template = make_template(*size);
        group.throughput(Throughput::Elements((*size * *size) as u64));
        group.bench_with_input(BenchmarkId::new("image", size), &template, |b, template| {
            b.iter_batched(
                || template.clone(),
                |mut img| tint_near_white(black_box(&mut img), target),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    let raw = make_template(256).into_raw();
    group.bench_function("bytes_256", |b| {
        b.iter_batched(
            || raw.clone(),
            |mut bytes| tint_rgba_bytes(black_box(&mut bytes), target),
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

// =============================================================================
// Color Benchmarks
// =============================================================================

fn bench_color(c: &mut Criterion) {
    let mut group = c.benchmark_group("color");

    group.bench_function("parse_hex_3", |b| b.iter(|| parse_hex_color(black_box("#F0A"))));
    group.bench_function("parse_hex_6", |b| b.iter(|| parse_hex_color(black_box("#29ADFF"))));

    group.finish();
}

// =============================================================================
// Generator Benchmarks
// =============================================================================

fn bench_generator(c: &mut Criterion) {
    let mut group = c.benchmark_group("generator");
    let mut rng = StdRng::seed_from_u64(7);

    group.bench_function("generate", |b| {
        b.iter(|| generate(black_box(&mut rng), black_box(1_700_000_000_000)))
    });

    group.finish();
}

// =============================================================================
// Store Benchmarks
// =============================================================================

fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");

    for count in [10usize, 100, 1000].iter() {
        let collection = make_collection(*count);
        let raw = encode_collection(&collection).unwrap();

        group.throughput(Throughput::Bytes(raw.len() as u64));
        group.bench_with_input(BenchmarkId::new("decode", count), &raw, |b, raw| {
            b.iter(|| decode_collection(black_box(Some(raw.as_str()))))
        });
        group.bench_with_input(BenchmarkId::new("encode", count), &collection, |b, collection| {
            b.iter(|| encode_collection(black_box(collection)))
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(benches, bench_tint, bench_color, bench_generator, bench_store);

criterion_main!(benches);

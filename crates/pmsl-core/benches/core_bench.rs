//! Criterion benchmarks for pmsl-core primitives
//!
//! Run with: cargo bench -p pmsl-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pmsl_core::{DelayLine, IirFilter, lowpass, two_point_average};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_delay_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("DelayLine");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::new("process", block_size),
            &block_size,
            |b, _| {
                let mut line = DelayLine::with_delay(48000, 1000.5);
                b.iter(|| {
                    for &sample in &input {
                        black_box(line.process(black_box(sample)));
                    }
                });
            },
        );
    }

    group.bench_function("set_delay", |b| {
        let mut line = DelayLine::new(48000);
        b.iter(|| black_box(line.set_delay(black_box(1234.567))));
    });

    group.finish();
}

fn bench_iir(c: &mut Criterion) {
    let mut group = c.benchmark_group("IirFilter");

    let biquad = lowpass(1000.0, 0.707, SAMPLE_RATE);
    let average = two_point_average();
    // Eighth-order all-pole section, stable: (1 - 0.5 z^-1)^8
    let eighth_order: [f32; 9] = [1.0, -4.0, 7.0, -7.0, 4.375, -1.75, 0.4375, -0.0625, 0.00390625];

    let filters: [(&str, IirFilter); 3] = [
        ("average", average.to_filter()),
        ("biquad", biquad.to_filter()),
        ("order8", IirFilter::with_coefficients(&[1.0], &eighth_order)),
    ];

    for (name, filter) in filters {
        for &block_size in BLOCK_SIZES {
            let input = generate_test_signal(block_size);

            group.bench_with_input(BenchmarkId::new(name, block_size), &block_size, |b, _| {
                let mut filter = filter.clone();
                b.iter(|| {
                    for &sample in &input {
                        black_box(filter.process(black_box(sample)));
                    }
                });
            });
        }
    }

    group.bench_function("set_filter", |b| {
        let mut filter = IirFilter::new();
        b.iter(|| filter.set_filter(black_box(&biquad.b), black_box(&biquad.a)));
    });

    group.finish();
}

criterion_group!(benches, bench_delay_line, bench_iir);
criterion_main!(benches);

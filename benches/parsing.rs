use criterion::{Criterion, black_box, criterion_group, criterion_main};
use napkin::{RateUnit, evaluate, format_quantity};

fn benchmark_evaluate(c: &mut Criterion) {
    c.bench_function("evaluate simple arithmetic", |b| {
        b.iter(|| evaluate(black_box("2 + 3 * 4")).unwrap())
    });

    c.bench_function("evaluate magnitude expression", |b| {
        b.iter(|| evaluate(black_box("30 billion * 500 bytes")).unwrap())
    });

    c.bench_function("evaluate rate expression", |b| {
        b.iter(|| evaluate(black_box("(500 million + 20K) / month")).unwrap())
    });
}

fn benchmark_format(c: &mut Criterion) {
    c.bench_function("format byte quantity", |b| {
        b.iter(|| format_quantity(black_box(1.5e13), true, RateUnit::None).unwrap())
    });

    c.bench_function("format count rate", |b| {
        b.iter(|| format_quantity(black_box(192.9), false, RateUnit::PerSecond).unwrap())
    });
}

criterion_group!(benches, benchmark_evaluate, benchmark_format);
criterion_main!(benches);

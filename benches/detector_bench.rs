use criterion::{black_box, criterion_group, criterion_main, Criterion};
use funding_arb::core::{detect, format_report, ExchangeSnapshot};

fn make_snapshot(exchange: &'static str, symbols: usize, offset: usize, skew: f64) -> ExchangeSnapshot {
    let names: Vec<String> = (offset..offset + symbols).map(|i| format!("C{:04}", i)).collect();
    ExchangeSnapshot::from_rates(
        exchange,
        names
            .iter()
            .enumerate()
            .map(|(i, s)| (s.as_str(), ((i % 17) as f64 - 8.0) * 0.00001 * skew)),
    )
}

fn bench_detect_200_symbols(c: &mut Criterion) {
    c.bench_function("detect_200_symbols", |b| {
        let a = make_snapshot("hyperliquid", 200, 0, 1.0);
        let p = make_snapshot("paradex", 200, 50, -1.5);

        b.iter(|| {
            black_box(detect(black_box(&a), black_box(&p), 5));
        });
    });
}

fn bench_detect_disjoint(c: &mut Criterion) {
    c.bench_function("detect_disjoint", |b| {
        let a = make_snapshot("hyperliquid", 200, 0, 1.0);
        let p = make_snapshot("paradex", 200, 1000, 1.0);

        b.iter(|| {
            black_box(detect(black_box(&a), black_box(&p), 5));
        });
    });
}

fn bench_format_report(c: &mut Criterion) {
    c.bench_function("format_report_top5", |b| {
        let a = make_snapshot("hyperliquid", 200, 0, 1.0);
        let p = make_snapshot("paradex", 200, 0, -1.0);
        let report = detect(&a, &p, 5).with_labels("Hyperliquid", "Paradex");
        let now = chrono::Utc::now();

        b.iter(|| {
            black_box(format_report(black_box(&report), &now));
        });
    });
}

criterion_group!(
    benches,
    bench_detect_200_symbols,
    bench_detect_disjoint,
    bench_format_report
);
criterion_main!(benches);

//! Benchmarks for SARIMA fitting and forecasting.

use agri_forecast::core::ObservationSeries;
use agri_forecast::models::{fit, forecast, HyperparameterSet, Order, SeasonalOrder};
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn generate_monthly(n: usize) -> ObservationSeries {
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let values = (0..n)
        .map(|i| {
            let t = i as f64;
            80.0 + 0.4 * t
                + 6.0 * (2.0 * std::f64::consts::PI * t / 12.0).sin()
                + 1.5 * (t * 1.7).sin()
        })
        .collect();
    ObservationSeries::from_start(start, values).unwrap()
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("sarima_fit");

    let orders = [
        ("airline", (0, 1, 1)),
        ("ar1", (1, 1, 0)),
        ("arma21", (2, 1, 1)),
    ];

    for size in [36, 72, 144].iter() {
        let series = generate_monthly(*size);
        for (label, (p, d, q)) in orders {
            let params =
                HyperparameterSet::new(Order::new(p, d, q), SeasonalOrder::monthly(p, d, q))
                    .unwrap();
            group.bench_with_input(BenchmarkId::new(label, size), size, |b, _| {
                b.iter(|| fit(black_box(&series), &params))
            });
        }
    }

    group.finish();
}

fn bench_forecast(c: &mut Criterion) {
    let series = generate_monthly(72);
    let params =
        HyperparameterSet::new(Order::new(0, 1, 1), SeasonalOrder::monthly(0, 1, 1)).unwrap();
    let model = fit(&series, &params).unwrap();

    c.bench_function("forecast_120", |b| {
        b.iter(|| forecast(black_box(&model), 120))
    });
}

criterion_group!(benches, bench_fit, bench_forecast);
criterion_main!(benches);

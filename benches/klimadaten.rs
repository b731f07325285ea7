use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use klimadaten::{
    ClimateStore, Granularity, Location, Metric, Observation, PeriodRangeGenerator, Station,
    StationLocator,
};
use tokio::runtime::Runtime;

fn synthetic_stations(count: i64) -> Vec<Station> {
    (0..count)
        .map(|i| Station {
            id: i,
            valid_from: None,
            valid_to: None,
            location: Location {
                latitude: Some(47.0 + (i % 90) as f64 * 0.06),
                longitude: Some(6.0 + (i / 90) as f64 * 0.25),
                elevation: None,
            },
            name: format!("Station {i}"),
            region: None,
            release: None,
        })
        .collect()
}

fn bench_period_range(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(1950, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2020, 12, 31).unwrap();
    c.bench_function("period_range_daily_70y", |b| {
        b.iter(|| PeriodRangeGenerator::generate(Granularity::Daily, black_box(start), black_box(end)))
    });
    c.bench_function("period_range_monthly_70y", |b| {
        b.iter(|| {
            PeriodRangeGenerator::generate(Granularity::Monthly, black_box(start), black_box(end))
        })
    });
}

fn bench_nearest(c: &mut Criterion) {
    let locator = StationLocator::new(synthetic_stations(1_500));
    c.bench_function("nearest_5_of_1500", |b| {
        b.iter(|| locator.nearest(black_box(53.08), black_box(8.80), 5))
    });
}

fn bench_monthly_chart(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let store = rt.block_on(async {
        let store = ClimateStore::in_memory().await.unwrap();
        store
            .insert_station(&synthetic_stations(1)[0])
            .await
            .unwrap();
        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let observations: Vec<_> = start
            .iter_days()
            .take(365 * 20)
            .enumerate()
            .map(|(i, day)| {
                Observation::new(0, day)
                    .with(Metric::MeanTemperature, (i % 30) as f64 - 5.0)
                    .with(Metric::Precipitation, (i % 7) as f64 * 0.3)
            })
            .collect();
        store.insert_observations(&observations).await.unwrap();
        store
    });
    let aggregator = klimadaten::Aggregator::new(store, Default::default());
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2019, 12, 31).unwrap();

    c.bench_function("monthly_chart_20y", |b| {
        b.to_async(&rt).iter(|| {
            aggregator.aggregate(Metric::MeanTemperature, 0, Granularity::Monthly, start, end)
        })
    });
}

criterion_group!(benches, bench_period_range, bench_nearest, bench_monthly_chart);
criterion_main!(benches);

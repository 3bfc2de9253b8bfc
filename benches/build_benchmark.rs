use chrono::{Days, NaiveDate};
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use indexmap::IndexMap;

use sector_pulse::chart::ChartSpecBuilder;
use sector_pulse::logging;
use sector_pulse::store::{SeriesTable, TimeSeriesStore};

fn synthetic_table(rows: usize, sectors: usize, scale: f64) -> SeriesTable {
    let end = NaiveDate::from_ymd_opt(2024, 3, 4).expect("valid date");
    let dates: Vec<NaiveDate> = (0..rows).map(|i| end - Days::new(i as u64)).collect();

    let mut columns = IndexMap::with_capacity(sectors);
    for sector in 0..sectors {
        let values: Vec<f64> = (0..rows)
            .map(|row| scale * (((row + sector * 13) % 97) as f64 + 1.0))
            .collect();
        columns.insert(format!("S{sector:03}"), values);
    }
    SeriesTable::new(dates, columns).expect("table")
}

fn bench_chart_build(c: &mut Criterion) {
    logging::set_silent(true);

    let rows = 1_500;
    let sectors = 40;
    let store = TimeSeriesStore::new(
        synthetic_table(rows, sectors, 0.01),
        synthetic_table(rows, sectors, 0.01),
        synthetic_table(rows, sectors, 50.0),
    );
    let builder = ChartSpecBuilder::new(&store);

    let mut group = c.benchmark_group("chart_build");
    group.throughput(Throughput::Elements(1));
    group.bench_function("build_sector", |b| {
        b.iter(|| {
            let spec = builder.build("S000").expect("chart");
            assert_eq!(spec.traces.len(), 3);
            spec
        })
    });
    group.finish();
}

criterion_group!(benches, bench_chart_build);
criterion_main!(benches);

use chrono::NaiveDate;
use indexmap::IndexMap;

use sector_pulse::chart::ChartSpecBuilder;
use sector_pulse::error::ChartError;
use sector_pulse::model::SeriesKind;
use sector_pulse::store::{SeriesTable, TimeSeriesStore};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn table(dates: &[NaiveDate], columns: &[(&str, &[f64])]) -> SeriesTable {
    let mut map = IndexMap::new();
    for (sector, values) in columns {
        assert_eq!(values.len(), dates.len(), "test table must be rectangular");
        map.insert(sector.to_string(), values.to_vec());
    }
    SeriesTable::new(dates.to_vec(), map).expect("table")
}

/// `Energy` exists in all three tables; `NoClose` is missing from the
/// closing-price table only.
fn sample_store() -> TimeSeriesStore {
    let valuation = table(
        &[date(2024, 3, 4), date(2024, 3, 3), date(2023, 1, 15)],
        &[
            ("Energy", &[0.42, 0.55, 0.10]),
            ("NoClose", &[0.30, 0.20, 0.40]),
        ],
    );
    let percentile = table(
        &[date(2024, 3, 4), date(2024, 3, 1)],
        &[("Energy", &[0.61, 0.70]), ("NoClose", &[0.10, 0.15])],
    );
    let closing = table(
        &[date(2024, 3, 4), date(2024, 3, 2), date(2022, 6, 1)],
        &[("Energy", &[3400.0, 3250.0, 9000.0])],
    );
    TimeSeriesStore::new(valuation, percentile, closing)
}

#[test]
fn full_build_has_three_traces_and_three_shapes() {
    let store = sample_store();
    let spec = ChartSpecBuilder::new(&store)
        .build("Energy")
        .expect("chart");

    assert_eq!(spec.traces.len(), 3);
    assert_eq!(spec.layout.shapes.len(), 3);

    // Emission order: valuation, percentile, closing; only closing sits on
    // the secondary axis.
    assert_eq!(spec.traces[0].name, "Energy (Price)");
    assert_eq!(spec.traces[1].name, "Energy (Price-Volume Percentile)");
    assert_eq!(spec.traces[2].name, "Energy Close (right axis)");
    assert_eq!(spec.traces[0].yaxis, None);
    assert_eq!(spec.traces[1].yaxis, None);
    assert_eq!(spec.traces[2].yaxis, Some("y2"));

    // Traces carry each series' full history, not just the window.
    assert_eq!(spec.traces[0].x.len(), 3);
    assert_eq!(spec.traces[1].x.len(), 2);
    assert_eq!(spec.traces[2].y, vec![3400.0, 3250.0, 9000.0]);
}

#[test]
fn default_window_anchors_to_the_valuation_series() {
    let store = sample_store();
    let spec = ChartSpecBuilder::new(&store)
        .build("Energy")
        .expect("chart");

    let xaxis = spec.layout.xaxis.expect("x axis");
    assert_eq!(xaxis.range, [date(2023, 3, 5), date(2024, 3, 4)]);
    assert!(!xaxis.autorange);
    assert!(xaxis.rangeslider.visible);
}

#[test]
fn secondary_axis_ranges_over_the_windowed_closing_prices() {
    let store = sample_store();
    let spec = ChartSpecBuilder::new(&store)
        .build("Energy")
        .expect("chart");

    let primary = spec.layout.yaxis.expect("primary axis");
    assert_eq!(primary.range, [0.0, 1.0]);
    assert_eq!(primary.tickformat, ".0%");

    // The 9000.0 row from 2022 sits outside the window and must not widen
    // the range: [3250 - 100, 3400 + 100].
    let secondary = spec.layout.yaxis2.expect("secondary axis");
    assert_eq!(secondary.range, [3150.0, 3500.0]);
    assert!(secondary.range[1] - secondary.range[0] >= 200.0);
}

#[test]
fn reference_lines_take_prior_observations_across_the_price_span() {
    let store = sample_store();
    let spec = ChartSpecBuilder::new(&store)
        .build("Energy")
        .expect("chart");

    let shapes = &spec.layout.shapes;
    let values: Vec<f64> = shapes.iter().map(|shape| shape.y0).collect();
    assert_eq!(values, vec![0.55, 0.70, 3250.0], "ordinal 1, never 0");

    for shape in shapes {
        assert_eq!(shape.y0, shape.y1, "markers are horizontal");
        assert_eq!(shape.x0, date(2023, 1, 15));
        assert_eq!(shape.x1, date(2024, 3, 4));
        assert_eq!(shape.line.dash, Some("dash"));
    }
}

#[test]
fn sector_without_closing_prices_yields_the_empty_spec() {
    let store = sample_store();
    let spec = ChartSpecBuilder::new(&store)
        .build("NoClose")
        .expect("empty chart");

    assert!(spec.is_empty());
    assert!(spec.traces.is_empty());
    assert!(spec.layout.shapes.is_empty());
    assert!(spec.layout.xaxis.is_none());
    assert!(spec.layout.yaxis2.is_none());
}

#[test]
fn unknown_sector_everywhere_also_yields_the_empty_spec() {
    let store = sample_store();
    let spec = ChartSpecBuilder::new(&store)
        .build("Aerospace")
        .expect("empty chart");
    assert!(spec.is_empty());
}

#[test]
fn missing_valuation_column_aborts_the_build() {
    let valuation = table(&[date(2024, 3, 4), date(2024, 3, 3)], &[("Energy", &[0.4, 0.5])]);
    let percentile = table(&[date(2024, 3, 4), date(2024, 3, 3)], &[("Energy", &[0.6, 0.7])]);
    let closing = table(
        &[date(2024, 3, 4), date(2024, 3, 3)],
        &[("Energy", &[3000.0, 3100.0]), ("Lonely", &[10.0, 11.0])],
    );
    let store = TimeSeriesStore::new(valuation, percentile, closing);

    let err = ChartSpecBuilder::new(&store)
        .build("Lonely")
        .expect_err("valuation column is required");
    assert_eq!(
        err,
        ChartError::SectorNotFound {
            kind: SeriesKind::ValuationPrice,
            sector: "Lonely".to_string(),
        }
    );
}

#[test]
fn single_row_series_aborts_the_build() {
    let valuation = table(&[date(2024, 3, 4), date(2024, 3, 3)], &[("Energy", &[0.4, 0.5])]);
    let percentile = table(&[date(2024, 3, 4)], &[("Energy", &[0.6])]);
    let closing = table(
        &[date(2024, 3, 4), date(2024, 3, 3)],
        &[("Energy", &[3000.0, 3100.0])],
    );
    let store = TimeSeriesStore::new(valuation, percentile, closing);

    let err = ChartSpecBuilder::new(&store)
        .build("Energy")
        .expect_err("one percentile row cannot seed a reference line");
    assert_eq!(
        err,
        ChartError::InsufficientData {
            kind: SeriesKind::PriceVolumePercentile,
            sector: "Energy".to_string(),
            rows: 1,
        }
    );
}

#[test]
fn stale_closing_prices_fall_back_to_the_full_series_range() {
    let valuation = table(&[date(2024, 3, 4), date(2024, 3, 3)], &[("Energy", &[0.4, 0.5])]);
    let percentile = table(&[date(2024, 3, 4), date(2024, 3, 3)], &[("Energy", &[0.6, 0.7])]);
    // Newest closing row predates the default window entirely.
    let closing = table(
        &[date(2020, 5, 1), date(2020, 4, 1)],
        &[("Energy", &[2000.0, 1500.0])],
    );
    let store = TimeSeriesStore::new(valuation, percentile, closing);

    let spec = ChartSpecBuilder::new(&store)
        .build("Energy")
        .expect("chart with fallback range");
    let secondary = spec.layout.yaxis2.expect("secondary axis");
    assert_eq!(secondary.range, [1400.0, 2100.0]);
}

#[test]
fn builds_are_idempotent_over_unchanged_data() {
    let store = sample_store();
    let builder = ChartSpecBuilder::new(&store);

    let first = builder.build("Energy").expect("chart");
    let second = builder.build("Energy").expect("chart");
    assert_eq!(first, second);

    let first_json = serde_json::to_string(&first).expect("serialise");
    let second_json = serde_json::to_string(&second).expect("serialise");
    assert_eq!(first_json, second_json);
}

#[test]
fn custom_axis_pad_widens_the_secondary_range() {
    let store = sample_store();
    let spec = ChartSpecBuilder::new(&store)
        .axis_pad(250.0)
        .build("Energy")
        .expect("chart");

    let secondary = spec.layout.yaxis2.expect("secondary axis");
    assert_eq!(secondary.range, [3000.0, 3650.0]);
}

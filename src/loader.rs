use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde_json::json;

use crate::logging;
use crate::model::SeriesKind;
use crate::store::{SeriesTable, TimeSeriesStore};

/// Reads the three series tables from `dir` into an immutable store. This is
/// the only place table files are touched; requests never re-read them.
pub fn load_dir(dir: &Path) -> Result<TimeSeriesStore> {
    let valuation = read_table(&dir.join(SeriesKind::ValuationPrice.file_name()))?;
    let percentile = read_table(&dir.join(SeriesKind::PriceVolumePercentile.file_name()))?;
    let closing = read_table(&dir.join(SeriesKind::ClosingPrice.file_name()))?;

    logging::info(
        "store.loaded",
        "Series tables loaded",
        json!({
            "dir": dir.display().to_string(),
            "rows": {
                "valuation_price": valuation.row_count(),
                "price_volume_percentile": percentile.row_count(),
                "closing_price": closing.row_count(),
            },
            "sectors": valuation.sector_count(),
        }),
    );

    Ok(TimeSeriesStore::new(valuation, percentile, closing))
}

/// One CSV table: first column is the date, every other header names a
/// sector. Ordering is normalised by `SeriesTable::new`, not trusted here.
pub fn read_table(path: &Path) -> Result<SeriesTable> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open series table at {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("failed to read header row of {}", path.display()))?
        .clone();
    if headers.len() < 2 {
        bail!("table at {} has no sector columns", path.display());
    }
    let sectors: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

    let mut dates = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); sectors.len()];
    for (row, record) in reader.records().enumerate() {
        let line = row + 2;
        let record =
            record.with_context(|| format!("failed to read line {line} of {}", path.display()))?;
        if record.len() != headers.len() {
            bail!(
                "line {line} of {} has {} cells, expected {}",
                path.display(),
                record.len(),
                headers.len()
            );
        }

        let date = NaiveDate::parse_from_str(record[0].trim(), "%Y-%m-%d").with_context(|| {
            format!(
                "line {line} of {}: `{}` is not a YYYY-MM-DD date",
                path.display(),
                &record[0]
            )
        })?;
        dates.push(date);

        for (column, cell) in record.iter().skip(1).enumerate() {
            let value: f64 = cell.trim().parse().with_context(|| {
                format!(
                    "line {line} of {}: `{cell}` in column `{}` is not a number",
                    path.display(),
                    sectors[column]
                )
            })?;
            columns[column].push(value);
        }
    }

    let mut table = IndexMap::with_capacity(sectors.len());
    for (sector, values) in sectors.into_iter().zip(columns) {
        if table.insert(sector.clone(), values).is_some() {
            bail!(
                "duplicate sector column `{sector}` in table at {}",
                path.display()
            );
        }
    }

    SeriesTable::new(dates, table)
        .with_context(|| format!("invalid series table at {}", path.display()))
}

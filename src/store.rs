use anyhow::{bail, Result};
use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::error::ChartError;
use crate::model::{SeriesKind, Window};

/// One rectangular series table: a shared date index plus one value column
/// per sector. The index is kept most-recent-first; every positional lookup
/// downstream depends on that invariant.
pub struct SeriesTable {
    dates: Vec<NaiveDate>,
    columns: IndexMap<String, Vec<f64>>,
}

impl SeriesTable {
    /// Rows may arrive in any order; they are normalised to descending date
    /// order here, at the boundary, rather than trusting the source.
    pub fn new(dates: Vec<NaiveDate>, columns: IndexMap<String, Vec<f64>>) -> Result<Self> {
        for (sector, values) in &columns {
            if values.len() != dates.len() {
                bail!(
                    "column `{sector}` has {} values for {} dates",
                    values.len(),
                    dates.len()
                );
            }
        }

        let mut order: Vec<usize> = (0..dates.len()).collect();
        order.sort_by(|&a, &b| dates[b].cmp(&dates[a]));

        let sorted_dates: Vec<NaiveDate> = order.iter().map(|&i| dates[i]).collect();
        if let Some(pair) = sorted_dates.windows(2).find(|pair| pair[0] == pair[1]) {
            bail!("duplicate date {} in series table", pair[0]);
        }

        let mut sorted_columns = IndexMap::with_capacity(columns.len());
        for (sector, values) in columns {
            let permuted: Vec<f64> = order.iter().map(|&i| values[i]).collect();
            sorted_columns.insert(sector, permuted);
        }

        Ok(Self {
            dates: sorted_dates,
            columns: sorted_columns,
        })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn sectors(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn sector_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.dates.len()
    }

    /// Most recent date in the shared index, position 0 by the descending
    /// invariant.
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn series(&self, sector: &str) -> Option<SectorSeries<'_>> {
        self.columns.get(sector).map(|values| SectorSeries {
            dates: &self.dates,
            values,
        })
    }
}

/// Borrowed view of one sector's column zipped with the table's date index,
/// most-recent-first.
#[derive(Debug, Clone, Copy)]
pub struct SectorSeries<'a> {
    dates: &'a [NaiveDate],
    values: &'a [f64],
}

impl<'a> SectorSeries<'a> {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &'a [NaiveDate] {
        self.dates
    }

    pub fn values(&self) -> &'a [f64] {
        self.values
    }

    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn value_at(&self, position: usize) -> Option<f64> {
        self.values.get(position).copied()
    }

    /// Full (oldest, newest) date span of the series.
    pub fn full_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.dates.last(), self.dates.first()) {
            (Some(oldest), Some(newest)) => Some((*oldest, *newest)),
            _ => None,
        }
    }

    /// Restrict to `[window.start, window.end]`, inclusive on both ends.
    pub fn window_slice(&self, window: &Window) -> SectorSeries<'a> {
        let from = self.dates.partition_point(|d| *d > window.end);
        let to = self.dates.partition_point(|d| *d >= window.start);
        SectorSeries {
            dates: &self.dates[from..to],
            values: &self.values[from..to],
        }
    }

    pub fn value_extent(&self) -> Option<(f64, f64)> {
        if self.values.is_empty() {
            return None;
        }
        let min = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self
            .values
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}

/// The three loaded series tables, keyed by kind. Built once at startup and
/// shared read-only; no re-reads happen per request.
pub struct TimeSeriesStore {
    tables: [SeriesTable; 3],
}

impl TimeSeriesStore {
    pub fn new(valuation: SeriesTable, percentile: SeriesTable, closing: SeriesTable) -> Self {
        Self {
            tables: [valuation, percentile, closing],
        }
    }

    pub fn table(&self, kind: SeriesKind) -> &SeriesTable {
        &self.tables[kind.index()]
    }

    pub fn series(&self, kind: SeriesKind, sector: &str) -> Result<SectorSeries<'_>, ChartError> {
        self.table(kind)
            .series(sector)
            .ok_or_else(|| ChartError::SectorNotFound {
                kind,
                sector: sector.to_string(),
            })
    }

    pub fn latest_date(&self, kind: SeriesKind) -> Option<NaiveDate> {
        self.table(kind).latest_date()
    }

    /// Chartable sector names in table column order. The valuation-price
    /// table drives the tab list.
    pub fn sectors(&self) -> impl Iterator<Item = &str> {
        self.table(SeriesKind::ValuationPrice).sectors()
    }
}

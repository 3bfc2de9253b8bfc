use thiserror::Error;

use crate::model::SeriesKind;

/// Failures a chart build can hit. The builder is all-or-nothing: apart from
/// the explicit empty-chart path for a sector missing from the closing-price
/// table, any of these aborts the build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("sector `{sector}` not present in the {kind} table")]
    SectorNotFound { kind: SeriesKind, sector: String },

    #[error("{kind} series for `{sector}` has {rows} row(s); a reference line needs at least 2")]
    InsufficientData {
        kind: SeriesKind,
        sector: String,
        rows: usize,
    },

    #[error("{kind} series for `{sector}` has no observations")]
    EmptyWindow { kind: SeriesKind, sector: String },
}

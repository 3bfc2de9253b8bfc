use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_WINDOW_DAYS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    ValuationPrice,
    PriceVolumePercentile,
    ClosingPrice,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 3] = [
        SeriesKind::ValuationPrice,
        SeriesKind::PriceVolumePercentile,
        SeriesKind::ClosingPrice,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            SeriesKind::ValuationPrice => "valuation_price.csv",
            SeriesKind::PriceVolumePercentile => "price_volume_percentile.csv",
            SeriesKind::ClosingPrice => "closing_price.csv",
        }
    }

    pub fn index(self) -> usize {
        match self {
            SeriesKind::ValuationPrice => 0,
            SeriesKind::PriceVolumePercentile => 1,
            SeriesKind::ClosingPrice => 2,
        }
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SeriesKind::ValuationPrice => "valuation price",
            SeriesKind::PriceVolumePercentile => "price-volume percentile",
            SeriesKind::ClosingPrice => "closing price",
        };
        f.write_str(label)
    }
}

/// One selectable entity in the navigation shell. `Overview` renders the
/// static fallback image; everything else routes into the chart builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Tab {
    Overview,
    Sector { name: String },
}

pub const OVERVIEW_SLUG: &str = "overview";

impl Tab {
    pub fn from_slug(slug: &str) -> Tab {
        if slug == OVERVIEW_SLUG {
            Tab::Overview
        } else {
            Tab::Sector {
                name: slug.to_string(),
            }
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            Tab::Overview => OVERVIEW_SLUG,
            Tab::Sector { name } => name,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::Overview => f.write_str("Overview"),
            Tab::Sector { name } => f.write_str(name),
        }
    }
}

/// Default visible span of the chart, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Window {
    /// One calendar year ending at `end`. Plain date subtraction, no
    /// trading-day awareness.
    pub fn year_ending_at(end: NaiveDate) -> Window {
        Window {
            start: end - Days::new(DEFAULT_WINDOW_DAYS),
            end,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

/// The prior observation of one series, drawn as a dashed horizontal marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceLine {
    pub kind: SeriesKind,
    pub value: f64,
}

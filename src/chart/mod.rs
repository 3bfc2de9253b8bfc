pub mod spec;

use crate::constants::{
    CLOSING_TRACE_COLOR, CLOSING_TRACE_WIDTH, PERCENTILE_TRACE_COLOR, PERCENTILE_TRACE_WIDTH,
    REFERENCE_LINE_COLOR, REFERENCE_LINE_DASH, REFERENCE_LINE_WIDTH, SECONDARY_AXIS_PAD,
    VALUATION_TRACE_COLOR, VALUATION_TRACE_WIDTH,
};
use crate::error::ChartError;
use crate::model::{AxisRange, ReferenceLine, SeriesKind, Window};
use crate::store::{SectorSeries, TimeSeriesStore};

use spec::{
    ChartSpec, Layout, Legend, LegendFont, LineStyle, PrimaryAxis, RangeSlider, SecondaryAxis,
    Shape, Trace, XAxis,
};

/// Secondary-axis range over the windowed slice, padded on both sides. A
/// window with no observations falls back to the whole series; only a series
/// with no rows at all cannot be ranged.
pub fn secondary_axis_range(
    kind: SeriesKind,
    sector: &str,
    series: &SectorSeries<'_>,
    window: &Window,
    pad: f64,
) -> Result<AxisRange, ChartError> {
    let slice = series.window_slice(window);
    let extent = if slice.is_empty() {
        series.value_extent()
    } else {
        slice.value_extent()
    };
    let (min, max) = extent.ok_or_else(|| ChartError::EmptyWindow {
        kind,
        sector: sector.to_string(),
    })?;
    Ok(AxisRange {
        min: min - pad,
        max: max + pad,
    })
}

/// The prior observation: ordinal position 1 under the most-recent-first
/// invariant, never position 0.
pub fn reference_line(
    kind: SeriesKind,
    sector: &str,
    series: &SectorSeries<'_>,
) -> Result<ReferenceLine, ChartError> {
    let value = series
        .value_at(1)
        .ok_or_else(|| ChartError::InsufficientData {
            kind,
            sector: sector.to_string(),
            rows: series.len(),
        })?;
    Ok(ReferenceLine { kind, value })
}

/// Assembles the complete figure for one sector from the loaded store.
pub struct ChartSpecBuilder<'a> {
    store: &'a TimeSeriesStore,
    axis_pad: f64,
}

impl<'a> ChartSpecBuilder<'a> {
    pub fn new(store: &'a TimeSeriesStore) -> Self {
        Self {
            store,
            axis_pad: SECONDARY_AXIS_PAD,
        }
    }

    pub fn axis_pad(mut self, pad: f64) -> Self {
        self.axis_pad = pad;
        self
    }

    /// Full figure for `sector`, or the explicit empty figure when the sector
    /// has no closing-price column. Any other missing or thin series aborts
    /// the build; a chart with fewer than all three series would mislead.
    pub fn build(&self, sector: &str) -> Result<ChartSpec, ChartError> {
        let closing = match self.store.series(SeriesKind::ClosingPrice, sector) {
            Ok(series) => series,
            Err(ChartError::SectorNotFound { .. }) => return Ok(ChartSpec::empty()),
            Err(err) => return Err(err),
        };
        let valuation = self.store.series(SeriesKind::ValuationPrice, sector)?;
        let percentile = self.store.series(SeriesKind::PriceVolumePercentile, sector)?;

        // Emission order fixes both the legend order and the z-order the
        // renderer draws: closing price last, on top.
        let traces = vec![
            Trace {
                x: valuation.dates().to_vec(),
                y: valuation.values().to_vec(),
                name: format!("{sector} (Price)"),
                line: LineStyle {
                    color: VALUATION_TRACE_COLOR,
                    width: VALUATION_TRACE_WIDTH,
                    dash: None,
                },
                yaxis: None,
            },
            Trace {
                x: percentile.dates().to_vec(),
                y: percentile.values().to_vec(),
                name: format!("{sector} (Price-Volume Percentile)"),
                line: LineStyle {
                    color: PERCENTILE_TRACE_COLOR,
                    width: PERCENTILE_TRACE_WIDTH,
                    dash: None,
                },
                yaxis: None,
            },
            Trace {
                x: closing.dates().to_vec(),
                y: closing.values().to_vec(),
                name: format!("{sector} Close (right axis)"),
                line: LineStyle {
                    color: CLOSING_TRACE_COLOR,
                    width: CLOSING_TRACE_WIDTH,
                    dash: None,
                },
                yaxis: Some("y2"),
            },
        ];

        // The valuation-price series is canonical for "now": the default
        // window anchors to its newest date even though the closing-price
        // series drives the secondary axis.
        let anchor = valuation
            .latest_date()
            .ok_or_else(|| ChartError::EmptyWindow {
                kind: SeriesKind::ValuationPrice,
                sector: sector.to_string(),
            })?;
        let window = Window::year_ending_at(anchor);

        let axis = secondary_axis_range(
            SeriesKind::ClosingPrice,
            sector,
            &closing,
            &window,
            self.axis_pad,
        )?;

        // All three markers span the valuation-price timeline edge to edge,
        // whichever series their value came from, so they stay visible under
        // any pan or zoom.
        let (span_start, span_end) = valuation
            .full_range()
            .expect("non-empty series after anchor check");
        let sources = [
            (SeriesKind::ValuationPrice, &valuation),
            (SeriesKind::PriceVolumePercentile, &percentile),
            (SeriesKind::ClosingPrice, &closing),
        ];
        let mut shapes = Vec::with_capacity(sources.len());
        for (kind, series) in sources {
            let marker = reference_line(kind, sector, series)?;
            shapes.push(Shape {
                shape_type: "line",
                x0: span_start,
                y0: marker.value,
                x1: span_end,
                y1: marker.value,
                line: LineStyle {
                    color: REFERENCE_LINE_COLOR,
                    width: REFERENCE_LINE_WIDTH,
                    dash: Some(REFERENCE_LINE_DASH),
                },
            });
        }

        let layout = Layout {
            title: Some(format!("{sector} Trend")),
            xaxis: Some(XAxis {
                title: "Date",
                rangeslider: RangeSlider { visible: true },
                range: [window.start, window.end],
                autorange: false,
            }),
            yaxis: Some(PrimaryAxis {
                title: "Percentile",
                tickformat: ".0%",
                range: [0.0, 1.0],
                fixedrange: false,
                showline: true,
                linewidth: 1,
            }),
            yaxis2: Some(SecondaryAxis {
                title: "Close",
                overlaying: "y",
                side: "right",
                range: [axis.min, axis.max],
                showline: true,
                linewidth: 1,
            }),
            hovermode: Some("x unified"),
            legend: Some(Legend {
                orientation: "h",
                yanchor: "bottom",
                y: 1.02,
                xanchor: "center",
                x: 0.5,
                font: LegendFont { weight: "bold" },
            }),
            template: Some("plotly_white"),
            shapes,
        };

        Ok(ChartSpec { traces, layout })
    }
}

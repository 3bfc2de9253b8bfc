use chrono::NaiveDate;
use serde::Serialize;

/// Complete figure for one sector, shaped so the page can hand it straight to
/// the plot renderer: `data` holds the traces, `layout` the axes, legend, and
/// reference-line shapes. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "data")]
    pub traces: Vec<Trace>,
    pub layout: Layout,
}

impl ChartSpec {
    /// The sentinel for a sector with no closing-price column: no traces, no
    /// shapes, no computed axes. Renders as a visibly empty chart.
    pub fn empty() -> ChartSpec {
        ChartSpec {
            traces: Vec::new(),
            layout: Layout::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub x: Vec<NaiveDate>,
    pub y: Vec<f64>,
    pub name: String,
    pub line: LineStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: &'static str,
    pub width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<&'static str>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<XAxis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<PrimaryAxis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis2: Option<SecondaryAxis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovermode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<Shape>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XAxis {
    pub title: &'static str,
    pub rangeslider: RangeSlider,
    pub range: [NaiveDate; 2],
    pub autorange: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSlider {
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimaryAxis {
    pub title: &'static str,
    pub tickformat: &'static str,
    pub range: [f64; 2],
    pub fixedrange: bool,
    pub showline: bool,
    pub linewidth: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecondaryAxis {
    pub title: &'static str,
    pub overlaying: &'static str,
    pub side: &'static str,
    pub range: [f64; 2],
    pub showline: bool,
    pub linewidth: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub orientation: &'static str,
    pub yanchor: &'static str,
    pub y: f64,
    pub xanchor: &'static str,
    pub x: f64,
    pub font: LegendFont,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendFont {
    pub weight: &'static str,
}

/// Dashed horizontal marker at a series' prior observation, spanning the
/// valuation-price timeline edge to edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub shape_type: &'static str,
    pub x0: NaiveDate,
    pub y0: f64,
    pub x1: NaiveDate,
    pub y1: f64,
    pub line: LineStyle,
}

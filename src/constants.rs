pub const DEFAULT_WINDOW_DAYS: u64 = 365;

// Additive pad on the secondary (closing price) axis. Tied to the typical
// magnitude of index-level closing prices, not normalized.
pub const SECONDARY_AXIS_PAD: f64 = 100.0;

pub const SERVER_BIND_ADDR: &str = "127.0.0.1:8050";

pub const VALUATION_TRACE_COLOR: &str = "#CFBD9B";
pub const VALUATION_TRACE_WIDTH: f64 = 2.25;
pub const PERCENTILE_TRACE_COLOR: &str = "#C8C8C8";
pub const PERCENTILE_TRACE_WIDTH: f64 = 1.0;
pub const CLOSING_TRACE_COLOR: &str = "#C0504D";
pub const CLOSING_TRACE_WIDTH: f64 = 3.0;

pub const REFERENCE_LINE_COLOR: &str = "black";
pub const REFERENCE_LINE_WIDTH: f64 = 2.25;
pub const REFERENCE_LINE_DASH: &str = "dash";

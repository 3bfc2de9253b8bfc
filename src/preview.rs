use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use textplots::{Chart, Plot, Shape};

use crate::loader;
use crate::model::SeriesKind;

#[derive(Debug, Args, Clone)]
pub struct PreviewArgs {
    /// Sector column to plot
    #[arg(short, long)]
    pub sector: String,

    /// Directory holding the three series tables
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Chart width in characters
    #[arg(long, default_value_t = 120)]
    pub width: u32,

    /// Chart height in characters
    #[arg(long, default_value_t = 30)]
    pub height: u32,
}

pub fn run(args: PreviewArgs) -> Result<()> {
    let store = loader::load_dir(&args.data_dir)?;
    let series = store.series(SeriesKind::ClosingPrice, &args.sector)?;

    if series.len() < 2 {
        bail!(
            "not enough closing-price rows for `{}` to render a chart",
            args.sector
        );
    }

    let oldest = series
        .full_range()
        .map(|(oldest, _)| oldest)
        .expect("non-empty series after row check");

    // Stored newest-first; plot oldest-to-newest.
    let samples: Vec<(f32, f32)> = series
        .dates()
        .iter()
        .zip(series.values())
        .rev()
        .map(|(date, value)| ((*date - oldest).num_days() as f32, *value as f32))
        .collect();

    let (min_price, max_price) = series.value_extent().expect("non-empty series");
    println!(
        "Rendering closing price for {} ({} samples)",
        args.sector,
        series.len()
    );
    println!("Price range: {:.4} → {:.4}", min_price, max_price);

    let span_days = samples.last().map(|(x, _)| *x).unwrap_or(1.0).max(1.0);
    Chart::new(args.width.max(40), args.height.max(10), 0.0, span_days)
        .lineplot(&Shape::Lines(&samples))
        .display();
    println!();
    Ok(())
}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate, Utc};
use clap::Args;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde_json::json;

use crate::logging;
use crate::model::SeriesKind;

pub const DEMO_SECTORS: [&str; 10] = [
    "Technology",
    "Financials",
    "Industrials",
    "Healthcare",
    "Consumer Discretionary",
    "Consumer Staples",
    "Energy",
    "Utilities",
    "Materials",
    "Real Estate",
];

#[derive(Debug, Args, Clone)]
pub struct SeedArgs {
    /// Directory to write the three series tables into
    #[arg(long, default_value = "data")]
    pub out_dir: PathBuf,

    /// Number of daily rows to generate
    #[arg(long, default_value_t = 730)]
    pub days: usize,

    /// RNG seed, fixed for reproducible tables
    #[arg(long, default_value_t = 0xBADF00D)]
    pub seed: u64,
}

pub fn run(args: SeedArgs) -> Result<()> {
    let end = Utc::now().date_naive();
    write_tables(&args.out_dir, end, args.days, args.seed)?;
    logging::info(
        "seed.done",
        "Demo series tables written",
        json!({
            "out_dir": args.out_dir.display().to_string(),
            "days": args.days,
            "sectors": DEMO_SECTORS.len(),
        }),
    );
    Ok(())
}

/// Writes the three tables with a shared date index ending at `end`,
/// newest-first like real source tables.
pub fn write_tables(dir: &Path, end: NaiveDate, days: usize, seed: u64) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let mut rng = StdRng::seed_from_u64(seed);
    let dates: Vec<NaiveDate> = (0..days)
        .map(|offset| end - Days::new(offset as u64))
        .collect();

    let valuation: Vec<(&str, Vec<f64>)> = DEMO_SECTORS
        .iter()
        .map(|sector| (*sector, percentile_walk(&mut rng, days)))
        .collect();
    let percentile: Vec<(&str, Vec<f64>)> = DEMO_SECTORS
        .iter()
        .map(|sector| (*sector, percentile_walk(&mut rng, days)))
        .collect();
    let closing: Vec<(&str, Vec<f64>)> = DEMO_SECTORS
        .iter()
        .map(|sector| (*sector, price_walk(&mut rng, days)))
        .collect();

    write_table(
        &dir.join(SeriesKind::ValuationPrice.file_name()),
        &dates,
        &valuation,
    )?;
    write_table(
        &dir.join(SeriesKind::PriceVolumePercentile.file_name()),
        &dates,
        &percentile,
    )?;
    write_table(
        &dir.join(SeriesKind::ClosingPrice.file_name()),
        &dates,
        &closing,
    )?;
    Ok(())
}

/// Index-level closing prices as a multiplicative random walk.
fn price_walk(rng: &mut StdRng, days: usize) -> Vec<f64> {
    let mut values = Vec::with_capacity(days);
    let mut price: f64 = rng.gen_range(2_000.0..6_000.0);
    for _ in 0..days {
        values.push(price);
        let step: f64 = rng.sample(StandardNormal);
        price = (price * (1.0 + step * 0.01)).max(1.0);
    }
    values.reverse(); // newest first, matching the date index
    values
}

/// Percentile-style indicator clamped to [0, 1].
fn percentile_walk(rng: &mut StdRng, days: usize) -> Vec<f64> {
    let mut values = Vec::with_capacity(days);
    let mut level: f64 = rng.gen_range(0.2..0.8);
    for _ in 0..days {
        values.push(level);
        let step: f64 = rng.sample(StandardNormal);
        level = (level + step * 0.03).clamp(0.0, 1.0);
    }
    values.reverse();
    values
}

fn write_table(path: &Path, dates: &[NaiveDate], columns: &[(&str, Vec<f64>)]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create table at {}", path.display()))?;

    let mut header = vec!["date".to_string()];
    header.extend(columns.iter().map(|(sector, _)| sector.to_string()));
    writer.write_record(&header)?;

    for (row, date) in dates.iter().enumerate() {
        let mut record = vec![date.format("%Y-%m-%d").to_string()];
        for (_, values) in columns {
            record.push(format!("{:.4}", values[row]));
        }
        writer.write_record(&record)?;
    }

    writer
        .flush()
        .with_context(|| format!("failed to flush table at {}", path.display()))?;
    Ok(())
}

//! Plots how many slots a lookup examines as a table fills and grows.
//!
//! Random hex keys are inserted one at a time. Every `--step` inserts the average and worst
//! probe length over all stored keys is recorded, and both series are drawn against the number
//! of keys inserted. Each growth halves the load factor, so the curves form a sawtooth.

#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info};
use plotters::prelude::*;
use rand::Rng;
use strtable::Table;

/// Command line configuration
#[derive(Debug, Clone, Parser)]
#[clap(about, version)]
struct Config {
    /// Number of keys to insert
    #[clap(long, default_value = "20000")]
    keys: usize,

    /// Inserts between samples
    #[clap(long, default_value = "250")]
    step: usize,

    /// Image to write
    #[clap(long, default_value = "probe_lengths.png")]
    output: PathBuf,

    /// Log filter, in `env_logger` syntax
    #[clap(long, default_value = "warn")]
    log_level: String,
}

/// Probe lengths observed after a number of inserts
#[derive(Debug, Clone, Copy)]
struct Sample {
    /// Keys inserted so far
    keys: usize,
    /// Slot count at the time of the sample
    capacity: usize,
    /// Mean probe length over all stored keys
    average: f64,
    /// Longest probe length over all stored keys
    worst: usize,
}

/// Measures the probe length of every key in `table`
fn measure(table: &Table<u64>) -> Sample {
    let lengths: Vec<usize> =
        table.iter().filter_map(|(key, _)| table.probe_length(key)).collect();
    let total: usize = lengths.iter().sum();
    let average = if lengths.is_empty() { 0.0 } else { total as f64 / lengths.len() as f64 };

    Sample {
        keys: table.len(),
        capacity: table.capacity(),
        average,
        worst: lengths.iter().copied().max().unwrap_or(0),
    }
}

/// Fills a table with `keys` random keys, sampling every `step` inserts
fn collect_samples(keys: usize, step: usize) -> strtable::Result<Vec<Sample>> {
    let mut rng = rand::rng();
    let mut table = Table::try_new()?;
    let mut samples = Vec::new();

    while table.len() < keys {
        let value: u64 = rng.random();
        let before = table.len();
        table.set(&format!("{value:016x}"), value)?;
        if table.len() > before && table.len() % step.max(1) == 0 {
            let sample = measure(&table);
            debug!("{sample:?}");
            samples.push(sample);
        }
    }

    Ok(samples)
}

/// Draws the average and worst probe length series
fn plot(samples: &[Sample], config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    // Plot configuration
    let font_family = "sans-serif";
    let line_width = 2;
    let text_size = 16;
    let title_size = 35;

    let root = BitMapBackend::new(&config.output, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_worst = samples.iter().map(|sample| sample.worst).max().unwrap_or(1) as f64 * 1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption("Linear Probing Cost While Growing", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..config.keys, 0.0..max_worst)?;

    chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc("Probe Length (slots)")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    let average_style = ShapeStyle::from(&RGBColor(50, 90, 220)).stroke_width(line_width);
    chart
        .draw_series(LineSeries::new(
            samples.iter().map(|sample| (sample.keys, sample.average)),
            average_style,
        ))?
        .label("Average")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], average_style));

    let worst_style = ShapeStyle::from(&RGBColor(220, 50, 50)).stroke_width(line_width);
    chart
        .draw_series(LineSeries::new(
            samples.iter().map(|sample| (sample.keys, sample.worst as f64)),
            worst_style,
        ))?
        .label("Worst")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], worst_style));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    env_logger::Builder::new().parse_filters(&config.log_level).init();
    debug!("{config:?}");

    let samples = collect_samples(config.keys, config.step)?;
    if let Some(last) = samples.last() {
        info!(
            "{} keys in {} slots: average probe {:.2}, worst {}",
            last.keys, last.capacity, last.average, last.worst
        );
    }

    plot(&samples, &config)?;
    println!("Generated plot image: {}", config.output.display());

    Ok(())
}

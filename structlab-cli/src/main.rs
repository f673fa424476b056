//! structlab CLI — scan bar files for market-structure events.
//!
//! Commands:
//! - `scan` — read OHLC bars from CSV, run the detection engine, print one
//!   JSON object per event to stdout
//! - `demo` — run the engine over a seeded synthetic random walk and print
//!   a summary

mod atr;

use anyhow::{Context, Result};
use chrono::DateTime;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use structlab_core::synthetic::random_walk;
use structlab_core::{
    Bar, BreakLabel, EngineConfig, Hierarchy, StepOutput, StructureEngine, StructureEvent,
};

use crate::atr::WilderAtr;

#[derive(Parser)]
#[command(
    name = "structlab",
    about = "structlab CLI — incremental market-structure detection"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a CSV bar file and print structure events as JSON lines.
    Scan {
        /// CSV file with header `time,open,high,low,close` (time in unix seconds).
        file: PathBuf,

        /// Engine config as a TOML file. Defaults to built-in settings.
        #[arg(long)]
        config: Option<PathBuf>,

        /// ATR smoothing period for the equal-level tolerance.
        #[arg(long, default_value_t = 200)]
        atr_period: usize,

        /// Also print newly created order blocks.
        #[arg(long, default_value_t = false)]
        order_blocks: bool,
    },
    /// Run the engine over a seeded synthetic series and print a summary.
    Demo {
        /// Number of bars to generate.
        #[arg(long, default_value_t = 500)]
        bars: usize,

        /// RNG seed for the synthetic walk.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Engine config as a TOML file. Defaults to built-in settings.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            file,
            config,
            atr_period,
            order_blocks,
        } => run_scan(&file, config.as_deref(), atr_period, order_blocks),
        Commands::Demo { bars, seed, config } => run_demo(bars, seed, config.as_deref()),
    }
}

#[derive(Debug, Deserialize)]
struct BarRecord {
    time: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        None => Ok(EngineConfig::default()),
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let config: EngineConfig = toml::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?;
            Ok(config)
        }
    }
}

fn load_bars(path: &Path) -> Result<Vec<Bar>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening bar file {}", path.display()))?;
    let mut bars = Vec::new();
    for (index, record) in reader.deserialize().enumerate() {
        let record: BarRecord =
            record.with_context(|| format!("bar file {}: row {index}", path.display()))?;
        bars.push(Bar {
            index,
            time: record.time,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
        });
    }
    Ok(bars)
}

fn run_scan(file: &Path, config: Option<&Path>, atr_period: usize, order_blocks: bool) -> Result<()> {
    let config = load_config(config)?;
    let bars = load_bars(file)?;
    let mut engine = StructureEngine::new(config)?;
    let mut atr = WilderAtr::new(atr_period);

    for bar in &bars {
        let atr_value = atr.update(bar.high, bar.low, bar.close);
        let out = engine
            .process_bar(bar, atr_value)
            .with_context(|| format!("processing bar {}", bar.index))?;

        for event in &out.events {
            println!("{}", serde_json::to_string(event)?);
        }
        if order_blocks {
            for block in &out.order_blocks {
                println!("{}", serde_json::to_string(block)?);
            }
        }
    }

    Ok(())
}

fn run_demo(bars: usize, seed: u64, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let series = random_walk(seed, bars);
    let mut engine = StructureEngine::new(config)?;
    let mut atr = WilderAtr::new(200);

    let mut outputs: Vec<StepOutput> = Vec::with_capacity(series.len());
    for bar in &series {
        let atr_value = atr.update(bar.high, bar.low, bar.close);
        outputs.push(engine.process_bar(bar, atr_value)?);
    }

    print_demo_summary(seed, &series, &outputs, &engine);
    Ok(())
}

fn print_demo_summary(seed: u64, series: &[Bar], outputs: &[StepOutput], engine: &StructureEngine) {
    let mut bos = [0usize; 2]; // [swing, internal]
    let mut choch = [0usize; 2];
    let mut equal = 0usize;
    let mut swing_points = 0usize;
    let mut blocks = 0usize;

    for out in outputs {
        for event in &out.events {
            match event {
                StructureEvent::Break {
                    hierarchy, label, ..
                } => {
                    let slot = match hierarchy {
                        Hierarchy::Swing => 0,
                        Hierarchy::Internal => 1,
                    };
                    match label {
                        BreakLabel::Bos => bos[slot] += 1,
                        BreakLabel::Choch => choch[slot] += 1,
                    }
                }
                StructureEvent::EqualLevel { .. } => equal += 1,
                StructureEvent::SwingPoint { .. } => swing_points += 1,
            }
        }
        blocks += out.order_blocks.len();
    }

    println!("=== Demo Run ===");
    println!("Seed:            {seed}");
    println!("Bars:            {}", series.len());
    if let (Some(first), Some(last)) = (series.first(), series.last()) {
        println!(
            "Period:          {} to {}",
            format_time(first.time),
            format_time(last.time)
        );
    }
    println!();
    println!("--- Structure ---");
    println!("Swing BOS:       {}", bos[0]);
    println!("Swing CHoCH:     {}", choch[0]);
    println!("Internal BOS:    {}", bos[1]);
    println!("Internal CHoCH:  {}", choch[1]);
    println!("Swing points:    {swing_points}");
    println!("Equal levels:    {equal}");
    println!("Order blocks:    {blocks}");
    println!();
    println!("--- Final State ---");
    println!("Swing bias:      {:?}", engine.trend(Hierarchy::Swing).bias);
    println!(
        "Internal bias:   {:?}",
        engine.trend(Hierarchy::Internal).bias
    );
    if swing_points > 0 {
        let trailing = engine.trailing();
        println!(
            "Trailing range:  {:.2} to {:.2}",
            trailing.bottom, trailing.top
        );
    }
}

fn format_time(time: i64) -> String {
    match DateTime::from_timestamp(time, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => time.to_string(),
    }
}

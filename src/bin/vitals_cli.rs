// ABOUTME: Vitals CLI - computes tiered metric context or a quarterly aggregate from JSON files
// ABOUTME: Offline inspection tool; results are printed as JSON on stdout, logs go to stderr
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Tiered history of every metric in the file
//! vitals-cli context --input samples.json
//!
//! # Same with a shorter daily tier
//! vitals-cli context --input samples.json --daily-days 14
//!
//! # Quarterly aggregate including sleep
//! vitals-cli quarterly --input samples.json --sleep sleep.json --year 2024 --quarter 3
//! ```

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;
use vitals_engine::config::EngineConfig;
use vitals_engine::input::{load_samples, load_sleep_intervals};
use vitals_engine::vitals_core::constants::service_names;
use vitals_engine::vitals_core::models::Quarter;
use vitals_engine::vitals_intelligence::{
    MetricContextBuilder, QuarterlyAggregateBuilder, SleepSessionReducer,
};

#[derive(Parser)]
#[command(
    name = "vitals-cli",
    about = "Vitals health-metric aggregation CLI",
    long_about = "Computes tiered metric context or quarterly statistics from JSON sample files."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Tiered daily/weekly/monthly history per metric
    Context {
        /// JSON map of metric identifier to raw samples
        #[arg(long)]
        input: PathBuf,
        /// Days kept at daily resolution
        #[arg(long)]
        daily_days: Option<usize>,
        /// Days reduced to weekly resolution
        #[arg(long)]
        weekly_days: Option<usize>,
        /// Days reduced to monthly resolution
        #[arg(long)]
        monthly_days: Option<usize>,
    },
    /// Quarterly statistics snapshot
    Quarterly {
        /// JSON map of metric identifier to raw samples
        #[arg(long)]
        input: PathBuf,
        /// JSON array of sleep interval records
        #[arg(long)]
        sleep: Option<PathBuf>,
        /// Calendar year
        #[arg(long)]
        year: i32,
        /// Quarter number, 1-4
        #[arg(long)]
        quarter: u8,
        /// Source label recorded in the aggregate
        #[arg(long, default_value = "vitals-cli")]
        data_source: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = EngineConfig::from_env_unvalidated();
    if let Command::Context {
        daily_days,
        weekly_days,
        monthly_days,
        ..
    } = &cli.command
    {
        let tiers = &mut config.tiers;
        tiers.daily_days = daily_days.unwrap_or(tiers.daily_days);
        tiers.weekly_days = weekly_days.unwrap_or(tiers.weekly_days);
        tiers.monthly_days = monthly_days.unwrap_or(tiers.monthly_days);
    }
    config.validate()?;

    let mut logging = config.logging.with_service_name(service_names::VITALS_CLI);
    if cli.verbose {
        "debug".clone_into(&mut logging.level);
    }
    logging.init()?;

    match cli.command {
        Command::Context { input, .. } => {
            let samples = load_samples(&input).await?;
            let context = MetricContextBuilder::build(&samples, &config.tiers);
            info!(metrics = context.len(), "Built metric context");
            println!("{}", serde_json::to_string_pretty(&context)?);
        }
        Command::Quarterly {
            input,
            sleep,
            year,
            quarter,
            data_source,
        } => {
            let quarter = Quarter::new(year, quarter)?;
            let samples = load_samples(&input).await?;
            let sessions = match sleep {
                Some(path) => SleepSessionReducer::reduce(&load_sleep_intervals(&path).await?),
                None => Vec::new(),
            };

            let aggregate = QuarterlyAggregateBuilder::build(
                quarter,
                &samples,
                &sessions,
                &data_source,
                Utc::now(),
            )?;
            println!("{}", serde_json::to_string_pretty(&aggregate)?);
        }
    }

    Ok(())
}

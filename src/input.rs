// ABOUTME: Reads JSON sample and sleep-interval files for offline aggregation runs
// ABOUTME: Samples are normalized on load so malformed entries never reach the engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::path::Path;

use tokio::fs;
use tracing::debug;
use vitals_core::models::{normalize_samples, MetricSample, RawMetricSample, SleepIntervalRecord};
use vitals_core::{AppError, AppResult};

/// Load `{ "<metric identifier>": [raw samples, ...], ... }` and normalize every sample
///
/// # Errors
///
/// Returns `InvalidInput` when the file cannot be read and `SerializationError`
/// when it is not a map of sample arrays
pub async fn load_samples(path: &Path) -> AppResult<BTreeMap<String, Vec<MetricSample>>> {
    let bytes = read(path).await?;
    let raw: BTreeMap<String, Vec<RawMetricSample>> = serde_json::from_slice(&bytes)?;

    let samples: BTreeMap<String, Vec<MetricSample>> = raw
        .iter()
        .map(|(identifier, raw_samples)| (identifier.clone(), normalize_samples(raw_samples)))
        .collect();

    debug!(
        path = %path.display(),
        metrics = samples.len(),
        samples = samples.values().map(Vec::len).sum::<usize>(),
        "Loaded sample file"
    );
    Ok(samples)
}

/// Load a JSON array of sleep interval records
///
/// # Errors
///
/// Returns `InvalidInput` when the file cannot be read and `SerializationError`
/// when it is not an array of intervals
pub async fn load_sleep_intervals(path: &Path) -> AppResult<Vec<SleepIntervalRecord>> {
    let bytes = read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

async fn read(path: &Path) -> AppResult<Vec<u8>> {
    fs::read(path).await.map_err(|e| {
        AppError::invalid_input(format!("Cannot read {}", path.display())).with_source(e)
    })
}

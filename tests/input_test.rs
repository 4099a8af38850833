// ABOUTME: Tests for loading JSON sample and sleep-interval files
// ABOUTME: Malformed samples are dropped on load; unreadable or invalid files are reported
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used)]

use std::fs;

use anyhow::Result;
use tempfile::TempDir;
use vitals_core::constants::metrics::{HEART_RATE, STEP_COUNT};
use vitals_core::models::SleepStage;
use vitals_core::ErrorCode;
use vitals_engine::input::{load_samples, load_sleep_intervals};

#[tokio::test]
async fn test_samples_are_normalized_on_load() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("samples.json");
    fs::write(
        &path,
        format!(
            r#"{{
                "{STEP_COUNT}": [
                    {{"timestamp": "2024-05-01T08:00:00Z", "value": 1200, "unit": "count"}},
                    {{"timestamp": "2024-05-01", "value": "300"}},
                    {{"timestamp": "garbage", "value": 5}}
                ],
                "{HEART_RATE}": [
                    {{"timestamp": "2024-05-01T08:00:00+02:00", "value": 61.5, "unit": "count/min",
                      "metadata": {{"device": "watch"}}}}
                ]
            }}"#
        ),
    )?;

    let samples = load_samples(&path).await?;

    assert_eq!(samples[STEP_COUNT].len(), 2);
    let heart_rate = &samples[HEART_RATE][0];
    assert_eq!(heart_rate.timestamp.to_rfc3339(), "2024-05-01T06:00:00+00:00");
    assert_eq!(heart_rate.metadata["device"], "watch");
    Ok(())
}

#[tokio::test]
async fn test_sleep_intervals_load() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("sleep.json");
    fs::write(
        &path,
        r#"[
            {"start": "2024-05-01T23:00:00Z", "end": "2024-05-02T06:00:00Z", "stage": "inBed"},
            {"start": "2024-05-01T23:10:00Z", "end": "2024-05-02T05:50:00Z", "stage": "deep"}
        ]"#,
    )?;

    let intervals = load_sleep_intervals(&path).await?;

    assert_eq!(intervals.len(), 2);
    assert_eq!(intervals[0].stage, SleepStage::InBed);
    assert_eq!(intervals[1].stage, SleepStage::Deep);
    Ok(())
}

#[tokio::test]
async fn test_missing_file_is_invalid_input() {
    let dir = TempDir::new().unwrap();

    let error = load_samples(&dir.path().join("absent.json")).await.unwrap_err();

    assert_eq!(error.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_wrong_shape_is_serialization_error() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("samples.json");
    fs::write(&path, r#"[{"timestamp": "2024-01-01", "value": 1}]"#)?;

    let error = load_samples(&path).await.unwrap_err();

    assert_eq!(error.code, ErrorCode::SerializationError);
    Ok(())
}

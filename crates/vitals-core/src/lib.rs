// ABOUTME: Core types and constants for the vitals health-metric aggregation engine
// ABOUTME: Foundation crate with error handling, metric classification, models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Vitals Core
//!
//! Foundation crate providing shared types and constants for the vitals
//! aggregation engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode` and `AppResult`
//! - **constants**: Classification table, tier defaults, quarterly and storage constants
//! - **classification**: Cumulative vs status partition of metric identifiers
//! - **models**: Samples, daily values, aggregated periods, quarters and quarterly aggregates

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Fixed partition of metric identifiers into cumulative and status metrics
pub mod classification;

/// Core data models (samples, periods, quarters, quarterly aggregates)
pub mod models;

pub use classification::{is_cumulative, metric_name, HealthMetric, MetricKind};
pub use errors::{AppError, AppResult, ErrorCode};

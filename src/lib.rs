// ABOUTME: Main library entry point for the vitals health-metric aggregation engine
// ABOUTME: Wires the core models and aggregation crates to storage, configuration and logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Vitals Engine
//!
//! Turns irregular, high-volume health readings into two products:
//!
//! - a tiered, bounded-size history per metric (recent days at daily
//!   resolution, older ones as weekly and monthly averages) for AI context
//!   windows;
//! - immutable quarterly statistical snapshots persisted through an
//!   encrypted object storage collaborator.
//!
//! The pure aggregation algorithms live in `vitals-intelligence`, the data
//! model and error types in `vitals-core`. This crate adds the storage
//! contract, the quarterly aggregate store, configuration and logging.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::collections::BTreeMap;
//! use vitals_engine::vitals_intelligence::{MetricContextBuilder, TierConfig};
//!
//! let samples = BTreeMap::new();
//! let context = MetricContextBuilder::build(&samples, &TierConfig::default());
//! assert!(context.is_empty());
//! ```

/// Environment-based configuration
pub mod config;

/// JSON sample and sleep-interval file loading
pub mod input;

/// Structured logging setup
pub mod logging;

/// Quarterly aggregate persistence
pub mod quarterly_store;

/// Encrypted object storage contract and in-memory backend
pub mod storage;

/// Core models, classification, constants and errors
pub use vitals_core;

/// Aggregation algorithms
pub use vitals_intelligence;

pub use vitals_core::{AppError, AppResult, ErrorCode};

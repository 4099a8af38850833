// ABOUTME: Builds the tiered, bounded-size history of every metric for an AI context window
// ABOUTME: Runs daily bucketing and tier selection per metric, in parallel across metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::debug;
use vitals_core::models::{normalize_samples, AggregatedPeriod, MetricSample, RawMetricSample};
use vitals_core::MetricKind;

use crate::daily_bucketizer::DailyBucketizer;
use crate::tiered_selector::{TierConfig, TieredResolutionSelector};

/// Metric identifier to its tiered history
pub type MetricContext = BTreeMap<String, Vec<AggregatedPeriod>>;

/// Metric context builder
pub struct MetricContextBuilder;

impl MetricContextBuilder {
    /// Tiered history of one metric
    #[must_use]
    pub fn for_metric(
        identifier: &str,
        samples: &[MetricSample],
        config: &TierConfig,
    ) -> Vec<AggregatedPeriod> {
        let kind = MetricKind::classify(identifier);
        let daily = DailyBucketizer::bucketize(samples, kind);
        TieredResolutionSelector::select(&daily, config, kind)
    }

    /// Tiered history of every metric; metrics without valid samples are omitted
    #[must_use]
    pub fn build(
        samples_by_metric: &BTreeMap<String, Vec<MetricSample>>,
        config: &TierConfig,
    ) -> MetricContext {
        let context: MetricContext = samples_by_metric
            .par_iter()
            .map(|(identifier, samples)| {
                (
                    identifier.clone(),
                    Self::for_metric(identifier, samples, config),
                )
            })
            .filter(|(_, entries)| !entries.is_empty())
            .collect();

        debug!(
            metrics_in = samples_by_metric.len(),
            metrics_out = context.len(),
            entries = context.values().map(Vec::len).sum::<usize>(),
            "Built tiered metric context"
        );

        context
    }

    /// Normalize raw ingested samples, then build the context
    #[must_use]
    pub fn build_raw(
        raw_by_metric: &BTreeMap<String, Vec<RawMetricSample>>,
        config: &TierConfig,
    ) -> MetricContext {
        let samples: BTreeMap<String, Vec<MetricSample>> = raw_by_metric
            .iter()
            .map(|(identifier, raw)| (identifier.clone(), normalize_samples(raw)))
            .collect();
        Self::build(&samples, config)
    }
}

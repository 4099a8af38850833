// ABOUTME: Health metric identifiers and the fixed cumulative-metric table
// ABOUTME: Drives sum-vs-average semantics for every daily reduction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Step count
pub const STEP_COUNT: &str = "HKQuantityTypeIdentifierStepCount";
/// Active energy burned
pub const ACTIVE_ENERGY_BURNED: &str = "HKQuantityTypeIdentifierActiveEnergyBurned";
/// Exercise time
pub const APPLE_EXERCISE_TIME: &str = "HKQuantityTypeIdentifierAppleExerciseTime";
/// Walking and running distance
pub const DISTANCE_WALKING_RUNNING: &str = "HKQuantityTypeIdentifierDistanceWalkingRunning";
/// Flights of stairs climbed
pub const FLIGHTS_CLIMBED: &str = "HKQuantityTypeIdentifierFlightsClimbed";

/// Heart rate
pub const HEART_RATE: &str = "HKQuantityTypeIdentifierHeartRate";
/// Resting heart rate
pub const RESTING_HEART_RATE: &str = "HKQuantityTypeIdentifierRestingHeartRate";
/// Heart-rate variability (SDNN)
pub const HEART_RATE_VARIABILITY_SDNN: &str = "HKQuantityTypeIdentifierHeartRateVariabilitySDNN";
/// Respiratory rate
pub const RESPIRATORY_RATE: &str = "HKQuantityTypeIdentifierRespiratoryRate";

/// Metrics whose readings within a day are summed. Every other identifier is
/// a status metric and is averaged.
pub const CUMULATIVE_METRICS: [&str; 5] = [
    STEP_COUNT,
    ACTIVE_ENERGY_BURNED,
    APPLE_EXERCISE_TIME,
    DISTANCE_WALKING_RUNNING,
    FLIGHTS_CLIMBED,
];

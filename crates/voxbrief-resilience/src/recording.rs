// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generation counters, recorded through the metrics facade.

use metrics::describe_counter;

/// Register descriptions for the generation counters.
pub fn register_metrics() {
    describe_counter!(
        "voxbrief_generation_attempts_total",
        "Backend calls made, by model and tier"
    );
    describe_counter!(
        "voxbrief_generation_failures_total",
        "Failed backend calls, by model and retryability"
    );
    describe_counter!(
        "voxbrief_generation_exhausted_total",
        "Requests that failed on every tier"
    );
}

pub fn record_attempt(model: &str, tier: &'static str) {
    metrics::counter!(
        "voxbrief_generation_attempts_total",
        "model" => model.to_string(),
        "tier" => tier
    )
    .increment(1);
}

pub fn record_failure(model: &str, retryable: bool) {
    metrics::counter!(
        "voxbrief_generation_failures_total",
        "model" => model.to_string(),
        "retryable" => if retryable { "true" } else { "false" }
    )
    .increment(1);
}

pub fn record_exhausted() {
    metrics::counter!("voxbrief_generation_exhausted_total").increment(1);
}

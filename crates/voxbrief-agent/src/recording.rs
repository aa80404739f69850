// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatch and job counters, recorded through the metrics facade.

use metrics::describe_counter;

pub fn register_metrics() {
    describe_counter!("voxbrief_jobs_total", "Jobs started, by kind");
    describe_counter!(
        "voxbrief_fetch_failures_total",
        "Failed update fetches"
    );
}

pub fn record_job(kind: &'static str) {
    metrics::counter!("voxbrief_jobs_total", "kind" => kind).increment(1);
}

pub fn record_fetch_failure() {
    metrics::counter!("voxbrief_fetch_failures_total").increment(1);
}

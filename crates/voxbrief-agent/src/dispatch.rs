// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The long-poll driver that fans updates out into jobs.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{Instrument, debug, info, info_span, warn};
use voxbrief_config::model::DispatchConfig;
use voxbrief_core::{Transport, Update};

use crate::cursor::ResumeCursor;
use crate::pipeline::JobRunner;
use crate::recording;

// Bound on the wait for cancelled jobs to unwind after the grace period.
const CANCEL_UNWIND: Duration = Duration::from_secs(5);

/// Polls the transport and spawns one job per update.
///
/// The cursor is advanced before each job is spawned, so a slow or failed job
/// never causes its update to be fetched again.
pub struct DispatchLoop {
    transport: Arc<dyn Transport>,
    runner: Arc<JobRunner>,
    cursor: ResumeCursor,
    fetch_backoff: Duration,
    shutdown_grace: Duration,
    permits: Arc<Semaphore>,
    tracker: TaskTracker,
    job_cancel: CancellationToken,
}

impl DispatchLoop {
    pub fn new(transport: Arc<dyn Transport>, runner: Arc<JobRunner>, config: &DispatchConfig) -> Self {
        Self {
            transport,
            runner,
            cursor: ResumeCursor::default(),
            fetch_backoff: config.fetch_backoff(),
            shutdown_grace: config.shutdown_grace(),
            permits: Arc::new(Semaphore::new(config.max_concurrent_jobs.max(1))),
            tracker: TaskTracker::new(),
            job_cancel: CancellationToken::new(),
        }
    }

    /// Polls until `cancel` fires, then drains in-flight jobs.
    ///
    /// Fetch failures are retried forever with the same cursor after
    /// `fetch_backoff`. Returns the final cursor.
    pub async fn run(mut self, cancel: CancellationToken) -> i64 {
        info!(cursor = self.cursor.value(), "dispatch loop started");

        loop {
            let fetched = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                fetched = self.transport.fetch_updates(self.cursor.value()) => fetched,
            };

            match fetched {
                Ok(updates) => {
                    if !updates.is_empty() {
                        debug!(count = updates.len(), cursor = self.cursor.value(), "fetched updates");
                    }
                    for update in updates {
                        self.cursor.observe(update.id);
                        self.spawn_job(update);
                    }
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        cursor = self.cursor.value(),
                        backoff = ?self.fetch_backoff,
                        "failed to fetch updates, backing off"
                    );
                    recording::record_fetch_failure();
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => break,
                        _ = tokio::time::sleep(self.fetch_backoff) => {}
                    }
                }
            }
        }

        info!(in_flight = self.tracker.len(), "dispatch loop stopping, draining jobs");
        self.drain().await;
        info!(cursor = self.cursor.value(), "dispatch loop stopped");
        self.cursor.value()
    }

    fn spawn_job(&self, update: Update) {
        let runner = Arc::clone(&self.runner);
        let permits = Arc::clone(&self.permits);
        let cancel = self.job_cancel.clone();
        let span = info_span!("job", update_id = update.id);

        self.tracker.spawn(
            async move {
                // Admission happens here so polling never waits on busy jobs.
                let Ok(_permit) = permits.acquire_owned().await else {
                    return;
                };
                runner.handle_update(update, &cancel).await;
            }
            .instrument(span),
        );
    }

    async fn drain(&self) {
        self.tracker.close();
        if tokio::time::timeout(self.shutdown_grace, self.tracker.wait())
            .await
            .is_ok()
        {
            info!("all jobs finished");
            return;
        }

        warn!(
            remaining = self.tracker.len(),
            grace = ?self.shutdown_grace,
            "shutdown grace expired, cancelling remaining jobs"
        );
        self.job_cancel.cancel();
        if tokio::time::timeout(CANCEL_UNWIND, self.tracker.wait())
            .await
            .is_err()
        {
            warn!(remaining = self.tracker.len(), "abandoning jobs that did not stop");
        }
    }
}

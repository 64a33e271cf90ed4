//! Poll orchestrator.
//!
//! Owns the loop: fetch → normalize → classify → detect → notify +
//! persist → sleep. Also owns the only shared mutable state, the
//! current snapshot, which the shutdown flush path reads without
//! mutation. The snapshot slot is only ever replaced as a whole value,
//! so the flush path never observes a torn snapshot.

pub mod report;

use std::sync::{Arc, RwLock};
use std::time::Duration;

use anyhow::Result;
use chrono::{Local, NaiveDate, Utc};
use rand::Rng;
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::config::PollConfig;
use crate::core::Snapshot;
use crate::feed::FeedSource;
use crate::notify::Notifier;
use crate::pipeline::{adjust_phase_times, cycle_changed, partition_and_sort, tag_events};
use crate::store::SnapshotStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Buckets changed: notified, persisted, snapshot replaced.
    Changed,
    /// Nothing differed; no notification, no persistence.
    Unchanged,
    /// Fetch failed; cycle skipped, retry after the fixed delay.
    FetchFailed,
}

pub struct AlphaMonitor<F, N> {
    feed: F,
    notifier: N,
    store: SnapshotStore,
    poll: PollConfig,
    snapshot: Arc<RwLock<Snapshot>>,
}

impl<F: FeedSource, N: Notifier> AlphaMonitor<F, N> {
    pub fn new(feed: F, notifier: N, store: SnapshotStore, poll: PollConfig) -> Self {
        Self {
            feed,
            notifier,
            store,
            poll,
            snapshot: Arc::new(RwLock::new(Snapshot::empty())),
        }
    }

    /// Seeds the in-memory snapshot from disk so a restart does not
    /// re-announce events already seen.
    pub fn restore(&self, today: NaiveDate) {
        let loaded = self.store.load(today);
        *self.snapshot.write().unwrap() = loaded;
    }

    pub fn current_snapshot(&self) -> Snapshot {
        self.snapshot.read().unwrap().clone()
    }

    /// One full poll cycle against an explicit current date.
    pub async fn run_cycle(&self, today: NaiveDate) -> CycleOutcome {
        let raw = match self.feed.fetch_events().await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Feed fetch failed, skipping cycle");
                return CycleOutcome::FetchFailed;
            }
        };

        let normalized = adjust_phase_times(raw);
        let (today_bucket, forecast_bucket) = partition_and_sort(normalized, today);
        let previous = self.current_snapshot();

        if !cycle_changed(&previous, &today_bucket, &forecast_bucket) {
            info!("No airdrop schedule changes");
            return CycleOutcome::Unchanged;
        }

        info!(
            today = today_bucket.len(),
            forecast = forecast_bucket.len(),
            "Airdrop schedule changed"
        );

        if !today_bucket.is_empty() || !forecast_bucket.is_empty() {
            let message = report::render_report(
                &tag_events(&previous.today, &today_bucket),
                &tag_events(&previous.forecast, &forecast_bucket),
            );
            info!("{}", message);
            self.notifier.deliver(&message).await;
        }

        let next = Snapshot {
            today: today_bucket,
            forecast: forecast_bucket,
            last_update: Some(Utc::now().to_rfc3339()),
        };
        if let Err(e) = self.store.save(&next) {
            warn!(error = %e, "Snapshot save failed, continuing with in-memory state");
        }
        // The single point where the shared snapshot is replaced.
        *self.snapshot.write().unwrap() = next;

        CycleOutcome::Changed
    }

    /// Persists whatever snapshot is currently held in memory.
    /// Best-effort: a failure here is logged, never escalated.
    pub fn flush(&self) {
        let snapshot = self.current_snapshot();
        match self.store.save(&snapshot) {
            Ok(()) => info!("Snapshot flushed on shutdown"),
            Err(e) => warn!(error = %e, "Snapshot flush failed on shutdown"),
        }
    }

    fn sleep_duration(&self, outcome: CycleOutcome) -> Duration {
        match outcome {
            CycleOutcome::FetchFailed => Duration::from_secs(self.poll.retry_delay_secs),
            _ => {
                // An inverted range from a bad config still sleeps.
                let min = self.poll.min_interval_secs;
                let max = self.poll.max_interval_secs.max(min);
                Duration::from_secs(rand::thread_rng().gen_range(min..=max))
            }
        }
    }

    /// The poll loop. A shutdown message interrupts the sleep (or
    /// takes effect after the in-flight cycle completes), flushes the
    /// current snapshot and returns.
    pub async fn run(&self, mut shutdown: broadcast::Receiver<()>) -> Result<()> {
        self.restore(Local::now().date_naive());
        info!(
            state_file = %self.store.path().display(),
            "Airdrop monitor started"
        );

        loop {
            let outcome = self.run_cycle(Local::now().date_naive()).await;
            let delay = self.sleep_duration(outcome);

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = shutdown.recv() => {
                    info!("Shutdown requested, flushing snapshot");
                    self.flush();
                    return Ok(());
                }
            }
        }
    }
}

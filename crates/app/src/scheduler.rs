//! Trigger scheduler — coalesces bursts of location changes into spaced
//! evaluation passes.
//!
//! Requests go into a bounded queue. When the queue is full the request is
//! dropped: a pass that is already pending will observe the newer state
//! anyway. A single worker takes one request, runs the pass, and then waits
//! a fixed minimum delay before taking the next one.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Default number of pending evaluation requests.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1;

/// Default pause between two passes.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(100);

/// Scheduler tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub queue_capacity: usize,
    pub min_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            min_interval: DEFAULT_MIN_INTERVAL,
        }
    }
}

/// Result of asking for an evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The request was queued for the worker.
    Queued,
    /// The queue was full; an already pending pass will cover this change.
    Coalesced,
    /// The worker has stopped.
    Stopped,
}

/// Handle used to request evaluation passes. Cloning shares the same worker.
#[derive(Debug, Clone)]
pub struct TriggerScheduler {
    requests: mpsc::Sender<()>,
}

impl TriggerScheduler {
    /// Spawn the evaluation worker running `pass` for each accepted request.
    ///
    /// The worker stops once every handle has been dropped. A zero queue
    /// capacity is raised to one.
    pub fn spawn<F>(config: SchedulerConfig, mut pass: F) -> (Self, JoinHandle<()>)
    where
        F: FnMut() + Send + 'static,
    {
        let (requests, mut rx) = mpsc::channel::<()>(config.queue_capacity.max(1));
        let min_interval = config.min_interval;

        let worker = tokio::spawn(async move {
            let mut passes: u64 = 0;
            while rx.recv().await.is_some() {
                passes += 1;
                tracing::debug!(pass = passes, "running evaluation pass");
                pass();
                tokio::time::sleep(min_interval).await;
            }
            tracing::debug!(passes, "evaluation worker stopped");
        });

        (Self { requests }, worker)
    }

    /// Ask for an evaluation pass without blocking.
    pub fn request(&self) -> RequestOutcome {
        match self.requests.try_send(()) {
            Ok(()) => RequestOutcome::Queued,
            Err(mpsc::error::TrySendError::Full(())) => {
                tracing::debug!("evaluation already pending, request coalesced");
                RequestOutcome::Coalesced
            }
            Err(mpsc::error::TrySendError::Closed(())) => {
                tracing::warn!("evaluation worker stopped, request dropped");
                RequestOutcome::Stopped
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_scheduler(
        config: SchedulerConfig,
    ) -> (TriggerScheduler, JoinHandle<()>, Arc<AtomicUsize>) {
        let passes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&passes);
        let (scheduler, worker) = TriggerScheduler::spawn(config, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (scheduler, worker, passes)
    }

    #[tokio::test(start_paused = true)]
    async fn should_coalesce_burst_into_few_passes() {
        let (scheduler, worker, passes) = counting_scheduler(SchedulerConfig::default());

        let outcomes: Vec<RequestOutcome> = (0..20).map(|_| scheduler.request()).collect();
        assert_eq!(outcomes[0], RequestOutcome::Queued);
        assert!(outcomes.contains(&RequestOutcome::Coalesced));

        tokio::time::sleep(Duration::from_secs(1)).await;
        drop(scheduler);
        worker.await.unwrap();

        let count = passes.load(Ordering::SeqCst);
        assert!((1..=3).contains(&count), "unexpected pass count {count}");
    }

    #[tokio::test(start_paused = true)]
    async fn should_run_one_pass_per_spaced_request() {
        let (scheduler, worker, passes) = counting_scheduler(SchedulerConfig::default());

        for _ in 0..3 {
            assert_eq!(scheduler.request(), RequestOutcome::Queued);
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
        drop(scheduler);
        worker.await.unwrap();

        assert_eq!(passes.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn should_wait_minimum_interval_between_passes() {
        let config = SchedulerConfig {
            queue_capacity: 1,
            min_interval: Duration::from_millis(100),
        };
        let (scheduler, worker, passes) = counting_scheduler(config);

        scheduler.request();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(passes.load(Ordering::SeqCst), 1);

        assert_eq!(scheduler.request(), RequestOutcome::Queued);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(passes.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(passes.load(Ordering::SeqCst), 2);

        drop(scheduler);
        worker.await.unwrap();
    }

    #[tokio::test]
    async fn should_report_stopped_when_worker_is_gone() {
        let (scheduler, worker, _passes) = counting_scheduler(SchedulerConfig::default());
        worker.abort();
        let _ = worker.await;
        assert_eq!(scheduler.request(), RequestOutcome::Stopped);
    }

    #[test]
    fn should_default_to_single_slot_and_hundred_millis() {
        let config = SchedulerConfig::default();
        assert_eq!(config.queue_capacity, 1);
        assert_eq!(config.min_interval, Duration::from_millis(100));
    }
}

use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

type Worker = (JoinHandle<()>, oneshot::Sender<()>);

/// Hero carousel clock. Publishes a tick count that advances once per period.
#[derive(Debug)]
pub struct Rotation {
    period: Duration,
    ticks: watch::Receiver<u64>,
    worker: Mutex<Option<Worker>>,
}

impl Rotation {
    /// Spawns the ticking task on the current runtime.
    pub fn start(period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        let (tick_tx, ticks) = watch::channel(0u64);
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = interval.tick() => {
                        tick_tx.send_modify(|t| *t = t.wrapping_add(1));
                    }
                }
            }
            tracing::debug!("Carousel rotation stopped");
        });
        tracing::debug!(period_ms = period.as_millis() as u64, "Carousel rotation started");
        Rotation {
            period,
            ticks,
            worker: Mutex::new(Some((handle, shutdown_tx))),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn tick(&self) -> u64 {
        *self.ticks.borrow()
    }

    /// Current slide for a list of `len` items; `None` when the list is empty.
    pub fn index_for(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some((self.tick() % len as u64) as usize)
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.ticks.clone()
    }

    pub fn is_running(&self) -> bool {
        self.lock_worker()
            .as_ref()
            .map(|(handle, _)| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Signals the task and waits for it to exit. Later calls are no-ops.
    pub async fn stop(&self) {
        let worker = self.lock_worker().take();
        if let Some((handle, shutdown_tx)) = worker {
            let _ = shutdown_tx.send(());
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Carousel task ended abnormally");
            }
        }
    }

    fn lock_worker(&self) -> std::sync::MutexGuard<'_, Option<Worker>> {
        self.worker.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for Rotation {
    fn drop(&mut self) {
        if let Some((handle, _)) = self.lock_worker().take() {
            handle.abort();
        }
    }
}

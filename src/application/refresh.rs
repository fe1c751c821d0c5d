// Cancellable repeating refresh timer
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// A timer that fires `on_tick` once per period until stopped or dropped.
///
/// Each tick spawns the returned future instead of awaiting it, so a slow
/// cycle never holds back the next tick. The first tick fires one full
/// period after `start`.
pub struct RefreshTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl RefreshTask {
    pub fn start<F, Fut>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            info!("refresh timer started (period={period:?})");
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        info!("refresh timer stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        debug!("refresh tick");
                        tokio::spawn(on_tick());
                    }
                }
            }
        });

        Self { cancel, handle }
    }

    /// Idempotent.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_active(&self) -> bool {
        !self.cancel.is_cancelled() && !self.handle.is_finished()
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

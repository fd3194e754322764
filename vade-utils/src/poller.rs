use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Interval-driven ticker owning the timer for one logical feed.
///
/// The first tick fires immediately, so starting a poller also performs the
/// on-mount fetch. Each tick is an independent attempt; the closure is
/// expected to swallow its own failures. Stopping (or dropping) the poller
/// aborts the task, which is the only cancellation in-flight work gets.
pub struct Poller {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl Poller {
    pub fn start<F, Fut>(name: &'static str, every: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                tick().await;
            }
        });

        Self { name, handle }
    }

    pub fn stop(&self) {
        debug!(feed = self.name, "poller stopped");
        self.handle.abort();
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

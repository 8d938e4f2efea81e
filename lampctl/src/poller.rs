//! Periodic status polling
//!
//! The device cannot push updates, so sensor values are kept fresh by
//! refreshing the status page on a fixed interval.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::client::DeviceControlClient;
use crate::error::Error;

/// Spawns status polling loops
pub struct Poller;

impl Poller {
    /// Refresh `client` now and then every `interval`
    ///
    /// Runs on the current tokio runtime until the returned handle is stopped
    /// or dropped. Failed polls are logged and the loop keeps going. A slow
    /// device delays the next tick instead of causing a burst of requests.
    pub fn spawn(client: Arc<DeviceControlClient>, interval: Duration) -> PollHandle {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        info!("Polling {} every {:?}", client.address(), interval);

        let task = tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;

                    // Fires on stop() and when the handle is dropped
                    _ = &mut stop_rx => break,

                    _ = ticker.tick() => {
                        match client.refresh().await {
                            Ok(_) => {}
                            Err(Error::Busy(_)) => debug!("Skipping poll: already in flight"),
                            Err(e) => warn!("Poll of {} failed: {}", client.address(), e),
                        }
                    }
                }
            }

            debug!("Polling of {} stopped", client.address());
        });

        PollHandle {
            stop: Some(stop_tx),
            task: Some(task),
        }
    }
}

/// Handle to a running polling loop
///
/// Dropping the handle cancels future polls. A refresh already sent is
/// allowed to finish.
pub struct PollHandle {
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Check if the loop is still running
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop polling and wait for an in-flight refresh to finish
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }

        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Polling task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

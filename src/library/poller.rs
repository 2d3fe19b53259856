//! Fixed-interval polling of a backend feed.
//!
//! Each tick spawns its own fetch, so a slow response does not delay the
//! next tick and overlapping fetches are possible. Ordering between them is
//! handled by the collection epochs, not here.

use std::{future::Future, time::Duration};

use {
    async_channel::{Sender, bounded},
    tokio::{
        select, spawn,
        task::JoinHandle,
        time::{MissedTickBehavior, interval},
    },
    tracing::debug,
};

/// Handle to a running poll loop.
///
/// Dropping the handle without calling [`Poller::stop`] closes the shutdown
/// channel, which also ends the loop.
pub struct Poller {
    /// Shutdown signal for the loop.
    shutdown_tx: Sender<()>,
    /// The loop task.
    handle: JoinHandle<()>,
}

impl Poller {
    /// Starts calling `tick` every `period`.
    ///
    /// The first call happens one full period after start, since the caller
    /// has just done the initial load.
    ///
    /// # Arguments
    ///
    /// * `period` - Interval between ticks.
    /// * `tick` - Produces the fetch future for one tick.
    ///
    /// # Returns
    ///
    /// A `Poller` handle used to stop the loop.
    pub fn start<F, Fut>(period: Duration, tick: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (shutdown_tx, shutdown_rx) = bounded::<()>(1);

        let handle = spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick of a tokio interval completes immediately.
            ticker.tick().await;

            loop {
                select! {
                    _ = ticker.tick() => {
                        debug!("Poll tick");
                        spawn(tick());
                    }
                    _ = shutdown_rx.recv() => {
                        debug!("Poller received shutdown signal");
                        break;
                    }
                }
            }
        });

        Self {
            shutdown_tx,
            handle,
        }
    }

    /// Stops the loop and waits for it to exit.
    ///
    /// Fetches already spawned by earlier ticks are left to finish.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(()).await;
        if let Err(e) = self.handle.await {
            debug!("Poller task ended abnormally: {e}");
        }
    }
}

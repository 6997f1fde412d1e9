use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::source::{AcquisitionError, Acquired, DataSource, Feed, Origin};

#[derive(Debug, Clone)]
pub struct ViewState<T> {
    pub data: Option<T>,
    pub origin: Option<Origin>,
    pub loading: bool,
    pub last_error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            data: None,
            origin: None,
            loading: true,
            last_error: None,
            updated_at: None,
        }
    }
}

impl<T> ViewState<T> {
    /// Replaces the data wholesale on success; a failure keeps the previous data.
    fn apply(&mut self, outcome: Result<Acquired<T>, AcquisitionError>) {
        self.loading = false;
        match outcome {
            Ok(acquired) => {
                self.data = Some(acquired.payload);
                self.origin = Some(acquired.origin);
                self.last_error = None;
                self.updated_at = Some(Utc::now());
            }
            Err(err) => self.last_error = Some(err.to_string()),
        }
    }
}

pub struct Poller<F: Feed> {
    state: watch::Receiver<ViewState<F::Payload>>,
    scheduler: JoinHandle<()>,
}

impl<F: Feed> Poller<F> {
    /// Starts polling immediately, then once per `every`.
    pub fn spawn(source: DataSource<F>, every: Duration) -> Self {
        let (tx, rx) = watch::channel(ViewState::default());
        let tx = Arc::new(tx);

        tracing::debug!(feed = F::NAME, url = source.url(), ?every, "poller started");
        let scheduler = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                // Detached: a slow request must not delay the next tick.
                let source = source.clone();
                let tx = Arc::clone(&tx);
                tokio::spawn(async move {
                    let outcome = source.acquire().await;
                    tx.send_modify(|state| state.apply(outcome));
                });
            }
        });

        Self {
            state: rx,
            scheduler,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<F::Payload>> {
        self.state.clone()
    }

    pub fn stop(self) {
        drop(self);
    }
}

impl<F: Feed> Drop for Poller<F> {
    fn drop(&mut self) {
        self.scheduler.abort();
        tracing::debug!(feed = F::NAME, "poller stopped");
    }
}

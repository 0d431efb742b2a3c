//! Coalescing of bursty change notifications (row selection, filter input).

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::warn;

use crate::error::ReportError;

/// Delivers the latest pushed value once no new value arrived for a quiet
/// window.
///
/// Must be created inside a tokio runtime. Dropping the debouncer discards a
/// pending value; use [`Debouncer::shutdown`] to deliver it instead.
#[derive(Debug)]
pub struct Debouncer<T> {
    tx: Option<mpsc::UnboundedSender<T>>,
    worker: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawns the worker calling `sink` with each settled value.
    pub fn spawn<F>(window: Duration, mut sink: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();
        let worker = tokio::spawn(async move {
            let mut pending: Option<T> = None;
            loop {
                if pending.is_none() {
                    match rx.recv().await {
                        Some(value) => pending = Some(value),
                        None => break,
                    }
                    continue;
                }
                // The timer restarts whenever a newer value arrives.
                tokio::select! {
                    received = rx.recv() => match received {
                        Some(value) => pending = Some(value),
                        None => {
                            if let Some(value) = pending.take() {
                                sink(value);
                            }
                            break;
                        }
                    },
                    () = sleep(window) => {
                        if let Some(value) = pending.take() {
                            sink(value);
                        }
                    }
                }
            }
        });
        Self {
            tx: Some(tx),
            worker: Some(worker),
        }
    }

    /// Replaces the pending value and restarts the quiet window.
    pub fn push(&self, value: T) -> Result<(), ReportError> {
        self.tx
            .as_ref()
            .ok_or(ReportError::DebouncerClosed)?
            .send(value)
            .map_err(|_| ReportError::DebouncerClosed)
    }

    /// Stops the worker and discards any pending value.
    pub fn cancel(&mut self) {
        self.tx = None;
        if let Some(worker) = self.worker.take() {
            worker.abort();
        }
    }

    /// Delivers a pending value immediately, then stops the worker.
    pub async fn shutdown(mut self) {
        self.tx = None;
        let Some(worker) = self.worker.take() else {
            return;
        };
        if let Err(err) = worker.await {
            warn!(error = %err, "debouncer worker failed");
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.abort();
        }
    }
}

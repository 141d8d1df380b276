//! Trailing-edge debounce as an explicit, caller-owned timer object.
//!
//! A `Debouncer` owns a small tokio task. Every `schedule` restarts the quiet
//! window; once the window elapses with no newer value, the latest value is
//! handed to the sink. Dropping the debouncer cancels whatever is pending.
//! Must be created inside a tokio runtime.
//!
//! Sinks run on the blocking pool, one at a time and in order, so they may do
//! plain file I/O.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::warn;

enum Signal<T> {
    Value(T),
    Cancel,
    Flush(oneshot::Sender<()>),
}

pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<Signal<T>>,
    worker: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(delay: Duration, sink: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run(rx, delay, sink));
        Self { tx, worker }
    }

    /// Replaces any pending value and restarts the quiet window.
    pub fn schedule(&self, value: T) {
        // The worker only stops when this handle is dropped.
        let _ = self.tx.send(Signal::Value(value));
    }

    /// Drops the pending value, if any, without delivering it.
    pub fn cancel(&self) {
        let _ = self.tx.send(Signal::Cancel);
    }

    /// Delivers the pending value now. Resolves once the sink has run (or
    /// immediately if nothing was pending).
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(Signal::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.await;
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

async fn deliver<T, F>(sink: &Arc<Mutex<F>>, value: T)
where
    T: Send + 'static,
    F: FnMut(T) + Send + 'static,
{
    let sink = Arc::clone(sink);
    let delivered = tokio::task::spawn_blocking(move || {
        let mut sink = sink.lock().unwrap_or_else(PoisonError::into_inner);
        (*sink)(value);
    })
    .await;
    if let Err(e) = delivered {
        warn!("Debounced delivery did not complete: {e}");
    }
}

async fn run<T, F>(mut rx: mpsc::UnboundedReceiver<Signal<T>>, delay: Duration, sink: F)
where
    T: Send + 'static,
    F: FnMut(T) + Send + 'static,
{
    let sink = Arc::new(Mutex::new(sink));
    let mut pending: Option<T> = None;
    loop {
        let signal = if pending.is_none() {
            rx.recv().await
        } else {
            tokio::select! {
                signal = rx.recv() => signal,
                _ = sleep(delay) => {
                    if let Some(value) = pending.take() {
                        deliver(&sink, value).await;
                    }
                    continue;
                }
            }
        };

        match signal {
            None => break,
            Some(Signal::Value(value)) => pending = Some(value),
            Some(Signal::Cancel) => pending = None,
            Some(Signal::Flush(ack)) => {
                if let Some(value) = pending.take() {
                    deliver(&sink, value).await;
                }
                let _ = ack.send(());
            }
        }
    }
}

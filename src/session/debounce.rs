//! Cancellable delayed delivery of the latest value.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// A value that survived the quiet period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled<T> {
    ticket: u64,
    pub value: T,
}

/// Delivers a value once no newer value has been scheduled for `delay`.
///
/// Each [`schedule`](Self::schedule) cancels the pending task and starts a
/// new one. A task whose timer fires concurrently with a reschedule may
/// still deliver; [`is_current`](Self::is_current) tells the receiver to
/// drop it.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    tx: mpsc::UnboundedSender<Settled<T>>,
    pending: Option<CancellationToken>,
    ticket: u64,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer and the receiver its settled values arrive on.
    #[must_use]
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<Settled<T>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            delay,
            tx,
            pending: None,
            ticket: 0,
        };
        (debouncer, rx)
    }

    /// Replace any pending value with `value` and restart the timer.
    pub fn schedule(&mut self, value: T) {
        self.cancel();
        self.ticket += 1;

        let token = CancellationToken::new();
        self.pending = Some(token.clone());

        let tx = self.tx.clone();
        let delay = self.delay;
        let ticket = self.ticket;
        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {}
                () = tokio::time::sleep(delay) => {
                    // Receiver gone means the owner shut down.
                    let _ = tx.send(Settled { ticket, value });
                }
            }
        });
    }

    /// Drop the pending value, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }

    /// Whether `settled` is the most recently scheduled value and has not
    /// been cancelled since.
    #[must_use]
    pub fn is_current(&self, settled: &Settled<T>) -> bool {
        settled.ticket == self.ticket && self.pending.is_some()
    }

    /// Mark `settled` as consumed.
    pub fn accept(&mut self, settled: &Settled<T>) {
        if settled.ticket == self.ticket {
            self.pending = None;
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

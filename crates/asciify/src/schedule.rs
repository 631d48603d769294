use std::time::{Duration, Instant};

/// Quiescence window used by interactive re-rendering.
pub const DEFAULT_QUIESCENCE: Duration = Duration::from_millis(80);

#[derive(Debug)]
struct Pending<T> {
    work: T,
    deadline: Instant,
}

/// Coalesces bursts of submissions into one run.
///
/// Only the latest submission survives; each submission re-arms the
/// window. Callers supply the current time so the policy stays pure.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_QUIESCENCE)
    }
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self { window, pending: None }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedule `work`, returning the submission it superseded, if any.
    pub fn submit(&mut self, work: T, now: Instant) -> Option<T> {
        let deadline = now + self.window;
        self.pending.replace(Pending { work, deadline }).map(|pending| pending.work)
    }

    /// Release the pending work once its window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => self.pending.take().map(|p| p.work),
            _ => None,
        }
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.work)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// Time left before `poll` can succeed; zero once due.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline().map(|deadline| deadline.saturating_duration_since(now))
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

use std::{
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

/// Why a trace stopped early
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Interruption {
    #[display("cancelled")]
    Cancelled,
    #[display("timed out")]
    TimedOut,
}

/// Cancellation, deadline and progress of a trace.
///
/// Clones share their state: keep one on the calling side to cancel the trace or to watch its
/// progress from another thread.
#[derive(Debug, Clone, Default)]
pub struct TraceControl {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
    processed: Arc<AtomicUsize>,
}

impl TraceControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(self, deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            ..self
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Cancellation wins over the deadline
    pub fn interruption(&self) -> Option<Interruption> {
        if self.is_cancelled() {
            Some(Interruption::Cancelled)
        } else if self.deadline.is_some_and(|d| Instant::now() >= d) {
            Some(Interruption::TimedOut)
        } else {
            None
        }
    }

    pub fn add_processed(&self, rays: usize) {
        self.processed.fetch_add(rays, Ordering::Relaxed);
    }

    /// Rays cast so far
    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::Relaxed)
    }
}

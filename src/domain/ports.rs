use super::event::{Action, PageEvent};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Handle to an action parked with a [`Scheduler`]. Cancelling marks the
/// task so the scheduler drops it instead of firing it; cancelling after the
/// task already fired does nothing.
#[derive(Debug, Clone, Default)]
pub struct ScheduledTask {
    cancelled: Arc<AtomicBool>,
}

impl ScheduledTask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Clock and timer port. The engine never sleeps on its own; every delayed
/// action goes through here so replays can run on a virtual clock.
pub trait Scheduler: Send + Sync {
    /// Parks `action` to fire `delay_ms` from now. The returned handle is a
    /// clone of the one the scheduler keeps, so cancelling it is observed.
    fn schedule(&self, delay_ms: u64, action: Action) -> ScheduledTask;

    /// Milliseconds since the session started.
    fn now_ms(&self) -> u64;
}

pub type SchedulerBox = Box<dyn Scheduler>;

/// One step of a session feed: either an interaction or a jump of the clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStep {
    Event(PageEvent),
    Advance { ms: u64 },
}

/// Where session steps come from: a CSV script, stdin, a generator in tests.
#[async_trait]
pub trait EventSource: Send {
    /// Next step, or `None` once the feed is exhausted. Malformed steps are
    /// errors; callers decide whether to skip or stop.
    async fn next_step(&mut self) -> Option<Result<SessionStep>>;
}

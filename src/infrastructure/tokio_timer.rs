use crate::domain::event::Action;
use crate::domain::ports::{ScheduledTask, Scheduler};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedSender;

/// A scheduler on the real clock, for live sessions.
///
/// Each task becomes a sleep on the tokio runtime; when it wakes and was not
/// cancelled, the action is pushed into the channel the session loop reads
/// from. Must be created inside a runtime.
#[derive(Clone)]
pub struct TokioScheduler {
    started: Instant,
    due_actions: UnboundedSender<Action>,
}

impl TokioScheduler {
    pub fn new(due_actions: UnboundedSender<Action>) -> Self {
        Self {
            started: Instant::now(),
            due_actions,
        }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay_ms: u64, action: Action) -> ScheduledTask {
        let task = ScheduledTask::new();
        let guard = task.clone();
        let sender = self.due_actions.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            if !guard.is_cancelled() {
                // A closed receiver just means the session already ended.
                let _ = sender.send(action);
            }
        });
        task
    }

    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

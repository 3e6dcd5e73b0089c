use crate::domain::event::Action;
use crate::domain::ports::{ScheduledTask, Scheduler};
use std::sync::{Arc, Mutex};

struct Pending {
    due_ms: u64,
    seq: u64,
    action: Action,
    task: ScheduledTask,
}

#[derive(Default)]
struct Clock {
    now_ms: u64,
    next_seq: u64,
    pending: Vec<Pending>,
}

/// A scheduler on a virtual clock.
///
/// Time moves only when [`ManualScheduler::advance`] is called, which makes
/// script replays and tests fully deterministic. Clones share one clock, so
/// the session loop can advance time while the engine holds the boxed port.
#[derive(Default, Clone)]
pub struct ManualScheduler {
    clock: Arc<Mutex<Clock>>,
}

impl ManualScheduler {
    /// Creates a scheduler with the clock at zero and nothing parked.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `ms` and returns every action that came
    /// due, soonest first. Tasks due at the same instant keep their
    /// scheduling order; cancelled tasks are dropped silently.
    pub fn advance(&self, ms: u64) -> Vec<Action> {
        let mut clock = self.clock.lock().unwrap();
        clock.now_ms += ms;
        let now = clock.now_ms;

        let (mut due, rest): (Vec<Pending>, Vec<Pending>) =
            clock.pending.drain(..).partition(|p| p.due_ms <= now);
        clock.pending = rest;
        drop(clock);

        due.sort_by_key(|p| (p.due_ms, p.seq));
        due.into_iter()
            .filter(|p| !p.task.is_cancelled())
            .map(|p| p.action)
            .collect()
    }

    /// Milliseconds until the earliest parked task, if any.
    pub fn next_due_in(&self) -> Option<u64> {
        let clock = self.clock.lock().unwrap();
        clock
            .pending
            .iter()
            .map(|p| p.due_ms.saturating_sub(clock.now_ms))
            .min()
    }

    /// Moves the clock forward by `ms`, handing each due action to `deliver`
    /// at its own due instant. Anything `deliver` schedules lands inside the
    /// same window when its delay fits, exactly as it would on a real clock.
    pub fn advance_with(&self, ms: u64, mut deliver: impl FnMut(Action)) {
        let mut remaining = ms;
        loop {
            let Some(step) = self.next_due_in().filter(|step| *step <= remaining) else {
                // Nothing further due inside the window.
                self.advance(remaining);
                return;
            };
            remaining -= step;
            for action in self.advance(step) {
                deliver(action);
            }
        }
    }

    /// Tasks parked but not yet due, cancelled ones included.
    pub fn pending_count(&self) -> usize {
        self.clock.lock().unwrap().pending.len()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u64, action: Action) -> ScheduledTask {
        let task = ScheduledTask::new();
        let mut clock = self.clock.lock().unwrap();
        clock.next_seq += 1;
        let pending = Pending {
            due_ms: clock.now_ms + delay_ms,
            seq: clock.next_seq,
            action,
            task: task.clone(),
        };
        clock.pending.push(pending);
        task
    }

    fn now_ms(&self) -> u64 {
        self.clock.lock().unwrap().now_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_fires_before_its_delay() {
        let scheduler = ManualScheduler::new();
        scheduler.schedule(100, Action::ToggleMenu);

        assert!(scheduler.advance(99).is_empty());
        assert_eq!(scheduler.advance(1), vec![Action::ToggleMenu]);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_one_advance_releases_everything_due_in_order() {
        let scheduler = ManualScheduler::new();
        scheduler.schedule(300, Action::CloseOpenModals);
        scheduler.schedule(100, Action::ToggleMenu);
        scheduler.schedule(300, Action::DismissNotification);

        let due = scheduler.advance(1000);
        assert_eq!(
            due,
            vec![
                Action::ToggleMenu,
                Action::CloseOpenModals,
                Action::DismissNotification,
            ]
        );
    }

    #[test]
    fn test_cancelled_task_never_fires() {
        let scheduler = ManualScheduler::new();
        let task = scheduler.schedule(50, Action::ToggleMenu);
        scheduler.schedule(50, Action::DismissNotification);

        task.cancel();
        assert_eq!(scheduler.advance(50), vec![Action::DismissNotification]);
    }

    #[test]
    fn test_advance_with_delivers_cascades_inside_the_window() {
        let scheduler = ManualScheduler::new();
        scheduler.schedule(100, Action::ToggleMenu);

        let mut seen = Vec::new();
        let inner = scheduler.clone();
        scheduler.advance_with(200, |action| {
            if action == Action::ToggleMenu {
                inner.schedule(50, Action::DismissNotification);
            }
            seen.push((inner.now_ms(), action));
        });

        assert_eq!(
            seen,
            vec![
                (100, Action::ToggleMenu),
                (150, Action::DismissNotification),
            ]
        );
        assert_eq!(scheduler.now_ms(), 200);
    }

    #[test]
    fn test_advance_with_leaves_later_tasks_parked() {
        let scheduler = ManualScheduler::new();
        scheduler.schedule(500, Action::ToggleMenu);

        let mut seen = Vec::new();
        scheduler.advance_with(499, |action| seen.push(action));

        assert!(seen.is_empty());
        assert_eq!(scheduler.now_ms(), 499);
        assert_eq!(scheduler.pending_count(), 1);
    }

    #[test]
    fn test_clock_accumulates_across_advances() {
        let scheduler = ManualScheduler::new();
        scheduler.advance(400);
        assert_eq!(scheduler.now_ms(), 400);

        scheduler.schedule(100, Action::ToggleMenu);
        assert!(scheduler.advance(60).is_empty());
        assert_eq!(scheduler.advance(40), vec![Action::ToggleMenu]);
        assert_eq!(scheduler.now_ms(), 500);
    }
}

use std::fmt;

/// How long a notification stays on screen before it starts leaving.
pub const DISMISS_AFTER_MS: u64 = 5000;
/// Exit-animation window between leaving and removal.
pub const EXIT_AFTER_MS: u64 = 300;

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Visible until the dismiss timer fires, then Leaving while the exit
/// animation plays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    Visible,
    Leaving,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub created_ms: u64,
    pub phase: NotificationPhase,
}

/// One entry of the session log, kept after the notification itself is gone.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRecord {
    pub kind: NotificationKind,
    pub message: String,
    pub created_ms: u64,
}

/// Single-slot notification display.
///
/// At most one notification is alive at a time: `show` evicts whatever is
/// currently displayed, so the last caller always wins. Every shown message
/// is also appended to a session log for reporting.
#[derive(Debug, Default)]
pub struct NotificationRail {
    current: Option<Notification>,
    log: Vec<NotificationRecord>,
    next_id: u64,
}

impl NotificationRail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Displays a new notification, evicting the current one. Returns the id
    /// the caller should stamp onto the dismissal timer.
    pub fn show(&mut self, kind: NotificationKind, message: impl Into<String>, now_ms: u64) -> u64 {
        let message = message.into();
        self.next_id += 1;
        let id = self.next_id;
        self.log.push(NotificationRecord {
            kind,
            message: message.clone(),
            created_ms: now_ms,
        });
        self.current = Some(Notification {
            id,
            kind,
            message,
            created_ms: now_ms,
            phase: NotificationPhase::Visible,
        });
        id
    }

    /// Instant teardown on the close click: no exit phase, the slot just
    /// empties. Returns the dismissed id; timers armed for it go stale.
    pub fn dismiss(&mut self) -> Option<u64> {
        self.current.take().map(|n| n.id)
    }

    /// Flips the notification into its exit phase. Returns false when the
    /// timer went stale (the slot was replaced or emptied in the meantime).
    pub fn begin_exit(&mut self, id: u64) -> bool {
        match &mut self.current {
            Some(n) if n.id == id && n.phase == NotificationPhase::Visible => {
                n.phase = NotificationPhase::Leaving;
                true
            }
            _ => false,
        }
    }

    /// Final removal after the exit window, guarded by the same staleness
    /// check as `begin_exit`. Returns whether anything was removed.
    pub fn remove(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|n| n.id == id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn log(&self) -> &[NotificationRecord] {
        &self.log
    }
}

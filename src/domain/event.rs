use crate::domain::notification::NotificationKind;
use crate::domain::order::OrderField;

/// What the browser would have called the event's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Input,
    Change,
    Submit,
    Keydown,
}

/// One of the three calculator controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcField {
    Work,
    Pages,
    Deadline,
}

impl CalcField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Pages => "pages",
            Self::Deadline => "deadline",
        }
    }
}

/// Where on the page an event landed, already resolved to the handful of
/// elements the engine distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// The burger button in the header.
    MenuToggle,
    /// The backdrop or close button of a visible modal.
    ModalSurface { modal: String },
    /// A button that opens the named modal.
    ModalTrigger { modal: String },
    /// An in-page link; `href` keeps its leading `#`.
    Anchor { href: String },
    /// The question row of an FAQ item.
    FaqQuestion { item: String },
    CalcControl(CalcField),
    OrderInput(OrderField),
    OrderForm,
    /// The close button of the notification toast.
    NotificationClose,
    /// Anywhere else; document-level listeners still see these.
    Body,
}

/// A user interaction delivered to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEvent {
    pub kind: EventKind,
    pub target: Target,
    /// New control value, pressed key name, and the like.
    pub detail: Option<String>,
}

impl PageEvent {
    pub fn new(kind: EventKind, target: Target) -> Self {
        Self {
            kind,
            target,
            detail: None,
        }
    }

    pub fn with_detail(kind: EventKind, target: Target, detail: impl Into<String>) -> Self {
        Self {
            kind,
            target,
            detail: Some(detail.into()),
        }
    }

    pub fn detail(&self) -> &str {
        self.detail.as_deref().unwrap_or_default()
    }
}

/// A state change the engine has decided on. Most are applied on the spot;
/// the delayed ones come back through the scheduler once their delay elapses
/// and re-check that they are still wanted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ToggleMenu,
    OpenModal { modal: String },
    CloseModal { modal: String },
    /// Escape closes every visible modal at once.
    CloseOpenModals,
    /// Delayed follow-up of `OpenModal`; ignored if the modal closed meanwhile.
    FocusFirstControl { modal: String },
    ScrollTo { section: String },
    ToggleFaq { item: String },
    AdjustCalculator { field: CalcField, raw: String },
    EditOrderField { field: OrderField, value: String },
    SubmitOrder,
    /// Delayed completion of an accepted submit, tagged with the attempt it
    /// belongs to.
    FinishSubmit { attempt: u64 },
    ShowNotification { kind: NotificationKind, message: String },
    /// The toast's own five second timer.
    NotificationTimeout { id: u64 },
    /// End of the exit animation; the toast leaves the page for good.
    RemoveNotification { id: u64 },
    /// The user clicked the toast's close button.
    DismissNotification,
}

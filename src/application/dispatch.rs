use crate::domain::event::{Action, CalcField, EventKind, PageEvent, Target};
use tracing::trace;

/// One row of the dispatch table: an event type, a predicate over the
/// target, and the action to emit when both agree. `emit` may still decline
/// (for key events it also inspects which key was pressed).
pub struct Binding {
    pub name: &'static str,
    pub kind: EventKind,
    pub target: fn(&Target) -> bool,
    pub emit: fn(&PageEvent) -> Option<Action>,
}

/// The page's event wiring as data. Every listener the page registers is one
/// row here, and dispatching an event walks the rows top to bottom, so the
/// order in which handlers fire is explicit and testable.
pub struct DispatchTable {
    bindings: Vec<Binding>,
}

impl DispatchTable {
    /// The wiring of the shipped page.
    pub fn standard() -> Self {
        let bindings = vec![
            Binding {
                name: "modal-surface-close",
                kind: EventKind::Click,
                target: |t| matches!(t, Target::ModalSurface { .. }),
                emit: |e| match &e.target {
                    Target::ModalSurface { modal } => Some(Action::CloseModal {
                        modal: modal.clone(),
                    }),
                    _ => None,
                },
            },
            Binding {
                name: "escape-close",
                kind: EventKind::Keydown,
                target: |_| true,
                emit: |e| (e.detail() == "Escape").then_some(Action::CloseOpenModals),
            },
            Binding {
                name: "anchor-scroll",
                kind: EventKind::Click,
                target: |t| matches!(t, Target::Anchor { .. }),
                emit: |e| match &e.target {
                    Target::Anchor { href } => Some(Action::ScrollTo {
                        section: href.strip_prefix('#').unwrap_or(href).to_string(),
                    }),
                    _ => None,
                },
            },
            Binding {
                name: "menu-toggle",
                kind: EventKind::Click,
                target: |t| matches!(t, Target::MenuToggle),
                emit: |_| Some(Action::ToggleMenu),
            },
            Binding {
                name: "calc-work",
                kind: EventKind::Change,
                target: |t| matches!(t, Target::CalcControl(CalcField::Work)),
                emit: |e| {
                    Some(Action::AdjustCalculator {
                        field: CalcField::Work,
                        raw: e.detail().to_string(),
                    })
                },
            },
            Binding {
                name: "calc-pages",
                kind: EventKind::Input,
                target: |t| matches!(t, Target::CalcControl(CalcField::Pages)),
                emit: |e| {
                    Some(Action::AdjustCalculator {
                        field: CalcField::Pages,
                        raw: e.detail().to_string(),
                    })
                },
            },
            Binding {
                name: "calc-deadline",
                kind: EventKind::Change,
                target: |t| matches!(t, Target::CalcControl(CalcField::Deadline)),
                emit: |e| {
                    Some(Action::AdjustCalculator {
                        field: CalcField::Deadline,
                        raw: e.detail().to_string(),
                    })
                },
            },
            Binding {
                name: "faq-toggle",
                kind: EventKind::Click,
                target: |t| matches!(t, Target::FaqQuestion { .. }),
                emit: |e| match &e.target {
                    Target::FaqQuestion { item } => Some(Action::ToggleFaq { item: item.clone() }),
                    _ => None,
                },
            },
            Binding {
                name: "modal-open",
                kind: EventKind::Click,
                target: |t| matches!(t, Target::ModalTrigger { .. }),
                emit: |e| match &e.target {
                    Target::ModalTrigger { modal } => Some(Action::OpenModal {
                        modal: modal.clone(),
                    }),
                    _ => None,
                },
            },
            Binding {
                name: "order-submit",
                kind: EventKind::Submit,
                target: |t| matches!(t, Target::OrderForm),
                emit: |_| Some(Action::SubmitOrder),
            },
            Binding {
                name: "order-edit",
                kind: EventKind::Input,
                target: |t| matches!(t, Target::OrderInput(_)),
                emit: |e| match &e.target {
                    Target::OrderInput(field) => Some(Action::EditOrderField {
                        field: *field,
                        value: e.detail().to_string(),
                    }),
                    _ => None,
                },
            },
            Binding {
                name: "notification-dismiss",
                kind: EventKind::Click,
                target: |t| matches!(t, Target::NotificationClose),
                emit: |_| Some(Action::DismissNotification),
            },
        ];
        Self { bindings }
    }

    pub fn with_bindings(bindings: Vec<Binding>) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Emits the actions of every row matching the event, in table order.
    pub fn dispatch(&self, event: &PageEvent) -> Vec<Action> {
        self.bindings
            .iter()
            .filter(|b| b.kind == event.kind && (b.target)(&event.target))
            .filter_map(|b| {
                let action = (b.emit)(event);
                if let Some(action) = &action {
                    trace!(binding = b.name, ?action, "dispatch");
                }
                action
            })
            .collect()
    }
}

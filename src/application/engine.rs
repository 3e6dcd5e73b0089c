use crate::application::dispatch::DispatchTable;
use crate::domain::event::{Action, CalcField, PageEvent};
use crate::domain::notification::{DISMISS_AFTER_MS, EXIT_AFTER_MS, NotificationKind};
use crate::domain::order::{FormPhase, SUBMIT_DELAY_MS, SubmitOutcome, messages};
use crate::domain::page::{FOCUS_DELAY_MS, FocusedControl, PageConfig, PageState};
use crate::domain::ports::SchedulerBox;
use crate::domain::pricing::{DeadlineFactor, WorkType};
use rust_decimal::Decimal;

/// The main entry point of the interaction layer.
///
/// `PageEngine` owns the page state and the dispatch table, and turns
/// incoming events into state changes. Anything time-based (modal focus,
/// the simulated order send, notification expiry) is parked with the
/// scheduler and comes back through [`PageEngine::apply`] when due, so the
/// engine itself never blocks or sleeps.
pub struct PageEngine {
    config: PageConfig,
    state: PageState,
    table: DispatchTable,
    scheduler: SchedulerBox,
    submit_attempt: u64,
}

impl PageEngine {
    /// Creates an engine for the described page, with the calculator already
    /// priced at its defaults.
    pub fn new(config: PageConfig, scheduler: SchedulerBox) -> Self {
        let state = PageState::new(&config);
        Self {
            config,
            state,
            table: DispatchTable::standard(),
            scheduler,
            submit_attempt: 0,
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Dispatches one event and applies every action it produced, in table
    /// order. Returns the applied actions so callers can log or assert on
    /// them.
    pub fn handle(&mut self, event: &PageEvent) -> Vec<Action> {
        let actions = self.table.dispatch(event);
        for action in &actions {
            self.apply(action.clone());
        }
        actions
    }

    /// Applies a single action. Delayed follow-ups re-enter here once the
    /// scheduler releases them; each one re-checks that the state it was
    /// scheduled against still holds before touching anything.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::ToggleMenu => {
                self.state.toggle_menu();
                tracing::debug!("menu {}", if self.state.menu_open { "opened" } else { "closed" });
            }
            Action::OpenModal { modal } => {
                if self.config.modal(&modal).is_some() {
                    self.state.open_modal(&modal);
                    self.scheduler
                        .schedule(FOCUS_DELAY_MS, Action::FocusFirstControl { modal: modal.clone() });
                    tracing::debug!("opened modal '{}'", modal);
                } else {
                    tracing::warn!("ignoring open of unknown modal '{}'", modal);
                }
            }
            Action::CloseModal { modal } => {
                if self.state.close_modal(&modal) {
                    tracing::debug!("closed modal '{}'", modal);
                }
            }
            Action::CloseOpenModals => {
                let open: Vec<String> = self.state.open_modals().map(str::to_string).collect();
                for modal in open {
                    self.state.close_modal(&modal);
                    tracing::debug!("closed modal '{}'", modal);
                }
            }
            Action::FocusFirstControl { modal } => {
                // Only if the modal survived the animation delay.
                if self.state.is_modal_open(&modal)
                    && let Some(spec) = self.config.modal(&modal)
                    && let Some(first) = spec.controls.first()
                {
                    self.state.focused = Some(FocusedControl {
                        modal: modal.clone(),
                        control: first.clone(),
                    });
                    tracing::debug!("focused '{}' in modal '{}'", first, modal);
                }
            }
            Action::ScrollTo { section } => {
                if let Some(offset) = self.config.section_offset(&section) {
                    self.state.scroll_to_section(offset, self.config.header_px);
                    tracing::debug!("scrolled to '{}' at {}px", section, self.state.scroll_top);
                } else {
                    tracing::warn!("ignoring scroll to unknown section '{}'", section);
                }
            }
            Action::ToggleFaq { item } => {
                if self.config.has_faq_item(&item) {
                    self.state.toggle_faq(&item);
                    tracing::debug!("toggled FAQ item '{}'", item);
                } else {
                    tracing::warn!("ignoring toggle of unknown FAQ item '{}'", item);
                }
            }
            Action::AdjustCalculator { field, raw } => self.adjust_calculator(field, &raw),
            Action::EditOrderField { field, value } => {
                self.state.order_form.set_value(field, value);
                tracing::debug!("order field {} edited", field.name());
            }
            Action::SubmitOrder => match self.state.order_form.begin_submit() {
                SubmitOutcome::Rejected(message) => {
                    let marked: Vec<&str> =
                        self.state.order_form.marked_fields().map(|f| f.name()).collect();
                    tracing::debug!("submit rejected, fields [{}]: {}", marked.join(" "), message);
                    self.apply(Action::ShowNotification {
                        kind: NotificationKind::Error,
                        message: message.to_string(),
                    });
                }
                SubmitOutcome::Accepted => {
                    self.submit_attempt += 1;
                    self.scheduler.schedule(
                        SUBMIT_DELAY_MS,
                        Action::FinishSubmit {
                            attempt: self.submit_attempt,
                        },
                    );
                    tracing::info!("order submitted, sending");
                }
                SubmitOutcome::Ignored => {
                    tracing::debug!("submit ignored, already sending");
                }
            },
            Action::FinishSubmit { attempt } => {
                if attempt == self.submit_attempt
                    && self.state.order_form.phase() == FormPhase::Submitting
                {
                    self.apply(Action::ShowNotification {
                        kind: NotificationKind::Success,
                        message: messages::ORDER_SENT.to_string(),
                    });
                    self.state.order_form.finish_submit();
                    let order_modal = self.config.order_modal.clone();
                    self.state.close_modal(&order_modal);
                    tracing::info!("order sent");
                }
            }
            Action::ShowNotification { kind, message } => {
                tracing::info!("{} notification: {}", kind, message);
                let id = self
                    .state
                    .notifications
                    .show(kind, message, self.scheduler.now_ms());
                self.scheduler
                    .schedule(DISMISS_AFTER_MS, Action::NotificationTimeout { id });
            }
            Action::NotificationTimeout { id } => {
                // Stale once a newer notification evicted this one.
                if self.state.notifications.begin_exit(id) {
                    self.scheduler
                        .schedule(EXIT_AFTER_MS, Action::RemoveNotification { id });
                    tracing::debug!("notification {} leaving", id);
                }
            }
            Action::RemoveNotification { id } => {
                if self.state.notifications.remove(id) {
                    tracing::debug!("notification {} removed", id);
                }
            }
            Action::DismissNotification => {
                // The close click tears the toast down with no exit phase;
                // the pending expiry timer will find the slot empty.
                if let Some(id) = self.state.notifications.dismiss() {
                    tracing::debug!("notification {} dismissed", id);
                }
            }
        }
    }

    fn adjust_calculator(&mut self, field: CalcField, raw: &str) {
        let calc = &self.config.calculator;
        match field {
            CalcField::Work => {
                if let Ok(base) = raw.trim().parse::<Decimal>() {
                    self.state.calculator.work = WorkType::from_base(base);
                } else {
                    tracing::warn!("ignoring work type '{}'", raw);
                    return;
                }
            }
            CalcField::Pages => {
                if let Ok(pages) = raw.trim().parse::<u32>() {
                    self.state.calculator.pages = calc.clamp_pages(pages);
                } else {
                    tracing::warn!("ignoring page count '{}'", raw);
                    return;
                }
            }
            CalcField::Deadline => match raw.trim().parse::<Decimal>().map(DeadlineFactor::new) {
                Ok(Ok(factor)) => self.state.calculator.deadline = factor,
                _ => {
                    tracing::warn!("ignoring deadline factor '{}'", raw);
                    return;
                }
            },
        }
        self.state.calculator.reprice();
        tracing::debug!(
            "{} set to '{}', price now {}",
            field.name(),
            raw.trim(),
            self.state.calculator.quote
        );
    }
}

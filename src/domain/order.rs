use crate::domain::validation::{is_blank, is_valid_email, is_valid_phone};
use std::collections::{BTreeMap, BTreeSet};

/// Simulated network latency between accepting an order and confirming it.
pub const SUBMIT_DELAY_MS: u64 = 1500;

const IDLE_LABEL: &str = "Отправить заявку";
const SENDING_LABEL: &str = "Отправляем...";

/// User-facing strings, verbatim from the page.
pub mod messages {
    pub const MISSING_FIELDS: &str = "Пожалуйста, заполните все обязательные поля";
    pub const INVALID_EMAIL: &str = "Пожалуйста, введите корректный email";
    pub const INVALID_PHONE: &str = "Пожалуйста, введите корректный номер телефона";
    pub const ORDER_SENT: &str =
        "Заявка успешно отправлена! Мы свяжемся с вами в течение 15 минут.";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OrderField {
    Name,
    Email,
    Phone,
    Topic,
    Comment,
}

impl OrderField {
    /// Fields the form refuses to submit without.
    pub const REQUIRED: [OrderField; 3] = [OrderField::Name, OrderField::Email, OrderField::Phone];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Topic => "topic",
            Self::Comment => "comment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Done,
}

impl FormPhase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Submitting => "submitting",
            Self::Done => "done",
        }
    }
}

/// What a submit attempt decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the message belongs in an error notification.
    Rejected(&'static str),
    /// All checks passed; completion should be scheduled.
    Accepted,
    /// The submit control is disabled while a submission is in flight.
    Ignored,
}

/// The submit button's visible state.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitControl {
    pub label: String,
    pub enabled: bool,
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self {
            label: IDLE_LABEL.to_string(),
            enabled: true,
        }
    }
}

/// The order form: current field values, validation marks, the submit
/// control, and the submission state machine.
///
/// Validation failures are page state (marks plus a notification message),
/// not errors; the form always stays editable.
#[derive(Debug, Default)]
pub struct OrderForm {
    values: BTreeMap<OrderField, String>,
    errors: BTreeSet<OrderField>,
    phase: FormPhase,
    control: SubmitControl,
}

impl OrderForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_value(&mut self, field: OrderField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn value(&self, field: OrderField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_marked(&self, field: OrderField) -> bool {
        self.errors.contains(&field)
    }

    pub fn marked_fields(&self) -> impl Iterator<Item = OrderField> + '_ {
        self.errors.iter().copied()
    }

    pub fn control(&self) -> &SubmitControl {
        &self.control
    }

    /// Runs the submit attempt: clears old marks, checks required fields,
    /// then email shape, then phone shape. The first failing class wins and
    /// the rest are skipped.
    pub fn begin_submit(&mut self) -> SubmitOutcome {
        if self.phase == FormPhase::Submitting {
            return SubmitOutcome::Ignored;
        }

        // Transient while the checks run.
        self.phase = FormPhase::Validating;
        self.errors.clear();

        let blank: Vec<OrderField> = OrderField::REQUIRED
            .into_iter()
            .filter(|field| is_blank(self.value(*field)))
            .collect();
        if !blank.is_empty() {
            self.errors.extend(blank);
            self.phase = FormPhase::Idle;
            return SubmitOutcome::Rejected(messages::MISSING_FIELDS);
        }

        if !is_valid_email(self.value(OrderField::Email)) {
            self.errors.insert(OrderField::Email);
            self.phase = FormPhase::Idle;
            return SubmitOutcome::Rejected(messages::INVALID_EMAIL);
        }

        if !is_valid_phone(self.value(OrderField::Phone)) {
            self.errors.insert(OrderField::Phone);
            self.phase = FormPhase::Idle;
            return SubmitOutcome::Rejected(messages::INVALID_PHONE);
        }

        self.phase = FormPhase::Submitting;
        self.control.label = SENDING_LABEL.to_string();
        self.control.enabled = false;
        SubmitOutcome::Accepted
    }

    /// Completes the simulated send: resets the fields, restores the submit
    /// control and lands in Done. There is no abort path; once Submitting,
    /// this always runs.
    pub fn finish_submit(&mut self) {
        self.values.clear();
        self.errors.clear();
        self.control = SubmitControl::default();
        self.phase = FormPhase::Done;
    }
}

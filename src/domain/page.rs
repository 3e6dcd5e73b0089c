use crate::domain::notification::NotificationRail;
use crate::domain::order::OrderForm;
use crate::domain::pricing::{DeadlineFactor, PageCount, PriceQuote, WorkType};
use crate::error::{LandingError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::collections::BTreeSet;

/// Gap kept between a scrolled-to section and the sticky header.
pub const SCROLL_GAP_PX: u32 = 20;
/// Header height assumed when the page description does not provide one.
pub const DEFAULT_HEADER_PX: u32 = 80;
/// Delay before a freshly opened modal grabs focus.
pub const FOCUS_DELAY_MS: u64 = 300;

/// A modal dialog and its focusable controls, in tab order.
#[derive(Debug, Clone, Deserialize)]
pub struct ModalSpec {
    pub id: String,
    #[serde(default)]
    pub controls: Vec<String>,
}

/// An in-page section that anchor links can scroll to.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionSpec {
    pub id: String,
    pub offset_px: u32,
}

/// Calculator slider bounds and initial selections.
#[derive(Debug, Clone, Deserialize)]
pub struct CalculatorSpec {
    pub default_work_base: Decimal,
    pub pages_min: u32,
    pub pages_max: u32,
    pub default_pages: u32,
    pub default_deadline: Decimal,
}

impl CalculatorSpec {
    /// Clamps a slider value into the configured range. Degenerate bounds
    /// collapse to the lower edge instead of panicking.
    pub fn clamp_pages(&self, pages: u32) -> PageCount {
        let floor = self.pages_min.max(1);
        PageCount::clamped(pages.clamp(floor, self.pages_max.max(floor)))
    }
}

/// Static description of the page the engine runs against: which modals,
/// sections, FAQ items and calculator bounds exist. Loadable from JSON so a
/// different page layout can be replayed without recompiling.
#[derive(Debug, Clone, Deserialize)]
pub struct PageConfig {
    #[serde(default = "default_header_px")]
    pub header_px: u32,
    pub sections: Vec<SectionSpec>,
    pub modals: Vec<ModalSpec>,
    pub order_modal: String,
    pub faq_items: Vec<String>,
    pub calculator: CalculatorSpec,
}

fn default_header_px() -> u32 {
    DEFAULT_HEADER_PX
}

impl PageConfig {
    /// The Studland landing page as shipped.
    pub fn standard() -> Self {
        Self {
            header_px: DEFAULT_HEADER_PX,
            sections: vec![
                SectionSpec { id: "hero".into(), offset_px: 0 },
                SectionSpec { id: "advantages".into(), offset_px: 680 },
                SectionSpec { id: "calculator".into(), offset_px: 1420 },
                SectionSpec { id: "steps".into(), offset_px: 2160 },
                SectionSpec { id: "reviews".into(), offset_px: 2840 },
                SectionSpec { id: "faq".into(), offset_px: 3520 },
                SectionSpec { id: "contacts".into(), offset_px: 4180 },
            ],
            modals: vec![
                ModalSpec {
                    id: "orderModal".into(),
                    controls: vec![
                        "name".into(),
                        "phone".into(),
                        "email".into(),
                        "topic".into(),
                        "comment".into(),
                    ],
                },
                ModalSpec {
                    id: "consultModal".into(),
                    controls: vec!["name".into(), "phone".into()],
                },
            ],
            order_modal: "orderModal".into(),
            faq_items: vec![
                "faq-price".into(),
                "faq-deadlines".into(),
                "faq-guarantees".into(),
                "faq-revisions".into(),
            ],
            calculator: CalculatorSpec {
                default_work_base: dec!(800),
                pages_min: 1,
                pages_max: 100,
                default_pages: 10,
                default_deadline: dec!(1.0),
            },
        }
    }

    /// Sanity checks for configs loaded from JSON.
    pub fn validate(&self) -> Result<()> {
        let calc = &self.calculator;
        if calc.pages_min < 1 || calc.pages_min > calc.pages_max {
            return Err(LandingError::ValidationError(format!(
                "bad pages range {}..{}",
                calc.pages_min, calc.pages_max
            )));
        }
        if calc.default_pages < calc.pages_min || calc.default_pages > calc.pages_max {
            return Err(LandingError::ValidationError(format!(
                "default page count {} outside {}..{}",
                calc.default_pages, calc.pages_min, calc.pages_max
            )));
        }
        DeadlineFactor::new(calc.default_deadline)?;
        if self.modal(&self.order_modal).is_none() {
            return Err(LandingError::ValidationError(format!(
                "order modal '{}' is not declared",
                self.order_modal
            )));
        }
        Ok(())
    }

    pub fn modal(&self, id: &str) -> Option<&ModalSpec> {
        self.modals.iter().find(|m| m.id == id)
    }

    pub fn section_offset(&self, id: &str) -> Option<u32> {
        self.sections.iter().find(|s| s.id == id).map(|s| s.offset_px)
    }

    pub fn has_faq_item(&self, id: &str) -> bool {
        self.faq_items.iter().any(|item| item == id)
    }
}

/// The calculator's current selections and the quote derived from them.
#[derive(Debug)]
pub struct Calculator {
    pub work: WorkType,
    pub pages: PageCount,
    pub deadline: DeadlineFactor,
    pub quote: PriceQuote,
}

impl Calculator {
    pub fn from_spec(spec: &CalculatorSpec) -> Self {
        let work = WorkType::from_base(spec.default_work_base);
        let pages = spec.clamp_pages(spec.default_pages);
        let deadline =
            DeadlineFactor::new(spec.default_deadline).unwrap_or(DeadlineFactor::STANDARD);
        let quote = PriceQuote::compute(work, pages, deadline);
        Self {
            work,
            pages,
            deadline,
            quote,
        }
    }

    /// Recomputes the quote from the current selections.
    pub fn reprice(&mut self) {
        self.quote = PriceQuote::compute(self.work, self.pages, self.deadline);
    }

    /// Mirrors the numeric label next to the pages slider.
    pub fn pages_readout(&self) -> String {
        self.pages.value().to_string()
    }
}

/// Currently focused control inside a modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusedControl {
    pub modal: String,
    pub control: String,
}

/// Everything on the page that can change under the user's fingers.
#[derive(Debug)]
pub struct PageState {
    pub menu_open: bool,
    pub scroll_top: u32,
    pub scroll_locked: bool,
    open_modals: BTreeSet<String>,
    pub focused: Option<FocusedControl>,
    faq_active: Option<String>,
    pub calculator: Calculator,
    pub order_form: OrderForm,
    pub notifications: NotificationRail,
}

impl PageState {
    pub fn new(config: &PageConfig) -> Self {
        Self {
            menu_open: false,
            scroll_top: 0,
            scroll_locked: false,
            open_modals: BTreeSet::new(),
            focused: None,
            faq_active: None,
            calculator: Calculator::from_spec(&config.calculator),
            order_form: OrderForm::new(),
            notifications: NotificationRail::new(),
        }
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Marks a modal visible and locks page scroll. Re-opening an already
    /// visible modal only refreshes the lock.
    pub fn open_modal(&mut self, id: &str) {
        self.open_modals.insert(id.to_string());
        self.scroll_locked = true;
    }

    /// Hides a modal. Closing something that is not open is a no-op; an
    /// actual close always releases the scroll lock (a single flag, not a
    /// counter, exactly like the page it models).
    pub fn close_modal(&mut self, id: &str) -> bool {
        let closed = self.open_modals.remove(id);
        if closed {
            self.scroll_locked = false;
            if self.focused.as_ref().is_some_and(|f| f.modal == id) {
                self.focused = None;
            }
        }
        closed
    }

    pub fn is_modal_open(&self, id: &str) -> bool {
        self.open_modals.contains(id)
    }

    pub fn open_modals(&self) -> impl Iterator<Item = &str> {
        self.open_modals.iter().map(String::as_str)
    }

    /// Single-open accordion: whatever was active closes first, and the
    /// clicked item opens only if it was not the active one.
    pub fn toggle_faq(&mut self, item: &str) {
        let was_active = self.faq_active.as_deref() == Some(item);
        self.faq_active = None;
        if !was_active {
            self.faq_active = Some(item.to_string());
        }
    }

    pub fn faq_active(&self) -> Option<&str> {
        self.faq_active.as_deref()
    }

    /// Scrolls so the section clears the header plus a small gap. Saturates
    /// at the top of the page, whatever the header height says.
    pub fn scroll_to_section(&mut self, offset_px: u32, header_px: u32) {
        self.scroll_top = offset_px.saturating_sub(header_px.saturating_add(SCROLL_GAP_PX));
    }
}

use crate::domain::page::PageState;
use crate::error::Result;
use std::io::Write;

/// Writes the end-of-session report as two-column CSV.
///
/// One row per observable piece of page state, then one `notice:<n>` row per
/// notification the session produced, in order of appearance.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    /// Creates a new `ReportWriter` over any `Write` sink (e.g., Stdout).
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_report(mut self, state: &PageState) -> Result<()> {
        self.write("item", "value")?;
        self.write("price", state.calculator.quote.to_string())?;
        self.write("pages", state.calculator.pages_readout())?;
        self.write("form_phase", state.order_form.phase().name())?;
        self.write("menu_open", state.menu_open.to_string())?;
        self.write("scroll_top", state.scroll_top.to_string())?;
        self.write("scroll_locked", state.scroll_locked.to_string())?;
        self.write("open_modals", state.open_modals().collect::<Vec<_>>().join(" "))?;
        let focused = state
            .focused
            .as_ref()
            .map(|f| format!("{}:{}", f.modal, f.control))
            .unwrap_or_default();
        self.write("focused", focused)?;
        self.write("faq_active", state.faq_active().unwrap_or_default())?;
        let current = state
            .notifications
            .current()
            .map(|n| format!("{}: {}", n.kind, n.message))
            .unwrap_or_default();
        self.write("notification", current)?;
        for (index, record) in state.notifications.log().iter().enumerate() {
            self.write(
                &format!("notice:{}", index + 1),
                format!("{}: {}", record.kind, record.message),
            )?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn write(&mut self, item: &str, value: impl AsRef<str>) -> Result<()> {
        self.writer.write_record([item, value.as_ref()])?;
        Ok(())
    }
}

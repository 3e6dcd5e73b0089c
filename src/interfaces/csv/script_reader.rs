use crate::domain::event::{CalcField, EventKind, PageEvent, Target};
use crate::domain::order::OrderField;
use crate::domain::ports::SessionStep;
use crate::error::{LandingError, Result};
use serde::Deserialize;
use std::io::Read;

/// A script row as it appears in the file, before any interpretation.
#[derive(Debug, Deserialize)]
struct ScriptRow {
    event: String,
    #[serde(default)]
    target: String,
    #[serde(default)]
    value: Option<String>,
}

/// Reads session steps from a CSV script.
///
/// This reader wraps `csv::Reader` and provides an iterator over
/// `Result<SessionStep>`. It handles whitespace trimming and rows with a
/// missing value column automatically; rows it cannot interpret come out as
/// errors carrying the offending line number.
pub struct ScriptReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ScriptReader<R> {
    /// Creates a new `ScriptReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and interprets script rows.
    pub fn steps(self) -> impl Iterator<Item = Result<SessionStep>> {
        self.reader
            .into_deserialize::<ScriptRow>()
            // Line 1 is the header.
            .zip(2u64..)
            .map(|(result, line)| match result {
                Ok(row) => {
                    parse_step(row).map_err(|reason| LandingError::ScriptError { line, reason })
                }
                Err(err) => Err(LandingError::CsvError(err)),
            })
    }
}

/// Parses one headerless `event,target,value` line, as fed on stdin in live
/// mode. Everything after the second comma belongs to the value, so free
/// text with commas needs no quoting there.
pub fn parse_line(line: &str) -> std::result::Result<SessionStep, String> {
    let mut parts = line.splitn(3, ',');
    let event = parts.next().unwrap_or_default().trim().to_string();
    let target = parts.next().unwrap_or_default().trim().to_string();
    let value = parts.next().map(|part| part.trim().to_string());
    parse_step(ScriptRow {
        event,
        target,
        value,
    })
}

fn parse_step(row: ScriptRow) -> std::result::Result<SessionStep, String> {
    let value = row.value.unwrap_or_default();
    if row.event == "advance" {
        let ms = value
            .parse::<u64>()
            .map_err(|_| format!("bad advance interval '{value}'"))?;
        return Ok(SessionStep::Advance { ms });
    }

    let kind = parse_kind(&row.event)?;
    let target = parse_target(&row.target)?;
    let event = if value.is_empty() {
        PageEvent::new(kind, target)
    } else {
        PageEvent::with_detail(kind, target, value)
    };
    Ok(SessionStep::Event(event))
}

fn parse_kind(name: &str) -> std::result::Result<EventKind, String> {
    match name {
        "click" => Ok(EventKind::Click),
        "input" => Ok(EventKind::Input),
        "change" => Ok(EventKind::Change),
        "submit" => Ok(EventKind::Submit),
        "keydown" => Ok(EventKind::Keydown),
        other => Err(format!("unknown event '{other}'")),
    }
}

fn parse_target(raw: &str) -> std::result::Result<Target, String> {
    if raw.is_empty() {
        return Ok(Target::Body);
    }
    if raw == "menu" {
        return Ok(Target::MenuToggle);
    }

    let Some((prefix, rest)) = raw.split_once(':') else {
        return Err(format!("unknown target '{raw}'"));
    };
    match prefix {
        "modal" => Ok(Target::ModalSurface {
            modal: rest.to_string(),
        }),
        "open" => Ok(Target::ModalTrigger {
            modal: rest.to_string(),
        }),
        "anchor" => Ok(Target::Anchor {
            href: rest.to_string(),
        }),
        "faq" => Ok(Target::FaqQuestion {
            item: rest.to_string(),
        }),
        "calc" => match rest {
            "work" => Ok(Target::CalcControl(CalcField::Work)),
            "pages" => Ok(Target::CalcControl(CalcField::Pages)),
            "deadline" => Ok(Target::CalcControl(CalcField::Deadline)),
            other => Err(format!("unknown calculator control '{other}'")),
        },
        "order" => match rest {
            "name" => Ok(Target::OrderInput(OrderField::Name)),
            "email" => Ok(Target::OrderInput(OrderField::Email)),
            "phone" => Ok(Target::OrderInput(OrderField::Phone)),
            "topic" => Ok(Target::OrderInput(OrderField::Topic)),
            "comment" => Ok(Target::OrderInput(OrderField::Comment)),
            other => Err(format!("unknown order field '{other}'")),
        },
        "form" if rest == "order" => Ok(Target::OrderForm),
        "notification" if rest == "close" => Ok(Target::NotificationClose),
        _ => Err(format!("unknown target '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(data: &str) -> Vec<Result<SessionStep>> {
        ScriptReader::new(data.as_bytes()).steps().collect()
    }

    #[test]
    fn test_reader_valid_stream() {
        let data = "event, target, value\n\
                    click, open:orderModal,\n\
                    input, order:email, ivan@example.com\n\
                    advance, , 1500";
        let steps = read_all(data);

        assert_eq!(steps.len(), 3);
        assert_eq!(
            *steps[0].as_ref().unwrap(),
            SessionStep::Event(PageEvent::new(
                EventKind::Click,
                Target::ModalTrigger {
                    modal: "orderModal".into()
                }
            ))
        );
        assert_eq!(
            *steps[1].as_ref().unwrap(),
            SessionStep::Event(PageEvent::with_detail(
                EventKind::Input,
                Target::OrderInput(OrderField::Email),
                "ivan@example.com"
            ))
        );
        assert_eq!(
            *steps[2].as_ref().unwrap(),
            SessionStep::Advance { ms: 1500 }
        );
    }

    #[test]
    fn test_reader_accepts_short_rows() {
        let steps = read_all("event,target,value\nclick,menu");
        assert_eq!(
            *steps[0].as_ref().unwrap(),
            SessionStep::Event(PageEvent::new(EventKind::Click, Target::MenuToggle))
        );
    }

    #[test]
    fn test_keydown_carries_the_key() {
        let steps = read_all("event,target,value\nkeydown,,Escape");
        assert_eq!(
            *steps[0].as_ref().unwrap(),
            SessionStep::Event(PageEvent::with_detail(
                EventKind::Keydown,
                Target::Body,
                "Escape"
            ))
        );
    }

    #[test]
    fn test_unknown_event_reports_its_line() {
        let steps = read_all("event,target,value\nclick,menu,\nhover,menu,");
        assert!(steps[0].is_ok());
        let err = steps[1].as_ref().unwrap_err();
        assert_eq!(err.to_string(), "script line 3: unknown event 'hover'");
    }

    #[test]
    fn test_unknown_target_is_an_error() {
        let steps = read_all("event,target,value\nclick,banner:promo,");
        assert!(steps[0].is_err());
    }

    #[test]
    fn test_bad_advance_interval_is_an_error() {
        let steps = read_all("event,target,value\nadvance,,soon");
        let err = steps[0].as_ref().unwrap_err();
        assert_eq!(
            err.to_string(),
            "script line 2: bad advance interval 'soon'"
        );
    }

    #[test]
    fn test_bare_line_keeps_commas_in_the_value() {
        let step = parse_line("input, order:topic, Экономика, 3 курс").unwrap();
        assert_eq!(
            step,
            SessionStep::Event(PageEvent::with_detail(
                EventKind::Input,
                Target::OrderInput(OrderField::Topic),
                "Экономика, 3 курс"
            ))
        );
    }
}

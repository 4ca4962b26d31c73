//! Calendar documents: options, event rendering, and document assembly.
//!
//! Text fields and custom values are emitted as-is: no RFC 5545 escaping
//! and no 75-octet line folding is applied.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::delivery::{DEFAULT_EXTENSION, DEFAULT_FILENAME, Delivery};
use crate::error::{CalendarError, CalendarResult, Field};
use crate::event::{EventBlock, EventInput};
use crate::time::{DateLike, StampMode, local_now};

/// UID domain used when the caller does not pick one.
pub const DEFAULT_UID_DOMAIN: &str = "default";

/// Product identity used when the caller does not pick one.
pub const DEFAULT_PRODUCT_ID: &str = "Calendar";

const SUMMARY_LANGUAGE: &str = "en-us";

/// Line terminator used between document fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineEnding {
    /// `\n`.
    #[default]
    Lf,
    /// `\r\n`, for consumers that insist on strict RFC 5545 line breaks.
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Document-wide settings, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarOptions {
    /// Domain part of every event UID (`<ordinal>@<uid_domain>`).
    pub uid_domain: String,
    /// Value of the document's `PRODID` field.
    pub product_id: String,
    /// Line terminator used throughout the document.
    pub line_ending: LineEnding,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
            product_id: DEFAULT_PRODUCT_ID.to_string(),
            line_ending: LineEnding::default(),
        }
    }
}

impl CalendarOptions {
    pub fn with_uid_domain(mut self, uid_domain: impl Into<String>) -> Self {
        self.uid_domain = uid_domain.into();
        self
    }

    pub fn with_product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = product_id.into();
        self
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }
}

/// An iCalendar document under construction.
///
/// Events are rendered when added and held as immutable [`EventBlock`]s in
/// insertion order; a failed add never touches the collection. [`render`]
/// joins the blocks with the document preamble and postamble.
///
/// ```
/// use icsforge_core::{Calendar, EventInput};
///
/// let mut calendar = Calendar::with_defaults();
/// calendar.add_event(&EventInput::all_day(
///     "Christmas",
///     "Merry Christmas!",
///     "Bethlehem",
///     "2013-12-25",
/// ))?;
/// let text = calendar.render()?;
/// assert!(text.starts_with("BEGIN:VCALENDAR"));
/// # Ok::<(), icsforge_core::CalendarError>(())
/// ```
///
/// [`render`]: Calendar::render
#[derive(Debug, Clone)]
pub struct Calendar {
    options: CalendarOptions,
    events: Vec<EventBlock>,
}

impl Calendar {
    pub fn new(options: CalendarOptions) -> Self {
        Self {
            options,
            events: Vec::new(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(CalendarOptions::default())
    }

    pub fn options(&self) -> &CalendarOptions {
        &self.options
    }

    /// Rendered blocks in insertion order.
    pub fn events(&self) -> &[EventBlock] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Renders the event and appends it, stamped with the current time.
    ///
    /// The event's UID ordinal is the event count before insertion. Returns
    /// the stored block. On failure nothing is appended.
    pub fn add_event(&mut self, event: &EventInput) -> CalendarResult<&EventBlock> {
        self.add_event_at(event, local_now())
    }

    /// [`add_event`] with an explicit creation stamp.
    ///
    /// [`add_event`]: Calendar::add_event
    pub fn add_event_at(
        &mut self,
        event: &EventInput,
        now: NaiveDateTime,
    ) -> CalendarResult<&EventBlock> {
        let uid = self.events.len();
        let text = render_event(event, uid, now, &self.options)?;
        debug!(uid, subject = %event.subject, "event appended");
        self.events.push(EventBlock::new(uid, text));
        Ok(&self.events[uid])
    }

    /// Convenience for a single-day, full-day event.
    pub fn add_all_day_event(
        &mut self,
        subject: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        day: impl Into<DateLike>,
    ) -> CalendarResult<&EventBlock> {
        self.add_event(&EventInput::all_day(subject, description, location, day))
    }

    /// Renders the whole document.
    ///
    /// Fails with [`CalendarError::EmptyCalendar`] when no events have been
    /// added; a preamble-only document is never produced.
    pub fn render(&self) -> CalendarResult<String> {
        if self.events.is_empty() {
            return Err(CalendarError::EmptyCalendar);
        }
        let mut parts: Vec<String> = vec![
            "BEGIN:VCALENDAR".to_string(),
            format!("PRODID:{}", self.options.product_id),
            "VERSION:2.0".to_string(),
        ];
        parts.extend(self.events.iter().map(|block| block.as_str().to_string()));
        parts.push("END:VCALENDAR".to_string());
        Ok(parts.join(self.options.line_ending.as_str()))
    }

    /// Renders the document and hands it to a delivery sink.
    ///
    /// `filename` and `extension` default to `"calendar"` and `"ics"`. The
    /// sink is only reached when rendering succeeds. Returns the rendered
    /// text.
    pub fn export_to<D>(
        &self,
        sink: &mut D,
        filename: Option<&str>,
        extension: Option<&str>,
    ) -> CalendarResult<String>
    where
        D: Delivery + ?Sized,
    {
        let text = self.render()?;
        let filename = filename.unwrap_or(DEFAULT_FILENAME);
        let extension = extension.unwrap_or(DEFAULT_EXTENSION);
        sink.deliver(&text, filename, extension)?;
        debug!(
            filename = %filename,
            extension = %extension,
            events = self.events.len(),
            "calendar exported"
        );
        Ok(text)
    }
}

/// Renders one `VEVENT` block.
///
/// Checks run before any text is produced: subject, description, and
/// location must be non-empty (in that order), start and end must resolve,
/// and a structured recurrence must validate. The recurrence line sits
/// between the description and the creation stamp.
fn render_event(
    event: &EventInput,
    uid: usize,
    now: NaiveDateTime,
    options: &CalendarOptions,
) -> CalendarResult<String> {
    if event.subject.is_empty() {
        return Err(CalendarError::MissingField(Field::Subject));
    }
    if event.description.is_empty() {
        return Err(CalendarError::MissingField(Field::Description));
    }
    if event.location.is_empty() {
        return Err(CalendarError::MissingField(Field::Location));
    }

    let start = event
        .start
        .resolve()
        .ok_or_else(|| CalendarError::InvalidDate {
            field: Field::Start,
            input: event.start.to_string(),
        })?;
    let end = event.end.resolve().ok_or_else(|| CalendarError::InvalidDate {
        field: Field::End,
        input: event.end.to_string(),
    })?;

    let recurrence_line = match &event.recurrence {
        Some(recurrence) => Some(recurrence.to_line()?),
        None => None,
    };

    let mode = StampMode::for_event(event.full_day);
    let tag = mode.value_tag();

    let mut lines = vec![
        "BEGIN:VEVENT".to_string(),
        format!("UID:{uid}@{}", options.uid_domain),
        "CLASS:PUBLIC".to_string(),
        format!("DESCRIPTION:{}", event.description),
    ];
    if let Some(line) = recurrence_line {
        lines.push(line);
    }
    lines.push(format!(
        "DTSTAMP;VALUE=DATE-TIME:{}",
        StampMode::DateTime.stamp(now)
    ));
    lines.push(format!("DTSTART;VALUE={tag}:{}", mode.stamp(start)));
    lines.push(format!("DTEND;VALUE={tag}:{}", mode.stamp(end)));
    lines.push(format!("LOCATION:{}", event.location));
    lines.push(format!(
        "SUMMARY;LANGUAGE={SUMMARY_LANGUAGE}:{}",
        event.subject
    ));
    lines.push("TRANSP:TRANSPARENT".to_string());
    for (key, value) in &event.custom_fields {
        lines.push(format!("{}:{value}", key.to_uppercase()));
    }
    lines.push("END:VEVENT".to_string());

    Ok(lines.join(options.line_ending.as_str()))
}

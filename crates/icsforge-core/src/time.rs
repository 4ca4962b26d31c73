//! Date handling for calendar events.
//!
//! This module provides [`DateLike`] for accepting loosely-typed date inputs
//! at the crate boundary, and [`StampMode`] for rendering them into the two
//! canonical iCalendar textual forms (date-only and date-time).

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Compact iCalendar stamp for all-day values (`20131225`).
pub const DATE_ONLY_FORMAT: &str = "%Y%m%d";

/// Compact iCalendar stamp for timed values (`20131225T103000`).
pub const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// A loosely-typed date input accepted at the crate boundary.
///
/// Callers can hand over whatever date representation they already hold:
/// - **DateTime**: a naive local date and time
/// - **Date**: a naive date (resolved at midnight)
/// - **Timestamp**: epoch milliseconds, read as UTC wall time
/// - **Text**: a date string in one of the supported formats
///
/// Everything is normalized through [`DateLike::resolve`]; unparsable inputs
/// are rejected there and never reach the rendering pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateLike {
    /// A specific date and time, no timezone attached.
    DateTime(NaiveDateTime),
    /// A date without a time of day.
    Date(NaiveDate),
    /// Milliseconds since the Unix epoch, read as UTC wall time.
    Timestamp(i64),
    /// A textual date; parsed lazily by [`DateLike::resolve`].
    Text(String),
}

impl DateLike {
    /// Resolves this input to a concrete date and time.
    ///
    /// Dates resolve to midnight. Text inputs accept ISO-ish forms
    /// (`2013-12-25`, `2013-12-25T10:30:00`, space-separated variant, an
    /// optional trailing `Z` is ignored), US `M/D/YYYY`, and the compact
    /// iCalendar stamps `YYYYMMDD` / `YYYYMMDDTHHMMSS`.
    ///
    /// Returns `None` when the input cannot be read as a date.
    pub fn resolve(&self) -> Option<NaiveDateTime> {
        match self {
            Self::DateTime(dt) => Some(*dt),
            Self::Date(date) => date.and_hms_opt(0, 0, 0),
            Self::Timestamp(millis) => {
                DateTime::from_timestamp_millis(*millis).map(|dt| dt.naive_utc())
            }
            Self::Text(text) => parse_text(text),
        }
    }

    /// Returns `true` if this input resolves to a valid date.
    pub fn is_valid(&self) -> bool {
        self.resolve().is_some()
    }
}

impl fmt::Display for DateLike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DateTime(dt) => write!(f, "{}", dt),
            Self::Date(date) => write!(f, "{}", date),
            Self::Timestamp(millis) => write!(f, "{}", millis),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<NaiveDateTime> for DateLike {
    fn from(dt: NaiveDateTime) -> Self {
        Self::DateTime(dt)
    }
}

impl From<NaiveDate> for DateLike {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<i64> for DateLike {
    fn from(millis: i64) -> Self {
        Self::Timestamp(millis)
    }
}

impl From<&str> for DateLike {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for DateLike {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Parses a textual date input.
///
/// Handles formats like:
/// - 2013-12-25T10:30:00 (ISO, seconds and fraction optional)
/// - 2013-12-25 10:30:00 (space-separated variant)
/// - 2013-12-25 (date only)
/// - 12/25/2013 (US order, single-digit month/day accepted)
/// - 20131225T103000 / 20131225 (compact iCalendar stamps)
///
/// A trailing `Z` is stripped; no timezone conversion is applied.
fn parse_text(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    let text = text.strip_suffix('Z').unwrap_or(text);

    // Compact date (YYYYMMDD): guard on all-digits so it is not confused
    // with other numeric forms.
    if text.len() == 8 && text.chars().all(|c| c.is_ascii_digit()) {
        return NaiveDate::parse_from_str(text, DATE_ONLY_FORMAT)
            .ok()?
            .and_hms_opt(0, 0, 0);
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(text, DATE_TIME_FORMAT) {
        return Some(dt);
    }

    const DATE_TIME_FORMATS: [&str; 6] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }

    const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Selects between the two canonical iCalendar stamp forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StampMode {
    /// `YYYYMMDD`, used for all-day events.
    DateOnly,
    /// `YYYYMMDDTHHMMSS`, used for timed events and creation stamps.
    DateTime,
}

impl StampMode {
    /// Returns the stamp mode for an event with the given full-day flag.
    pub fn for_event(full_day: bool) -> Self {
        if full_day { Self::DateOnly } else { Self::DateTime }
    }

    /// Returns the `VALUE=` parameter matching this mode.
    pub fn value_tag(&self) -> &'static str {
        match self {
            Self::DateOnly => "DATE",
            Self::DateTime => "DATE-TIME",
        }
    }

    /// Renders a resolved date in this mode.
    pub fn stamp(&self, dt: NaiveDateTime) -> String {
        let format = match self {
            Self::DateOnly => DATE_ONLY_FORMAT,
            Self::DateTime => DATE_TIME_FORMAT,
        };
        dt.format(format).to_string()
    }
}

/// Returns the current naive local time.
///
/// Creation stamps use local wall time with no timezone conversion, matching
/// how event dates themselves are rendered.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

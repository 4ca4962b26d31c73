//! Error types for calendar building and delivery.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::recurrence::RecurrenceError;

/// Result alias for calendar operations.
pub type CalendarResult<T> = Result<T, CalendarError>;

/// A required event field, named in rejection errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Subject,
    Description,
    Location,
    Start,
    End,
}

impl Field {
    /// Returns the lowercase field name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::Description => "description",
            Self::Location => "location",
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while building or delivering a calendar.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// A required event field was empty.
    #[error("missing event field: {0}")]
    MissingField(Field),

    /// An event date could not be resolved.
    #[error("unparsable {field} date: {input}")]
    InvalidDate { field: Field, input: String },

    /// The event carried a recurrence rule that failed validation.
    #[error("invalid recurrence rule: {0}")]
    Recurrence(#[from] RecurrenceError),

    /// Rendering was requested on a calendar with no events.
    #[error("calendar contains no events")]
    EmptyCalendar,

    /// Writing the rendered document to its sink failed.
    #[error("delivery failed: {0}")]
    Delivery(#[from] io::Error),
}

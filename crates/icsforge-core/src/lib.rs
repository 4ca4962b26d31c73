//! iCalendar (RFC 5545) document building: events, recurrence rules, delivery

pub mod calendar;
pub mod delivery;
pub mod error;
pub mod event;
pub mod recurrence;
pub mod time;

pub use calendar::{
    Calendar, CalendarOptions, DEFAULT_PRODUCT_ID, DEFAULT_UID_DOMAIN, LineEnding,
};
pub use delivery::{CONTENT_TYPE, DEFAULT_EXTENSION, DEFAULT_FILENAME, Delivery, FileDelivery};
pub use error::{CalendarError, CalendarResult, Field};
pub use event::{EventBlock, EventInput};
pub use recurrence::{
    ByDay, Frequency, NormalizedRecurrence, Recurrence, RecurrenceError, RecurrenceRule,
};
pub use time::{DATE_ONLY_FORMAT, DATE_TIME_FORMAT, DateLike, StampMode, local_now};

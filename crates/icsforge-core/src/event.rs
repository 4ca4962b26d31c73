//! Event inputs and rendered event blocks.

use serde::{Deserialize, Serialize};

use crate::recurrence::Recurrence;
use crate::time::DateLike;

/// An event to be added to a calendar.
///
/// The subject, description, and location must be non-empty; the calendar
/// rejects the event otherwise. Dates accept anything [`DateLike`] does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInput {
    /// Short title, rendered as the event summary.
    pub subject: String,
    /// Longer body text.
    pub description: String,
    /// Where the event takes place.
    pub location: String,
    /// Renders dates without a time component when set.
    #[serde(default)]
    pub full_day: bool,
    /// When the event starts.
    pub start: DateLike,
    /// When the event ends.
    pub end: DateLike,
    /// Optional repeat rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
    /// Extra properties appended to the block, in the order given.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<(String, String)>,
}

impl EventInput {
    /// Creates a timed event.
    pub fn new(
        subject: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        start: impl Into<DateLike>,
        end: impl Into<DateLike>,
    ) -> Self {
        Self {
            subject: subject.into(),
            description: description.into(),
            location: location.into(),
            full_day: false,
            start: start.into(),
            end: end.into(),
            recurrence: None,
            custom_fields: Vec::new(),
        }
    }

    /// Creates a full-day event covering a single day.
    pub fn all_day(
        subject: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        day: impl Into<DateLike>,
    ) -> Self {
        let day = day.into();
        Self {
            subject: subject.into(),
            description: description.into(),
            location: location.into(),
            full_day: true,
            start: day.clone(),
            end: day,
            recurrence: None,
            custom_fields: Vec::new(),
        }
    }

    pub fn with_full_day(mut self, full_day: bool) -> Self {
        self.full_day = full_day;
        self
    }

    pub fn with_recurrence(mut self, recurrence: impl Into<Recurrence>) -> Self {
        self.recurrence = Some(recurrence.into());
        self
    }

    /// Appends an extra property; the key is uppercased at render time.
    pub fn with_custom_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_fields.push((key.into(), value.into()));
        self
    }
}

/// A rendered `VEVENT` block held by a calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBlock {
    uid: usize,
    text: String,
}

impl EventBlock {
    pub fn new(uid: usize, text: String) -> Self {
        Self { uid, text }
    }

    /// Ordinal assigned when the event was added.
    pub fn uid(&self) -> usize {
        self.uid
    }

    /// The rendered block text.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recurrence::RecurrenceRule;

    mod construction {
        use super::*;

        #[test]
        fn timed_event() {
            let event = EventInput::new(
                "Standup",
                "Daily sync",
                "Room 4",
                "2013-12-25T10:30:00",
                "2013-12-25T10:45:00",
            );
            assert_eq!(event.subject, "Standup");
            assert_eq!(event.description, "Daily sync");
            assert_eq!(event.location, "Room 4");
            assert!(!event.full_day);
            assert_eq!(event.recurrence, None);
            assert!(event.custom_fields.is_empty());
        }

        #[test]
        fn all_day_event_mirrors_the_day() {
            let event = EventInput::all_day("Christmas", "Presents", "Home", "12/25/2013");
            assert!(event.full_day);
            assert_eq!(event.start, event.end);
            assert_eq!(event.start, DateLike::Text("12/25/2013".to_string()));
        }
    }

    mod builders {
        use super::*;

        #[test]
        fn recurrence_accepts_rules_and_raw_strings() {
            let event = EventInput::new("A", "B", "C", "2013-12-25", "2013-12-25")
                .with_recurrence(RecurrenceRule::new("DAILY"));
            assert!(matches!(event.recurrence, Some(Recurrence::Rule(_))));

            let event = EventInput::new("A", "B", "C", "2013-12-25", "2013-12-25")
                .with_recurrence("RRULE:FREQ=DAILY");
            assert_eq!(
                event.recurrence,
                Some(Recurrence::Raw("RRULE:FREQ=DAILY".to_string()))
            );
        }

        #[test]
        fn custom_fields_keep_insertion_order() {
            let event = EventInput::new("A", "B", "C", "2013-12-25", "2013-12-25")
                .with_custom_field("room", "A1")
                .with_custom_field("floor", "3");
            assert_eq!(
                event.custom_fields,
                vec![
                    ("room".to_string(), "A1".to_string()),
                    ("floor".to_string(), "3".to_string()),
                ]
            );
        }

        #[test]
        fn full_day_flag_can_be_toggled() {
            let event =
                EventInput::new("A", "B", "C", "2013-12-25", "2013-12-25").with_full_day(true);
            assert!(event.full_day);
        }
    }

    mod serde_payloads {
        use super::*;

        #[test]
        fn full_payload_deserializes() {
            let event: EventInput = serde_json::from_str(
                r#"{
                    "subject": "Soccer Practice",
                    "description": "Practice at the park",
                    "location": "Park",
                    "start": "2013-12-25T10:30:00",
                    "end": "2013-12-25T12:00:00",
                    "recurrence": {"freq": "WEEKLY", "byday": ["MO", "WE", "FR"]},
                    "custom_fields": [["room", "A1"]]
                }"#,
            )
            .unwrap();
            assert_eq!(event.subject, "Soccer Practice");
            assert!(!event.full_day);
            assert!(matches!(event.recurrence, Some(Recurrence::Rule(_))));
            assert_eq!(
                event.custom_fields,
                vec![("room".to_string(), "A1".to_string())]
            );
        }

        #[test]
        fn optional_fields_default() {
            let event: EventInput = serde_json::from_str(
                r#"{
                    "subject": "Christmas",
                    "description": "Presents",
                    "location": "Home",
                    "start": "12/25/2013",
                    "end": "12/25/2013"
                }"#,
            )
            .unwrap();
            assert!(!event.full_day);
            assert_eq!(event.recurrence, None);
            assert!(event.custom_fields.is_empty());
        }

        #[test]
        fn empty_optionals_are_skipped_when_serializing() {
            let event = EventInput::new("A", "B", "C", "2013-12-25", "2013-12-25");
            let json = serde_json::to_string(&event).unwrap();
            assert!(!json.contains("recurrence"));
            assert!(!json.contains("custom_fields"));
        }
    }

    #[test]
    fn block_exposes_uid_and_text() {
        let block = EventBlock::new(2, "BEGIN:VEVENT\nEND:VEVENT".to_string());
        assert_eq!(block.uid(), 2);
        assert!(block.as_str().starts_with("BEGIN:VEVENT"));
    }
}

//! Recurrence rules (`RRULE`) for repeating events.
//!
//! Rules arrive as a loosely-typed [`RecurrenceRule`] so callers can fill in
//! only the parts they have. [`RecurrenceRule::validate`] checks the parts
//! against the grammar accepted here and produces a [`NormalizedRecurrence`]
//! that composes the property value. Callers who already hold a complete rule
//! line can bypass validation with [`Recurrence::Raw`]; it is emitted
//! verbatim, label and all.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::time::{DATE_ONLY_FORMAT, DateLike};

/// Errors raised by [`RecurrenceRule::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecurrenceError {
    #[error("recurrence frequency must be one of YEARLY, MONTHLY, WEEKLY, DAILY")]
    MissingOrUnknownFrequency,

    #[error("unparsable recurrence until date: {0}")]
    InvalidUntil(String),

    #[error("recurrence interval must be positive, got {0}")]
    InvalidInterval(i64),

    #[error("recurrence count must be positive, got {0}")]
    InvalidCount(i64),

    #[error("recurrence byday accepts at most 7 weekdays, got {0}")]
    ByDayTooLong(usize),

    #[error("unknown recurrence weekday: {0}")]
    InvalidByDay(String),
}

/// How often an event repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    Yearly,
    Monthly,
    Weekly,
    Daily,
}

impl Frequency {
    /// Parses an uppercase frequency keyword.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "YEARLY" => Some(Self::Yearly),
            "MONTHLY" => Some(Self::Monthly),
            "WEEKLY" => Some(Self::Weekly),
            "DAILY" => Some(Self::Daily),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yearly => "YEARLY",
            Self::Monthly => "MONTHLY",
            Self::Weekly => "WEEKLY",
            Self::Daily => "DAILY",
        }
    }
}

/// A weekday in the two-letter form `BYDAY` uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ByDay {
    #[serde(rename = "SU")]
    Sunday,
    #[serde(rename = "MO")]
    Monday,
    #[serde(rename = "TU")]
    Tuesday,
    #[serde(rename = "WE")]
    Wednesday,
    #[serde(rename = "TH")]
    Thursday,
    #[serde(rename = "FR")]
    Friday,
    #[serde(rename = "SA")]
    Saturday,
}

impl ByDay {
    /// Parses an uppercase two-letter weekday code.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "SU" => Some(Self::Sunday),
            "MO" => Some(Self::Monday),
            "TU" => Some(Self::Tuesday),
            "WE" => Some(Self::Wednesday),
            "TH" => Some(Self::Thursday),
            "FR" => Some(Self::Friday),
            "SA" => Some(Self::Saturday),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sunday => "SU",
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
        }
    }
}

/// A loosely-typed recurrence rule as supplied by the caller.
///
/// Every part is optional except the frequency, which [`validate`] insists
/// on. Weekday codes are checked as given: uppercase two-letter forms only.
///
/// [`validate`]: RecurrenceRule::validate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    /// Repeat frequency keyword (`YEARLY`, `MONTHLY`, `WEEKLY`, `DAILY`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freq: Option<String>,
    /// Last day the rule applies; the time of day is discarded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<DateLike>,
    /// Gap between occurrences, in units of the frequency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<i64>,
    /// Total number of occurrences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    /// Weekdays the rule applies to, as two-letter codes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub byday: Vec<String>,
}

impl RecurrenceRule {
    /// Creates a rule with the given frequency keyword.
    pub fn new(freq: impl Into<String>) -> Self {
        Self {
            freq: Some(freq.into()),
            ..Self::default()
        }
    }

    pub fn with_until(mut self, until: impl Into<DateLike>) -> Self {
        self.until = Some(until.into());
        self
    }

    pub fn with_interval(mut self, interval: i64) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn with_count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_byday<I, S>(mut self, days: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.byday = days.into_iter().map(Into::into).collect();
        self
    }

    /// Validates the rule and normalizes it for composition.
    ///
    /// Checks run in a fixed order: frequency, until, interval, count, then
    /// the weekday list. The weekday length cap applies to the list as given;
    /// duplicates are dropped afterwards, keeping the first occurrence of
    /// each code.
    pub fn validate(&self) -> Result<NormalizedRecurrence, RecurrenceError> {
        let freq = self
            .freq
            .as_deref()
            .and_then(Frequency::parse)
            .ok_or(RecurrenceError::MissingOrUnknownFrequency)?;

        let until = match &self.until {
            Some(date) => Some(
                date.resolve()
                    .ok_or_else(|| RecurrenceError::InvalidUntil(date.to_string()))?,
            ),
            None => None,
        };

        if let Some(interval) = self.interval {
            if interval <= 0 {
                return Err(RecurrenceError::InvalidInterval(interval));
            }
        }

        if let Some(count) = self.count {
            if count <= 0 {
                return Err(RecurrenceError::InvalidCount(count));
            }
        }

        if self.byday.len() > 7 {
            return Err(RecurrenceError::ByDayTooLong(self.byday.len()));
        }

        let mut seen: Vec<&str> = Vec::new();
        let mut byday = Vec::new();
        for value in &self.byday {
            if seen.contains(&value.as_str()) {
                continue;
            }
            seen.push(value.as_str());
            byday.push(
                ByDay::parse(value).ok_or_else(|| RecurrenceError::InvalidByDay(value.clone()))?,
            );
        }

        Ok(NormalizedRecurrence {
            freq,
            until,
            interval: self.interval,
            count: self.count,
            byday,
        })
    }
}

/// A validated recurrence rule, ready to compose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecurrence {
    pub freq: Frequency,
    pub until: Option<NaiveDateTime>,
    pub interval: Option<i64>,
    pub count: Option<i64>,
    pub byday: Vec<ByDay>,
}

impl NormalizedRecurrence {
    /// Composes the `RRULE` property value, without the label.
    ///
    /// Parts appear in a fixed order: `FREQ`, `UNTIL`, `INTERVAL`, `COUNT`,
    /// `BYDAY`. The until stamp renders the date followed by a literal
    /// midnight time (`YYYYMMDD000000Z`).
    pub fn compose(&self) -> String {
        let mut rule = format!("FREQ={}", self.freq.as_str());
        if let Some(until) = self.until {
            rule.push_str(&format!(";UNTIL={}000000Z", until.format(DATE_ONLY_FORMAT)));
        }
        if let Some(interval) = self.interval {
            rule.push_str(&format!(";INTERVAL={interval}"));
        }
        if let Some(count) = self.count {
            rule.push_str(&format!(";COUNT={count}"));
        }
        if !self.byday.is_empty() {
            let days: Vec<&str> = self.byday.iter().map(ByDay::as_str).collect();
            rule.push_str(&format!(";BYDAY={}", days.join(",")));
        }
        rule
    }
}

/// A recurrence attached to an event.
///
/// Deserializes from either a complete rule line (raw override) or a
/// structured rule object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Recurrence {
    /// A complete recurrence line supplied by the caller, label included.
    /// Emitted verbatim, without validation.
    Raw(String),
    /// A structured rule; validated and composed at render time.
    Rule(RecurrenceRule),
}

impl Recurrence {
    /// Renders the full recurrence line.
    ///
    /// Structured rules are validated and labelled `RRULE:`; raw overrides
    /// pass through verbatim and carry whatever label the caller chose.
    pub fn to_line(&self) -> Result<String, RecurrenceError> {
        match self {
            Self::Raw(raw) => Ok(raw.clone()),
            Self::Rule(rule) => Ok(format!("RRULE:{}", rule.validate()?.compose())),
        }
    }
}

impl From<RecurrenceRule> for Recurrence {
    fn from(rule: RecurrenceRule) -> Self {
        Self::Rule(rule)
    }
}

impl From<&str> for Recurrence {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_string())
    }
}

impl From<String> for Recurrence {
    fn from(raw: String) -> Self {
        Self::Raw(raw)
    }
}

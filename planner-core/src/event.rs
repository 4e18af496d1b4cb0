//! Event records.
//!
//! An `Event` is the only persisted entity. Both the local store and the
//! shell bridge file hold a JSON array of these, with camelCase keys so the
//! files stay readable by anything that produced the original layout.

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PlannerError, PlannerResult};

/// A planned occasion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Millisecond creation timestamp, as decimal text
    pub id: String,
    pub name: String,
    /// Free-form category tag ("birthday", "conference", ...)
    #[serde(rename = "type", default)]
    pub kind: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::guests")]
    pub expected_guests: u32,
    #[serde(default, deserialize_with = "lenient::budget")]
    pub budget: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
}

/// The user-supplied part of an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::guests")]
    pub expected_guests: u32,
    #[serde(default, deserialize_with = "lenient::budget")]
    pub budget: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One element of a stored event array.
///
/// Elements that do not read as an `Event` are kept verbatim, so rewriting
/// an array never drops records this version cannot interpret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Record {
    Event(Event),
    Unknown(serde_json::Value),
}

impl Record {
    pub fn id(&self) -> Option<&str> {
        match self {
            Record::Event(event) => Some(&event.id),
            Record::Unknown(value) => value.get("id").and_then(|id| id.as_str()),
        }
    }

    pub fn as_event(&self) -> Option<&Event> {
        match self {
            Record::Event(event) => Some(event),
            Record::Unknown(_) => None,
        }
    }
}

/// Events are created as upcoming and never move to another status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Upcoming,
}

impl Event {
    /// Build a stored event from form fields.
    ///
    /// `existing` is the collection the event will join. The id is the
    /// millisecond timestamp of `now`, bumped until it is free in `existing`.
    pub fn new(fields: NewEvent, existing: &[Event], now: DateTime<Utc>) -> Self {
        let created_at = now.trunc_subsecs(3);

        Event {
            id: next_id(existing, created_at),
            name: fields.name,
            kind: fields.kind,
            date: fields.date,
            location: fields.location,
            expected_guests: fields.expected_guests,
            budget: fields.budget,
            description: fields.description,
            status: EventStatus::Upcoming,
            created_at,
        }
    }

    /// Dated today or later (calendar-day comparison).
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.date >= today
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn next_id(existing: &[Event], now: DateTime<Utc>) -> String {
    let mut millis = now.timestamp_millis();
    loop {
        let candidate = millis.to_string();
        if !existing.iter().any(|e| e.id == candidate) {
            return candidate;
        }
        millis += 1;
    }
}

/// Largest budget a single event can carry. Larger input is clamped so
/// that totals stay finite.
pub const MAX_BUDGET: f64 = 1e12;

/// Parse a user-supplied date.
///
/// Accepts `YYYY-MM-DD` and full RFC 3339 timestamps (the calendar day in
/// UTC is used for the latter).
pub fn parse_date(s: &str) -> PlannerResult<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| PlannerError::InvalidDate(s.to_string()))
}

/// Read a guest count the way a browser reads `parseInt`.
///
/// Leading whitespace and an optional sign are skipped, the leading run of
/// digits is used and the rest ignored. Anything unreadable, or negative,
/// is 0.
pub fn parse_guests(input: &str) -> u32 {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if negative || end == 0 {
        return 0;
    }

    // Only overflow can fail here
    rest[..end].parse::<u32>().unwrap_or(u32::MAX)
}

/// Read a budget the way a browser reads `parseFloat`.
///
/// The longest valid decimal prefix is used. Non-finite, negative or
/// unreadable input is 0. Values above `MAX_BUDGET` are clamped to it.
pub fn parse_budget(input: &str) -> f64 {
    let s = input.trim_start();
    let b = s.as_bytes();
    let mut end = 0;

    if matches!(b.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < b.len() && b[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < b.len() && b[end] == b'.' {
        let mut j = end + 1;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        mantissa_digits += j - (end + 1);
        if mantissa_digits > 0 {
            end = j;
        }
    }

    if mantissa_digits == 0 {
        return 0.0;
    }

    if end < b.len() && (b[end] == b'e' || b[end] == b'E') {
        let mut j = end + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    match s[..end].parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v.min(MAX_BUDGET),
        _ => 0.0,
    }
}

/// Deserializers that coerce bad numeric input to 0 instead of failing
/// the whole record.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn guests<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => match n.as_f64() {
                Some(f) if f.is_finite() && f > 0.0 => f.trunc().min(u32::MAX as f64) as u32,
                _ => 0,
            },
            Value::String(s) => super::parse_guests(&s),
            _ => 0,
        })
    }

    pub fn budget<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => match n.as_f64() {
                Some(f) if f.is_finite() && f > 0.0 => f.min(super::MAX_BUDGET),
                _ => 0.0,
            },
            Value::String(s) => super::parse_budget(&s),
            _ => 0.0,
        })
    }
}

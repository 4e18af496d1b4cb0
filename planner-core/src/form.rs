//! The new-event form.
//!
//! Inputs arrive as raw text, the way a form hands them over. Turning a
//! form into a `NewEvent` is the only place numbers get coerced.

use chrono::NaiveDate;

use crate::error::{PlannerError, PlannerResult};
use crate::event::{NewEvent, parse_budget, parse_date, parse_guests};

/// Raw form inputs. Also used as the pre-filled draft when a form is opened.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventForm {
    pub name: String,
    pub kind: String,
    pub date: String,
    pub location: String,
    pub expected_guests: String,
    pub budget: String,
    pub description: String,
}

impl EventForm {
    /// An empty form whose date field is pre-filled.
    pub fn dated(date: NaiveDate) -> Self {
        EventForm {
            date: date.format("%Y-%m-%d").to_string(),
            ..Default::default()
        }
    }

    /// Convert into event fields.
    ///
    /// The name must not be blank and the date must parse. Guests and
    /// budget never fail; unreadable values become 0. Empty optional text
    /// becomes `None`.
    pub fn into_new_event(self) -> PlannerResult<NewEvent> {
        if self.name.trim().is_empty() {
            return Err(PlannerError::MissingName);
        }
        let date = parse_date(&self.date)?;

        Ok(NewEvent {
            name: self.name,
            kind: self.kind,
            date,
            location: non_empty(self.location),
            expected_guests: parse_guests(&self.expected_guests),
            budget: parse_budget(&self.budget),
            description: non_empty(self.description),
        })
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() { None } else { Some(s) }
}

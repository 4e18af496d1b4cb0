//! Render models.
//!
//! Everything on screen is derived from the event list by pure functions.
//! Nothing here keeps state or knows how it will be drawn; `today` is always
//! passed in.

pub mod calendar;
pub mod dashboard;
pub mod day;
pub mod format;
pub mod table;

pub use calendar::{CalendarCell, CalendarGrid};
pub use dashboard::{Counters, Dashboard, UpcomingWidget};
pub use day::DayDetails;
pub use table::EventsTable;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::views::format::short_date;

/// Which screen is in front.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Dashboard,
    Calendar,
    Events,
}

/// One event as it appears in a list or table.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    pub date_label: String,
    pub kind: String,
    pub guests: u32,
    pub location: Option<String>,
}

impl EventRow {
    pub fn location_or_dash(&self) -> &str {
        self.location
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or("-")
    }
}

impl From<&Event> for EventRow {
    fn from(event: &Event) -> Self {
        EventRow {
            id: event.id.clone(),
            name: event.name.clone(),
            date: event.date,
            date_label: short_date(event.date),
            kind: event.kind.clone(),
            guests: event.expected_guests,
            location: event.location.clone().filter(|l| !l.is_empty()),
        }
    }
}

/// Every view, rebuilt after each mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub view: View,
    pub dashboard: Dashboard,
    pub table: EventsTable,
    pub calendar: CalendarGrid,
}

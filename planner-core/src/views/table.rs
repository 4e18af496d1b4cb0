//! The events table, optionally narrowed by a search term.

use crate::event::Event;
use crate::views::EventRow;

pub const NO_EVENTS: &str = "No events yet. Create your first event!";

/// Case-insensitive substring match against name, type or location.
pub fn matches_search(event: &Event, term: &str) -> bool {
    let term = term.to_lowercase();
    event.name.to_lowercase().contains(&term)
        || event.kind.to_lowercase().contains(&term)
        || event
            .location
            .as_ref()
            .is_some_and(|l| l.to_lowercase().contains(&term))
}

pub fn filter<'a>(events: &'a [Event], term: &str) -> Vec<&'a Event> {
    events.iter().filter(|e| matches_search(e, term)).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventsTable {
    pub rows: Vec<EventRow>,
    /// The active search term, as typed
    pub search: Option<String>,
    /// Set when there are no rows
    pub placeholder: Option<String>,
}

impl EventsTable {
    /// All events in insertion order, or only the matches when `search` is a
    /// non-empty term.
    pub fn build(events: &[Event], search: Option<&str>) -> Self {
        let search = search.filter(|s| !s.is_empty());

        let rows: Vec<EventRow> = match search {
            Some(term) => filter(events, term).into_iter().map(EventRow::from).collect(),
            None => events.iter().map(EventRow::from).collect(),
        };

        let placeholder = if !rows.is_empty() {
            None
        } else if let Some(term) = search {
            Some(no_matches(term))
        } else {
            Some(NO_EVENTS.to_string())
        };

        EventsTable {
            rows,
            search: search.map(str::to_string),
            placeholder,
        }
    }
}

pub fn no_matches(term: &str) -> String {
    format!("No events found matching \"{}\"", term)
}

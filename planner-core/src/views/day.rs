//! What a click on a calendar day shows when the day has events.

use chrono::NaiveDate;

use crate::event::Event;
use crate::views::format::short_date;

#[derive(Debug, Clone, PartialEq)]
pub struct DayDetails {
    pub date: NaiveDate,
    pub title: String,
    /// One `• name (type) - N guests` line per event
    pub lines: Vec<String>,
}

impl DayDetails {
    /// Details for `date` from the events scheduled on it. `None` when
    /// there are none.
    pub fn build(date: NaiveDate, events: &[&Event]) -> Option<Self> {
        let lines: Vec<String> = events
            .iter()
            .map(|e| format!("• {} ({}) - {} guests", e.name, e.kind, e.expected_guests))
            .collect();

        if lines.is_empty() {
            return None;
        }

        Some(DayDetails {
            date,
            title: format!("Events on {}:", short_date(date)),
            lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventStatus;
    use chrono::{TimeZone, Utc};

    fn event(name: &str, kind: &str, guests: u32, date: NaiveDate) -> Event {
        Event {
            id: name.to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
            date,
            location: None,
            expected_guests: guests,
            budget: 0.0,
            description: None,
            status: EventStatus::Upcoming,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn lists_events_on_the_day() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let other = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        let events = vec![
            event("Beach Party", "social", 25, day),
            event("Brunch", "food", 4, other),
        ];

        let on_day: Vec<&Event> = events.iter().filter(|e| e.date == day).collect();
        let details = DayDetails::build(day, &on_day).unwrap();
        assert_eq!(details.title, "Events on Jun 1, 2024:");
        assert_eq!(details.lines, vec!["• Beach Party (social) - 25 guests"]);
    }

    #[test]
    fn empty_day_is_none() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert!(DayDetails::build(day, &[]).is_none());
    }
}

//! Dashboard counters and the upcoming widget.

use chrono::NaiveDate;

use crate::event::{Event, MAX_BUDGET};
use crate::views::EventRow;
use crate::views::format::long_date;

/// Default number of rows in the upcoming widget.
pub const UPCOMING_LIMIT: usize = 5;

pub const NO_UPCOMING: &str = "No upcoming events";

#[derive(Debug, Clone, PartialEq)]
pub struct Counters {
    pub total_events: usize,
    /// Events dated today or later
    pub upcoming: usize,
    pub total_guests: u64,
    pub total_budget: f64,
}

impl Counters {
    pub fn compute(events: &[Event], today: NaiveDate) -> Self {
        Counters {
            total_events: events.len(),
            upcoming: events.iter().filter(|e| e.is_upcoming(today)).count(),
            total_guests: events.iter().map(|e| u64::from(e.expected_guests)).sum(),
            total_budget: events.iter().map(|e| e.budget.clamp(0.0, MAX_BUDGET)).sum(),
        }
    }
}

/// Upcoming events, soonest first, at most `limit` of them.
///
/// Events sharing a date keep their insertion order.
pub fn upcoming(events: &[Event], today: NaiveDate, limit: usize) -> Vec<&Event> {
    let mut upcoming: Vec<&Event> = events.iter().filter(|e| e.is_upcoming(today)).collect();
    upcoming.sort_by_key(|e| e.date);
    upcoming.truncate(limit);
    upcoming
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingWidget {
    pub rows: Vec<EventRow>,
    /// Set when there is nothing to list
    pub placeholder: Option<String>,
}

impl UpcomingWidget {
    pub fn build(events: &[Event], today: NaiveDate, limit: usize) -> Self {
        let rows: Vec<EventRow> = upcoming(events, today, limit)
            .into_iter()
            .map(EventRow::from)
            .collect();
        let placeholder = rows.is_empty().then(|| NO_UPCOMING.to_string());

        UpcomingWidget { rows, placeholder }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    /// Today's date, spelled out
    pub header_date: String,
    pub counters: Counters,
    pub upcoming: UpcomingWidget,
}

impl Dashboard {
    pub fn build(events: &[Event], today: NaiveDate, limit: usize) -> Self {
        Dashboard {
            header_date: long_date(today),
            counters: Counters::compute(events, today),
            upcoming: UpcomingWidget::build(events, today, limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventStatus, parse_date};
    use crate::views::format::money;
    use chrono::{TimeZone, Utc};

    fn event(id: &str, name: &str, date: &str, guests: u32, budget: f64) -> Event {
        Event {
            id: id.to_string(),
            name: name.to_string(),
            kind: "party".to_string(),
            date: parse_date(date).unwrap(),
            location: None,
            expected_guests: guests,
            budget,
            description: None,
            status: EventStatus::Upcoming,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    #[test]
    fn upcoming_includes_today_and_later() {
        let events = vec![
            event("1", "Past", "2024-06-09", 0, 0.0),
            event("2", "Today", "2024-06-10", 0, 0.0),
            event("3", "Future", "2024-07-01", 0, 0.0),
        ];

        let counters = Counters::compute(&events, today());
        assert_eq!(counters.total_events, 3);
        assert_eq!(counters.upcoming, 2);
    }

    #[test]
    fn sums_guests_and_budget() {
        let events = vec![
            event("1", "A", "2024-06-01", 20, 150.5),
            event("2", "B", "2024-06-20", 30, 849.5),
        ];

        let counters = Counters::compute(&events, today());
        assert_eq!(counters.total_guests, 50);
        assert_eq!(counters.total_budget, 1000.0);
    }

    #[test]
    fn huge_budgets_still_total_to_a_number() {
        let events = vec![
            event("1", "A", "2024-06-01", 0, 1e308),
            event("2", "B", "2024-06-20", 0, 1e308),
        ];

        let counters = Counters::compute(&events, today());
        assert!(counters.total_budget.is_finite());
        assert_eq!(money(counters.total_budget), "$2,000,000,000,000");
    }

    #[test]
    fn beach_party_and_conference() {
        let events = vec![
            event("1", "Beach Party", "2024-06-01", 0, 0.0),
            event("2", "Conference", "2024-06-15", 0, 0.0),
        ];

        let dashboard = Dashboard::build(&events, today(), UPCOMING_LIMIT);
        let names: Vec<_> = dashboard.upcoming.rows.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["Conference"]);
        assert_eq!(dashboard.counters.total_events, 2);
        assert_eq!(dashboard.header_date, "Monday, June 10, 2024");
    }

    #[test]
    fn upcoming_is_sorted_and_truncated() {
        let events: Vec<Event> = (1..=8)
            .rev()
            .map(|d| event(&d.to_string(), &format!("E{}", d), &format!("2024-06-{:02}", 10 + d), 0, 0.0))
            .collect();

        let rows = upcoming(&events, today(), UPCOMING_LIMIT);
        let names: Vec<_> = rows.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["E1", "E2", "E3", "E4", "E5"]);
    }

    #[test]
    fn empty_upcoming_has_placeholder() {
        let events = vec![event("1", "Past", "2024-01-01", 0, 0.0)];
        let widget = UpcomingWidget::build(&events, today(), UPCOMING_LIMIT);

        assert!(widget.rows.is_empty());
        assert_eq!(widget.placeholder.as_deref(), Some(NO_UPCOMING));
    }
}

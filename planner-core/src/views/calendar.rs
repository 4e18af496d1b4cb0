//! Month grid.
//!
//! The grid is always six full weeks (42 cells) starting on the Sunday on
//! or before the 1st of the displayed month.

use chrono::{Datelike, Duration, Months, NaiveDate};
use std::collections::HashSet;

use crate::error::{PlannerError, PlannerResult};
use crate::event::Event;
use crate::views::format::month_title;

pub const GRID_CELLS: usize = 42;
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub has_event: bool,
    pub in_current_month: bool,
    pub is_today: bool,
}

impl CalendarCell {
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarGrid {
    /// First day of the displayed month
    pub month: NaiveDate,
    pub title: String,
    pub cells: Vec<CalendarCell>,
}

impl CalendarGrid {
    pub fn build(events: &[Event], month: NaiveDate, today: NaiveDate) -> Self {
        let first = first_of_month(month);
        let start = grid_start(first);
        let event_days: HashSet<NaiveDate> = events.iter().map(|e| e.date).collect();

        let cells = (0..GRID_CELLS as i64)
            .map(|offset| {
                let date = start + Duration::days(offset);
                CalendarCell {
                    date,
                    has_event: event_days.contains(&date),
                    in_current_month: date.month() == first.month() && date.year() == first.year(),
                    is_today: date == today,
                }
            })
            .collect();

        CalendarGrid {
            month: first,
            title: month_title(first),
            cells,
        }
    }

    /// Cells in rows of seven, Sunday first.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(7)
    }

    pub fn first_day(&self) -> NaiveDate {
        self.cells[0].date
    }

    pub fn last_day(&self) -> NaiveDate {
        self.cells[GRID_CELLS - 1].date
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// The Sunday on or before `first`.
pub fn grid_start(first: NaiveDate) -> NaiveDate {
    first - Duration::days(i64::from(first.weekday().num_days_from_sunday()))
}

pub fn prev_month(month: NaiveDate) -> NaiveDate {
    let first = first_of_month(month);
    first.checked_sub_months(Months::new(1)).unwrap_or(first)
}

pub fn next_month(month: NaiveDate) -> NaiveDate {
    let first = first_of_month(month);
    first.checked_add_months(Months::new(1)).unwrap_or(first)
}

/// Parse `YYYY-MM` into the first day of that month.
pub fn parse_month(s: &str) -> PlannerResult<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| PlannerError::InvalidMonth(s.to_string()))
}

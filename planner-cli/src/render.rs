//! TUI rendering for planner render models.
//!
//! Extension traits that turn planner-core view models into colored
//! terminal text using owo_colors.

use owo_colors::OwoColorize;
use planner_core::views::calendar::WEEKDAY_LABELS;
use planner_core::views::format::{money, pluralize};
use planner_core::views::{CalendarCell, CalendarGrid, Dashboard, DayDetails, EventRow, EventsTable};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Dashboard {
    fn render(&self) -> String {
        let c = &self.counters;
        let mut lines = vec![
            self.header_date.bold().to_string(),
            String::new(),
            format!(
                "   {} {}   {} {}   {} {}   {} {}",
                c.upcoming.to_string().green().bold(),
                "upcoming".dimmed(),
                c.total_events.to_string().bold(),
                pluralize("event", c.total_events).dimmed(),
                c.total_guests.to_string().bold(),
                "guests".dimmed(),
                money(c.total_budget).bold(),
                "budget".dimmed(),
            ),
            String::new(),
            "Upcoming".bold().to_string(),
        ];

        match &self.upcoming.placeholder {
            Some(placeholder) => lines.push(format!("   {}", placeholder.dimmed())),
            None => {
                for row in &self.upcoming.rows {
                    lines.push(format!("   {}", row.name.bold()));
                    let mut meta = format!(
                        "{} · {} · {} guests",
                        row.date_label, row.kind, row.guests
                    );
                    if let Some(location) = &row.location {
                        meta.push_str(&format!(" · {}", location));
                    }
                    lines.push(format!("      {}", meta.dimmed()));
                }
            }
        }

        lines.join("\n")
    }
}

impl Render for EventsTable {
    fn render(&self) -> String {
        if let Some(placeholder) = &self.placeholder {
            return format!("   {}", placeholder.dimmed());
        }

        let name_width = column_width(&self.rows, "Name", |r| r.name.chars().count());
        let kind_width = column_width(&self.rows, "Type", |r| r.kind.chars().count());
        let date_width = column_width(&self.rows, "Date", |r| r.date_label.len());

        let mut lines = vec![
            format!(
                "{:<name_width$}  {:<date_width$}  {:<kind_width$}  {:>6}  {:<16}  {}",
                "Name", "Date", "Type", "Guests", "Location", "Id"
            )
            .dimmed()
            .to_string(),
        ];

        for row in &self.rows {
            lines.push(format!(
                "{}  {:<date_width$}  {}  {:>6}  {:<16}  {}",
                pad(&row.name, name_width).bold(),
                row.date_label,
                pad(&row.kind, kind_width).cyan(),
                row.guests,
                row.location_or_dash(),
                row.id.dimmed(),
            ));
        }

        if let Some(term) = &self.search {
            lines.push(String::new());
            lines.push(
                format!("{} matching \"{}\"", self.rows.len(), term)
                    .dimmed()
                    .to_string(),
            );
        }

        lines.join("\n")
    }
}

fn column_width(rows: &[EventRow], header: &str, width: impl Fn(&EventRow) -> usize) -> usize {
    rows.iter().map(width).max().unwrap_or(0).max(header.len())
}

fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    format!("{}{}", s, " ".repeat(width.saturating_sub(len)))
}

impl Render for CalendarCell {
    fn render(&self) -> String {
        let marker = if self.has_event { "•" } else { " " };
        let text = format!("{:>2}{}", self.day(), marker);

        if self.is_today {
            text.reversed().bold().to_string()
        } else if !self.in_current_month {
            text.dimmed().to_string()
        } else if self.has_event {
            text.green().to_string()
        } else {
            text
        }
    }
}

impl Render for CalendarGrid {
    fn render(&self) -> String {
        let mut lines = vec![
            format!("{:^27}", self.title).bold().to_string(),
            WEEKDAY_LABELS
                .iter()
                .map(|d| format!("{:<3}", &d[..2]))
                .collect::<Vec<_>>()
                .join(" ")
                .dimmed()
                .to_string(),
        ];

        for week in self.weeks() {
            lines.push(
                week.iter()
                    .map(|cell| cell.render())
                    .collect::<Vec<_>>()
                    .join(" "),
            );
        }

        lines.join("\n")
    }
}

impl Render for DayDetails {
    fn render(&self) -> String {
        let mut lines = vec![self.title.bold().to_string()];
        lines.extend(self.lines.iter().map(|l| format!("  {}", l)));
        lines.join("\n")
    }
}

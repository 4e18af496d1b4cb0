//! Application root.
//!
//! `Planner` owns the event store and the view state (active view,
//! displayed month, search term). Every action mutates one of those and the
//! caller re-renders with `render`.

use chrono::NaiveDate;

use crate::bridge::FileBridge;
use crate::error::{PlannerError, PlannerResult};
use crate::event::{Event, NewEvent};
use crate::form::EventForm;
use crate::protocol::{BridgeResponse, MenuSignal};
use crate::store::{EventStore, Slot};
use crate::views::calendar::{self, CalendarGrid};
use crate::views::dashboard::{Dashboard, UPCOMING_LIMIT};
use crate::views::{DayDetails, EventsTable, Screen, View};

/// Result of clicking a calendar day.
#[derive(Debug, Clone, PartialEq)]
pub enum DateClick {
    /// The day has events
    Events(DayDetails),
    /// The day is free; open the form dated to it
    NewEvent(EventForm),
}

/// What a menu signal asks the UI to do.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalOutcome {
    OpenForm(EventForm),
    Exported(BridgeResponse),
}

pub struct Planner<S: Slot> {
    store: EventStore<S>,
    view: View,
    month: NaiveDate,
    search: Option<String>,
    upcoming_limit: usize,
}

impl<S: Slot> Planner<S> {
    pub fn new(store: EventStore<S>, today: NaiveDate) -> Self {
        Planner {
            store,
            view: View::default(),
            month: calendar::first_of_month(today),
            search: None,
            upcoming_limit: UPCOMING_LIMIT,
        }
    }

    pub fn with_upcoming_limit(mut self, limit: usize) -> Self {
        self.upcoming_limit = limit;
        self
    }

    pub fn store(&self) -> &EventStore<S> {
        &self.store
    }

    pub fn events(&self) -> &[Event] {
        self.store.list()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref()
    }

    // EVENT ACTIONS:

    pub fn submit(&mut self, fields: NewEvent) -> PlannerResult<Event> {
        self.store.create(fields)
    }

    pub fn submit_form(&mut self, form: EventForm) -> PlannerResult<Event> {
        self.submit(form.into_new_event()?)
    }

    pub fn delete(&mut self, id: &str) -> PlannerResult<Option<Event>> {
        self.store.delete(id)
    }

    /// Empty form dated today.
    pub fn new_event_draft(&self, today: NaiveDate) -> EventForm {
        EventForm::dated(today)
    }

    pub fn click_date(&self, date: NaiveDate) -> DateClick {
        match DayDetails::build(date, &self.store.events_on(date)) {
            Some(details) => DateClick::Events(details),
            None => DateClick::NewEvent(EventForm::dated(date)),
        }
    }

    // VIEW STATE:

    pub fn switch_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn show_month(&mut self, month: NaiveDate) {
        self.month = calendar::first_of_month(month);
    }

    pub fn prev_month(&mut self) {
        self.month = calendar::prev_month(self.month);
    }

    pub fn next_month(&mut self) {
        self.month = calendar::next_month(self.month);
    }

    /// Set the table's search term. An empty term clears the search.
    pub fn search(&mut self, term: &str) {
        self.search = (!term.is_empty()).then(|| term.to_string());
    }

    // SHELL INTEGRATION:

    /// Write the store's list to the bridge file, replacing its contents.
    pub async fn export(&self, bridge: &FileBridge) -> BridgeResponse {
        tracing::info!(count = self.store.list().len(), path = %bridge.path().display(), "exporting events");
        bridge.replace(self.store.list().to_vec()).await
    }

    /// Replace the store's list with the bridge file's contents.
    ///
    /// Returns the number of imported events. A missing or unparsable file
    /// is an error and leaves the store untouched.
    pub async fn import(&mut self, bridge: &FileBridge) -> PlannerResult<usize> {
        let events = bridge.read().await?;
        let count = events.len();
        self.store.replace_all(events)?;
        tracing::info!(count, path = %bridge.path().display(), "imported events");
        Ok(count)
    }

    pub async fn handle_signal(
        &self,
        signal: MenuSignal,
        bridge: &FileBridge,
        today: NaiveDate,
    ) -> PlannerResult<SignalOutcome> {
        match signal {
            MenuSignal::NewEvent => Ok(SignalOutcome::OpenForm(self.new_event_draft(today))),
            MenuSignal::ExportEvents => {
                let response = self.export(bridge).await;
                if !response.success {
                    let message = response.error.clone().unwrap_or_default();
                    return Err(PlannerError::Shell(format!("Export failed: {}", message)));
                }
                Ok(SignalOutcome::Exported(response))
            }
        }
    }

    // RENDERING:

    pub fn render(&self, today: NaiveDate) -> Screen {
        let events = self.store.list();

        Screen {
            view: self.view,
            dashboard: Dashboard::build(events, today, self.upcoming_limit),
            table: EventsTable::build(events, self.search.as_deref()),
            calendar: CalendarGrid::build(events, self.month, today),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySlot;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn planner() -> Planner<MemorySlot> {
        Planner::new(EventStore::open(MemorySlot::new()), today())
    }

    fn form(name: &str, date: &str) -> EventForm {
        EventForm {
            name: name.into(),
            kind: "social".into(),
            date: date.into(),
            expected_guests: "10".into(),
            ..Default::default()
        }
    }

    #[test]
    fn starts_on_dashboard_at_current_month() {
        let planner = planner();
        assert_eq!(planner.view(), View::Dashboard);
        assert_eq!(planner.month(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn submit_rerenders_every_view() {
        let mut planner = planner();
        planner.submit_form(form("Conference", "2024-06-15")).unwrap();

        let screen = planner.render(today());
        assert_eq!(screen.dashboard.counters.total_events, 1);
        assert_eq!(screen.dashboard.upcoming.rows.len(), 1);
        assert_eq!(screen.table.rows.len(), 1);
        assert!(screen.calendar.cells.iter().any(|c| c.has_event && c.day() == 15));
    }

    #[test]
    fn click_on_busy_day_lists_events() {
        let mut planner = planner();
        planner.submit_form(form("Conference", "2024-06-15")).unwrap();

        match planner.click_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()) {
            DateClick::Events(details) => {
                assert_eq!(details.lines, vec!["• Conference (social) - 10 guests"])
            }
            other => panic!("expected events, got {:?}", other),
        }
    }

    #[test]
    fn click_on_free_day_opens_dated_form() {
        let planner = planner();
        let click = planner.click_date(NaiveDate::from_ymd_opt(2024, 6, 20).unwrap());
        assert_eq!(
            click,
            DateClick::NewEvent(EventForm::dated(NaiveDate::from_ymd_opt(2024, 6, 20).unwrap()))
        );
    }

    #[test]
    fn month_navigation_moves_calendar() {
        let mut planner = planner();
        planner.next_month();
        planner.next_month();
        planner.prev_month();

        let screen = planner.render(today());
        assert_eq!(screen.calendar.title, "July 2024");
    }

    #[test]
    fn search_narrows_table_and_clears() {
        let mut planner = planner();
        planner.submit_form(form("Conference", "2024-06-15")).unwrap();
        planner.submit_form(form("Picnic", "2024-06-16")).unwrap();

        planner.search("pic");
        assert_eq!(planner.render(today()).table.rows.len(), 1);

        planner.search("");
        assert_eq!(planner.search_term(), None);
        assert_eq!(planner.render(today()).table.rows.len(), 2);
    }

    #[tokio::test]
    async fn export_then_import_round_trips() {
        let dir = TempDir::new().unwrap();
        let bridge = FileBridge::new(dir.path().join("events.json"));

        let mut source = planner();
        source.submit_form(form("Conference", "2024-06-15")).unwrap();
        source.submit_form(form("Picnic", "2024-06-16")).unwrap();
        assert!(source.export(&bridge).await.success);

        let mut target = planner();
        let count = target.import(&bridge).await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(target.events(), source.events());
    }

    #[tokio::test]
    async fn import_from_missing_file_keeps_store() {
        let dir = TempDir::new().unwrap();
        let bridge = FileBridge::new(dir.path().join("typo.json"));
        let mut planner = planner();
        planner.submit_form(form("Conference", "2024-06-15")).unwrap();
        planner.submit_form(form("Picnic", "2024-06-16")).unwrap();

        assert!(planner.import(&bridge).await.is_err());
        assert_eq!(planner.events().len(), 2);
    }

    #[tokio::test]
    async fn import_from_corrupt_file_keeps_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(&path, "not json").unwrap();
        let mut planner = planner();
        planner.submit_form(form("Conference", "2024-06-15")).unwrap();

        assert!(planner.import(&FileBridge::new(path)).await.is_err());
        assert_eq!(planner.events().len(), 1);
    }

    #[tokio::test]
    async fn new_event_signal_opens_form_dated_today() {
        let dir = TempDir::new().unwrap();
        let bridge = FileBridge::new(dir.path().join("events.json"));

        let outcome = planner()
            .handle_signal(MenuSignal::NewEvent, &bridge, today())
            .await
            .unwrap();
        assert_eq!(outcome, SignalOutcome::OpenForm(EventForm::dated(today())));
    }

    #[tokio::test]
    async fn export_signal_writes_bridge_file() {
        let dir = TempDir::new().unwrap();
        let bridge = FileBridge::new(dir.path().join("events.json"));
        let mut planner = planner();
        planner.submit_form(form("Conference", "2024-06-15")).unwrap();

        let outcome = planner
            .handle_signal(MenuSignal::ExportEvents, &bridge, today())
            .await
            .unwrap();

        assert!(matches!(outcome, SignalOutcome::Exported(ref r) if r.success));
        assert_eq!(bridge.load().await, planner.events());
    }
}

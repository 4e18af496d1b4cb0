//! The session's event list.
//!
//! The store owns the authoritative in-memory list and rewrites the whole
//! list into its slot after every mutation.

mod slot;

pub use slot::{FileSlot, MemorySlot, Slot};

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::PlannerResult;
use crate::event::{Event, NewEvent, Record};

/// Slot key holding the JSON-encoded event array.
pub const EVENTS_KEY: &str = "events";

/// Slot key an unparsable events value is copied to before it can be
/// overwritten.
pub const CORRUPT_KEY: &str = "events.corrupt";

pub struct EventStore<S: Slot> {
    slot: S,
    events: Vec<Event>,
    // Stored records that are not events, written back untouched
    unknown: Vec<serde_json::Value>,
}

impl<S: Slot> EventStore<S> {
    /// Load the list from the slot.
    ///
    /// An absent, unreadable or corrupt value is an empty list. Failures are
    /// logged, never returned. A value that is not a JSON array is copied to
    /// `CORRUPT_KEY` first. Array elements that are not events are kept
    /// aside and written back on every persist.
    pub fn open(slot: S) -> Self {
        let records = match slot.get(EVENTS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Record>>(&raw) {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!(error = %e, "stored events are corrupt, starting empty");
                    if let Err(e) = slot.set(CORRUPT_KEY, &raw) {
                        tracing::warn!(error = %e, "could not keep a copy of the corrupt events");
                    }
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored events, starting empty");
                Vec::new()
            }
        };

        let mut events = Vec::new();
        let mut unknown = Vec::new();
        for record in records {
            match record {
                Record::Event(event) => events.push(event),
                Record::Unknown(value) => unknown.push(value),
            }
        }
        if !unknown.is_empty() {
            tracing::warn!(count = unknown.len(), "stored records that are not events are kept as-is");
        }

        tracing::debug!(count = events.len(), "event store opened");
        EventStore {
            slot,
            events,
            unknown,
        }
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Events in insertion order.
    pub fn list(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Events on a calendar day.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        self.events.iter().filter(|e| e.date == date).collect()
    }

    pub fn create(&mut self, fields: NewEvent) -> PlannerResult<Event> {
        self.create_at(fields, Utc::now())
    }

    /// Append an event created at `now` and persist the list.
    ///
    /// The in-memory list only changes once the write succeeded.
    pub fn create_at(&mut self, fields: NewEvent, now: DateTime<Utc>) -> PlannerResult<Event> {
        let event = Event::new(fields, &self.events, now);
        let mut events = self.events.clone();
        events.push(event.clone());
        self.commit(events)?;

        tracing::info!(id = %event.id, name = %event.name, "event created");
        Ok(event)
    }

    /// Remove the first event with `id` and persist.
    ///
    /// Unknown ids are a no-op and leave the slot untouched.
    pub fn delete(&mut self, id: &str) -> PlannerResult<Option<Event>> {
        let Some(index) = self.events.iter().position(|e| e.id == id) else {
            tracing::debug!(id, "delete ignored, no such event");
            return Ok(None);
        };

        let mut events = self.events.clone();
        let removed = events.remove(index);
        self.commit(events)?;

        tracing::info!(id, "event deleted");
        Ok(Some(removed))
    }

    /// Replace the whole list (import) and persist.
    pub fn replace_all(&mut self, events: Vec<Event>) -> PlannerResult<()> {
        self.commit(events)
    }

    fn commit(&mut self, events: Vec<Event>) -> PlannerResult<()> {
        let mut records = Vec::with_capacity(events.len() + self.unknown.len());
        for event in &events {
            records.push(serde_json::to_value(event)?);
        }
        records.extend(self.unknown.iter().cloned());

        self.slot.set(EVENTS_KEY, &serde_json::to_string(&records)?)?;
        self.events = events;
        Ok(())
    }
}

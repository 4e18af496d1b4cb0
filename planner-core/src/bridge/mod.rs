//! The shell bridge: save/load/delete against a JSON-array file.
//!
//! `FileBridge` does the file work and is what `planner-shell` serves.
//! `ShellClient` is the calling side, talking to a `planner-shell` process.

mod client;

pub use client::ShellClient;

use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::error::{PlannerError, PlannerResult};
use crate::event::{Event, NewEvent, Record};
use crate::protocol::BridgeResponse;

pub struct FileBridge {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileBridge {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileBridge {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File contents, or an empty list when the file is missing or
    /// unparsable. The failure is logged, never returned.
    pub async fn load(&self) -> Vec<Event> {
        match self.read().await {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not load events file, using empty list");
                Vec::new()
            }
        }
    }

    /// The events in the file.
    ///
    /// Fails when the file is missing or is not a JSON array. Array
    /// elements that are not events are skipped.
    pub async fn read(&self) -> PlannerResult<Vec<Event>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let records = self.parse(&content)?;
        Ok(events_of(&records))
    }

    /// Append a new event and return the full list.
    ///
    /// A file that exists but cannot be parsed is left alone and the save
    /// fails.
    pub async fn save(&self, fields: NewEvent) -> BridgeResponse {
        let _guard = self.lock.lock().await;

        let mut records = match self.read_records().await {
            Ok(records) => records,
            Err(e) => return self.refuse("save", e),
        };
        let mut events = events_of(&records);
        let event = Event::new(fields, &events, Utc::now());
        tracing::info!(id = %event.id, name = %event.name, "saving event to file");
        records.push(Record::Event(event.clone()));
        events.push(event);

        match self.write(&records).await {
            Ok(()) => BridgeResponse::ok(events),
            Err(e) => {
                tracing::error!(error = %e, "save failed");
                BridgeResponse::failed(e.to_string())
            }
        }
    }

    /// Drop every record with `id` and return the events that are left.
    pub async fn delete(&self, id: &str) -> BridgeResponse {
        let _guard = self.lock.lock().await;

        let mut records = match self.read_records().await {
            Ok(records) => records,
            Err(e) => return self.refuse("delete", e),
        };
        records.retain(|r| r.id() != Some(id));
        let events = events_of(&records);
        tracing::info!(id, remaining = events.len(), "deleting event from file");

        match self.write(&records).await {
            Ok(()) => BridgeResponse::ok(events),
            Err(e) => {
                tracing::error!(error = %e, "delete failed");
                BridgeResponse::failed(e.to_string())
            }
        }
    }

    /// Overwrite the file with `events` (used for export).
    pub async fn replace(&self, events: Vec<Event>) -> BridgeResponse {
        let _guard = self.lock.lock().await;

        let records: Vec<Record> = events.iter().cloned().map(Record::Event).collect();
        match self.write(&records).await {
            Ok(()) => BridgeResponse::ok(events),
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                BridgeResponse::failed(e.to_string())
            }
        }
    }

    /// Records for a read-modify-write. A missing file has none.
    async fn read_records(&self) -> PlannerResult<Vec<Record>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => self.parse(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn parse(&self, content: &str) -> PlannerResult<Vec<Record>> {
        let records: Vec<Record> = serde_json::from_str(content)?;
        let unknown = records.iter().filter(|r| r.as_event().is_none()).count();
        if unknown > 0 {
            tracing::warn!(path = %self.path.display(), unknown, "events file has records that are not events, keeping them as-is");
        }
        Ok(records)
    }

    fn refuse(&self, action: &str, e: PlannerError) -> BridgeResponse {
        tracing::error!(path = %self.path.display(), error = %e, "{} refused, events file unreadable", action);
        BridgeResponse::failed(format!(
            "Cannot {}: {} is unreadable ({})",
            action,
            self.path.display(),
            e
        ))
    }

    async fn write(&self, records: &[Record]) -> PlannerResult<()> {
        let content = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

fn events_of(records: &[Record]) -> Vec<Event> {
    records.iter().filter_map(Record::as_event).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn fields(name: &str) -> NewEvent {
        NewEvent {
            name: name.to_string(),
            kind: "social".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            location: Some("Rooftop".to_string()),
            expected_guests: 12,
            budget: 300.0,
            description: None,
        }
    }

    #[tokio::test]
    async fn load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let bridge = FileBridge::new(dir.path().join("events.json"));
        assert!(bridge.load().await.is_empty());
    }

    #[tokio::test]
    async fn load_corrupt_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(FileBridge::new(path).load().await.is_empty());
    }

    #[tokio::test]
    async fn save_appends_and_returns_full_list() {
        let dir = TempDir::new().unwrap();
        let bridge = FileBridge::new(dir.path().join("events.json"));

        let first = bridge.save(fields("Brunch")).await;
        let second = bridge.save(fields("Dinner")).await;

        assert!(first.success);
        assert!(second.success);
        let events = second.events.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].name, "Dinner");
        assert_eq!(bridge.load().await, events);
    }

    #[tokio::test]
    async fn file_is_pretty_printed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.json");
        let bridge = FileBridge::new(&path);

        bridge.save(fields("Brunch")).await;

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("[\n  {\n    \"id\""));
    }

    #[tokio::test]
    async fn delete_filters_by_id() {
        let dir = TempDir::new().unwrap();
        let bridge = FileBridge::new(dir.path().join("events.json"));
        let saved = bridge.save(fields("Brunch")).await.events.unwrap();
        bridge.save(fields("Dinner")).await;

        let response = bridge.delete(&saved[0].id).await;

        assert!(response.success);
        let remaining = response.events.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "Dinner");
    }

    #[tokio::test]
    async fn delete_unknown_id_keeps_list() {
        let dir = TempDir::new().unwrap();
        let bridge = FileBridge::new(dir.path().join("events.json"));
        let saved = bridge.save(fields("Brunch")).await.events.unwrap();

        let response = bridge.delete("missing").await;
        assert_eq!(response.events.unwrap(), saved);
    }

    #[tokio::test]
    async fn write_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        // Parent directory does not exist
        let bridge = FileBridge::new(dir.path().join("missing/events.json"));

        let response = bridge.save(fields("Brunch")).await;

        assert!(!response.success);
        assert!(response.events.is_none());
        assert!(response.error.is_some());
    }

    #[tokio::test]
    async fn read_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let bridge = FileBridge::new(dir.path().join("typo.json"));
        assert!(bridge.read().await.is_err());
    }

    #[tokio::test]
    async fn records_that_are_not_events_survive_save_and_delete() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(
            &path,
            r#"[
                {"id": "1", "name": "Keep", "type": "social", "date": "2024-06-01", "createdAt": "2024-06-01T12:00:00.000Z"},
                {"id": "2", "name": "Other", "date": "2024-06-02"}
            ]"#,
        )
        .unwrap();
        let bridge = FileBridge::new(&path);

        let saved = bridge.save(fields("New")).await;
        assert!(saved.success);
        let names: Vec<_> = saved.events.unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Keep", "New"]);

        let on_disk: Vec<serde_json::Value> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let names: Vec<_> = on_disk.iter().map(|r| r["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Keep", "Other", "New"]);

        assert!(bridge.delete("1").await.success);
        let on_disk: Vec<serde_json::Value> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let names: Vec<_> = on_disk.iter().map(|r| r["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Other", "New"]);
    }

    #[tokio::test]
    async fn unparsable_file_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(&path, "{ half written").unwrap();
        let bridge = FileBridge::new(&path);

        let saved = bridge.save(fields("Brunch")).await;
        assert!(!saved.success);
        assert!(saved.error.is_some());
        assert!(!bridge.delete("1").await.success);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ half written");
    }

    #[tokio::test]
    async fn concurrent_saves_do_not_lose_updates() {
        let dir = TempDir::new().unwrap();
        let bridge = Arc::new(FileBridge::new(dir.path().join("events.json")));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let bridge = Arc::clone(&bridge);
                tokio::spawn(async move { bridge.save(fields(&format!("E{}", i))).await })
            })
            .collect();
        for handle in handles {
            assert!(handle.await.unwrap().success);
        }

        let events = bridge.load().await;
        assert_eq!(events.len(), 8);
        let mut ids: Vec<_> = events.iter().map(|e| e.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }
}

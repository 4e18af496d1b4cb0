//! Defines the JSON protocol spoken by `planner-shell` over stdin/stdout.
//!
//! One request per line in, one response per line out.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::event::{Event, NewEvent};

pub trait ShellCommand: Serialize {
    type Response: DeserializeOwned;
    fn command() -> Command;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    SaveEvent,
    LoadEvents,
    DeleteEvent,
}

/// Request sent to the shell.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Outcome of a save or delete.
///
/// Callers must check `success`; on failure `error` carries the message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<Event>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BridgeResponse {
    pub fn ok(events: Vec<Event>) -> Self {
        BridgeResponse {
            success: true,
            events: Some(events),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        BridgeResponse {
            success: false,
            events: None,
            error: Some(error.into()),
        }
    }

    pub fn to_line(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|e| format!(r#"{{"success":false,"error":"{}"}}"#, e))
    }
}

/// Append an event to the shell's file.
#[derive(Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaveEvent {
    pub event: NewEvent,
}

impl ShellCommand for SaveEvent {
    type Response = BridgeResponse;
    fn command() -> Command {
        Command::SaveEvent
    }
}

/// Read the shell's file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LoadEvents {}

impl ShellCommand for LoadEvents {
    type Response = Vec<Event>;
    fn command() -> Command {
        Command::LoadEvents
    }
}

/// Remove an event from the shell's file by id.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEvent {
    pub event_id: String,
}

impl ShellCommand for DeleteEvent {
    type Response = BridgeResponse;
    fn command() -> Command {
        Command::DeleteEvent
    }
}

/// Payload-free notifications from the shell's menu to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuSignal {
    #[serde(rename = "menu-new-event")]
    NewEvent,
    #[serde(rename = "menu-export-events")]
    ExportEvents,
}

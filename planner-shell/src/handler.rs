//! Request dispatch for the shell protocol.

use planner_core::bridge::FileBridge;
use planner_core::protocol::{BridgeResponse, Command, DeleteEvent, Request, SaveEvent};

/// Handle one request and return the response line (without newline).
pub async fn handle_request(bridge: &FileBridge, request: Request) -> String {
    tracing::debug!(command = ?request.command, "request");

    match request.command {
        Command::SaveEvent => handle_save(bridge, request.params).await,
        Command::LoadEvents => handle_load(bridge).await,
        Command::DeleteEvent => handle_delete(bridge, request.params).await,
    }
}

async fn handle_save(bridge: &FileBridge, params: serde_json::Value) -> String {
    let params: SaveEvent = match serde_json::from_value(params) {
        Ok(p) => p,
        Err(e) => return BridgeResponse::failed(format!("Invalid params: {}", e)).to_line(),
    };

    bridge.save(params.event).await.to_line()
}

async fn handle_load(bridge: &FileBridge) -> String {
    let events = bridge.load().await;
    serde_json::to_string(&events).unwrap_or_else(|e| {
        tracing::error!(error = %e, "could not serialize events");
        "[]".to_string()
    })
}

async fn handle_delete(bridge: &FileBridge, params: serde_json::Value) -> String {
    let params: DeleteEvent = match serde_json::from_value(params) {
        Ok(p) => p,
        Err(e) => return BridgeResponse::failed(format!("Invalid params: {}", e)).to_line(),
    };

    bridge.delete(&params.event_id).await.to_line()
}

//! Client side of the shell protocol.
//!
//! Spawns a `planner-shell` process, sends one request line on stdin and
//! reads one response line from stdout.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

use crate::error::{PlannerError, PlannerResult};
use crate::event::{Event, NewEvent};
use crate::protocol::{
    BridgeResponse, Command, DeleteEvent, LoadEvents, Request, SaveEvent, ShellCommand,
};

const SHELL_BINARY: &str = "planner-shell";
const SHELL_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct ShellClient {
    binary: Option<PathBuf>,
    events_file: Option<PathBuf>,
}

impl ShellClient {
    /// Use `planner-shell` from PATH.
    pub fn new() -> Self {
        ShellClient {
            binary: None,
            events_file: None,
        }
    }

    /// Use a specific shell executable.
    pub fn with_binary(path: impl Into<PathBuf>) -> Self {
        ShellClient {
            binary: Some(path.into()),
            events_file: None,
        }
    }

    /// Point the shell at a file other than its configured default.
    pub fn events_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.events_file = Some(path.into());
        self
    }

    fn binary_path(&self) -> PlannerResult<PathBuf> {
        if let Some(path) = &self.binary {
            return Ok(path.clone());
        }
        which::which(SHELL_BINARY).map_err(|_| PlannerError::ShellNotInstalled(SHELL_BINARY.into()))
    }

    pub async fn save(&self, event: NewEvent) -> PlannerResult<BridgeResponse> {
        self.call(SaveEvent { event }).await
    }

    pub async fn load(&self) -> PlannerResult<Vec<Event>> {
        self.call(LoadEvents {}).await
    }

    pub async fn delete(&self, event_id: &str) -> PlannerResult<BridgeResponse> {
        self.call(DeleteEvent {
            event_id: event_id.to_string(),
        })
        .await
    }

    /// Send a typed command. The response type comes from the command.
    pub async fn call<C: ShellCommand>(&self, cmd: C) -> PlannerResult<C::Response> {
        timeout(SHELL_TIMEOUT, self.call_raw(C::command(), cmd))
            .await
            .map_err(|_| PlannerError::ShellTimeout(SHELL_TIMEOUT.as_secs()))?
    }

    async fn call_raw<P: Serialize, R: DeserializeOwned>(
        &self,
        command: Command,
        params: P,
    ) -> PlannerResult<R> {
        let params = serde_json::to_value(params)?;
        let request_json = serde_json::to_string(&Request { command, params })?;

        let binary_path = self.binary_path()?;
        let mut cmd = TokioCommand::new(&binary_path);
        if let Some(file) = &self.events_file {
            cmd.arg("--events-file").arg(file);
        }

        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| spawn_error(&binary_path, e))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| PlannerError::Shell("shell stdin unavailable".into()))?;
        stdin.write_all(format!("{request_json}\n").as_bytes()).await?;
        drop(stdin);

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(PlannerError::Shell(format!(
                "Shell exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        let response_str = String::from_utf8_lossy(&output.stdout);
        let line = response_str.lines().next().unwrap_or("").trim();
        if line.is_empty() {
            return Err(PlannerError::Shell("Shell returned no response".into()));
        }

        serde_json::from_str(line)
            .map_err(|e| PlannerError::Shell(format!("Failed to parse response: {}", e)))
    }
}

impl Default for ShellClient {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_error(binary: &Path, e: std::io::Error) -> PlannerError {
    PlannerError::Shell(format!("Failed to spawn {}: {}", binary.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_binary_is_a_spawn_error() {
        let dir = TempDir::new().unwrap();
        let client = ShellClient::with_binary(dir.path().join("no-such-shell"));

        let err = client.load().await.unwrap_err();
        assert!(matches!(err, PlannerError::Shell(_)));
    }
}

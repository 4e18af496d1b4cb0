//! Moving the event list between the local store and the shell's file.

use anyhow::Result;
use owo_colors::OwoColorize;
use planner_core::bridge::FileBridge;
use std::path::PathBuf;

use crate::commands::Context;

pub async fn export(ctx: &Context, file: Option<PathBuf>) -> Result<()> {
    let override_bridge = file.map(FileBridge::new);
    let bridge = override_bridge.as_ref().unwrap_or(&ctx.bridge);

    let response = ctx.planner.export(bridge).await;
    if !response.success {
        anyhow::bail!(
            "Export to {} failed: {}",
            bridge.path().display(),
            response.error.unwrap_or_default()
        );
    }

    let count = response.events.map(|e| e.len()).unwrap_or(0);
    println!("{} {} to {}", "Exported".green(), count, bridge.path().display());
    Ok(())
}

pub async fn import(ctx: &mut Context, file: Option<PathBuf>) -> Result<()> {
    let override_bridge = file.map(FileBridge::new);
    let bridge = override_bridge.as_ref().unwrap_or(&ctx.bridge);

    let count = ctx.planner.import(bridge).await?;
    println!("{} {} from {}", "Imported".green(), count, bridge.path().display());
    Ok(())
}

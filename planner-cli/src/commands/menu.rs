use anyhow::Result;
use owo_colors::OwoColorize;
use planner_core::app::SignalOutcome;
use planner_core::protocol::MenuSignal;

use crate::commands::Context;
use crate::commands::new;

pub async fn run(ctx: &mut Context, signal: MenuSignal) -> Result<()> {
    tracing::debug!(?signal, "menu signal");

    let outcome = ctx
        .planner
        .handle_signal(signal, &ctx.bridge, ctx.today)
        .await?;

    match outcome {
        SignalOutcome::OpenForm(draft) => {
            let default_date = draft.date.clone();
            let form = new::prompt_form(draft, &default_date)?;
            new::submit(ctx, form)
        }
        SignalOutcome::Exported(response) => {
            let count = response.events.map(|e| e.len()).unwrap_or(0);
            println!(
                "{} {} to {}",
                "Exported".green(),
                count,
                ctx.bridge.path().display()
            );
            Ok(())
        }
    }
}

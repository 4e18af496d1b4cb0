use anyhow::Result;
use owo_colors::OwoColorize;
use planner_core::bridge::ShellClient;
use planner_core::config::PlannerConfig;
use planner_core::form::EventForm;
use planner_core::protocol::BridgeResponse;
use planner_core::views::EventsTable;

use crate::ShellAction;
use crate::render::Render;

pub async fn run(action: ShellAction, config: &PlannerConfig) -> Result<()> {
    let client = ShellClient::new().events_file(config.events_file_path());

    match action {
        ShellAction::Load => {
            let events = client.load().await?;
            println!("{}", EventsTable::build(&events, None).render());
            Ok(())
        }
        ShellAction::Save {
            name,
            date,
            kind,
            location,
            guests,
            budget,
        } => {
            let form = EventForm {
                name,
                kind,
                date,
                location: location.unwrap_or_default(),
                expected_guests: guests.unwrap_or_default(),
                budget: budget.unwrap_or_default(),
                description: String::new(),
            };
            let response = client.save(form.into_new_event()?).await?;
            report(response, "Saved")
        }
        ShellAction::Delete { id } => {
            let response = client.delete(&id).await?;
            report(response, "Deleted")
        }
    }
}

fn report(response: BridgeResponse, verb: &str) -> Result<()> {
    if !response.success {
        anyhow::bail!("Shell error: {}", response.error.unwrap_or_default());
    }

    let events = response.events.unwrap_or_default();
    println!("{} ({} in file)", verb.green(), events.len());
    println!();
    println!("{}", EventsTable::build(&events, None).render());
    Ok(())
}

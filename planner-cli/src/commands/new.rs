use anyhow::Result;
use dialoguer::Input;
use owo_colors::OwoColorize;
use planner_core::form::EventForm;

use crate::commands::Context;
use crate::render::Render;

pub struct NewArgs {
    pub name: Option<String>,
    pub date: Option<String>,
    pub kind: Option<String>,
    pub location: Option<String>,
    pub guests: Option<String>,
    pub budget: Option<String>,
    pub description: Option<String>,
}

pub fn run(ctx: &mut Context, args: NewArgs) -> Result<()> {
    // A blank name counts as missing and is prompted for
    let name = args.name.filter(|n| !n.trim().is_empty());
    let interactive = name.is_none() || args.date.is_none();

    let draft = EventForm {
        name: name.unwrap_or_default(),
        kind: args.kind.unwrap_or_default(),
        date: args.date.unwrap_or_default(),
        location: args.location.unwrap_or_default(),
        expected_guests: args.guests.unwrap_or_default(),
        budget: args.budget.unwrap_or_default(),
        description: args.description.unwrap_or_default(),
    };

    let form = if interactive {
        prompt_form(draft, &ctx.planner.new_event_draft(ctx.today).date)?
    } else {
        draft
    };

    submit(ctx, form)
}

/// Fill the blanks of a draft from the terminal. `default_date` is offered
/// when the draft has no date.
pub fn prompt_form(draft: EventForm, default_date: &str) -> Result<EventForm> {
    let name = if draft.name.is_empty() {
        Input::<String>::new().with_prompt("  Name").interact_text()?
    } else {
        draft.name
    };

    let date_default = if draft.date.is_empty() {
        default_date.to_string()
    } else {
        draft.date
    };
    let date = Input::<String>::new()
        .with_prompt("  Date")
        .default(date_default)
        .interact_text()?;

    Ok(EventForm {
        name,
        date,
        kind: optional(draft.kind, "  Type (skip)")?,
        location: optional(draft.location, "  Where? (skip)")?,
        expected_guests: optional(draft.expected_guests, "  Expected guests (skip)")?,
        budget: optional(draft.budget, "  Budget (skip)")?,
        description: optional(draft.description, "  Description (skip)")?,
    })
}

fn optional(current: String, prompt: &str) -> Result<String> {
    if !current.is_empty() {
        return Ok(current);
    }
    Ok(Input::<String>::new()
        .with_prompt(prompt)
        .default(String::new())
        .show_default(false)
        .interact_text()?)
}

/// Create the event, then show the refreshed dashboard.
pub fn submit(ctx: &mut Context, form: EventForm) -> Result<()> {
    let event = ctx.planner.submit_form(form)?;

    println!("{} {}", "Event created:".green(), event.name.bold());
    println!("{}", format!("id {}", event.id).dimmed());
    println!();

    let screen = ctx.planner.render(ctx.today);
    println!("{}", screen.dashboard.render());
    Ok(())
}

use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use planner_core::views::View;

use crate::commands::Context;
use crate::render::Render;

pub fn run(ctx: &mut Context, id: &str, yes: bool) -> Result<()> {
    let Some(event) = ctx.planner.store().get(id) else {
        println!("{}", format!("No event with id {}", id).dimmed());
        return Ok(());
    };

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Are you sure you want to delete \"{}\"?", event.name))
            .default(false)
            .interact()?;
        if !confirmed {
            return Ok(());
        }
    }

    if let Some(removed) = ctx.planner.delete(id)? {
        println!("{} {}", "Event deleted:".red(), removed.name);
        println!();
    }

    ctx.planner.switch_view(View::Events);
    let screen = ctx.planner.render(ctx.today);
    println!("{}", screen.table.render());
    Ok(())
}

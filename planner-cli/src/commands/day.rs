use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use planner_core::app::DateClick;
use planner_core::event::parse_date;
use planner_core::views::format::short_date;

use crate::commands::Context;
use crate::commands::new;
use crate::render::Render;

pub fn run(ctx: &mut Context, date: &str) -> Result<()> {
    let date = parse_date(date)?;

    match ctx.planner.click_date(date) {
        DateClick::Events(details) => {
            println!("{}", details.render());
            Ok(())
        }
        DateClick::NewEvent(draft) => {
            println!("{}", format!("Nothing planned on {}", short_date(date)).dimmed());

            let create = Confirm::new()
                .with_prompt("Create an event on this day?")
                .default(true)
                .interact()?;
            if !create {
                return Ok(());
            }

            let default_date = draft.date.clone();
            let form = new::prompt_form(draft, &default_date)?;
            new::submit(ctx, form)
        }
    }
}

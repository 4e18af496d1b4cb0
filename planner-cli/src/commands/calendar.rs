use anyhow::Result;
use owo_colors::OwoColorize;
use planner_core::views::View;
use planner_core::views::calendar::parse_month;

use crate::commands::Context;
use crate::render::Render;

pub fn run(ctx: &mut Context, month: Option<&str>) -> Result<()> {
    ctx.planner.switch_view(View::Calendar);
    if let Some(month) = month {
        ctx.planner.show_month(parse_month(month)?);
    }

    let screen = ctx.planner.render(ctx.today);
    println!("{}", screen.calendar.render());

    let marked = screen
        .calendar
        .cells
        .iter()
        .filter(|c| c.has_event && c.in_current_month)
        .count();
    if marked == 0 {
        println!("\n{}", "No events this month".dimmed());
    }

    Ok(())
}

use anyhow::Result;
use planner_core::views::View;

use crate::commands::Context;
use crate::render::Render;

pub fn run(ctx: &mut Context, search: Option<&str>) -> Result<()> {
    ctx.planner.switch_view(View::Events);
    if let Some(term) = search {
        ctx.planner.search(term);
    }

    let screen = ctx.planner.render(ctx.today);
    println!("{}", screen.table.render());
    Ok(())
}

use anyhow::Result;

use crate::commands::Context;
use crate::render::Render;

pub fn run(ctx: &Context) -> Result<()> {
    let screen = ctx.planner.render(ctx.today);
    println!("{}", screen.dashboard.render());
    Ok(())
}

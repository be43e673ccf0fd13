use anyhow::Result;
use eventease_core::sample;

use crate::context::Context;
use crate::render::render_detail;

pub fn run(ctx: &Context, id: &str) -> Result<()> {
    let event = sample::find(id)?;
    let share_url = ctx.config.share_url(&event.id)?;

    println!("{}", render_detail(&event, share_url.as_str()));
    Ok(())
}

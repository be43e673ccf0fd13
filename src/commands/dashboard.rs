use anyhow::Result;
use eventease_core::dashboard::DashboardStats;
use eventease_core::sample;
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::render::{Render, format_date_label, render_attendance, render_status};

pub fn run(ctx: &Context) -> Result<()> {
    let user = ctx.require_user()?;
    let events = sample::owned_events(user);
    let stats = DashboardStats::from_events(&events);

    println!("{}", "Dashboard".bold());
    println!(
        "{}",
        format!("Welcome back, {}! Here's an overview of your events.", user.name).dimmed()
    );
    println!();
    println!("{}", stats.render());
    println!();

    println!("{}", "Recent Events".bold());
    if events.is_empty() {
        println!("   {}", "No events yet".bold());
        println!(
            "   {}",
            "Get started by creating your first event: eventease new".dimmed()
        );
        return Ok(());
    }

    for event in &events {
        println!(
            "   {} {} {}",
            event.title,
            render_status(event.status),
            format!("(ID: {})", event.id).dimmed()
        );
        println!(
            "      {} {} · {}",
            format_date_label(event.date),
            event.display_time(),
            event.location
        );
        println!("      {}", render_attendance(event));
    }

    Ok(())
}

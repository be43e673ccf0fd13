//! Terminal rendering for EventEase types.
//!
//! Extension traits that add colored output to eventease-core types using
//! owo_colors.

use eventease_core::dashboard::DashboardStats;
use eventease_core::{Event, EventStatus, User};
use owo_colors::OwoColorize;

/// Width of the attendance bar, in characters
const BAR_WIDTH: usize = 20;

pub trait Render {
    fn render(&self) -> String;
}

/// One event as a listing card.
impl Render for Event {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        let category = self
            .category
            .as_deref()
            .map(|c| format!("[{}]", c).cyan().to_string())
            .unwrap_or_default();
        lines.push(format!("{} {}", self.title.bold(), category));
        lines.push(format!("   {}", self.description.dimmed()));
        lines.push(format!(
            "   {} {} · {}",
            format_date_label(self.date),
            self.display_time(),
            self.location
        ));
        lines.push(format!("   {}", render_attendance(self)));
        lines.push(format!("   {}", format!("eventease show {}", self.id).dimmed()));

        lines.join("\n")
    }
}

impl Render for User {
    fn render(&self) -> String {
        let initial = self.initial().unwrap_or('?');
        format!(
            "({}) {} {} {}",
            initial.bold(),
            self.name.bold(),
            format!("<{}>", self.email).dimmed(),
            format!("[{}]", self.role).cyan()
        )
    }
}

impl Render for DashboardStats {
    fn render(&self) -> String {
        [
            ("Total Events", self.total_events.to_string()),
            ("Total Attendees", self.total_attendees.to_string()),
            ("Active Events", self.active_events.to_string()),
        ]
        .iter()
        .map(|(label, value)| format!("   {:<16} {}", label.dimmed(), value.bold()))
        .collect::<Vec<_>>()
        .join("\n")
    }
}

/// Full event page: everything on the card plus custom fields and organizer.
pub fn render_detail(event: &Event, share_url: &str) -> String {
    let mut lines = Vec::new();

    lines.push(event.title.bold().to_string());
    lines.push(format!("Organized by {}", event.organizer).dimmed().to_string());
    if let Some(category) = &event.category {
        lines.push(format!("[{}]", category).cyan().to_string());
    }

    lines.push(String::new());
    lines.push(event.description.clone());

    lines.push(String::new());
    lines.push(format!(
        "{:<10} {} ({})",
        "When".dimmed(),
        event.date.format("%A, %B %-d, %Y"),
        event.display_time()
    ));
    lines.push(format!("{:<10} {}", "Where".dimmed(), event.location));
    lines.push(format!("{:<10} {}", "Going".dimmed(), render_attendance(event)));

    match event.spots_remaining() {
        Some(0) => lines.push("This event is full!".red().to_string()),
        Some(n) => lines.push(
            format!("There are {} spots remaining!", n)
                .green()
                .to_string(),
        ),
        None => {}
    }

    if !event.custom_fields.is_empty() {
        lines.push(String::new());
        lines.push("Registration Information".bold().to_string());
        for field in &event.custom_fields {
            let requirement = if field.required {
                field.requirement_label().yellow().to_string()
            } else {
                field.requirement_label().dimmed().to_string()
            };
            lines.push(format!("   {:<24} {}", field.label, requirement));
        }
    }

    lines.push(String::new());
    lines.push(format!("{:<10} {}", "Share".dimmed(), share_url.underline()));

    lines.join("\n")
}

/// "45/100 attendees ██████░░░░ 45% full", or just the count without a limit.
pub fn render_attendance(event: &Event) -> String {
    match (event.max_attendees, event.attendance_percentage()) {
        (Some(max), Some(pct)) => format!(
            "{}/{} attendees {} {}",
            event.attendees,
            max,
            attendance_bar(pct),
            format!("{}% full", pct.round()).dimmed()
        ),
        _ => format!("{} attendees", event.attendees),
    }
}

fn attendance_bar(pct: f64) -> String {
    let filled = ((pct.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "{}{}",
        "█".repeat(filled).green(),
        "░".repeat(BAR_WIDTH - filled).dimmed()
    )
}

/// "[active]" in green, other statuses dimmed.
pub fn render_status(status: EventStatus) -> String {
    let badge = format!("[{}]", status);
    match status {
        EventStatus::Active => badge.green().to_string(),
        EventStatus::Cancelled => badge.red().to_string(),
        EventStatus::Completed | EventStatus::Draft => badge.dimmed().to_string(),
    }
}

/// Format a date relative to today (e.g. "Today", "Tomorrow", "Sun Dec 15 2024")
pub fn format_date_label(date: chrono::NaiveDate) -> String {
    let today = chrono::Local::now().date_naive();

    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d %Y").to_string(),
    }
}

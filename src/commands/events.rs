use anyhow::Result;
use eventease_core::event::CATEGORIES;
use eventease_core::query::{ALL_CATEGORIES, CategoryFilter, EventQuery, SortKey};
use eventease_core::sample;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(search: &str, category: &str, sort: &str, json: bool) -> Result<()> {
    let query = EventQuery::new(search, resolve_category(category)?, SortKey::parse(sort));
    if query.sort == SortKey::Unsorted {
        tracing::debug!(sort, "unknown sort key, keeping listing order");
    }

    let events = sample::events();
    let results = query.apply(&events);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("{}", "No events found".bold());
        println!(
            "{}",
            "Try adjusting your search criteria or browse all events".dimmed()
        );
        return Ok(());
    }

    for (i, event) in results.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", event.render());
    }

    Ok(())
}

fn resolve_category(category: &str) -> Result<CategoryFilter> {
    if category == ALL_CATEGORIES || CATEGORIES.iter().any(|c| *c == category) {
        return Ok(CategoryFilter::parse(category));
    }

    anyhow::bail!(
        "Category '{}' not found. Available: {}, {}",
        category,
        ALL_CATEGORIES,
        CATEGORIES.join(", ")
    )
}

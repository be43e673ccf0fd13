use anyhow::{Context as _, Result};
use dialoguer::{Confirm, Select};
use eventease_core::FieldType;
use eventease_core::draft::EventDraft;
use eventease_core::event::CATEGORIES;
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::render::render_detail;
use crate::utils::tui::{create_spinner, optional_or_prompt, value_or_prompt};

const FIELD_TYPES: &[FieldType] = &[
    FieldType::Text,
    FieldType::Email,
    FieldType::Number,
    FieldType::Select,
];

pub struct NewArgs {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub max_attendees: Option<String>,
    pub category: Option<String>,
    pub fields: Vec<String>,
}

pub async fn run(ctx: &Context, args: NewArgs) -> Result<()> {
    let user = ctx.require_user()?;

    // Without a title on the command line, ask for everything that's missing
    let interactive = args.title.is_none();

    let mut draft = EventDraft::new();
    draft.title = required(args.title, "Title", interactive)?;
    draft.description = required(args.description, "Description", interactive)?;
    draft.date = required(args.date, "Date (YYYY-MM-DD)", interactive)?;
    draft.time = required(args.time, "Time (HH:MM)", interactive)?;
    draft.location = required(args.location, "Location", interactive)?;
    draft.max_attendees = optional(args.max_attendees, "Maximum attendees", interactive)?;
    draft.category = match args.category {
        Some(c) => c,
        None if interactive => prompt_category()?,
        None => String::new(),
    };

    for spec in &args.fields {
        let (label, field_type, required) = parse_field_spec(spec)?;
        draft.add_custom_field(&label, field_type, required);
    }
    if interactive && args.fields.is_empty() {
        prompt_custom_fields(&mut draft)?;
    }

    // Nothing is submitted unless the whole draft is valid
    if let Err(e) = draft.validate() {
        eprintln!("  {}", e.to_string().red());
        return Ok(());
    }

    let spinner = create_spinner("Creating event...");
    tokio::time::sleep(ctx.config.create_delay()?).await;
    let event = draft.into_event(user)?;
    spinner.finish_and_clear();

    tracing::info!(id = %event.id, title = %event.title, "created event");

    let share_url = ctx.config.share_url(&event.id)?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Created: {}", event.title).green());
    println!();
    println!("{}", render_detail(&event, share_url.as_str()));

    Ok(())
}

fn required(value: Option<String>, prompt: &str, interactive: bool) -> Result<String> {
    if interactive {
        value_or_prompt(value, prompt)
    } else {
        Ok(value.unwrap_or_default())
    }
}

fn optional(value: Option<String>, prompt: &str, interactive: bool) -> Result<String> {
    if interactive {
        optional_or_prompt(value, prompt)
    } else {
        Ok(value.unwrap_or_default())
    }
}

fn prompt_category() -> Result<String> {
    let mut items = vec!["(none)"];
    items.extend_from_slice(CATEGORIES);

    let selection = Select::new()
        .with_prompt("  Category")
        .items(&items)
        .default(0)
        .interact()?;

    if selection == 0 {
        Ok(String::new())
    } else {
        Ok(items[selection].to_string())
    }
}

/// Keep asking for custom fields until an empty label is given.
fn prompt_custom_fields(draft: &mut EventDraft) -> Result<()> {
    loop {
        let label = optional_or_prompt(None, "Custom field label")?;
        if label.trim().is_empty() {
            return Ok(());
        }

        let type_names: Vec<String> = FIELD_TYPES.iter().map(|t| t.to_string()).collect();
        let selection = Select::new()
            .with_prompt("  Type")
            .items(&type_names)
            .default(0)
            .interact()?;

        let required = Confirm::new()
            .with_prompt("  Required?")
            .default(false)
            .interact()?;

        draft.add_custom_field(&label, FIELD_TYPES[selection], required);
    }
}

/// Parse "label[:type[:required]]", e.g. "Company", "Email:email:required".
fn parse_field_spec(spec: &str) -> Result<(String, FieldType, bool)> {
    let mut parts = spec.splitn(3, ':');

    let label = parts.next().unwrap_or_default().trim();
    if label.is_empty() {
        anyhow::bail!("Custom field needs a label: \"{}\"", spec);
    }

    let field_type = match parts.next().map(str::trim) {
        None | Some("") => FieldType::Text,
        Some(t) => t
            .parse::<FieldType>()
            .map_err(|e| anyhow::anyhow!(e))
            .with_context(|| format!("Invalid custom field \"{}\"", spec))?,
    };

    let required = match parts.next().map(|r| r.trim().to_lowercase()).as_deref() {
        None | Some("") | Some("optional") => false,
        Some("required") | Some("yes") | Some("true") => true,
        Some(other) => anyhow::bail!(
            "Invalid custom field \"{}\": expected \"required\" or \"optional\", got \"{}\"",
            spec,
            other
        ),
    };

    Ok((label.to_string(), field_type, required))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventease_core::config::AppConfig;
    use eventease_core::storage::FileStorage;

    fn signed_in(dir: &std::path::Path) -> Context {
        let config = AppConfig {
            create_delay: "0s".to_string(),
            ..AppConfig::default()
        };
        let mut ctx = Context::new(config, FileStorage::open(dir)).unwrap();
        ctx.session.login("alice@example.com", "x").unwrap();
        ctx
    }

    fn args(title: &str) -> NewArgs {
        NewArgs {
            title: Some(title.to_string()),
            description: None,
            date: None,
            time: None,
            location: None,
            max_attendees: None,
            category: None,
            fields: Vec::new(),
        }
    }

    #[tokio::test]
    async fn incomplete_draft_is_reported_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = signed_in(dir.path());

        assert!(run(&ctx, args("Rust Meetup")).await.is_ok());
    }

    #[tokio::test]
    async fn complete_draft_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = signed_in(dir.path());

        let complete = NewArgs {
            description: Some("Monthly meetup".to_string()),
            date: Some("2025-03-01".to_string()),
            time: Some("18:30".to_string()),
            location: Some("Library".to_string()),
            fields: vec!["Company:text:required".to_string()],
            ..args("Rust Meetup")
        };
        assert!(run(&ctx, complete).await.is_ok());
    }

    #[tokio::test]
    async fn creating_requires_sign_in() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new(AppConfig::default(), FileStorage::open(dir.path())).unwrap();

        let err = run(&ctx, args("Rust Meetup")).await.unwrap_err();
        assert!(err.to_string().contains("Not logged in"));
    }

    #[test]
    fn field_spec_label_only() {
        let (label, field_type, required) = parse_field_spec("Company").unwrap();
        assert_eq!(label, "Company");
        assert_eq!(field_type, FieldType::Text);
        assert!(!required);
    }

    #[test]
    fn field_spec_with_type_and_required() {
        let (label, field_type, required) = parse_field_spec("Work email:email:required").unwrap();
        assert_eq!(label, "Work email");
        assert_eq!(field_type, FieldType::Email);
        assert!(required);
    }

    #[test]
    fn field_spec_errors() {
        assert!(parse_field_spec(":text").is_err());
        assert!(parse_field_spec("Age:date").is_err());
        assert!(parse_field_spec("Age:number:maybe").is_err());
    }

    #[test]
    fn non_interactive_missing_values_are_empty() {
        assert_eq!(required(None, "Title", false).unwrap(), "");
        assert_eq!(optional(Some("5".to_string()), "Max", false).unwrap(), "5");
    }
}

use std::time::Duration;

use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};

pub fn create_spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["-", "\\", "|", "/", "✓"])
        .template("  {msg} {spinner}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Use `value` if given, otherwise prompt for it.
pub fn value_or_prompt(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::<String>::new()
            .with_prompt(format!("  {}", prompt))
            .interact_text()?),
    }
}

/// Like `value_or_prompt`, but an empty answer is allowed.
pub fn optional_or_prompt(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::<String>::new()
            .with_prompt(format!("  {} (skip)", prompt))
            .default(String::new())
            .show_default(false)
            .interact_text()?),
    }
}

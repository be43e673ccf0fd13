use anyhow::Result;
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::render::Render;
use crate::utils::tui::value_or_prompt;

pub fn login(ctx: &mut Context, email: Option<String>, password: Option<String>) -> Result<()> {
    let email = value_or_prompt(email, "Email")?;
    let password = password_or_prompt(password)?;

    let user = ctx.session.login(&email, &password)?;

    println!("{}", format!("  Welcome back, {}!", user.name).green());
    Ok(())
}

pub fn register(
    ctx: &mut Context,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let name = value_or_prompt(name, "Name")?;
    let email = value_or_prompt(email, "Email")?;
    let password = password_or_prompt(password)?;

    let user = ctx.session.register(&email, &password, &name)?;

    println!("{}", format!("  Account created. Welcome, {}!", user.name).green());
    Ok(())
}

pub fn logout(ctx: &mut Context) -> Result<()> {
    let was_signed_in = ctx.session.user().is_some();
    ctx.session.logout();

    if was_signed_in {
        println!("  Signed out.");
    } else {
        println!("{}", "  Not logged in.".dimmed());
    }
    Ok(())
}

pub fn whoami(ctx: &Context, json: bool) -> Result<()> {
    match ctx.session.user() {
        Some(user) if json => println!("{}", serde_json::to_string_pretty(user)?),
        Some(user) => println!("{}", user.render()),
        None if json => println!("null"),
        None => println!("{}", "Not logged in".dimmed()),
    }
    Ok(())
}

/// Passwords are read without echo.
fn password_or_prompt(password: Option<String>) -> Result<String> {
    match password {
        Some(p) => Ok(p),
        None => Ok(rpassword::prompt_password("  Password: ")?),
    }
}

mod commands;
mod context;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::context::Context;

#[derive(Parser)]
#[command(name = "eventease")]
#[command(about = "Browse, create and share events")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in (any email and password are accepted)
    Login {
        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        password: Option<String>,
    },
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        password: Option<String>,
    },
    /// Sign out and forget the saved session
    Logout,
    /// Show who is signed in
    Whoami {
        /// Print the user as JSON
        #[arg(long)]
        json: bool,
    },
    /// List events
    Events {
        /// Only events whose title, description or location contains this text
        #[arg(short, long, default_value = "")]
        search: String,

        /// Only events in this category ("All" for every category)
        #[arg(short, long, default_value = "All")]
        category: String,

        /// Sort by "date", "title" or "attendees"
        #[arg(long, default_value = "date")]
        sort: String,

        /// Print the events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one event and its share link
    Show { id: String },
    /// Create a new event (prompts for anything not given)
    New {
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Time (e.g. "18:30" or "06:30 PM")
        #[arg(short, long)]
        time: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(short, long)]
        max_attendees: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        /// Custom field as "label[:type[:required]]", repeatable
        #[arg(short, long = "field")]
        fields: Vec<String>,
    },
    /// Overview of your events
    Dashboard,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let mut ctx = Context::load()?;

    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&mut ctx, email, password),
        Commands::Register {
            name,
            email,
            password,
        } => commands::auth::register(&mut ctx, name, email, password),
        Commands::Logout => commands::auth::logout(&mut ctx),
        Commands::Whoami { json } => commands::auth::whoami(&ctx, json),
        Commands::Events {
            search,
            category,
            sort,
            json,
        } => commands::events::run(&search, &category, &sort, json),
        Commands::Show { id } => commands::show::run(&ctx, &id),
        Commands::New {
            title,
            description,
            date,
            time,
            location,
            max_attendees,
            category,
            fields,
        } => {
            let args = commands::new::NewArgs {
                title,
                description,
                date,
                time,
                location,
                max_attendees,
                category,
                fields,
            };
            commands::new::run(&ctx, args).await
        }
        Commands::Dashboard => commands::dashboard::run(&ctx),
    }
}

/// Log to stderr so command output stays pipeable. `RUST_LOG` overrides the level.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

mod assistant;
mod commands;

use anyhow::Result;
use calpad_core::EventStore;
use calpad_core::config::CalpadConfig;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "calpad")]
#[command(about = "Manage your calendar from the terminal, directly or in natural language")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a natural-language request to the assistant
    Ask {
        /// The request, e.g. "dinner with Sam tomorrow at 7pm"
        text: Vec<String>,
    },
    /// Add an event directly
    Add {
        title: String,

        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// Time of day (HH:MM); omit for an all-day event
        #[arg(short, long)]
        time: Option<String>,
    },
    /// List events on a date
    List {
        /// Date (YYYY-MM-DD); defaults to today
        date: Option<String>,

        /// Also print event ids (used by move/edit)
        #[arg(long)]
        ids: bool,
    },
    /// Toggle completion of an event by title
    Complete {
        title: String,

        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
    },
    /// Delete an event by title, or a whole date with --all
    Delete {
        /// Event title; omit when using --all
        title: Option<String>,

        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// Delete every event on the date
        #[arg(long)]
        all: bool,
    },
    /// Copy every event from one date to another
    Copy {
        /// Source date (YYYY-MM-DD)
        source: String,

        /// Destination date (YYYY-MM-DD)
        destination: String,
    },
    /// Move an event (by id) to another date
    Move {
        /// Event id (see: calpad list --ids)
        id: String,

        /// New date (YYYY-MM-DD)
        date: String,
    },
    /// Edit an event's title or time
    Edit {
        /// Event id (see: calpad list --ids)
        id: String,

        /// Date the event currently sits on (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New time (HH:MM); pass an empty string to clear
        #[arg(long)]
        time: Option<String>,
    },
    /// Print the full schedule
    Summary,
    /// Run the reminder scheduler in the foreground
    Watch,
    /// Store the Gemini API key
    Setkey,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CalpadConfig::load()?;
    let mut store = EventStore::load(config.data_path()?);

    match cli.command {
        Commands::Ask { text } => commands::ask::run(&mut store, text.join(" ")).await,
        Commands::Add { title, date, time } => commands::add::run(&mut store, title, date, time),
        Commands::List { date, ids } => commands::list::run(&store, date, ids),
        Commands::Complete { title, date } => commands::complete::run(&mut store, title, date),
        Commands::Delete { title, date, all } => commands::delete::run(&mut store, title, date, all),
        Commands::Copy { source, destination } => {
            commands::copy::run(&mut store, source, destination)
        }
        Commands::Move { id, date } => commands::move_event::run(&mut store, id, date),
        Commands::Edit { id, date, title, time } => {
            commands::edit::run(&mut store, id, date, title, time)
        }
        Commands::Summary => commands::summary::run(&store),
        Commands::Watch => commands::watch::run(store, config.lead_time_minutes).await,
        Commands::Setkey => commands::setkey::run(),
    }
}

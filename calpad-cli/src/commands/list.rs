use anyhow::Result;
use calpad_core::EventStore;
use calpad_core::dispatch::parse_date;
use chrono::Local;
use owo_colors::OwoColorize;

pub fn run(store: &EventStore, date: Option<String>, show_ids: bool) -> Result<()> {
    let date = match date {
        Some(s) => parse_date(&s)?,
        None => Local::now().date_naive(),
    };

    let events = store.events_for_date(date);
    if events.is_empty() {
        println!("No events on {date}.");
        return Ok(());
    }

    println!("{}", date.to_string().bold());
    for event in events {
        let mark = if event.completed { "x" } else { " " };
        let line = format!("[{mark}] {event}");
        if event.completed {
            println!("  {}", line.dimmed());
        } else {
            println!("  {line}");
        }
        if show_ids {
            println!("      {}", event.id.dimmed());
        }
    }

    Ok(())
}

use anyhow::Result;
use calpad_core::EventStore;
use calpad_core::dispatch::parse_date;
use calpad_core::event::parse_time;
use owo_colors::OwoColorize;

pub fn run(
    store: &mut EventStore,
    id: String,
    date: String,
    title: Option<String>,
    time: Option<String>,
) -> Result<()> {
    if title.is_none() && time.is_none() {
        anyhow::bail!("Nothing to change. Pass --title and/or --time.");
    }

    let date = parse_date(&date)?;
    let Some(mut event) = store.events_for_date(date).into_iter().find(|e| e.id == id) else {
        anyhow::bail!("No event with id {id} on {date}");
    };

    if let Some(title) = title {
        event.title = title;
    }
    if let Some(time) = time {
        if time.is_empty() {
            event.time = None;
        } else {
            parse_time(&time)?;
            event.time = Some(time);
        }
    }

    let line = format!("Updated: {event}");
    store.update_event(date, event);

    println!("{}", line.green());
    Ok(())
}

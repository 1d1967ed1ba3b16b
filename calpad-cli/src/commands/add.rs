use anyhow::Result;
use calpad_core::dispatch::parse_date;
use calpad_core::event::{Event, parse_time};
use calpad_core::EventStore;
use owo_colors::OwoColorize;

pub fn run(
    store: &mut EventStore,
    title: String,
    date: String,
    time: Option<String>,
) -> Result<()> {
    let date = parse_date(&date)?;
    if let Some(time) = &time {
        parse_time(time)?;
    }

    let event = Event::new(title, time);
    let line = format!("Added: {event} on {date}");
    store.add_event(date, event);

    println!("{}", line.green());
    Ok(())
}

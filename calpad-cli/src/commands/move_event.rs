use anyhow::Result;
use calpad_core::EventStore;
use calpad_core::dispatch::parse_date;
use owo_colors::OwoColorize;

pub fn run(store: &mut EventStore, id: String, date: String) -> Result<()> {
    let date = parse_date(&date)?;

    if store.move_event(&id, date) {
        println!("{}", format!("Moved event to {date}").green());
    } else {
        println!("{}", format!("No event with id {id}").yellow());
    }

    Ok(())
}

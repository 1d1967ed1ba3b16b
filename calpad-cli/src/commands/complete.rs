use anyhow::Result;
use calpad_core::EventStore;
use calpad_core::dispatch::parse_date;
use owo_colors::OwoColorize;

pub fn run(store: &mut EventStore, title: String, date: String) -> Result<()> {
    let date = parse_date(&date)?;

    if store.toggle_completion(date, &title) {
        println!("{}", format!("Toggled: {title} on {date}").green());
    } else {
        println!("{}", format!("No event titled '{title}' on {date}").yellow());
    }

    Ok(())
}

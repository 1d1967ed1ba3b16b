use anyhow::Result;
use calpad_core::EventStore;
use calpad_core::dispatch::parse_date;
use owo_colors::OwoColorize;

pub fn run(store: &mut EventStore, title: Option<String>, date: String, all: bool) -> Result<()> {
    let date = parse_date(&date)?;

    if all {
        let count = store.delete_all_for_date(date);
        if count > 0 {
            println!("{}", format!("Deleted {count} events on {date}").green());
        } else {
            println!("No events on {date}.");
        }
        return Ok(());
    }

    let Some(title) = title else {
        anyhow::bail!("Provide an event title, or --all to clear the whole date.");
    };

    if store.delete_by_title(date, &title) {
        println!("{}", format!("Deleted: {title} on {date}").green());
    } else {
        println!("{}", format!("No event titled '{title}' on {date}").yellow());
    }

    Ok(())
}

use anyhow::Result;
use calpad_core::EventStore;
use calpad_core::dispatch::parse_date;
use owo_colors::OwoColorize;

pub fn run(store: &mut EventStore, source: String, destination: String) -> Result<()> {
    let source = parse_date(&source)?;
    let destination = parse_date(&destination)?;

    let count = store.copy_events(source, destination);
    if count > 0 {
        println!(
            "{}",
            format!("Copied {count} events from {source} to {destination}").green()
        );
    } else {
        println!("Nothing to copy on {source}.");
    }

    Ok(())
}

use anyhow::Result;
use calpad_core::EventStore;

pub fn run(store: &EventStore) -> Result<()> {
    println!("{}", store.schedule_summary().trim_end());
    Ok(())
}

use std::sync::{Arc, Mutex};

use anyhow::Result;
use calpad_core::EventStore;
use calpad_notify::ReminderScheduler;
use owo_colors::OwoColorize;

pub async fn run(store: EventStore, lead_time_minutes: i64) -> Result<()> {
    let store = Arc::new(Mutex::new(store));
    let mut scheduler = ReminderScheduler::new(store, lead_time_minutes);
    scheduler.start();

    println!(
        "Watching for reminders ({} minute lead time). {}",
        lead_time_minutes,
        "Press Ctrl-C to stop.".dimmed()
    );

    tokio::signal::ctrl_c().await?;
    scheduler.stop();
    println!("Stopped.");

    Ok(())
}

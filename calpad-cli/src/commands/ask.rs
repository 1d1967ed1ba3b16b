use anyhow::Result;
use calpad_core::EventStore;
use calpad_core::action::parse_reply;
use calpad_core::dispatch::dispatch_reply;
use owo_colors::OwoColorize;

use crate::assistant::GeminiClient;

pub async fn run(store: &mut EventStore, text: String) -> Result<()> {
    if text.trim().is_empty() {
        anyhow::bail!("Nothing to ask. Example: calpad ask \"lunch with Alex tomorrow at noon\"");
    }

    let client = GeminiClient::from_saved_key()?;

    println!("{}", "Thinking...".dimmed());
    let raw = client.interpret(&text, &store.schedule_summary()).await?;
    let reply = parse_reply(&raw)?;

    let report = dispatch_reply(store, &reply);
    for line in &report.lines {
        println!("{line}");
    }
    if report.changed {
        println!("{}", "Schedule updated.".green());
    }

    Ok(())
}

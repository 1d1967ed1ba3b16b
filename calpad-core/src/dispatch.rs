//! Applies an assistant action batch to the event store.
//!
//! Actions run sequentially in array order, each against the current state of
//! the store, so a later `copy_events` sees events added earlier in the same
//! batch. There is no cross-action rollback: a malformed action stops the
//! remainder of the batch while prior effects stay applied. An unknown action
//! kind is reported and skipped without stopping the batch.

use chrono::NaiveDate;
use serde_json::Value;

use crate::action::{
    ActionBatch, AddEvents, AssistantReply, CopyEvents, TargetEvents,
};
use crate::error::{CalpadError, CalpadResult};
use crate::event::Event;
use crate::store::EventStore;

/// What happened to one action in a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Applied,
    Skipped(String),
    Failed(String),
}

/// Transcript and outcome of dispatching one batch. `changed` is the signal
/// the caller uses to refresh any schedule display.
#[derive(Debug, Default)]
pub struct DispatchReport {
    pub lines: Vec<String>,
    pub outcomes: Vec<ActionOutcome>,
    pub changed: bool,
}

/// Dispatch a parsed assistant reply. Error replies produce a transcript and
/// no mutation.
pub fn dispatch_reply(store: &mut EventStore, reply: &AssistantReply) -> DispatchReport {
    match reply {
        AssistantReply::Batch(batch) => dispatch(store, batch),
        AssistantReply::Error(err) => {
            let mut report = DispatchReport::default();
            report.lines.push(format!("Assistant error: {}", err.error));
            if let Some(original) = &err.original_response {
                report.lines.push(format!("Original response: {original}"));
            }
            report
        }
    }
}

/// Apply `batch` to `store`, left to right.
pub fn dispatch(store: &mut EventStore, batch: &ActionBatch) -> DispatchReport {
    let mut report = DispatchReport::default();

    for action in &batch.actions {
        let kind = action.get("action").and_then(Value::as_str).unwrap_or("");

        let result = match kind {
            "add_events" => decode(action).and_then(|p| add_events(store, p, &mut report)),
            "complete_events" => decode(action).and_then(|p| complete_events(store, p, &mut report)),
            "delete_events" => decode(action).and_then(|p| delete_events(store, p, &mut report)),
            "copy_events" => decode(action).and_then(|p| copy_events(store, p, &mut report)),
            other => {
                let kind = if other.is_empty() { "<missing>" } else { other };
                report.lines.push(format!("Unhandled action: {kind}"));
                report
                    .outcomes
                    .push(ActionOutcome::Skipped(format!("unknown action kind '{kind}'")));
                continue;
            }
        };

        match result {
            Ok(()) => report.outcomes.push(ActionOutcome::Applied),
            Err(e) => {
                report.lines.push(format!("Error: {e}"));
                report.outcomes.push(ActionOutcome::Failed(e.to_string()));
                // Malformed data within a known action aborts the rest of the
                // batch; effects applied so far are kept.
                break;
            }
        }
    }

    report
}

/// Parse a YYYY-MM-DD calendar date.
pub fn parse_date(s: &str) -> CalpadResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| CalpadError::InvalidDate(s.to_string()))
}

fn decode<T: serde::de::DeserializeOwned>(action: &Value) -> CalpadResult<T> {
    serde_json::from_value(action.clone())
        .map_err(|e| CalpadError::Assistant(format!("Malformed action: {e}")))
}

fn add_events(
    store: &mut EventStore,
    payload: AddEvents,
    report: &mut DispatchReport,
) -> CalpadResult<()> {
    if payload.events.is_empty() {
        report.lines.push("No events to add.".to_string());
        return Ok(());
    }
    for spec in payload.events {
        let date = parse_date(&spec.date)?;
        let event = Event::new(spec.title, spec.time);
        report.lines.push(format!("Added: {} on {date}", event.title));
        store.add_event(date, event);
        report.changed = true;
    }
    Ok(())
}

fn complete_events(
    store: &mut EventStore,
    payload: TargetEvents,
    report: &mut DispatchReport,
) -> CalpadResult<()> {
    if payload.events.is_empty() {
        report.lines.push("No events to complete.".to_string());
        return Ok(());
    }
    for target in payload.events {
        let date = parse_date(&target.date)?;
        if target.is_all() {
            let count = store.complete_all_for_date(date);
            if count > 0 {
                report.lines.push(format!("Completed {count} events on {date}"));
                report.changed = true;
            } else {
                report.lines.push(format!("No incomplete events on {date}"));
            }
        } else if store.toggle_completion(date, &target.title) {
            report.lines.push(format!("Toggled: {} on {date}", target.title));
            report.changed = true;
        } else {
            report
                .lines
                .push(format!("No event titled '{}' on {date}", target.title));
        }
    }
    Ok(())
}

fn delete_events(
    store: &mut EventStore,
    payload: TargetEvents,
    report: &mut DispatchReport,
) -> CalpadResult<()> {
    if payload.events.is_empty() {
        report.lines.push("No events to delete.".to_string());
        return Ok(());
    }
    for target in payload.events {
        let date = parse_date(&target.date)?;
        if target.is_all() {
            let count = store.delete_all_for_date(date);
            if count > 0 {
                report.lines.push(format!("Deleted {count} events on {date}"));
                report.changed = true;
            } else {
                report.lines.push(format!("No events on {date}"));
            }
        } else if store.delete_by_title(date, &target.title) {
            report.lines.push(format!("Deleted: {} on {date}", target.title));
            report.changed = true;
        } else {
            report
                .lines
                .push(format!("No event titled '{}' on {date}", target.title));
        }
    }
    Ok(())
}

fn copy_events(
    store: &mut EventStore,
    payload: CopyEvents,
    report: &mut DispatchReport,
) -> CalpadResult<()> {
    let source = parse_date(&payload.source_date)?;
    let destination = parse_date(&payload.destination_date)?;
    let count = store.copy_events(source, destination);
    if count > 0 {
        report
            .lines
            .push(format!("Copied {count} events from {source} to {destination}"));
        report.changed = true;
    } else {
        // Not an error: an empty source date is a valid no-op
        report.lines.push(format!("Nothing to copy on {source}"));
    }
    Ok(())
}

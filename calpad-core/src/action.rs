//! Wire types for the assistant's JSON replies.
//!
//! The external interpreter answers every request with a single JSON object:
//! either `{"actions": [...]}` carrying a batch of mutation requests, or
//! `{"error": "...", "original_response": "..."}` when it could not produce a
//! valid batch. Individual actions are kept as raw JSON values here so that an
//! unknown action kind can be reported without failing the whole parse; the
//! dispatcher decodes each one against its kind-specific payload type.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{CalpadError, CalpadResult};

/// Sentinel title meaning "every event on the date" in complete/delete
/// actions.
pub const ALL_SENTINEL: &str = "all";

/// Top-level assistant reply.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AssistantReply {
    Batch(ActionBatch),
    Error(AssistantError),
}

/// An ordered batch of structured mutation requests.
#[derive(Debug, Deserialize)]
pub struct ActionBatch {
    pub actions: Vec<Value>,
}

/// The interpreter could not produce a valid action batch.
#[derive(Debug, Deserialize)]
pub struct AssistantError {
    pub error: String,
    #[serde(default)]
    pub original_response: Option<String>,
}

/// Descriptor for a new event inside an `add_events` action.
#[derive(Debug, Deserialize)]
pub struct NewEventSpec {
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
}

/// Reference to an existing event (or the `"all"` sentinel) inside
/// `complete_events` and `delete_events` actions.
#[derive(Debug, Deserialize)]
pub struct EventRef {
    pub title: String,
    pub date: String,
}

impl EventRef {
    pub fn is_all(&self) -> bool {
        self.title.eq_ignore_ascii_case(ALL_SENTINEL)
    }
}

#[derive(Debug, Deserialize)]
pub struct AddEvents {
    pub events: Vec<NewEventSpec>,
}

/// Payload shared by `complete_events` and `delete_events`.
#[derive(Debug, Deserialize)]
pub struct TargetEvents {
    pub events: Vec<EventRef>,
}

#[derive(Debug, Deserialize)]
pub struct CopyEvents {
    pub source_date: String,
    pub destination_date: String,
}

/// Strip a ```json markdown fence down to its body. The model sometimes wraps
/// replies in a fence despite the JSON response mime type.
pub fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parse a raw assistant reply into its structured form.
pub fn parse_reply(raw: &str) -> CalpadResult<AssistantReply> {
    let body = strip_code_fence(raw);
    serde_json::from_str(body)
        .map_err(|e| CalpadError::Assistant(format!("Malformed assistant reply: {e}")))
}

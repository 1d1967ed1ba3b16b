//! Gemini client: turns free text plus the current schedule into an action
//! batch reply.

use anyhow::{Context, Result};
use calpad_core::config::CalpadConfig;
use chrono::{Duration, Local};
use serde_json::{Value, json};

const GEMINI_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

pub struct GeminiClient {
    api_key: String,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        GeminiClient {
            api_key,
            http: reqwest::Client::new(),
        }
    }

    pub fn from_saved_key() -> Result<Self> {
        let path = CalpadConfig::api_key_path()?;
        let key = std::fs::read_to_string(&path).with_context(|| {
            format!(
                "No API key found at {}. Run: calpad setkey",
                path.display()
            )
        })?;
        let key = key.trim().to_string();
        if key.is_empty() {
            anyhow::bail!("API key file is empty. Run: calpad setkey");
        }
        Ok(Self::new(key))
    }

    /// Send the user's request and return the assistant's raw reply text.
    ///
    /// API-level failures are folded into the `{"error": ...}` reply shape so
    /// the caller has a single path for reporting; only transport failures
    /// surface as errors here.
    pub async fn interpret(&self, request: &str, schedule_context: &str) -> Result<String> {
        let body = json!({
            "contents": [{"parts": [{"text": build_prompt(request, schedule_context)}]}],
            "generationConfig": {"response_mime_type": "application/json"}
        });

        let response = self
            .http
            .post(format!("{GEMINI_URL}?key={}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .context("Failed to reach the Gemini API")?;

        let payload: Value = response
            .json()
            .await
            .context("Failed to read the Gemini API response")?;

        Ok(unwrap_reply(&payload))
    }
}

/// Pull the reply text out of the API envelope, turning API errors and
/// unexpected shapes into the standard error reply.
fn unwrap_reply(payload: &Value) -> String {
    if let Some(text) = payload
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
    {
        return text.to_string();
    }

    if let Some(message) = payload.pointer("/error/message").and_then(Value::as_str) {
        return json!({"error": format!("API error: {message}")}).to_string();
    }

    json!({
        "error": "Unexpected response format from the Gemini API.",
        "original_response": payload.to_string(),
    })
    .to_string()
}

fn build_prompt(request: &str, schedule_context: &str) -> String {
    let now = Local::now();
    let today = now.format("%Y-%m-%d").to_string();
    let tomorrow = (now + Duration::days(1)).format("%Y-%m-%d").to_string();

    format!(
        "You are a powerful calendar assistant. Your response MUST be a single JSON object \
         whose root contains one key, 'actions', an array of action objects. \
         The current date and time is {current}.\n\n\
         ## CURRENT SCHEDULE (for context) ##\n\
         {schedule_context}\n\n\
         ## Core rules ##\n\
         1. When the user asks to complete, delete or modify an event, first look at the \
         CURRENT SCHEDULE and identify the exact title and date of the event they mean. \
         Use that exact title and date in the JSON, not the user's descriptive phrase.\n\
         2. When adding events, refine the user's language into a concise title.\n\
         3. Use the title \"all\" to target every event on a date.\n\n\
         ## ACTIONS FORMAT ##\n\
         1. Add: {{\"action\": \"add_events\", \"events\": [{{\"title\": \"...\", \"date\": \"YYYY-MM-DD\", \"time\": \"HH:MM\"}}]}}\n\
         2. Complete: {{\"action\": \"complete_events\", \"events\": [{{\"title\": \"...\", \"date\": \"YYYY-MM-DD\"}}]}}\n\
         3. Delete: {{\"action\": \"delete_events\", \"events\": [{{\"title\": \"...\", \"date\": \"YYYY-MM-DD\"}}]}}\n\
         4. Copy: {{\"action\": \"copy_events\", \"source_date\": \"YYYY-MM-DD\", \"destination_date\": \"YYYY-MM-DD\"}}\n\n\
         ## EXAMPLES ##\n\
         User: dinner with Sam today at 7pm\n\
         Assistant: {{\"actions\": [{{\"action\": \"add_events\", \"events\": [{{\"title\": \"Dinner with Sam\", \"date\": \"{today}\", \"time\": \"19:00\"}}]}}]}}\n\n\
         User: I finished my workout today\n\
         Assistant: {{\"actions\": [{{\"action\": \"complete_events\", \"events\": [{{\"title\": \"Workout\", \"date\": \"{today}\"}}]}}]}}\n\n\
         User: copy today's schedule to tomorrow\n\
         Assistant: {{\"actions\": [{{\"action\": \"copy_events\", \"source_date\": \"{today}\", \"destination_date\": \"{tomorrow}\"}}]}}\n\n\
         Process the user's request based on the rules and CURRENT SCHEDULE: {request}",
        current = now.format("%Y-%m-%d %H:%M"),
    )
}

//! The atomic calendar entry.

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CalpadError, CalpadResult};

/// A titled, optionally timed, completable entry attached to a calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique across the whole store. Assigned at creation, never reused.
    #[serde(default)]
    pub id: String,
    pub title: String,
    /// Wall-clock time of day in HH:MM form. None means all-day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl Event {
    pub fn new(title: impl Into<String>, time: Option<String>) -> Self {
        Event {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            // The assistant sends "" for all-day events
            time: time.filter(|t| !t.trim().is_empty()),
            completed: false,
        }
    }

    /// Backfill an id for events persisted before ids existed.
    pub fn ensure_id(&mut self) {
        if self.id.is_empty() {
            self.id = Uuid::new_v4().to_string();
        }
    }

    /// Parsed time of day, if present and well-formed.
    pub fn time_of_day(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(self.time.as_deref()?, "%H:%M").ok()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.time.as_deref() {
            Some(time) if !time.is_empty() => write!(f, "{} - {}", time, self.title),
            _ => write!(f, "{}", self.title),
        }
    }
}

/// Validate an HH:MM time-of-day string.
pub fn parse_time(s: &str) -> CalpadResult<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| CalpadError::InvalidTime(s.to_string()))
}

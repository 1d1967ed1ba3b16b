//! Reminder scheduling and the notification window rule.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use calpad_core::{Event, EventStore};
use chrono::{Local, NaiveDateTime};
use notify_rust::Notification;
use tokio::task::JoinHandle;

const CHECK_INTERVAL: Duration = Duration::from_secs(60);
const REMINDER_TITLE: &str = "Upcoming event";

/// A reminder ready to be shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub title: String,
    pub body: String,
}

/// Scans the store on a fixed interval and fires each qualifying reminder at
/// most once over the scheduler's lifetime.
///
/// The dedup set of notified event ids is append-only: an event that has
/// fired never fires again, even if it is later un-completed or moved.
pub struct ReminderScheduler {
    store: Arc<Mutex<EventStore>>,
    lead_time_minutes: i64,
    notified: Arc<Mutex<HashSet<String>>>,
    handle: Option<JoinHandle<()>>,
}

impl ReminderScheduler {
    pub fn new(store: Arc<Mutex<EventStore>>, lead_time_minutes: i64) -> Self {
        ReminderScheduler {
            store,
            lead_time_minutes,
            notified: Arc::new(Mutex::new(HashSet::new())),
            handle: None,
        }
    }

    /// Begin checking: once immediately, then every minute. No-op if already
    /// running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }

        let store = Arc::clone(&self.store);
        let notified = Arc::clone(&self.notified);
        let lead_time_minutes = self.lead_time_minutes;

        self.handle = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(CHECK_INTERVAL);
            loop {
                ticker.tick().await;

                // Both locks are released before showing notifications
                let due = {
                    let Ok(store) = store.lock() else { break };
                    let Ok(mut notified) = notified.lock() else { break };
                    due_reminders(
                        &store,
                        &mut notified,
                        lead_time_minutes,
                        Local::now().naive_local(),
                    )
                };

                for reminder in due {
                    show(&reminder);
                }
            }
        }));
    }

    /// Cancel future checks. Safe to call when already stopped.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One scan of the store at `now`, recording fired event ids in `notified`.
///
/// An event is due when it is not completed, has not fired before, and its
/// start lies in the inclusive window `[-1, lead_time_minutes]` whole minutes
/// from now. The minute of tolerance on the past side covers a check that
/// fires slightly late. Untimed events never remind; past dates are skipped.
pub fn due_reminders(
    store: &EventStore,
    notified: &mut HashSet<String>,
    lead_time_minutes: i64,
    now: NaiveDateTime,
) -> Vec<Reminder> {
    let mut due = Vec::new();

    for date in store.dates() {
        if date < now.date() {
            continue;
        }
        for event in store.events_for_date(date) {
            if event.completed || notified.contains(&event.id) {
                continue;
            }
            let Some(time) = event.time_of_day() else {
                continue;
            };

            let minutes_until = (date.and_time(time) - now).num_minutes();
            if (-1..=lead_time_minutes).contains(&minutes_until) {
                due.push(Reminder {
                    title: REMINDER_TITLE.to_string(),
                    body: reminder_message(&event, minutes_until),
                });
                notified.insert(event.id.clone());
            }
        }
    }

    due
}

/// Message for a due event. The untimed branch stays reachable here even
/// though `due_reminders` currently skips untimed events.
pub fn reminder_message(event: &Event, minutes_until: i64) -> String {
    match event.time.as_deref() {
        Some(time) if !time.is_empty() => {
            if minutes_until <= 0 {
                format!("Time to start '{}' now.", event.title)
            } else {
                format!(
                    "'{}' starts at {} ({} minutes from now)",
                    event.title, time, minutes_until
                )
            }
        }
        _ => format!("'{}' is scheduled today.", event.title),
    }
}

fn show(reminder: &Reminder) {
    let result = Notification::new()
        .appname("calpad")
        .summary(&reminder.title)
        .body(&reminder.body)
        .show();
    if let Err(e) = result {
        eprintln!("calpad: could not show notification: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn temp_store() -> (tempfile::TempDir, EventStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = EventStore::load(dir.path().join("events.json"));
        (dir, store)
    }

    #[test]
    fn test_fires_once_within_lead_window() {
        let (_dir, mut store) = temp_store();
        store.add_event(date("2024-05-22"), Event::new("Standup", Some("09:00".to_string())));
        let mut notified = HashSet::new();

        let first = due_reminders(&store, &mut notified, 60, at("2024-05-22 08:30"));
        assert_eq!(first.len(), 1);
        assert!(first[0].body.contains("30 minutes"));

        // Second consecutive tick fires nothing for the same event
        let second = due_reminders(&store, &mut notified, 60, at("2024-05-22 08:45"));
        assert!(second.is_empty());
    }

    #[test]
    fn test_window_boundaries() {
        let (_dir, mut store) = temp_store();
        store.add_event(date("2024-05-22"), Event::new("Standup", Some("09:00".to_string())));

        // 61 minutes early: outside the lead window
        let mut notified = HashSet::new();
        assert!(due_reminders(&store, &mut notified, 60, at("2024-05-22 07:59")).is_empty());

        // Exactly lead-time minutes early: inside
        assert_eq!(due_reminders(&store, &mut notified, 60, at("2024-05-22 08:00")).len(), 1);

        // One minute late: still inside, tolerating a late tick
        let mut notified = HashSet::new();
        assert_eq!(due_reminders(&store, &mut notified, 60, at("2024-05-22 09:01")).len(), 1);

        // Two minutes late: gone
        let mut notified = HashSet::new();
        assert!(due_reminders(&store, &mut notified, 60, at("2024-05-22 09:02")).is_empty());
    }

    #[test]
    fn test_completed_events_never_remind() {
        let (_dir, mut store) = temp_store();
        store.add_event(date("2024-05-22"), Event::new("Standup", Some("09:00".to_string())));
        store.toggle_completion(date("2024-05-22"), "Standup");

        let mut notified = HashSet::new();
        assert!(due_reminders(&store, &mut notified, 60, at("2024-05-22 08:30")).is_empty());
        assert!(notified.is_empty());
    }

    #[test]
    fn test_untimed_events_are_skipped() {
        let (_dir, mut store) = temp_store();
        store.add_event(date("2024-05-22"), Event::new("Submit report", None));

        let mut notified = HashSet::new();
        assert!(due_reminders(&store, &mut notified, 60, at("2024-05-22 08:30")).is_empty());
    }

    #[test]
    fn test_past_dates_are_skipped() {
        let (_dir, mut store) = temp_store();
        store.add_event(date("2024-05-21"), Event::new("Yesterday", Some("09:00".to_string())));

        let mut notified = HashSet::new();
        assert!(due_reminders(&store, &mut notified, 60, at("2024-05-22 08:30")).is_empty());
    }

    #[test]
    fn test_imminent_message() {
        let (_dir, mut store) = temp_store();
        store.add_event(date("2024-05-22"), Event::new("Standup", Some("09:00".to_string())));

        let mut notified = HashSet::new();
        let due = due_reminders(&store, &mut notified, 60, at("2024-05-22 09:00"));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].body, "Time to start 'Standup' now.");
    }

    #[test]
    fn test_untimed_message_branch() {
        // Unreachable from due_reminders today, but kept wired
        let event = Event::new("Submit report", None);
        assert_eq!(
            reminder_message(&event, 10),
            "'Submit report' is scheduled today."
        );
    }

    #[tokio::test]
    async fn test_start_is_idempotent_and_stop_is_safe() {
        let (_dir, store) = temp_store();
        let store = Arc::new(Mutex::new(store));
        let mut scheduler = ReminderScheduler::new(store, 60);

        assert!(!scheduler.is_running());
        scheduler.stop(); // safe while stopped

        scheduler.start();
        assert!(scheduler.is_running());
        scheduler.start(); // no-op while running
        assert!(scheduler.is_running());

        scheduler.stop();
        assert!(!scheduler.is_running());
        scheduler.stop();
    }
}

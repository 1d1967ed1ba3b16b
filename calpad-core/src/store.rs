//! Date-indexed event store with JSON persistence.
//!
//! The store owns a mapping from calendar date to events and writes the whole
//! document back to disk after every mutation. A failed write is logged and
//! does not roll back the in-memory state; memory stays authoritative until
//! the next successful write.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::{CalpadError, CalpadResult};
use crate::event::Event;

pub struct EventStore {
    path: PathBuf,
    days: BTreeMap<NaiveDate, Vec<Event>>,
}

impl EventStore {
    /// Load the store from `path`. A missing or unparsable file starts empty
    /// rather than failing; events persisted without ids get one assigned
    /// immediately.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let mut days: BTreeMap<NaiveDate, Vec<Event>> = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                eprintln!(
                    "calpad: could not parse {}: {e}. Starting with an empty store.",
                    path.display()
                );
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };

        for events in days.values_mut() {
            for event in events.iter_mut() {
                event.ensure_id();
            }
        }

        EventStore { path, days }
    }

    /// Events on `date`, timed entries first in ascending order, untimed last.
    pub fn events_for_date(&self, date: NaiveDate) -> Vec<Event> {
        let mut events = self.days.get(&date).cloned().unwrap_or_default();
        events.sort_by_key(|e| (e.time_of_day().is_none(), e.time_of_day()));
        events
    }

    /// All dates that currently have at least one event, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.days.keys().copied().collect()
    }

    pub fn add_event(&mut self, date: NaiveDate, mut event: Event) {
        event.ensure_id();
        self.days.entry(date).or_default().push(event);
        self.persist();
    }

    /// Flip `completed` on the first event at `date` whose title matches
    /// case-insensitively. Returns whether a match was found.
    pub fn toggle_completion(&mut self, date: NaiveDate, title: &str) -> bool {
        let target = title.to_lowercase();
        let Some(events) = self.days.get_mut(&date) else {
            return false;
        };
        let Some(event) = events.iter_mut().find(|e| e.title.to_lowercase() == target) else {
            return false;
        };
        event.completed = !event.completed;
        self.persist();
        true
    }

    /// Mark every incomplete event on `date` as completed. Returns how many
    /// were flipped.
    pub fn complete_all_for_date(&mut self, date: NaiveDate) -> usize {
        let Some(events) = self.days.get_mut(&date) else {
            return 0;
        };
        let mut count = 0;
        for event in events.iter_mut().filter(|e| !e.completed) {
            event.completed = true;
            count += 1;
        }
        if count > 0 {
            self.persist();
        }
        count
    }

    /// Delete the first event at `date` whose title matches
    /// case-insensitively. Returns whether a match was found.
    pub fn delete_by_title(&mut self, date: NaiveDate, title: &str) -> bool {
        let target = title.to_lowercase();
        let Some(events) = self.days.get_mut(&date) else {
            return false;
        };
        let Some(pos) = events.iter().position(|e| e.title.to_lowercase() == target) else {
            return false;
        };
        events.remove(pos);
        if events.is_empty() {
            self.days.remove(&date);
        }
        self.persist();
        true
    }

    /// Delete every event on `date`. Returns how many were removed.
    pub fn delete_all_for_date(&mut self, date: NaiveDate) -> usize {
        match self.days.remove(&date) {
            Some(events) => {
                self.persist();
                events.len()
            }
            None => 0,
        }
    }

    /// Copy every event on `source` to `destination` with fresh ids and
    /// completion reset. Returns the number copied; performs no mutation when
    /// the source date is empty.
    pub fn copy_events(&mut self, source: NaiveDate, destination: NaiveDate) -> usize {
        let copies: Vec<Event> = self
            .days
            .get(&source)
            .map(|events| {
                events
                    .iter()
                    .map(|e| Event::new(e.title.clone(), e.time.clone()))
                    .collect()
            })
            .unwrap_or_default();

        if copies.is_empty() {
            return 0;
        }

        let count = copies.len();
        self.days.entry(destination).or_default().extend(copies);
        self.persist();
        count
    }

    /// Move the event with `id` to `new_date`, keeping the id. Linear scan
    /// across all dates. Returns whether the event was found.
    pub fn move_event(&mut self, id: &str, new_date: NaiveDate) -> bool {
        let found = self.days.iter().find_map(|(date, events)| {
            events.iter().position(|e| e.id == id).map(|pos| (*date, pos))
        });
        let Some((old_date, pos)) = found else {
            return false;
        };

        let Some(events) = self.days.get_mut(&old_date) else {
            return false;
        };
        let event = events.remove(pos);
        if events.is_empty() {
            self.days.remove(&old_date);
        }

        self.days.entry(new_date).or_default().push(event);
        self.persist();
        true
    }

    /// Replace the event with a matching id at `date` in place. No-op if the
    /// id is not present on that date.
    pub fn update_event(&mut self, date: NaiveDate, updated: Event) {
        let Some(events) = self.days.get_mut(&date) else {
            return;
        };
        if let Some(slot) = events.iter_mut().find(|e| e.id == updated.id) {
            *slot = updated;
            self.persist();
        }
    }

    /// Human-readable digest of the whole schedule, dates ascending. Handed
    /// to the assistant as context so it can refer to events by exact title
    /// and date.
    pub fn schedule_summary(&self) -> String {
        if self.days.is_empty() {
            return "No events scheduled.".to_string();
        }

        let mut out = String::new();
        for date in self.days.keys() {
            out.push_str(&format!("{}\n", date.format("%Y-%m-%d")));
            for event in self.events_for_date(*date) {
                let mark = if event.completed { "x" } else { " " };
                match event.time.as_deref() {
                    Some(time) if !time.is_empty() => {
                        out.push_str(&format!("- [{}] {} ({})\n", mark, event.title, time));
                    }
                    _ => out.push_str(&format!("- [{}] {}\n", mark, event.title)),
                }
            }
        }
        out
    }

    fn persist(&self) {
        if let Err(e) = self.write_to_disk() {
            eprintln!("calpad: failed to persist {}: {e}", self.path.display());
        }
    }

    fn write_to_disk(&self) -> CalpadResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.days)
            .map_err(|e| CalpadError::Serialization(e.to_string()))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn temp_store() -> (tempfile::TempDir, EventStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = EventStore::load(dir.path().join("events.json"));
        (dir, store)
    }

    #[test]
    fn test_add_then_query() {
        let (_dir, mut store) = temp_store();
        let event = Event::new("Team meeting", Some("15:00".to_string()));
        let id = event.id.clone();

        store.add_event(date("2024-05-22"), event);

        let events = store.events_for_date(date("2024-05-22"));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, id);
        assert_eq!(events[0].title, "Team meeting");
    }

    #[test]
    fn test_persistence_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");

        let mut store = EventStore::load(&path);
        store.add_event(date("2024-05-22"), Event::new("Team meeting", Some("15:00".to_string())));
        store.add_event(date("2024-05-23"), Event::new("Submit report", None));
        store.toggle_completion(date("2024-05-22"), "team meeting");
        let original: Vec<Event> = store.events_for_date(date("2024-05-22"));

        let reloaded = EventStore::load(&path);
        assert_eq!(reloaded.events_for_date(date("2024-05-22")), original);
        assert_eq!(reloaded.events_for_date(date("2024-05-23")).len(), 1);
        assert!(reloaded.events_for_date(date("2024-05-22"))[0].completed);
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = EventStore::load(dir.path().join("does_not_exist.json"));
        assert!(store.dates().is_empty());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(&path, "not json {{{").unwrap();

        let store = EventStore::load(&path);
        assert!(store.dates().is_empty());
    }

    #[test]
    fn test_load_assigns_missing_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(
            &path,
            r#"{"2024-05-22": [{"title": "Pre-id event", "time": "15:00", "completed": false}]}"#,
        )
        .unwrap();

        let store = EventStore::load(&path);
        let events = store.events_for_date(date("2024-05-22"));
        assert_eq!(events.len(), 1);
        assert!(!events[0].id.is_empty());
    }

    #[test]
    fn test_events_sorted_by_time_untimed_last() {
        let (_dir, mut store) = temp_store();
        let d = date("2024-05-22");
        store.add_event(d, Event::new("Untimed", None));
        store.add_event(d, Event::new("Evening", Some("18:00".to_string())));
        store.add_event(d, Event::new("Morning", Some("09:00".to_string())));

        let titles: Vec<_> = store
            .events_for_date(d)
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["Morning", "Evening", "Untimed"]);
    }

    #[test]
    fn test_toggle_completion_is_its_own_inverse() {
        let (_dir, mut store) = temp_store();
        let d = date("2024-05-22");
        store.add_event(d, Event::new("Gym", Some("18:00".to_string())));

        assert!(store.toggle_completion(d, "GYM"));
        assert!(store.events_for_date(d)[0].completed);
        assert!(store.toggle_completion(d, "gym"));
        assert!(!store.events_for_date(d)[0].completed);
    }

    #[test]
    fn test_toggle_completion_no_match() {
        let (_dir, mut store) = temp_store();
        assert!(!store.toggle_completion(date("2024-05-22"), "Nothing here"));
    }

    #[test]
    fn test_complete_all_skips_already_completed() {
        let (_dir, mut store) = temp_store();
        let d = date("2024-05-22");
        store.add_event(d, Event::new("A", None));
        store.add_event(d, Event::new("B", None));
        store.toggle_completion(d, "A");

        assert_eq!(store.complete_all_for_date(d), 1);
        assert!(store.events_for_date(d).iter().all(|e| e.completed));
        assert_eq!(store.complete_all_for_date(d), 0);
    }

    #[test]
    fn test_delete_by_title_prunes_empty_date() {
        let (_dir, mut store) = temp_store();
        let d = date("2024-05-22");
        store.add_event(d, Event::new("Only one", None));

        assert!(store.delete_by_title(d, "only one"));
        assert!(store.events_for_date(d).is_empty());
        assert!(!store.dates().contains(&d));
    }

    #[test]
    fn test_delete_all_for_date() {
        let (_dir, mut store) = temp_store();
        let d = date("2024-05-22");
        store.add_event(d, Event::new("A", None));
        store.add_event(d, Event::new("B", None));

        assert_eq!(store.delete_all_for_date(d), 2);
        assert!(store.events_for_date(d).is_empty());
        assert!(!store.dates().contains(&d));
        assert_eq!(store.delete_all_for_date(d), 0);
    }

    #[test]
    fn test_copy_events_fresh_ids_and_reset_completion() {
        let (_dir, mut store) = temp_store();
        let src = date("2024-05-22");
        let dst = date("2024-05-23");
        store.add_event(src, Event::new("Meeting", Some("15:00".to_string())));
        store.add_event(src, Event::new("Gym", Some("18:00".to_string())));
        store.toggle_completion(src, "Gym");

        assert_eq!(store.copy_events(src, dst), 2);

        let source_ids: Vec<_> = store.events_for_date(src).into_iter().map(|e| e.id).collect();
        let copies = store.events_for_date(dst);
        assert_eq!(copies.len(), 2);
        for copy in &copies {
            assert!(!source_ids.contains(&copy.id));
            assert!(!copy.completed);
        }
    }

    #[test]
    fn test_copy_events_empty_source_is_noop() {
        let (_dir, mut store) = temp_store();
        let dst = date("2024-05-23");
        store.add_event(dst, Event::new("Existing", None));

        assert_eq!(store.copy_events(date("2024-05-22"), dst), 0);
        assert_eq!(store.events_for_date(dst).len(), 1);
    }

    #[test]
    fn test_move_event_keeps_id_and_prunes_source() {
        let (_dir, mut store) = temp_store();
        let from = date("2024-05-22");
        let to = date("2024-05-29");
        let event = Event::new("Dentist", Some("10:00".to_string()));
        let id = event.id.clone();
        store.add_event(from, event);

        assert!(store.move_event(&id, to));
        assert!(!store.dates().contains(&from));
        let moved = store.events_for_date(to);
        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].id, id);

        assert!(!store.move_event("no-such-id", to));
    }

    #[test]
    fn test_update_event_in_place() {
        let (_dir, mut store) = temp_store();
        let d = date("2024-05-22");
        let event = Event::new("Draft", Some("09:00".to_string()));
        let id = event.id.clone();
        store.add_event(d, event);

        let mut updated = store.events_for_date(d)[0].clone();
        updated.title = "Final".to_string();
        updated.time = Some("11:00".to_string());
        store.update_event(d, updated);

        let events = store.events_for_date(d);
        assert_eq!(events[0].id, id);
        assert_eq!(events[0].title, "Final");
        assert_eq!(events[0].time.as_deref(), Some("11:00"));
    }

    #[test]
    fn test_schedule_summary_format() {
        let (_dir, mut store) = temp_store();
        store.add_event(date("2024-05-23"), Event::new("Submit report", None));
        store.add_event(date("2024-05-22"), Event::new("Team meeting", Some("15:00".to_string())));
        store.toggle_completion(date("2024-05-23"), "Submit report");

        let summary = store.schedule_summary();
        assert_eq!(
            summary,
            "2024-05-22\n- [ ] Team meeting (15:00)\n2024-05-23\n- [x] Submit report\n"
        );
    }

    #[test]
    fn test_schedule_summary_empty() {
        let (_dir, store) = temp_store();
        assert_eq!(store.schedule_summary(), "No events scheduled.");
    }
}

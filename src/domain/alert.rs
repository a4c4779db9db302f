//! Transient activity log.

use std::collections::VecDeque;

use chrono::Local;
use serde::Serialize;

/// Entries retained before the oldest is silently dropped.
pub const ALERT_RETENTION: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Info,
    Success,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertEntry {
    pub id: u64,
    pub message: String,
    pub timestamp: String,
    pub kind: AlertKind,
}

/// Append-only log with a bounded retention window. Ids are monotonic and
/// keep counting across dropped entries.
#[derive(Debug, Clone, Default)]
pub struct AlertLog {
    entries: VecDeque<AlertEntry>,
    next_id: u64,
}

impl AlertLog {
    pub fn new() -> Self {
        AlertLog::default()
    }

    /// Append an entry stamped with the local wall-clock time. Returns the
    /// assigned id.
    pub fn push(&mut self, message: impl Into<String>, kind: AlertKind) -> u64 {
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        self.push_at(message, kind, timestamp)
    }

    pub fn push_at(
        &mut self,
        message: impl Into<String>,
        kind: AlertKind,
        timestamp: String,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push_back(AlertEntry {
            id,
            message: message.into(),
            timestamp,
            kind,
        });
        while self.entries.len() > ALERT_RETENTION {
            self.entries.pop_front();
        }
        id
    }

    /// Retained entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &AlertEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&AlertEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp(log: &mut AlertLog, message: &str) -> u64 {
        log.push_at(message, AlertKind::Info, "10:15:00".to_string())
    }

    #[test]
    fn ids_are_monotonic() {
        let mut log = AlertLog::new();
        let a = stamp(&mut log, "first");
        let b = stamp(&mut log, "second");
        assert!(b > a);
    }

    #[test]
    fn retention_drops_oldest() {
        let mut log = AlertLog::new();
        for i in 0..5 {
            stamp(&mut log, &format!("entry {i}"));
        }

        assert_eq!(log.len(), ALERT_RETENTION);
        let messages: Vec<&str> = log.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["entry 2", "entry 3", "entry 4"]);
    }

    #[test]
    fn ids_keep_counting_past_dropped_entries() {
        let mut log = AlertLog::new();
        for i in 0..5 {
            stamp(&mut log, &format!("entry {i}"));
        }
        assert_eq!(log.latest().unwrap().id, 4);
    }

    #[test]
    fn push_stamps_a_wall_clock_time() {
        let mut log = AlertLog::new();
        log.push("refreshed", AlertKind::Success);
        let entry = log.latest().unwrap();
        assert_eq!(entry.kind, AlertKind::Success);
        // HH:MM:SS
        assert_eq!(entry.timestamp.len(), 8);
    }

    #[test]
    fn empty_log() {
        let log = AlertLog::new();
        assert!(log.is_empty());
        assert!(log.latest().is_none());
    }
}

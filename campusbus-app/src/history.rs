use std::collections::VecDeque;

use campusbus_shared::models::Route;
use serde::Serialize;

const MAX_ENTRIES: usize = 10;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum HistoryStatus {
    Confirmed,
    Waitlisted,
    Cancelled,
}

impl HistoryStatus {
    pub fn label(&self) -> &'static str {
        match self {
            HistoryStatus::Confirmed => "Confirmed",
            HistoryStatus::Waitlisted => "Waitlisted",
            HistoryStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub route: Route,
    pub date: String,
    pub time: String,
    pub status: HistoryStatus,
}

/// Trips touched during this session, newest first
#[derive(Debug, Clone, Default)]
pub struct TripHistory {
    entries: VecDeque<HistoryEntry>,
}

impl TripHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(MAX_ENTRIES);
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
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

    fn entry(time: &str) -> HistoryEntry {
        HistoryEntry {
            route: Route::CampusToCity,
            date: "October 7, 2025".to_string(),
            time: time.to_string(),
            status: HistoryStatus::Confirmed,
        }
    }

    #[test]
    fn test_newest_first_and_capped() {
        let mut history = TripHistory::new();
        for minute in 0..12 {
            history.record(entry(&format!("5:{:02} PM", minute)));
        }
        assert_eq!(history.len(), 10);
        assert_eq!(history.entries().next().unwrap().time, "5:11 PM");
        assert_eq!(history.entries().last().unwrap().time, "5:02 PM");
    }
}

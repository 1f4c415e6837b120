use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::models::event::{EventDraft, EventRecord};
use crate::models::seed::default_events;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Could not save data: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not serialize data: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The flat list of event records and the file it is persisted to.
#[derive(Debug, Clone)]
pub struct EventStore {
    path: PathBuf,
    events: Vec<EventRecord>,
}

impl EventStore {
    pub fn new(path: impl Into<PathBuf>, events: Vec<EventRecord>) -> Self {
        Self {
            path: path.into(),
            events,
        }
    }

    /// Reads the saved list. A missing or unreadable file falls back to the seed list.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let events = match read_events(&path) {
            Ok(Some(events)) => {
                info!(path = %path.display(), count = events.len(), "loaded calendar data");
                events
            }
            Ok(None) => {
                info!(path = %path.display(), "no calendar data yet, using default schedule");
                default_events()
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "calendar data unreadable, using default schedule");
                default_events()
            }
        };
        Self { path, events }
    }

    pub fn save(&self) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(&self.events)?;
        fs::write(&self.path, body)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// Records whose date string is exactly `date`, in list order.
    pub fn query(&self, date: &str) -> Vec<&EventRecord> {
        self.events.iter().filter(|e| e.date == date).collect()
    }

    pub fn has_events_on(&self, date: &str) -> bool {
        self.events.iter().any(|e| e.date == date)
    }

    pub fn get(&self, id: &str) -> Option<&EventRecord> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn add(&mut self, record: EventRecord) {
        self.events.push(record);
    }

    pub fn update(&mut self, id: &str, draft: EventDraft) -> bool {
        match self.events.iter_mut().find(|e| e.id == id) {
            Some(record) => {
                record.apply(draft);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<EventRecord> {
        let idx = self.events.iter().position(|e| e.id == id)?;
        Some(self.events.remove(idx))
    }
}

fn read_events(path: &Path) -> Result<Option<Vec<EventRecord>>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&content)?))
}

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Category {
    Spiritual,
    Physical,
    Emotional,
    #[default]
    Intellectual,
}

/// Background and foreground colour of a rendered event row, as RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryColors {
    pub bg: [u8; 3],
    pub fg: [u8; 3],
}

const WHITE: [u8; 3] = [0xFF, 0xFF, 0xFF];

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Spiritual,
        Category::Physical,
        Category::Emotional,
        Category::Intellectual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Spiritual => "Spiritual",
            Category::Physical => "Physical",
            Category::Emotional => "Emotional",
            Category::Intellectual => "Intellectual",
        }
    }

    /// Unknown names map to Intellectual.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "Spiritual" => Category::Spiritual,
            "Physical" => Category::Physical,
            "Emotional" => Category::Emotional,
            _ => Category::Intellectual,
        }
    }

    /// Guesses a category from free text by keyword.
    pub fn infer(text: &str) -> Self {
        let lower = text.to_lowercase();
        let has_any = |words: &[&str]| words.iter().any(|w| lower.contains(w));
        if has_any(&["spiritual", "meditation", "prayer"]) {
            Category::Spiritual
        } else if has_any(&["physical", "exercise", "gym"]) {
            Category::Physical
        } else if has_any(&["emotional", "therapy", "support"]) {
            Category::Emotional
        } else {
            Category::Intellectual
        }
    }

    pub fn colors(&self) -> CategoryColors {
        let bg = match self {
            Category::Spiritual => [0x9B, 0x59, 0xB6],
            Category::Physical => [0xE7, 0x4C, 0x3C],
            Category::Emotional => [0xF3, 0x9C, 0x12],
            Category::Intellectual => [0x34, 0x98, 0xDB],
        };
        CategoryColors { bg, fg: WHITE }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::from_name(&value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn new_event_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(default = "new_event_id")]
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub category: Category,
}

impl EventRecord {
    pub fn new(date: &str, draft: EventDraft) -> Self {
        Self {
            id: new_event_id(),
            date: date.to_string(),
            event: draft.event,
            start_time: draft.start_time,
            end_time: draft.end_time,
            category: draft.category,
        }
    }

    pub fn apply(&mut self, draft: EventDraft) {
        self.event = draft.event;
        self.start_time = draft.start_time;
        self.end_time = draft.end_time;
        self.category = draft.category;
    }

    pub fn draft(&self) -> EventDraft {
        EventDraft {
            event: self.event.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            category: self.category,
        }
    }
}

/// The user-editable part of a record, as entered in the add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub event: String,
    pub start_time: String,
    pub end_time: String,
    pub category: Category,
}

impl EventDraft {
    /// Trims every text field. Fails when the event name is empty.
    pub fn validated(self) -> Result<Self, &'static str> {
        let draft = Self {
            event: self.event.trim().to_string(),
            start_time: self.start_time.trim().to_string(),
            end_time: self.end_time.trim().to_string(),
            category: self.category,
        };
        if draft.event.is_empty() {
            return Err("Please enter an event name.");
        }
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_on_load() {
        let record: EventRecord =
            serde_json::from_str(r#"{"date":"1/19/26","event":"Study Session"}"#).unwrap();
        assert_eq!(record.start_time, "");
        assert_eq!(record.end_time, "");
        assert_eq!(record.category, Category::Intellectual);
        assert!(!record.id.is_empty());
    }

    #[test]
    fn unknown_category_reads_as_intellectual() {
        let record: EventRecord = serde_json::from_str(
            r#"{"date":"1/19/26","event":"Reading","category":"Academic"}"#,
        )
        .unwrap();
        assert_eq!(record.category, Category::Intellectual);
        assert_eq!(record.category.colors(), Category::Intellectual.colors());
    }

    #[test]
    fn category_serializes_as_plain_name() {
        let json = serde_json::to_string(&Category::Emotional).unwrap();
        assert_eq!(json, "\"Emotional\"");
    }

    #[test]
    fn infers_category_from_keywords() {
        assert_eq!(Category::infer("Morning Meditation"), Category::Spiritual);
        assert_eq!(Category::infer("gym with Sam"), Category::Physical);
        assert_eq!(Category::infer("Therapy"), Category::Emotional);
        assert_eq!(Category::infer("Problem Set 2"), Category::Intellectual);
    }

    #[test]
    fn draft_validation_trims_and_requires_name() {
        let ok = EventDraft {
            event: "  Yoga Class ".to_string(),
            start_time: " 7:00 AM".to_string(),
            ..Default::default()
        }
        .validated()
        .unwrap();
        assert_eq!(ok.event, "Yoga Class");
        assert_eq!(ok.start_time, "7:00 AM");

        let empty = EventDraft {
            event: "   ".to_string(),
            ..Default::default()
        };
        assert!(empty.validated().is_err());
    }
}

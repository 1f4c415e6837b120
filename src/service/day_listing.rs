use crate::models::event::{Category, EventRecord};
use crate::models::store::EventStore;
use crate::models::time_block::{TimeBlock, bucket, to_minutes};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingRow {
    Header(TimeBlock),
    Entry {
        id: String,
        text: String,
        category: Category,
    },
}

impl ListingRow {
    pub fn record_id(&self) -> Option<&str> {
        match self {
            ListingRow::Header(_) => None,
            ListingRow::Entry { id, .. } => Some(id),
        }
    }
}

/// Rows for one day: events sorted by start time, grouped under time-block
/// headers. Empty blocks are omitted.
pub fn build_day_listing(store: &EventStore, date: &str) -> Vec<ListingRow> {
    let mut day = store.query(date);
    day.sort_by_key(|e| to_minutes(&e.start_time));

    let mut rows = Vec::new();
    for block in TimeBlock::ORDER {
        let mut in_block = day.iter().filter(|e| bucket(&e.start_time) == block).peekable();
        if in_block.peek().is_none() {
            continue;
        }
        rows.push(ListingRow::Header(block));
        for record in in_block {
            rows.push(ListingRow::Entry {
                id: record.id.clone(),
                text: summary_line(record),
                category: record.category,
            });
        }
    }
    rows
}

pub fn summary_line(record: &EventRecord) -> String {
    match (record.start_time.is_empty(), record.end_time.is_empty()) {
        (false, false) => format!(
            "🕐 {} - {} — {}",
            record.start_time, record.end_time, record.event
        ),
        (false, true) => format!("🕐 {} — {}", record.start_time, record.event),
        _ => record.event.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::EventDraft;

    fn at(date: &str, event: &str, start: &str, end: &str) -> EventRecord {
        EventRecord::new(
            date,
            EventDraft {
                event: event.to_string(),
                start_time: start.to_string(),
                end_time: end.to_string(),
                category: Category::Physical,
            },
        )
    }

    fn store(events: Vec<EventRecord>) -> EventStore {
        EventStore::new("unused.json", events)
    }

    fn texts(rows: &[ListingRow]) -> Vec<String> {
        rows.iter()
            .map(|row| match row {
                ListingRow::Header(block) => format!("# {}", block.label()),
                ListingRow::Entry { text, .. } => text.clone(),
            })
            .collect()
    }

    #[test]
    fn groups_sorted_events_under_block_headers() {
        let events = vec![
            at("2/5/26", "Dinner", "7:00 PM", ""),
            at("2/5/26", "Errands", "", ""),
            at("2/5/26", "Run", "6:00 AM", "7:00 AM"),
            at("2/6/26", "Elsewhere", "9:00 AM", ""),
            at("2/5/26", "Lunch", "12:30 PM", ""),
            at("2/5/26", "Breakfast", "8", ""),
        ];
        let rows = build_day_listing(&store(events), "2/5/26");
        assert_eq!(
            texts(&rows),
            vec![
                "# Morning",
                "🕐 6:00 AM - 7:00 AM — Run",
                "🕐 8 — Breakfast",
                "# Afternoon",
                "🕐 12:30 PM — Lunch",
                "# Evening",
                "🕐 7:00 PM — Dinner",
                "# All Day",
                "Errands",
            ]
        );
    }

    #[test]
    fn ties_keep_list_order() {
        let events = vec![
            at("3/2/26", "First", "", ""),
            at("3/2/26", "Second", "", ""),
            at("3/2/26", "Third", "nope", ""),
        ];
        let rows = build_day_listing(&store(events), "3/2/26");
        assert_eq!(texts(&rows), vec!["# All Day", "First", "Second", "Third"]);
    }

    #[test]
    fn entries_carry_record_ids() {
        let only = at("3/2/26", "Only", "", "");
        let id = only.id.clone();
        let rows = build_day_listing(&store(vec![only]), "3/2/26");
        assert_eq!(rows[0].record_id(), None);
        assert_eq!(rows[1].record_id(), Some(id.as_str()));
    }

    #[test]
    fn empty_day_has_no_rows() {
        assert!(build_day_listing(&store(Vec::new()), "1/1/26").is_empty());
    }

    #[test]
    fn listing_uses_exact_date_match() {
        let events = vec![
            at("1/5/26", "Exact", "", ""),
            at("01/05/26", "Padded", "", ""),
        ];
        let rows = build_day_listing(&store(events), "1/5/26");
        assert_eq!(texts(&rows), vec!["# All Day", "Exact"]);
    }

    #[test]
    fn overflowing_start_time_lands_in_all_day() {
        let events = vec![
            at("1/5/26", "Garbled", "100000000", ""),
            at("1/5/26", "Walk", "7:00 AM", ""),
        ];
        let rows = build_day_listing(&store(events), "1/5/26");
        assert_eq!(
            texts(&rows),
            vec!["# Morning", "🕐 7:00 AM — Walk", "# All Day", "🕐 100000000 — Garbled"]
        );
    }
}

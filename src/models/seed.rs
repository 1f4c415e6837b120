use crate::models::event::{Category, EventRecord, new_event_id};

const SEED_EVENTS: &[(&str, &str, &str, &str, Category)] = &[
    ("1/19/26", "Study Session - Problem Set Prep", "", "", Category::Intellectual),
    ("1/26/26", "Group Study Meeting", "", "", Category::Intellectual),
    ("1/26/26", "Research Project Work", "", "", Category::Intellectual),
    ("2/2/26", "Exam Preparation", "", "", Category::Intellectual),
    ("2/2/26", "Tutorial Session", "", "", Category::Intellectual),
    ("2/2/26", "Online Course Review", "", "", Category::Intellectual),
    ("2/9/26", "Case Study Analysis", "", "", Category::Intellectual),
    ("2/9/26", "Research Documentation", "", "", Category::Intellectual),
    ("2/9/26", "Learning Module", "", "", Category::Intellectual),
    ("2/16/26", "Advanced Study", "", "", Category::Intellectual),
    ("2/16/26", "Project Collaboration", "", "", Category::Intellectual),
    ("2/23/26", "Final Exam Prep", "", "", Category::Intellectual),
    ("2/24/26", "Team Presentation", "", "", Category::Intellectual),
    ("3/2/26", "Assessment Review", "", "", Category::Intellectual),
    ("3/2/26", "Project Evaluation", "", "", Category::Intellectual),
    ("1/13/26", "Morning Meditation", "6:00 AM", "6:30 AM", Category::Spiritual),
    ("1/15/26", "Yoga Class", "7:00 AM", "8:00 AM", Category::Physical),
    ("1/20/26", "Journaling Session", "8:00 PM", "8:30 PM", Category::Emotional),
    ("1/22/26", "Fitness Training", "5:30 PM", "6:30 PM", Category::Physical),
    ("1/27/26", "Counseling Session", "3:00 PM", "4:00 PM", Category::Emotional),
    ("1/29/26", "Prayer Time", "7:00 PM", "7:30 PM", Category::Spiritual),
    ("2/3/26", "Exercise Class", "6:00 PM", "7:00 PM", Category::Physical),
    ("2/5/26", "Mindfulness Retreat", "9:00 AM", "5:00 PM", Category::Spiritual),
    ("2/10/26", "Running Session", "6:00 AM", "7:00 AM", Category::Physical),
    ("2/12/26", "Wellness Workshop", "2:00 PM", "4:00 PM", Category::Emotional),
    ("2/17/26", "Team Sports", "4:00 PM", "6:00 PM", Category::Physical),
    ("2/19/26", "Spiritual Book Club", "7:00 PM", "8:30 PM", Category::Spiritual),
    ("2/24/26", "Reflection Time", "9:00 PM", "9:30 PM", Category::Emotional),
    ("2/26/26", "Community Meditation", "10:00 AM", "11:00 AM", Category::Spiritual),
];

/// The list used when no data file exists or it cannot be read.
pub fn default_events() -> Vec<EventRecord> {
    SEED_EVENTS
        .iter()
        .map(|(date, event, start_time, end_time, category)| EventRecord {
            id: new_event_id(),
            date: date.to_string(),
            event: event.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            category: *category,
        })
        .collect()
}

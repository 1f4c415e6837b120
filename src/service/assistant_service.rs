use std::collections::BTreeMap;

use serde::Deserialize;

use crate::clients::ClientError;
use crate::clients::anthropic_client::{ChatRole, ChatTurn};
use crate::models::event::{Category, EventRecord, new_event_id};

pub const WELCOME_MESSAGE: &str = "Hi! I'm your calendar assistant. I can help you:\n\
• Add new events (e.g., 'Add yoga class on January 20th from 6 PM to 7 PM')\n\
• Check what's scheduled (e.g., 'What do I have on January 22nd?')\n\
• Find free time (e.g., 'Is January 25th free?')\n\
• Manage your schedule\n\n\
What would you like to do?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    AwaitingReply,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    You,
    Assistant,
}

impl Speaker {
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::You => "You",
            Speaker::Assistant => "Assistant",
        }
    }
}

/// One rendered chat line. The transcript sent to the service is kept separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub speaker: Speaker,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReplyOutcome {
    EventAdded(EventRecord),
    Message(String),
}

impl ReplyOutcome {
    pub fn display_text(&self) -> String {
        match self {
            ReplyOutcome::EventAdded(record) => {
                format!("✓ Event added: {} on {}", record.event, record.date)
            }
            ReplyOutcome::Message(text) => text.clone(),
        }
    }
}

/// Linear transcript plus the rendered lines of the assistant window.
#[derive(Debug, Clone)]
pub struct ChatSession {
    history: Vec<ChatTurn>,
    lines: Vec<ChatLine>,
    state: ChatState,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
            lines: vec![ChatLine {
                speaker: Speaker::Assistant,
                text: WELCOME_MESSAGE.to_string(),
            }],
            state: ChatState::Idle,
        }
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    pub fn lines(&self) -> &[ChatLine] {
        &self.lines
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    /// Records the user's message and moves to `AwaitingReply`. Returns the
    /// transcript to send, or `None` for blank input or while a reply is pending.
    pub fn begin_turn(&mut self, input: &str) -> Option<Vec<ChatTurn>> {
        let message = input.trim();
        if message.is_empty() || self.state == ChatState::AwaitingReply {
            return None;
        }
        self.history.push(ChatTurn::user(message));
        self.push_line(Speaker::You, message);
        self.state = ChatState::AwaitingReply;
        Some(self.history.clone())
    }

    /// Records the reply and returns what it asks the calendar to do.
    pub fn finish_turn(&mut self, reply: &str) -> ReplyOutcome {
        self.history.push(ChatTurn::assistant(reply));
        self.state = ChatState::Idle;
        let outcome = interpret_reply(reply);
        self.push_line(Speaker::Assistant, &outcome.display_text());
        outcome
    }

    pub fn fail_turn(&mut self, err: &ClientError) {
        self.drop_unanswered();
        self.push_line(Speaker::Assistant, &error_line(err));
    }

    pub fn cancel_turn(&mut self) {
        if self.state == ChatState::AwaitingReply {
            self.drop_unanswered();
            self.push_line(Speaker::Assistant, "Request cancelled.");
        }
    }

    // The transcript must alternate user/assistant, so an unanswered user
    // turn leaves the history; its rendered line stays.
    fn drop_unanswered(&mut self) {
        if self.history.last().is_some_and(|t| t.role == ChatRole::User) {
            self.history.pop();
        }
        self.state = ChatState::Idle;
    }

    fn push_line(&mut self, speaker: Speaker, text: &str) {
        self.lines.push(ChatLine {
            speaker,
            text: text.to_string(),
        });
    }
}

pub fn error_line(err: &ClientError) -> String {
    format!(
        "Error: {}\n\nMake sure you have set your ANTHROPIC_API_KEY environment variable.",
        err
    )
}

/// Calendar contents as text, grouped by date string.
pub fn format_schedule(events: &[EventRecord]) -> String {
    let mut by_date: BTreeMap<&str, Vec<&EventRecord>> = BTreeMap::new();
    for event in events {
        by_date.entry(event.date.as_str()).or_default().push(event);
    }

    let mut text = String::from("Current Calendar Events:\n\n");
    for (date, day) in by_date {
        text.push_str(&format!("Date: {}\n", date));
        for e in day {
            let line = match (e.start_time.is_empty(), e.end_time.is_empty()) {
                (false, false) => format!(
                    "  - {} - {}: {} [{}]\n",
                    e.start_time, e.end_time, e.event, e.category
                ),
                (false, true) => format!("  - {}: {} [{}]\n", e.start_time, e.event, e.category),
                _ => format!("  - {} [{}]\n", e.event, e.category),
            };
            text.push_str(&line);
        }
        text.push('\n');
    }
    text
}

pub fn system_prompt(schedule: &str) -> String {
    format!(
        "You are a helpful calendar assistant. You have access to the user's calendar.\n\
         \n\
         {schedule}\n\
         \n\
         Your tasks:\n\
         1. Help users add new events to their calendar\n\
         2. Answer questions about what events are scheduled\n\
         3. Tell users if a day is free or busy\n\
         4. Help find available time slots\n\
         \n\
         When the user wants to add an event, extract the details and respond with JSON in this EXACT format:\n\
         {{\n\
         \x20   \"action\": \"add_event\",\n\
         \x20   \"date\": \"M/D/YY\",\n\
         \x20   \"event\": \"event description\",\n\
         \x20   \"start_time\": \"start time (or empty string)\",\n\
         \x20   \"end_time\": \"end time (or empty string)\",\n\
         \x20   \"category\": \"Spiritual|Physical|Emotional|Intellectual\"\n\
         }}\n\
         \n\
         Date format must be M/D/YY (e.g., \"1/15/26\" for January 15, 2026).\n\
         \n\
         For all other questions about the calendar, respond naturally with helpful information.\n\
         If information is missing when adding an event, ask for it in a friendly way."
    )
}

#[derive(Debug, Deserialize)]
struct AddEventPayload {
    action: String,
    date: String,
    event: String,
    #[serde(default)]
    start_time: Option<String>,
    #[serde(default)]
    end_time: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

/// Looks for one JSON object between the first `{` and the last `}`.
pub fn interpret_reply(reply: &str) -> ReplyOutcome {
    match parse_add_event(reply) {
        Some(record) => ReplyOutcome::EventAdded(record),
        None => ReplyOutcome::Message(reply.to_string()),
    }
}

pub fn parse_add_event(reply: &str) -> Option<EventRecord> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if end < start {
        return None;
    }
    let payload: AddEventPayload = serde_json::from_str(&reply[start..=end]).ok()?;
    if payload.action != "add_event" {
        return None;
    }
    Some(EventRecord {
        id: new_event_id(),
        date: payload.date,
        event: payload.event,
        start_time: payload.start_time.unwrap_or_default(),
        end_time: payload.end_time.unwrap_or_default(),
        category: payload
            .category
            .map(|c| Category::from_name(&c))
            .unwrap_or_default(),
    })
}

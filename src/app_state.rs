use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::events::queue::AppEvent;
use crate::events::worker::TaskDispatcher;
use crate::models::event::{EventDraft, EventRecord};
use crate::models::store::{EventStore, StoreError};
use crate::models::time_block::format_day;
use crate::service::assistant_service::{
    ChatSession, ChatState, ReplyOutcome, format_schedule, system_prompt,
};
use crate::service::day_listing::{ListingRow, build_day_listing};

pub const WEATHER_PLACEHOLDER: &str = "Select a date to see weather";
const WEATHER_LOADING: &str = "Loading weather…";

pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Everything the window shows, owned by the top-level controller. All
/// mutation happens here, on the UI thread.
pub struct AppState {
    store: EventStore,
    selected_date: String,
    weather_text: String,
    chat: ChatSession,
    pending_request: Option<u64>,
    dispatcher: TaskDispatcher,
    events_rx: mpsc::Receiver<AppEvent>,
    clock: Clock,
}

impl AppState {
    pub fn new(
        store: EventStore,
        dispatcher: TaskDispatcher,
        events_rx: mpsc::Receiver<AppEvent>,
        clock: Clock,
    ) -> Self {
        let today = format_day(clock());
        let mut state = Self {
            store,
            selected_date: String::new(),
            weather_text: WEATHER_PLACEHOLDER.to_string(),
            chat: ChatSession::new(),
            pending_request: None,
            dispatcher,
            events_rx,
            clock,
        };
        state.select_date(&today);
        state
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    pub fn selected_date(&self) -> &str {
        &self.selected_date
    }

    pub fn weather_text(&self) -> &str {
        &self.weather_text
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub fn day_listing(&self) -> Vec<ListingRow> {
        build_day_listing(&self.store, &self.selected_date)
    }

    /// Changes the selected day and refreshes its weather. No-op if unchanged.
    pub fn select_date(&mut self, date: &str) {
        if self.selected_date == date {
            return;
        }
        self.selected_date = date.to_string();
        self.weather_text = WEATHER_LOADING.to_string();
        let today = self.today();
        self.dispatcher.request_weather(date, today);
    }

    /// Adds a record on `date`, which need not be the selected day.
    pub fn add_event(&mut self, date: &str, draft: EventDraft) -> Result<String, StoreError> {
        let record = EventRecord::new(date, draft);
        let id = record.id.clone();
        info!(date = %record.date, "event added");
        self.store.add(record);
        self.store.save()?;
        Ok(id)
    }

    pub fn update_event(&mut self, id: &str, draft: EventDraft) -> Result<bool, StoreError> {
        if !self.store.update(id, draft) {
            return Ok(false);
        }
        self.store.save()?;
        Ok(true)
    }

    pub fn delete_event(&mut self, id: &str) -> Result<Option<EventRecord>, StoreError> {
        let removed = self.store.remove(id);
        if removed.is_some() {
            self.store.save()?;
        }
        Ok(removed)
    }

    pub fn save(&self) -> Result<(), StoreError> {
        self.store.save()
    }

    pub fn chat_busy(&self) -> bool {
        self.chat.state() == ChatState::AwaitingReply
    }

    /// Returns false when the input was blank or a reply is still pending.
    pub fn send_chat(&mut self, input: &str) -> bool {
        let Some(transcript) = self.chat.begin_turn(input) else {
            return false;
        };
        let system = system_prompt(&format_schedule(self.store.events()));
        let request_id = self.dispatcher.request_reply(system, transcript);
        self.pending_request = Some(request_id);
        true
    }

    /// Starts a fresh transcript showing only the welcome line. A pending
    /// request is cancelled first.
    pub fn restart_chat(&mut self) {
        if self.pending_request.take().is_some() {
            self.dispatcher.cancel_reply();
        }
        self.chat = ChatSession::new();
    }

    pub fn cancel_chat(&mut self) {
        if self.pending_request.take().is_some() {
            self.dispatcher.cancel_reply();
            self.chat.cancel_turn();
        }
    }

    /// Applies every completed background result without blocking.
    pub fn poll_events(&mut self) -> Result<(), StoreError> {
        let mut outcome = Ok(());
        while let Ok(event) = self.events_rx.try_recv() {
            if let Err(err) = self.apply_event(event) {
                outcome = Err(err);
            }
        }
        outcome
    }

    /// Waits for the next background result. Returns `None` once every
    /// sender is gone.
    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.events_rx.recv().await
    }

    pub fn apply_event(&mut self, event: AppEvent) -> Result<(), StoreError> {
        match event {
            AppEvent::WeatherReady { date, report } => {
                if date == self.selected_date {
                    self.weather_text = report;
                }
                Ok(())
            }
            AppEvent::AssistantReplied { request_id, result } => {
                if self.pending_request != Some(request_id) {
                    return Ok(());
                }
                self.pending_request = None;
                match result {
                    Ok(reply) => match self.chat.finish_turn(&reply) {
                        ReplyOutcome::EventAdded(record) => {
                            info!(date = %record.date, "event added by assistant");
                            self.store.add(record);
                            self.store.save()
                        }
                        ReplyOutcome::Message(_) => Ok(()),
                    },
                    Err(err) => {
                        warn!(error = %err, "assistant request failed");
                        self.chat.fail_turn(&err);
                        Ok(())
                    }
                }
            }
        }
    }
}

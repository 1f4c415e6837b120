#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use tokio::runtime::Handle;
use tokio::time::{Duration, timeout};
use wellnessCalendar::app_state::{AppState, Clock};
use wellnessCalendar::clients::ClientError;
use wellnessCalendar::clients::anthropic_client::{AssistantClient, ChatTurn};
use wellnessCalendar::clients::weather_client::{HttpReply, WeatherApi, WeatherEndpoint};
use wellnessCalendar::events::queue::{AppEvent, EventBus};
use wellnessCalendar::events::worker::TaskDispatcher;
use wellnessCalendar::models::event::EventRecord;
use wellnessCalendar::models::store::EventStore;
use wellnessCalendar::service::weather_service::WeatherService;

pub fn day(year: i32, month: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, d).unwrap()
}

pub struct FakeWeather {
    pub status: u16,
    pub current_body: String,
    pub forecast_body: String,
    pub calls: AtomicUsize,
    pub endpoints: StdMutex<Vec<WeatherEndpoint>>,
}

impl FakeWeather {
    pub fn ok(current_body: &str, forecast_body: &str) -> Self {
        Self {
            status: 200,
            current_body: current_body.to_string(),
            forecast_body: forecast_body.to_string(),
            calls: AtomicUsize::new(0),
            endpoints: StdMutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            status,
            ..Self::ok("{}", "{}")
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl WeatherApi for FakeWeather {
    async fn fetch(&self, endpoint: WeatherEndpoint) -> Result<HttpReply, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.endpoints.lock().unwrap().push(endpoint);
        let body = match endpoint {
            WeatherEndpoint::Current => self.current_body.clone(),
            WeatherEndpoint::Forecast => self.forecast_body.clone(),
        };
        Ok(HttpReply {
            status: self.status,
            body,
        })
    }
}

pub struct FakeAssistant {
    pub response: Result<String, String>,
    pub delay: Duration,
    pub systems: StdMutex<Vec<String>>,
    pub transcripts: StdMutex<Vec<Vec<ChatTurn>>>,
}

impl FakeAssistant {
    pub fn replying(body: &str) -> Self {
        Self {
            response: Ok(body.to_string()),
            delay: Duration::from_millis(0),
            systems: StdMutex::new(Vec::new()),
            transcripts: StdMutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            ..Self::replying("")
        }
    }
}

#[async_trait::async_trait]
impl AssistantClient for FakeAssistant {
    async fn complete(&self, system: &str, history: &[ChatTurn]) -> Result<String, ClientError> {
        self.systems.lock().unwrap().push(system.to_string());
        self.transcripts.lock().unwrap().push(history.to_vec());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.response {
            Ok(body) => Ok(body.clone()),
            Err(err) => Err(ClientError::Status {
                status: 401,
                body: err.clone(),
            }),
        }
    }
}

pub const CURRENT_CLEAR: &str = r#"{"main":{"temp":72.4,"feels_like":70.1,"humidity":40},"weather":[{"description":"clear sky"}],"wind":{"speed":5.25}}"#;

pub fn build_state(
    data_file: &Path,
    events: Vec<EventRecord>,
    weather: Arc<FakeWeather>,
    assistant: Arc<FakeAssistant>,
    today: NaiveDate,
) -> AppState {
    let store = EventStore::new(data_file, events);
    let (bus, rx) = EventBus::new(16);
    let weather = WeatherService::new(Some(weather), "Martinsville,IN,US");
    let dispatcher = TaskDispatcher::new(Handle::current(), bus, weather, assistant);
    let clock: Clock = Arc::new(move || today);
    AppState::new(store, dispatcher, rx, clock)
}

pub async fn next(state: &mut AppState) -> AppEvent {
    timeout(Duration::from_secs(5), state.next_event())
        .await
        .expect("timed out waiting for a background result")
        .expect("event channel closed")
}

/// Applies background results until the assistant is idle again.
pub async fn settle_chat(state: &mut AppState) {
    while state.chat_busy() {
        let event = next(state).await;
        state.apply_event(event).unwrap();
    }
}

/// Applies background results until the selected day's weather arrives.
pub async fn settle_weather(state: &mut AppState) {
    loop {
        let event = next(state).await;
        let current = matches!(&event, AppEvent::WeatherReady { date, .. } if date == state.selected_date());
        state.apply_event(event).unwrap();
        if current {
            return;
        }
    }
}

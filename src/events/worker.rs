use std::sync::Arc;

use chrono::NaiveDate;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::clients::anthropic_client::{AssistantClient, ChatTurn};
use crate::events::queue::{AppEvent, EventBus};
use crate::service::weather_service::WeatherService;

/// Spawns the remote calls on the runtime and keeps their handles so that a
/// superseded or cancelled call can be aborted.
pub struct TaskDispatcher {
    runtime: Handle,
    bus: EventBus,
    weather: WeatherService,
    assistant: Arc<dyn AssistantClient>,
    weather_task: Option<JoinHandle<()>>,
    reply_task: Option<JoinHandle<()>>,
    next_request_id: u64,
}

impl TaskDispatcher {
    pub fn new(
        runtime: Handle,
        bus: EventBus,
        weather: WeatherService,
        assistant: Arc<dyn AssistantClient>,
    ) -> Self {
        Self {
            runtime,
            bus,
            weather,
            assistant,
            weather_task: None,
            reply_task: None,
            next_request_id: 1,
        }
    }

    pub fn request_weather(&mut self, date: &str, today: NaiveDate) {
        if let Some(previous) = self.weather_task.take() {
            previous.abort();
        }
        let bus = self.bus.clone();
        let weather = self.weather.clone();
        let date = date.to_string();
        self.weather_task = Some(self.runtime.spawn(async move {
            let report = weather.report_for(&date, today).await;
            bus.emit(AppEvent::WeatherReady { date, report }).await;
        }));
    }

    /// Returns the id the reply will carry.
    pub fn request_reply(&mut self, system: String, transcript: Vec<ChatTurn>) -> u64 {
        self.cancel_reply();
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        debug!(request_id, turns = transcript.len(), "dispatching assistant request");

        let bus = self.bus.clone();
        let assistant = self.assistant.clone();
        self.reply_task = Some(self.runtime.spawn(async move {
            let result = assistant.complete(&system, &transcript).await;
            bus.emit(AppEvent::AssistantReplied { request_id, result })
                .await;
        }));
        request_id
    }

    pub fn cancel_reply(&mut self) {
        if let Some(task) = self.reply_task.take() {
            task.abort();
        }
    }
}

impl Drop for TaskDispatcher {
    fn drop(&mut self) {
        if let Some(task) = self.weather_task.take() {
            task.abort();
        }
        self.cancel_reply();
    }
}

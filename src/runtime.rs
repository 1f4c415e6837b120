use std::sync::Arc;

use eframe::egui;
use tokio::runtime::Handle;
use tracing::warn;

use crate::app_state::{AppState, Clock, local_today};
use crate::clients::anthropic_client::{AnthropicClient, AssistantClient};
use crate::clients::weather_client::{OpenWeatherClient, WeatherApi};
use crate::clients::ClientError;
use crate::config::Settings;
use crate::events::queue::EventBus;
use crate::events::worker::TaskDispatcher;
use crate::models::store::EventStore;
use crate::service::weather_service::WeatherService;
use crate::ui::{CalendarApp, WINDOW_TITLE};

const EVENT_BUFFER: usize = 32;

pub fn weather_service(settings: &Settings) -> WeatherService {
    let api: Option<Arc<dyn WeatherApi>> = match &settings.weather_api_key {
        Some(key) => match OpenWeatherClient::new(
            &settings.weather_base_url,
            &settings.weather_location,
            key,
        ) {
            Ok(client) => Some(Arc::new(client)),
            Err(err) => {
                warn!(error = %err, "weather client unavailable");
                None
            }
        },
        None => None,
    };
    WeatherService::new(api, &settings.weather_location)
}

pub fn assistant_client(settings: &Settings) -> Result<Arc<dyn AssistantClient>, ClientError> {
    let client = AnthropicClient::new(
        settings.anthropic_api_key.clone(),
        &settings.assistant_model,
        settings.assistant_timeout,
    )?;
    Ok(Arc::new(client))
}

/// Wires the store, clients and task channel into an `AppState`. `waker`
/// runs whenever a background result lands.
pub fn build_state(
    settings: &Settings,
    runtime: Handle,
    waker: Option<Box<dyn Fn() + Send + Sync>>,
) -> Result<AppState, ClientError> {
    let store = EventStore::load(&settings.data_file);
    let (bus, rx) = EventBus::new(EVENT_BUFFER);
    let bus = match waker {
        Some(waker) => bus.with_waker(waker),
        None => bus,
    };
    let dispatcher = TaskDispatcher::new(
        runtime,
        bus,
        weather_service(settings),
        assistant_client(settings)?,
    );
    let clock: Clock = Arc::new(local_today);
    Ok(AppState::new(store, dispatcher, rx, clock))
}

pub fn run_gui(settings: Settings, runtime: Handle) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1600.0, 900.0])
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        "wellness-calendar",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            let ctx = cc.egui_ctx.clone();
            let state = build_state(
                &settings,
                runtime,
                Some(Box::new(move || ctx.request_repaint())),
            )?;
            Ok(Box::new(CalendarApp::new(state)))
        }),
    )
}

#![allow(non_snake_case)]

mod cli;

use std::env;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wellnessCalendar::config::{AppConfig, DEFAULT_CONFIG_FILE, RunMode, Settings};
use wellnessCalendar::runtime;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init()
        .ok();

    let config_path = env::var("CONFIG_FILE").unwrap_or(DEFAULT_CONFIG_FILE.to_string());
    let config = AppConfig::from_file(&config_path).unwrap_or_else(|err| {
        warn!(error = %err, "ignoring config file");
        AppConfig::default()
    });
    let settings = Settings::resolve(&config);
    if settings.weather_api_key.is_none() {
        info!("OPENWEATHER_API_KEY not set, weather panel disabled");
    }

    let rt = tokio::runtime::Runtime::new()?;
    match settings.run_mode {
        RunMode::Gui => runtime::run_gui(settings, rt.handle().clone())?,
        RunMode::Cli => {
            let state = runtime::build_state(&settings, rt.handle().clone(), None)?;
            rt.block_on(cli::cli(state));
        }
    }
    Ok(())
}

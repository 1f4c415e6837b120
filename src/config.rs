use std::collections::HashMap;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = ".env";
pub const DEFAULT_DATA_FILE: &str = "calendar_data.json";
pub const DEFAULT_WEATHER_LOCATION: &str = "Martinsville,IN,US";
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_ASSISTANT_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_ASSISTANT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config line {line}: {content}")]
    InvalidLine { line: usize, content: String },
}

#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_string(),
                    source,
                });
            }
        };
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(ConfigError::InvalidLine {
                    line: idx + 1,
                    content: line.to_string(),
                });
            };
            let key = key.trim();
            let mut value = value.trim().to_string();
            if value.len() >= 2
                && ((value.starts_with('"') && value.ends_with('"'))
                    || (value.starts_with('\'') && value.ends_with('\'')))
            {
                value = value[1..value.len() - 1].to_string();
            }
            values.insert(key.to_string(), value);
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    /// Config file first, then the process environment. Empty values count as unset.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.get(key)
            .or_else(|| env::var(key).ok())
            .filter(|value| !value.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Gui,
    Cli,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub run_mode: RunMode,
    pub data_file: String,
    pub weather_api_key: Option<String>,
    pub weather_location: String,
    pub weather_base_url: String,
    pub anthropic_api_key: Option<String>,
    pub assistant_model: String,
    pub assistant_timeout: Duration,
}

impl Settings {
    pub fn resolve(config: &AppConfig) -> Self {
        let run_mode = match config.lookup("RUN_MODE").as_deref() {
            Some("cli") => RunMode::Cli,
            _ => RunMode::Gui,
        };
        let assistant_timeout = config
            .lookup("ASSISTANT_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_ASSISTANT_TIMEOUT_SECS);
        Self {
            run_mode,
            data_file: config
                .lookup("CALENDAR_DATA_FILE")
                .unwrap_or(DEFAULT_DATA_FILE.to_string()),
            weather_api_key: config.lookup("OPENWEATHER_API_KEY"),
            weather_location: config
                .lookup("WEATHER_LOCATION")
                .unwrap_or(DEFAULT_WEATHER_LOCATION.to_string()),
            weather_base_url: config
                .lookup("WEATHER_BASE_URL")
                .unwrap_or(DEFAULT_WEATHER_BASE_URL.to_string()),
            anthropic_api_key: config.lookup("ANTHROPIC_API_KEY"),
            assistant_model: config
                .lookup("ASSISTANT_MODEL")
                .unwrap_or(DEFAULT_ASSISTANT_MODEL.to_string()),
            assistant_timeout: Duration::from_secs(assistant_timeout),
        }
    }
}

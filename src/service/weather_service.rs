use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::Deserialize;
use tracing::warn;

use crate::clients::ClientError;
use crate::clients::weather_client::{WeatherApi, WeatherEndpoint};
use crate::models::time_block::parse_day;

pub const FORECAST_HORIZON_DAYS: i64 = 5;
pub const MISSING_KEY_MESSAGE: &str =
    "Weather API key not configured.\nAdd OPENWEATHER_API_KEY to .env file.";

#[derive(Debug, Deserialize)]
struct Conditions {
    temp: f64,
    feels_like: Option<f64>,
    #[serde(default)]
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct Description {
    description: String,
}

#[derive(Debug, Default, Deserialize)]
struct Wind {
    #[serde(default)]
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    main: Conditions,
    weather: Vec<Description>,
    #[serde(default)]
    wind: Wind,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt_txt: String,
    main: Conditions,
    weather: Vec<Description>,
    #[serde(default)]
    wind: Wind,
}

#[derive(Debug, Deserialize)]
struct Forecast {
    list: Vec<ForecastEntry>,
}

/// What the panel should do for a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherPlan {
    Current,
    Forecast { days_ahead: i64 },
    Passed,
    BeyondHorizon { days_ahead: i64 },
}

impl WeatherPlan {
    pub fn for_offset(days_ahead: i64) -> Self {
        if days_ahead == 0 {
            WeatherPlan::Current
        } else if days_ahead < 0 {
            WeatherPlan::Passed
        } else if days_ahead <= FORECAST_HORIZON_DAYS {
            WeatherPlan::Forecast { days_ahead }
        } else {
            WeatherPlan::BeyondHorizon { days_ahead }
        }
    }

    pub fn needs_network(&self) -> bool {
        matches!(self, WeatherPlan::Current | WeatherPlan::Forecast { .. })
    }
}

#[derive(Clone)]
pub struct WeatherService {
    api: Option<Arc<dyn WeatherApi>>,
    location: String,
}

impl WeatherService {
    /// `api` is `None` when no API key is configured.
    pub fn new(api: Option<Arc<dyn WeatherApi>>, location: &str) -> Self {
        Self {
            api,
            location: location.to_string(),
        }
    }

    /// Human-readable weather for `date` (`M/D/YY`) relative to `today`.
    /// Every failure is folded into the returned text.
    pub async fn report_for(&self, date: &str, today: NaiveDate) -> String {
        let Some(api) = &self.api else {
            return MISSING_KEY_MESSAGE.to_string();
        };
        let Some(target) = parse_day(date) else {
            return format!("Error:\nUnrecognized date '{}'", date);
        };
        let days_ahead = (target - today).num_days();
        let long_date = target.format("%B %d, %Y").to_string();

        let result = match WeatherPlan::for_offset(days_ahead) {
            WeatherPlan::Passed => {
                return format!(
                    "📅 {long_date}\n\n⏮️ This date has passed.\nWeather data not available for past dates."
                );
            }
            WeatherPlan::BeyondHorizon { days_ahead } => {
                return format!(
                    "📅 {long_date}\n\n🔮 Forecast only available\nfor the next {FORECAST_HORIZON_DAYS} days.\n\n(This date is {days_ahead} days away)"
                );
            }
            WeatherPlan::Current => self.current(api.as_ref(), &long_date).await,
            WeatherPlan::Forecast { days_ahead } => {
                self.forecast(api.as_ref(), target, &long_date, days_ahead)
                    .await
            }
        };

        result.unwrap_or_else(|err| {
            warn!(error = %err, date, "weather lookup failed");
            match err {
                ClientError::Transport(e) => format!("Network error:\n{}", e),
                other => format!("Error:\n{}", other),
            }
        })
    }

    async fn current(&self, api: &dyn WeatherApi, long_date: &str) -> Result<String, ClientError> {
        let reply = api.fetch(WeatherEndpoint::Current).await?;
        if reply.status != 200 {
            return Ok(format!("Could not fetch weather\n(Error: {})", reply.status));
        }
        let data: CurrentWeather = serde_json::from_str(&reply.body)?;
        let description = first_description(&data.weather);
        let feels_like = data.main.feels_like.unwrap_or(data.main.temp);

        Ok(format!(
            "📍 {location}\n📅 {long_date} (Today)\n\n🌡️ {temp:.0}°F (feels like {feels_like:.0}°F)\n☁️ {description}\n💧 Humidity: {humidity:.0}%\n💨 Wind: {wind:.1} mph",
            location = self.location,
            temp = data.main.temp,
            humidity = data.main.humidity,
            wind = data.wind.speed,
        ))
    }

    async fn forecast(
        &self,
        api: &dyn WeatherApi,
        target: NaiveDate,
        long_date: &str,
        days_ahead: i64,
    ) -> Result<String, ClientError> {
        let reply = api.fetch(WeatherEndpoint::Forecast).await?;
        if reply.status != 200 {
            return Ok(format!("Could not fetch forecast\n(Error: {})", reply.status));
        }
        let data: Forecast = serde_json::from_str(&reply.body)?;
        let prefix = target.format("%Y-%m-%d").to_string();
        let matching: Vec<&ForecastEntry> = data
            .list
            .iter()
            .filter(|entry| entry.dt_txt.starts_with(&prefix))
            .collect();

        let Some(noon) = nearest_noon(&matching) else {
            return Ok(format!("No forecast available for\n{long_date}"));
        };
        let high = matching
            .iter()
            .map(|e| e.main.temp)
            .fold(f64::NEG_INFINITY, f64::max);
        let low = matching
            .iter()
            .map(|e| e.main.temp)
            .fold(f64::INFINITY, f64::min);
        let plural = if days_ahead > 1 { "s" } else { "" };
        let description = first_description(&noon.weather);
        let feels_like = noon.main.feels_like.unwrap_or(noon.main.temp);

        Ok(format!(
            "📍 {location}\n📅 {long_date}\n({days_ahead} day{plural} from now)\n\n🌡️ High: {high:.0}°F / Low: {low:.0}°F\n   Around noon: {temp:.0}°F (feels like {feels_like:.0}°F)\n☁️ {description}\n💧 Humidity: {humidity:.0}%\n💨 Wind: {wind:.1} mph",
            location = self.location,
            temp = noon.main.temp,
            humidity = noon.main.humidity,
            wind = noon.wind.speed,
        ))
    }
}

/// The entry whose hour is closest to 12:00; the earliest wins a tie.
fn nearest_noon<'a>(entries: &[&'a ForecastEntry]) -> Option<&'a ForecastEntry> {
    let mut best: Option<(&ForecastEntry, u32)> = None;
    for &entry in entries {
        let distance = entry_hour(entry).map_or(u32::MAX, |h| h.abs_diff(12));
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((entry, distance));
        }
    }
    best.map(|(entry, _)| entry)
}

fn entry_hour(entry: &ForecastEntry) -> Option<u32> {
    NaiveDateTime::parse_from_str(&entry.dt_txt, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.hour())
}

fn first_description(conditions: &[Description]) -> String {
    conditions
        .first()
        .map(|c| capitalize(&c.description))
        .unwrap_or_default()
}

fn capitalize(text: &str) -> String {
    let lower = text.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_by_offset() {
        assert_eq!(WeatherPlan::for_offset(0), WeatherPlan::Current);
        assert_eq!(WeatherPlan::for_offset(-1), WeatherPlan::Passed);
        assert_eq!(
            WeatherPlan::for_offset(5),
            WeatherPlan::Forecast { days_ahead: 5 }
        );
        assert_eq!(
            WeatherPlan::for_offset(6),
            WeatherPlan::BeyondHorizon { days_ahead: 6 }
        );
        assert!(!WeatherPlan::for_offset(10).needs_network());
    }

    #[test]
    fn capitalizes_like_a_sentence() {
        assert_eq!(capitalize("clear sky"), "Clear sky");
        assert_eq!(capitalize("LIGHT RAIN"), "Light rain");
        assert_eq!(capitalize(""), "");
    }

    fn entry(dt_txt: &str) -> ForecastEntry {
        ForecastEntry {
            dt_txt: dt_txt.to_string(),
            main: Conditions {
                temp: 50.0,
                feels_like: None,
                humidity: 0.0,
            },
            weather: vec![],
            wind: Wind::default(),
        }
    }

    #[test]
    fn picks_entry_nearest_noon() {
        let entries = [
            entry("2026-10-15 09:00:00"),
            entry("2026-10-15 15:00:00"),
            entry("2026-10-15 12:00:00"),
        ];
        let refs: Vec<&ForecastEntry> = entries.iter().collect();
        assert_eq!(nearest_noon(&refs).unwrap().dt_txt, "2026-10-15 12:00:00");

        let tie = [entry("2026-10-15 09:00:00"), entry("2026-10-15 15:00:00")];
        let refs: Vec<&ForecastEntry> = tie.iter().collect();
        assert_eq!(nearest_noon(&refs).unwrap().dt_txt, "2026-10-15 09:00:00");
    }
}

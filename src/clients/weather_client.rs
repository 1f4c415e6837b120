use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::ClientError;

const WEATHER_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherEndpoint {
    Current,
    Forecast,
}

impl WeatherEndpoint {
    fn path(&self) -> &'static str {
        match self {
            WeatherEndpoint::Current => "weather",
            WeatherEndpoint::Forecast => "forecast",
        }
    }
}

/// Raw status and body; callers decide how a non-200 is rendered.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait WeatherApi: Send + Sync {
    async fn fetch(&self, endpoint: WeatherEndpoint) -> Result<HttpReply, ClientError>;
}

pub struct OpenWeatherClient {
    http: reqwest::Client,
    base_url: String,
    location: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(base_url: &str, location: &str, api_key: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(WEATHER_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            location: location.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl WeatherApi for OpenWeatherClient {
    async fn fetch(&self, endpoint: WeatherEndpoint) -> Result<HttpReply, ClientError> {
        let url = format!("{}/{}", self.base_url, endpoint.path());
        debug!(endpoint = endpoint.path(), location = %self.location, "requesting weather");
        let response = self
            .http
            .get(url)
            .query(&[
                ("q", self.location.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "imperial"),
            ])
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpReply { status, body })
    }
}

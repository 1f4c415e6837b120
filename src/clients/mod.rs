pub mod anthropic_client;
pub mod weather_client;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0} is not set")]
    MissingCredential(&'static str),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Empty response from {0}")]
    Empty(&'static str),
}

use crate::{Config, WeatherRecord, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod openweather;

/// Everything that can go wrong while fetching a record.
///
/// The variants only exist for logging; callers treat every one of them as
/// "no such place".
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("OpenWeather request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("OpenWeather responded with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse OpenWeather JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("OpenWeather response contained no weather description")]
    MissingCondition,
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch the current weather for `city`.
    async fn current(&self, city: &str) -> Result<WeatherRecord, FetchError>;
}

/// Construct the provider described by `config`.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `weather configure` or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;

    let provider = OpenWeatherProvider::from_config(api_key.to_owned(), config)?;
    Ok(Box::new(provider))
}

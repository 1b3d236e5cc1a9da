use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{Config, WeatherRecord};

use super::{FetchError, WeatherProvider};

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    /// Build a provider honoring the configured endpoint and timeout.
    pub fn from_config(api_key: String, config: &Config) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            api_key,
            base_url: config.base_url.clone(),
            http: builder.build()?,
        })
    }

    #[instrument(skip(self), fields(url = %self.base_url))]
    async fn fetch_current(&self, city: &str) -> Result<WeatherRecord, FetchError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        debug!(%status, bytes = body.len(), "OpenWeather responded");

        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        record_from_response(city, parsed)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: f64,
    feels_like: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    weather: Vec<OwWeather>,
}

/// The record echoes the city as typed, not the provider's canonical name.
fn record_from_response(
    city: &str,
    parsed: OwCurrentResponse,
) -> Result<WeatherRecord, FetchError> {
    let weather = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .ok_or(FetchError::MissingCondition)?;

    Ok(WeatherRecord {
        city: city.to_string(),
        temp: parsed.main.temp,
        temp_min: parsed.main.temp_min,
        temp_max: parsed.main.temp_max,
        humidity: parsed.main.humidity,
        feels_like: parsed.main.feels_like,
        weather,
    })
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, city: &str) -> Result<WeatherRecord, FetchError> {
        self.fetch_current(city).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

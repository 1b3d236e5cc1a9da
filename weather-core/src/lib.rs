//! Core library for the `weather` card.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind a provider trait
//! - Session state and the reducer driving searches
//! - The info card rendered from a record
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod config;
pub mod display;
pub mod model;
pub mod provider;
pub mod session;

pub use config::{Config, ImageSet};
pub use display::{Condition, InfoCard};
pub use model::WeatherRecord;
pub use provider::{FetchError, WeatherProvider, provider_from_config};
pub use session::{App, ERROR_MESSAGE, SessionState};

/// Heading shown above the search prompt.
pub const TITLE: &str = "Weather Forecast";

//! Info card: a pure view of a [`WeatherRecord`].

use std::fmt;

use crate::{WeatherRecord, config::ImageSet};

/// Below this temperature (°C) a record is shown as cold.
pub const COLD_BELOW_C: f64 = 15.0;
/// Above this humidity a non-cold record is shown as hot.
pub const HOT_ABOVE_HUMIDITY: f64 = 50.0;

/// Which imagery and icon a record gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Cold,
    Hot,
    Rain,
}

impl Condition {
    /// First match wins: cold, then hot, then rain as the catch-all.
    pub fn classify(temp: f64, humidity: f64) -> Self {
        if temp < COLD_BELOW_C {
            Condition::Cold
        } else if humidity > HOT_ABOVE_HUMIDITY {
            Condition::Hot
        } else {
            Condition::Rain
        }
    }

    pub fn of(record: &WeatherRecord) -> Self {
        Self::classify(record.temp, record.humidity)
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Condition::Cold => "\u{2744}\u{fe0f}",
            Condition::Hot => "\u{2600}\u{fe0f}",
            Condition::Rain => "\u{2602}\u{fe0f}",
        }
    }

    pub fn image<'a>(&self, images: &'a ImageSet) -> &'a str {
        match self {
            Condition::Cold => &images.cold,
            Condition::Hot => &images.hot,
            Condition::Rain => &images.rain,
        }
    }
}

/// Everything the card shows, already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoCard {
    pub condition: Condition,
    pub heading: String,
    pub image: String,
    pub lines: Vec<String>,
}

impl InfoCard {
    pub fn from_record(record: &WeatherRecord, images: &ImageSet) -> Self {
        let condition = Condition::of(record);

        Self {
            condition,
            heading: format!("{} {}", record.city, condition.icon()),
            image: condition.image(images).to_string(),
            lines: vec![
                format!("Temperature = {}°C", record.temp),
                format!("Humidity = {}", record.humidity),
                format!("Min Temp = {}°C", record.temp_min),
                format!("Max Temp = {}°C", record.temp_max),
                format!(
                    "The weather can be described as {} and feels like {}",
                    record.weather, record.feels_like
                ),
            ],
        }
    }
}

impl fmt::Display for InfoCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .lines
            .iter()
            .chain([&self.heading, &self.image])
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        let rule = "─".repeat(width + 2);

        writeln!(f, "┌{rule}┐")?;
        writeln!(f, "│ {:<width$} │", self.image)?;
        writeln!(f, "├{rule}┤")?;
        writeln!(f, "│ {:<width$} │", self.heading)?;
        for line in &self.lines {
            writeln!(f, "│ {line:<width$} │")?;
        }
        write!(f, "└{rule}┘")
    }
}

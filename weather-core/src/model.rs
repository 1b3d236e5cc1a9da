use serde::{Deserialize, Serialize};

/// A snapshot of the current weather in one city.
///
/// Records are never patched: a successful search produces a new record that
/// replaces the previous one as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecord {
    /// City name exactly as the user typed it.
    pub city: String,
    /// Temperature in °C.
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Relative humidity, 0–100.
    pub humidity: f64,
    pub feels_like: f64,
    /// Free-text condition description, e.g. "light rain".
    pub weather: String,
}

impl Default for WeatherRecord {
    /// Seed record shown before the first search.
    fn default() -> Self {
        Self {
            city: "Delhi".to_string(),
            temp: 18.05,
            temp_min: 18.05,
            temp_max: 18.05,
            humidity: 68.0,
            feels_like: 17.69,
            weather: "haze".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_delhi() {
        let record = WeatherRecord::default();
        assert_eq!(record.city, "Delhi");
        assert_eq!(record.temp, 18.05);
        assert_eq!(record.humidity, 68.0);
        assert_eq!(record.weather, "haze");
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let json = serde_json::to_value(WeatherRecord::default()).unwrap();
        assert_eq!(json["tempMin"], 18.05);
        assert_eq!(json["feelsLike"], 17.69);
        assert!(json.get("temp_min").is_none());
    }
}

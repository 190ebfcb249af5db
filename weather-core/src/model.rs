use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// A validated, non-empty city name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery(String);

impl CityQuery {
    /// Trim the raw input and reject it if nothing is left.
    pub fn parse(raw: &str) -> Result<Self, LookupError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LookupError::EmptyInput);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CityQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `GET /data/2.5/weather`, reduced to the fields we display.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeatherPayload {
    pub name: String,
    pub dt: i64,
    #[serde(default)]
    pub timezone: i64,
    pub main: OwMain,
    pub weather: Vec<OwWeather>,
    pub wind: OwWind,
    #[serde(default)]
    pub sys: OwSys,
}

impl CurrentWeatherPayload {
    /// Icon code of the primary condition.
    pub fn icon_code(&self) -> &str {
        self.weather.first().map(|w| w.icon.as_str()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwMain {
    pub temp: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwWeather {
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwWind {
    pub speed: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwSys {
    #[serde(default)]
    pub country: String,
}

/// Display asset family selected from the provider's icon code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconCategory {
    Clear,
    Cloud,
    Drizzle,
    Rain,
    Snow,
}

impl IconCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconCategory::Clear => "clear",
            IconCategory::Cloud => "cloud",
            IconCategory::Drizzle => "drizzle",
            IconCategory::Rain => "rain",
            IconCategory::Snow => "snow",
        }
    }

    pub fn asset_name(&self) -> String {
        format!("{}.png", self.as_str())
    }

    /// Terminal stand-in for the image asset.
    pub fn glyph(&self) -> &'static str {
        match self {
            IconCategory::Clear => "☀️",
            IconCategory::Cloud => "☁️",
            IconCategory::Drizzle => "🌦️",
            IconCategory::Rain => "🌧️",
            IconCategory::Snow => "❄️",
        }
    }
}

impl std::fmt::Display for IconCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the results panel shows for one resolved city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: i32,
    pub city: String,
    /// ISO 3166 alpha-2, may be empty.
    pub country: String,
    pub humidity: u8,
    pub wind_speed: f64,
    pub icon: IconCategory,
    pub is_day: bool,
    /// "HH:MM", 24-hour, in the city's own offset.
    pub local_time: String,
}

impl WeatherSnapshot {
    pub fn flag(&self) -> String {
        crate::mapper::country_flag(&self.country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_query_trims_input() {
        let q = CityQuery::parse("  New York \n").unwrap();
        assert_eq!(q.as_str(), "New York");
    }

    #[test]
    fn city_query_rejects_blank_input() {
        assert_eq!(CityQuery::parse(""), Err(LookupError::EmptyInput));
        assert_eq!(CityQuery::parse(" \t "), Err(LookupError::EmptyInput));
    }

    #[test]
    fn payload_tolerates_missing_country_and_timezone() {
        let body = r#"{
            "name": "Nowhere",
            "dt": 1700000000,
            "main": {"temp": 1.0, "humidity": 10},
            "weather": [{"icon": "01d"}],
            "wind": {"speed": 0.0}
        }"#;
        let payload: CurrentWeatherPayload = serde_json::from_str(body).unwrap();

        assert_eq!(payload.timezone, 0);
        assert!(payload.sys.country.is_empty());
        assert_eq!(payload.icon_code(), "01d");
    }

    #[test]
    fn payload_requires_main_block() {
        let body = r#"{"name": "X", "dt": 0, "weather": [], "wind": {"speed": 1.0}}"#;
        assert!(serde_json::from_str::<CurrentWeatherPayload>(body).is_err());
    }

    #[test]
    fn icon_category_serializes_lowercase() {
        let json = serde_json::to_string(&IconCategory::Drizzle).unwrap();
        assert_eq!(json, "\"drizzle\"");
        assert_eq!(IconCategory::Snow.asset_name(), "snow.png");
    }
}

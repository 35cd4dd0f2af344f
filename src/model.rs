use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::WeatherError;

// API response structs
#[derive(Debug, Deserialize)]
pub struct CurrentResponse {
    pub name: String,
    #[serde(default)]
    pub dt: Option<i64>,
    #[serde(default)]
    pub sys: Sys,
    pub main: Main,
    pub wind: Wind,
    pub weather: Vec<Condition>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Sys {
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Main {
    pub temp: f64,
    pub humidity: u8,
}

#[derive(Debug, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub struct GeoResult {
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// One successful lookup, flattened to the fields the window shows.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub city: String,
    pub country: Option<String>,
    pub temperature_c: f64,
    pub condition: String,
    pub description: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub icon: String,
    pub observed_at: Option<DateTime<Utc>>,
}

impl TryFrom<CurrentResponse> for WeatherReading {
    type Error = WeatherError;

    fn try_from(response: CurrentResponse) -> Result<Self, Self::Error> {
        let condition = response
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Unexpected("response has no weather conditions".into()))?;

        Ok(WeatherReading {
            city: response.name,
            country: response.sys.country.filter(|c| !c.is_empty()),
            temperature_c: response.main.temp,
            condition: condition.main,
            description: condition.description,
            humidity_pct: response.main.humidity,
            wind_speed_mps: response.wind.speed,
            icon: condition.icon,
            observed_at: response.dt.and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
        })
    }
}

impl WeatherReading {
    pub fn from_json(body: &str) -> Result<Self, WeatherError> {
        let parsed: CurrentResponse = serde_json::from_str(body)?;
        parsed.try_into()
    }
}

/// A city the geocoder proposes for a partial entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub name: String,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl Suggestion {
    pub fn label(&self) -> String {
        let region = [self.state.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if region.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, region)
        }
    }
}

impl From<GeoResult> for Suggestion {
    fn from(result: GeoResult) -> Self {
        Suggestion {
            name: result.name,
            state: result.state,
            country: result.country,
        }
    }
}

use log::{debug, info, warn};
use reqwest::{Client, StatusCode};
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::error::{IconError, WeatherError};
use crate::model::{GeoResult, Suggestion, WeatherReading};
use crate::presentation::decode_icon;

pub const SUGGESTION_LIMIT: usize = 5;

/// What the user asked about.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    City(String),
    Coordinates { lat: f64, lon: f64 },
}

impl Query {
    /// Parse the search entry. `"<lat>,<lon>"` becomes a coordinate query,
    /// anything else non-blank is a city name.
    pub fn parse(input: &str) -> Result<Self, WeatherError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(WeatherError::EmptyCity);
        }
        if let Some((lat, lon)) = input.split_once(',') {
            if let (Ok(lat), Ok(lon)) = (lat.trim().parse::<f64>(), lon.trim().parse::<f64>()) {
                if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
                    return Ok(Query::Coordinates { lat, lon });
                }
            }
        }
        Ok(Query::City(input.to_string()))
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Query::City(city) => vec![("q", city.clone())],
            Query::Coordinates { lat, lon } => {
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
        }
    }
}

/// Blocking access to the remote weather service.
///
/// The window drives searches through this trait so the search flow can run
/// against a canned source in tests.
pub trait WeatherSource {
    fn current(&self, query: &Query, api_key: &str) -> Result<WeatherReading, WeatherError>;

    fn icon(&self, code: &str) -> Result<egui::ColorImage, IconError>;

    fn suggestions(&self, text: &str, api_key: &str) -> Vec<Suggestion>;
}

/// Map a response status to the error taxonomy.
pub fn check_status(status: StatusCode) -> Result<(), WeatherError> {
    if status.is_success() {
        Ok(())
    } else if status == StatusCode::NOT_FOUND {
        Err(WeatherError::CityNotFound)
    } else {
        Err(WeatherError::Http(status))
    }
}

/// Hide the key before a URL goes anywhere near a log.
pub fn redact(url: &str, api_key: &str) -> String {
    if api_key.is_empty() {
        url.to_string()
    } else {
        url.replace(api_key, "HIDDEN")
    }
}

pub fn icon_url(icon_base: &str, code: &str) -> String {
    format!("{}/img/wn/{}@2x.png", icon_base, code)
}

/// OpenWeatherMap over reqwest, driven on a private current-thread runtime
/// so callers on the UI thread get plain blocking calls.
pub struct OpenWeatherClient {
    http: Client,
    runtime: Runtime,
    api_base: String,
    icon_base: String,
}

impl OpenWeatherClient {
    pub fn new(config: &Config) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            http: Client::new(),
            runtime,
            api_base: config.api_base.clone(),
            icon_base: config.icon_base.clone(),
        })
    }

    async fn fetch_current(&self, query: &Query, api_key: &str) -> Result<WeatherReading, WeatherError> {
        let mut params = query.params();
        params.push(("appid", api_key.to_string()));
        params.push(("units", "metric".to_string()));

        let request = self
            .http
            .get(format!("{}/data/2.5/weather", self.api_base))
            .query(&params)
            .build()?;
        info!("GET {}", redact(request.url().as_str(), api_key));

        let response = self.http.execute(request).await?;
        let status = response.status();
        debug!("weather response status {}", status);
        check_status(status)?;

        let body = response.text().await?;
        WeatherReading::from_json(&body)
    }

    async fn fetch_icon(&self, code: &str) -> Result<egui::ColorImage, IconError> {
        let url = icon_url(&self.icon_base, code);
        debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(IconError::Status(status));
        }
        let bytes = response.bytes().await?;
        decode_icon(&bytes)
    }

    async fn fetch_suggestions(&self, text: &str, api_key: &str) -> Result<Vec<Suggestion>, reqwest::Error> {
        let limit = SUGGESTION_LIMIT.to_string();
        let results: Vec<GeoResult> = self
            .http
            .get(format!("{}/geo/1.0/direct", self.api_base))
            .query(&[("q", text), ("limit", limit.as_str()), ("appid", api_key)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(results
            .into_iter()
            .take(SUGGESTION_LIMIT)
            .map(Suggestion::from)
            .collect())
    }
}

impl WeatherSource for OpenWeatherClient {
    fn current(&self, query: &Query, api_key: &str) -> Result<WeatherReading, WeatherError> {
        self.runtime.block_on(self.fetch_current(query, api_key))
    }

    fn icon(&self, code: &str) -> Result<egui::ColorImage, IconError> {
        self.runtime.block_on(self.fetch_icon(code))
    }

    fn suggestions(&self, text: &str, api_key: &str) -> Vec<Suggestion> {
        match self.runtime.block_on(self.fetch_suggestions(text, api_key)) {
            Ok(list) => list,
            Err(e) => {
                warn!("suggestion lookup failed: {}", redact(&e.to_string(), api_key));
                Vec::new()
            }
        }
    }
}

//! Search flow driven through a canned weather source.

use std::cell::{Cell, RefCell};

use city_weather::config::Config;
use city_weather::error::{IconError, Severity, WeatherError};
use city_weather::model::{Suggestion, WeatherReading};
use city_weather::presentation::Icon;
use city_weather::state::{SearchState, SUGGEST_DELAY_SECS};
use city_weather::theme::DEFAULT_THEME;
use city_weather::weather::{OpenWeatherClient, Query, WeatherSource};
use egui::{Color32, ColorImage};
use reqwest::StatusCode;

enum Reply {
    Reading(WeatherReading),
    NotFound,
    Status(StatusCode),
}

struct FakeSource {
    reply: Reply,
    icon_ok: bool,
    current_calls: Cell<usize>,
    icon_calls: Cell<usize>,
    suggest_calls: Cell<usize>,
    last_query: RefCell<Option<Query>>,
}

impl FakeSource {
    fn new(reply: Reply) -> Self {
        Self {
            reply,
            icon_ok: true,
            current_calls: Cell::new(0),
            icon_calls: Cell::new(0),
            suggest_calls: Cell::new(0),
            last_query: RefCell::new(None),
        }
    }

    fn broken_icons(mut self) -> Self {
        self.icon_ok = false;
        self
    }
}

impl WeatherSource for FakeSource {
    fn current(&self, query: &Query, api_key: &str) -> Result<WeatherReading, WeatherError> {
        assert_eq!(api_key, "test-key");
        self.current_calls.set(self.current_calls.get() + 1);
        *self.last_query.borrow_mut() = Some(query.clone());
        match &self.reply {
            Reply::Reading(r) => Ok(r.clone()),
            Reply::NotFound => Err(WeatherError::CityNotFound),
            Reply::Status(s) => Err(WeatherError::Http(*s)),
        }
    }

    fn icon(&self, _code: &str) -> Result<ColorImage, IconError> {
        self.icon_calls.set(self.icon_calls.get() + 1);
        if self.icon_ok {
            Ok(ColorImage::new([4, 4], Color32::RED))
        } else {
            Err(IconError::Status(StatusCode::NOT_FOUND))
        }
    }

    fn suggestions(&self, text: &str, _api_key: &str) -> Vec<Suggestion> {
        self.suggest_calls.set(self.suggest_calls.get() + 1);
        vec![Suggestion {
            name: format!("{}don", text),
            state: None,
            country: Some("GB".into()),
        }]
    }
}

fn config() -> Config {
    Config::default().with_api_key("test-key")
}

fn rain_reading() -> WeatherReading {
    WeatherReading {
        city: "London".into(),
        country: Some("GB".into()),
        temperature_c: 21.9,
        condition: "Rain".into(),
        description: "moderate rain".into(),
        humidity_pct: 81,
        wind_speed_mps: 4.1,
        icon: "10d".into(),
        observed_at: None,
    }
}

#[test]
fn successful_search_updates_display_and_theme() {
    let source = FakeSource::new(Reply::Reading(rain_reading()));
    let mut state = SearchState::with_input("London");

    state.submit(&source, &config());

    assert!(state.is_idle());
    let view = state.view.as_ref().expect("reading shown");
    assert_eq!(view.location, "London, GB");
    assert_eq!(view.temperature, "21°C");
    assert_eq!(view.description, "Moderate Rain");
    assert_eq!(state.theme().background, Color32::from_rgb(0x46, 0x82, 0xB4));
    assert_eq!(state.theme().foreground, Color32::WHITE);
    assert!(matches!(state.icon, Icon::Image(_)));
    assert_eq!(state.icon_revision, 1);
    assert_eq!(
        *source.last_query.borrow(),
        Some(Query::City("London".into()))
    );
}

#[test]
fn empty_city_never_hits_the_network() {
    let source = FakeSource::new(Reply::Reading(rain_reading()));
    for input in ["", "    "] {
        let mut state = SearchState::with_input(input);
        state.submit(&source, &config());

        let dialog = state.dialog.as_ref().expect("warning shown");
        assert_eq!(dialog.title, "Input Error");
        assert_eq!(dialog.message, "Please enter a city name.");
        assert_eq!(dialog.severity, Severity::Warning);
    }
    assert_eq!(source.current_calls.get(), 0);
    assert_eq!(source.icon_calls.get(), 0);
}

#[test]
fn missing_key_is_a_configuration_error() {
    let source = FakeSource::new(Reply::Reading(rain_reading()));
    let mut state = SearchState::with_input("London");

    state.submit(&source, &Config::default().with_api_key("YOUR_API_KEY_HERE"));

    let dialog = state.dialog.as_ref().expect("error shown");
    assert_eq!(dialog.title, "Configuration Error");
    assert_eq!(dialog.message, "API Key is missing. Check .env file.");
    assert_eq!(source.current_calls.get(), 0);
}

#[test]
fn unknown_city_keeps_previous_display() {
    let good = FakeSource::new(Reply::Reading(rain_reading()));
    let mut state = SearchState::with_input("London");
    state.submit(&good, &config());
    let before = state.view.clone();

    let missing = FakeSource::new(Reply::NotFound);
    state.input = "Atlantis".into();
    state.submit(&missing, &config());

    let dialog = state.dialog.as_ref().expect("error shown");
    assert_eq!(dialog.title, "Error");
    assert_eq!(dialog.message, "City not found.");
    assert_eq!(state.view, before);
    assert_eq!(state.icon_revision, 1);
    assert_eq!(missing.icon_calls.get(), 0);

    state.dismiss_dialog();
    assert!(state.is_idle());
    assert_eq!(state.view, before);
}

#[test]
fn unknown_city_on_fresh_window_shows_nothing() {
    let source = FakeSource::new(Reply::NotFound);
    let mut state = SearchState::with_input("Atlantis");
    state.submit(&source, &config());

    assert!(state.view.is_none());
    assert_eq!(state.theme(), DEFAULT_THEME);
}

#[test]
fn other_http_status_is_reported() {
    let source = FakeSource::new(Reply::Status(StatusCode::UNAUTHORIZED));
    let mut state = SearchState::with_input("London");
    state.submit(&source, &config());

    let dialog = state.dialog.as_ref().expect("error shown");
    assert_eq!(dialog.message, "HTTP Error: 401 Unauthorized");
}

#[test]
fn icon_failure_only_swaps_the_icon() {
    let source = FakeSource::new(Reply::Reading(rain_reading())).broken_icons();
    let mut state = SearchState::with_input("London");

    state.submit(&source, &config());

    assert!(state.is_idle());
    assert!(state.icon.is_placeholder());
    let view = state.view.as_ref().expect("reading shown");
    assert_eq!(view.temperature, "21°C");
    assert_eq!(view.humidity, "Humidity: 81%");
    assert_eq!(view.wind, "Wind: 4.1 m/s");
    assert_eq!(view.theme.name, "Rain");
}

#[test]
fn coordinate_entry_queries_by_position() {
    let source = FakeSource::new(Reply::Reading(rain_reading()));
    let mut state = SearchState::with_input("51.51,-0.13");
    state.submit(&source, &config());

    assert_eq!(
        *source.last_query.borrow(),
        Some(Query::Coordinates { lat: 51.51, lon: -0.13 })
    );
}

#[test]
fn suggestions_wait_for_the_entry_to_settle() {
    let source = FakeSource::new(Reply::Reading(rain_reading()));
    let cfg = config();
    let mut state = SearchState::with_input("Lon");

    state.input_changed(10.0);
    assert!(!state.poll_suggestions(&source, &cfg, 10.1));
    assert!(state.suggestion_pending());

    assert!(state.poll_suggestions(&source, &cfg, 10.0 + SUGGEST_DELAY_SECS));
    assert_eq!(state.suggestions.len(), 1);
    assert_eq!(state.suggestions[0].label(), "London, GB");

    // same text again does not refetch
    state.input_changed(11.0);
    assert!(!state.poll_suggestions(&source, &cfg, 12.0));
    assert_eq!(source.suggest_calls.get(), 1);
}

#[test]
fn short_entries_get_no_suggestions() {
    let source = FakeSource::new(Reply::Reading(rain_reading()));
    let mut state = SearchState::with_input("Lo");

    state.input_changed(0.0);
    assert!(!state.poll_suggestions(&source, &config(), 5.0));
    assert_eq!(source.suggest_calls.get(), 0);
}

#[test]
fn choosing_a_suggestion_searches_for_it() {
    let source = FakeSource::new(Reply::Reading(rain_reading()));
    let cfg = config();
    let mut state = SearchState::with_input("Lon");
    state.input_changed(0.0);
    state.poll_suggestions(&source, &cfg, 1.0);

    state.choose_suggestion(0, &source, &cfg);

    assert_eq!(state.input, "London");
    assert!(state.suggestions.is_empty());
    assert_eq!(source.current_calls.get(), 1);
    assert!(state.view.is_some());
}

#[test]
fn connection_failure_dialog_hides_the_key() {
    let config = Config {
        api_base: "http://127.0.0.1:1".into(),
        icon_base: "http://127.0.0.1:1".into(),
        ..Config::default()
    }
    .with_api_key("s3cretkey123");
    let client = OpenWeatherClient::new(&config).unwrap();
    let mut state = SearchState::with_input("Oslo");

    state.submit(&client, &config);

    let dialog = state.dialog.as_ref().expect("error shown");
    assert_eq!(dialog.title, "Error");
    assert!(dialog.message.starts_with("Network Error: "), "{}", dialog.message);
    assert!(!dialog.message.contains("s3cretkey123"), "{}", dialog.message);
    assert!(state.view.is_none());
}

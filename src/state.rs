//! Search flow behind the window: validate, fetch, map, and keep whatever
//! the window should currently show.

use log::{debug, info};

use crate::config::Config;
use crate::error::{Severity, WeatherError};
use crate::model::{Suggestion, WeatherReading};
use crate::presentation::{Icon, ReadingView};
use crate::theme::{Theme, DEFAULT_THEME};
use crate::weather::{Query, WeatherSource};

/// Seconds the entry must sit unchanged before suggestions are fetched.
pub const SUGGEST_DELAY_SECS: f64 = 0.3;
pub const SUGGEST_MIN_CHARS: usize = 3;

/// A modal message waiting to be dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct Dialog {
    pub title: &'static str,
    pub message: String,
    pub severity: Severity,
}

impl From<&WeatherError> for Dialog {
    fn from(err: &WeatherError) -> Self {
        Dialog {
            title: err.title(),
            message: err.to_string(),
            severity: err.severity(),
        }
    }
}

#[derive(Debug, Default)]
pub struct SearchState {
    pub input: String,
    pub view: Option<ReadingView>,
    pub icon: Icon,
    pub dialog: Option<Dialog>,
    pub suggestions: Vec<Suggestion>,
    /// Bumped whenever the icon slot changes, so the window knows to
    /// re-upload its texture.
    pub icon_revision: u64,
    last_edit: Option<f64>,
    last_suggested: String,
}

impl SearchState {
    pub fn with_input(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    pub fn theme(&self) -> Theme {
        self.view.as_ref().map(|v| v.theme).unwrap_or(DEFAULT_THEME)
    }

    pub fn is_idle(&self) -> bool {
        self.dialog.is_none()
    }

    /// Run a search for the current entry, showing a dialog on failure.
    pub fn submit<S: WeatherSource>(&mut self, source: &S, config: &Config) {
        self.suggestions.clear();
        self.last_suggested = self.input.trim().to_string();
        if let Err(err) = self.search(source, config) {
            info!("search failed: {}", err);
            self.dialog = Some(Dialog::from(&err));
        }
    }

    /// Validate, fetch and apply. The display is only touched on success.
    pub fn search<S: WeatherSource>(&mut self, source: &S, config: &Config) -> Result<(), WeatherError> {
        let query = Query::parse(&self.input)?;
        let api_key = config.api_key()?;

        let reading = source.current(&query, api_key)?;
        let icon = Icon::from_result(source.icon(&reading.icon));
        self.apply(&reading, icon);
        Ok(())
    }

    pub fn apply(&mut self, reading: &WeatherReading, icon: Icon) {
        let view = ReadingView::new(reading);
        debug!("showing {} with theme {}", view.location, view.theme.name);
        self.view = Some(view);
        self.icon = icon;
        self.icon_revision += 1;
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
    }

    /// Record an edit of the entry at time `now` (seconds).
    pub fn input_changed(&mut self, now: f64) {
        self.last_edit = Some(now);
        if self.input.trim().chars().count() < SUGGEST_MIN_CHARS {
            self.suggestions.clear();
        }
    }

    pub fn suggestion_pending(&self) -> bool {
        self.last_edit.is_some()
    }

    /// Fetch suggestions once the entry has settled. Returns true when a
    /// lookup was made.
    pub fn poll_suggestions<S: WeatherSource>(&mut self, source: &S, config: &Config, now: f64) -> bool {
        let Some(edited) = self.last_edit else {
            return false;
        };
        if now - edited < SUGGEST_DELAY_SECS {
            return false;
        }
        self.last_edit = None;

        let text = self.input.trim();
        if text.chars().count() < SUGGEST_MIN_CHARS || text == self.last_suggested {
            return false;
        }
        let Ok(api_key) = config.api_key() else {
            return false;
        };

        self.last_suggested = text.to_string();
        self.suggestions = source.suggestions(text, api_key);
        true
    }

    /// Fill the entry from a suggestion and search for it.
    pub fn choose_suggestion<S: WeatherSource>(&mut self, index: usize, source: &S, config: &Config) {
        if let Some(choice) = self.suggestions.get(index) {
            self.input = choice.name.clone();
            self.submit(source, config);
        }
    }
}

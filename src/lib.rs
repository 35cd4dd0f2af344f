//! Desktop window showing current weather for a city, themed by conditions.

pub mod app;
pub mod config;
pub mod error;
pub mod model;
pub mod presentation;
pub mod state;
pub mod theme;
pub mod weather;

pub use error::{IconError, Severity, WeatherError};
pub use model::{Suggestion, WeatherReading};
pub use state::SearchState;
pub use weather::{OpenWeatherClient, Query, WeatherSource};

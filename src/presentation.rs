//! Turns a [`WeatherReading`] into the strings and image the window shows.

use egui::ColorImage;

use crate::error::IconError;
use crate::model::WeatherReading;
use crate::theme::{select_theme, Theme};

pub const ICON_PLACEHOLDER: &str = "[Icon Fetch Failed]";

/// Display-ready text for one reading.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingView {
    pub location: String,
    pub temperature: String,
    pub description: String,
    pub humidity: String,
    pub wind: String,
    pub updated: Option<String>,
    pub theme: Theme,
}

impl ReadingView {
    pub fn new(reading: &WeatherReading) -> Self {
        let location = match &reading.country {
            Some(country) => format!("{}, {}", reading.city, country),
            None => reading.city.clone(),
        };

        Self {
            location,
            temperature: format_temperature(reading.temperature_c),
            description: title_case(&reading.description),
            humidity: format!("Humidity: {}%", reading.humidity_pct),
            wind: format!("Wind: {} m/s", reading.wind_speed_mps),
            updated: reading
                .observed_at
                .map(|t| format!("Updated {} UTC", t.format("%H:%M"))),
            theme: select_theme(&reading.condition),
        }
    }
}

/// Whole degrees, truncated toward zero.
pub fn format_temperature(celsius: f64) -> String {
    // `as` saturates on out-of-range values and truncates the fraction
    let whole = celsius.trunc() as i64;
    format!("{}°C", whole)
}

/// Upper-case every letter that follows a non-letter, lower-case the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// What occupies the icon slot.
#[derive(Clone, Default)]
pub enum Icon {
    #[default]
    None,
    Image(ColorImage),
    Placeholder,
}

impl Icon {
    pub fn from_result(result: Result<ColorImage, IconError>) -> Self {
        match result {
            Ok(image) => Icon::Image(image),
            Err(e) => {
                log::warn!("{}", e);
                Icon::Placeholder
            }
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Icon::Placeholder)
    }
}

impl std::fmt::Debug for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Icon::None => f.write_str("None"),
            Icon::Image(img) => write!(f, "Image({}x{})", img.size[0], img.size[1]),
            Icon::Placeholder => f.write_str("Placeholder"),
        }
    }
}

/// Decode PNG bytes into an egui image.
pub fn decode_icon(bytes: &[u8]) -> Result<ColorImage, IconError> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, image.as_raw()))
}

use egui::Color32;

/// Background/foreground pair applied to the whole window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color32,
    pub foreground: Color32,
}

const fn theme(name: &'static str, background: Color32, foreground: Color32) -> Theme {
    Theme {
        name,
        background,
        foreground,
    }
}

pub const DEFAULT_THEME: Theme = theme(
    "Default",
    Color32::from_rgb(0xF0, 0xF0, 0xF0),
    Color32::BLACK,
);

/// Condition themes, in match priority order.
pub const THEMES: &[Theme] = &[
    theme("Clear", Color32::from_rgb(0x87, 0xCE, 0xEB), Color32::BLACK), // sky blue
    theme("Clouds", Color32::from_rgb(0x77, 0x88, 0x99), Color32::WHITE), // light slate gray
    theme("Rain", Color32::from_rgb(0x46, 0x82, 0xB4), Color32::WHITE), // steel blue
    theme("Drizzle", Color32::from_rgb(0xB0, 0xC4, 0xDE), Color32::BLACK),
    theme("Thunderstorm", Color32::from_rgb(0x48, 0x3D, 0x8B), Color32::WHITE),
    theme("Snow", Color32::from_rgb(0xF0, 0xF8, 0xFF), Color32::BLACK), // alice blue
    theme("Mist", Color32::from_rgb(0x70, 0x80, 0x90), Color32::WHITE),
    theme("Fog", Color32::from_rgb(0x70, 0x80, 0x90), Color32::WHITE),
    theme("Haze", Color32::from_rgb(0xF5, 0xF5, 0xDC), Color32::BLACK), // beige
    DEFAULT_THEME,
];

/// First theme whose name occurs in `condition`, else [`DEFAULT_THEME`].
pub fn select_theme(condition: &str) -> Theme {
    THEMES
        .iter()
        .find(|t| condition.contains(t.name))
        .copied()
        .unwrap_or(DEFAULT_THEME)
}

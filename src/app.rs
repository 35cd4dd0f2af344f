use std::time::Duration;

use eframe::{App, Frame};
use egui::{Color32, RichText, TextureHandle};

use crate::config::Config;
use crate::error::Severity;
use crate::presentation::{Icon, ReadingView, ICON_PLACEHOLDER};
use crate::state::SearchState;
use crate::weather::OpenWeatherClient;

pub const WINDOW_TITLE: &str = "Weather App";
pub const WINDOW_SIZE: [f32; 2] = [400.0, 500.0];

pub struct WeatherApp {
    config: Config,
    client: OpenWeatherClient,
    state: SearchState,
    icon_texture: Option<TextureHandle>,
    texture_revision: u64,
}

impl App for WeatherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let now = ctx.input(|i| i.time);

        // Suggestions wait for the entry to settle, so keep frames coming
        if self.state.is_idle() {
            self.state.poll_suggestions(&self.client, &self.config, now);
            if self.state.suggestion_pending() {
                ctx.request_repaint_after(Duration::from_millis(100));
            }
        }

        self.sync_icon_texture(ctx);

        let theme = self.state.theme();
        let idle = self.state.is_idle();
        let mut submit = false;
        let mut edited = false;
        let mut chosen = None;

        let panel = egui::Frame::default().fill(theme.background).inner_margin(20.0);
        egui::CentralPanel::default().frame(panel).show(ctx, |ui| {
            ui.add_enabled_ui(idle, |ui| {
                ui.vertical_centered(|ui| {
                    ui.horizontal(|ui| {
                        let entry = ui.add(
                            egui::TextEdit::singleline(&mut self.state.input)
                                .font(egui::FontId::proportional(18.0))
                                .desired_width(240.0),
                        );
                        edited = entry.changed();
                        if entry.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                            submit = true;
                        }
                        if ui.button("Search").clicked() {
                            submit = true;
                        }
                    });

                    for (index, suggestion) in self.state.suggestions.iter().enumerate() {
                        let label = RichText::new(suggestion.label()).color(theme.foreground);
                        if ui.selectable_label(false, label).clicked() {
                            chosen = Some(index);
                        }
                    }

                    ui.add_space(10.0);
                    show_reading(
                        ui,
                        self.state.view.as_ref(),
                        &self.state.icon,
                        self.icon_texture.as_ref(),
                    );
                });
            });
        });

        if edited {
            self.state.input_changed(now);
        }
        if submit {
            self.state.submit(&self.client, &self.config);
        } else if let Some(index) = chosen {
            self.state.choose_suggestion(index, &self.client, &self.config);
        }

        self.show_dialog(ctx);
    }
}

impl WeatherApp {
    pub fn new(config: Config, client: OpenWeatherClient, initial_city: Option<String>) -> Self {
        let mut app = Self {
            config,
            client,
            state: SearchState::default(),
            icon_texture: None,
            texture_revision: 0,
        };
        if let Some(city) = initial_city {
            app.state.input = city;
            app.state.submit(&app.client, &app.config);
        }
        app
    }

    fn sync_icon_texture(&mut self, ctx: &egui::Context) {
        if self.texture_revision == self.state.icon_revision {
            return;
        }
        self.texture_revision = self.state.icon_revision;
        self.icon_texture = match &self.state.icon {
            Icon::Image(image) => Some(ctx.load_texture(
                "weather-icon",
                image.clone(),
                egui::TextureOptions::LINEAR,
            )),
            _ => None,
        };
    }

    fn show_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = &self.state.dialog else {
            return;
        };

        let mut dismissed = false;
        let accent = match dialog.severity {
            Severity::Warning => Color32::from_rgb(0xB8, 0x86, 0x0B),
            Severity::Error => Color32::from_rgb(0xB2, 0x22, 0x22),
        };
        egui::Window::new(dialog.title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(RichText::new(&dialog.message).color(accent));
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    dismissed = true;
                }
            });

        if dismissed {
            self.state.dismiss_dialog();
        }
    }
}

fn show_reading(
    ui: &mut egui::Ui,
    view: Option<&ReadingView>,
    icon: &Icon,
    texture: Option<&TextureHandle>,
) {
    let Some(view) = view else {
        return;
    };
    let fg = view.theme.foreground;

    ui.add_space(10.0);
    ui.label(RichText::new(&view.location).size(24.0).strong().color(fg));
    ui.add_space(5.0);

    match (icon, texture) {
        (Icon::Image(_), Some(texture)) => {
            ui.image(texture, texture.size_vec2());
        }
        (Icon::Placeholder, _) => {
            ui.label(RichText::new(ICON_PLACEHOLDER).color(fg));
        }
        _ => {}
    }

    ui.label(RichText::new(&view.temperature).size(48.0).strong().color(fg));
    ui.label(RichText::new(&view.description).size(16.0).color(fg));
    ui.add_space(20.0);

    ui.horizontal(|ui| {
        ui.add_space(20.0);
        ui.label(RichText::new(&view.humidity).size(12.0).color(fg));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add_space(20.0);
            ui.label(RichText::new(&view.wind).size(12.0).color(fg));
        });
    });

    if let Some(updated) = &view.updated {
        ui.add_space(10.0);
        ui.label(RichText::new(updated).size(10.0).color(fg));
    }
}

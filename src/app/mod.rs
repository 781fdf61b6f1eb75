mod messages;
mod state;
mod update;
mod view;

pub use state::App;

use iced::{Size, Theme, window};
use rsvp_core::config::{AppConfig, ThemeMode};
use std::path::PathBuf;

/// Launch the reader window. `paths` come from the command line.
pub fn run_app(config: AppConfig, paths: Vec<PathBuf>) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        ..window::Settings::default()
    };

    iced::application("RSVP Reader", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|app: &App| {
            if matches!(app.config.theme, ThemeMode::Night) {
                Theme::Dark
            } else {
                Theme::Light
            }
        })
        .run_with(move || App::bootstrap(config, paths))
}

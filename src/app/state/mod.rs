mod constants;

use iced::Task;
use rsvp_core::config::AppConfig;
use rsvp_core::{DelayPolicy, ReaderSession, SessionSettings};
use std::path::PathBuf;
use tracing::info;

use super::messages::Message;

pub(crate) use constants::*;

/// Shell state: the reading session plus the raw contents of the input fields.
pub struct App {
    pub(super) session: ReaderSession,
    pub(super) config: AppConfig,
    pub(super) path_input: String,
    pub(super) search_input: String,
}

impl App {
    pub(super) fn new(mut config: AppConfig) -> Self {
        clamp_config(&mut config);
        let session = ReaderSession::new(SessionSettings::from_config(&config));
        App {
            session,
            config,
            path_input: String::new(),
            search_input: String::new(),
        }
    }

    /// Build the app and load paths given on the command line: the first is
    /// opened, the rest are queued behind it.
    pub(super) fn bootstrap(config: AppConfig, paths: Vec<PathBuf>) -> (App, Task<Message>) {
        let mut app = App::new(config);
        if let Some(first) = paths.first() {
            app.path_input = first.display().to_string();
            app.session.open_documents(&paths);
        }
        info!(
            wpm = app.session.speed(),
            queued = app.session.queue().len(),
            autoplay = app.session.queue().autoplay(),
            "Reader shell initialized"
        );
        (app, Task::none())
    }

    /// Paths typed into the file bar, split on `;`.
    pub(super) fn input_paths(&self) -> Vec<PathBuf> {
        self.path_input
            .split(PATH_SEPARATOR)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(PathBuf::from)
            .collect()
    }
}

fn clamp_config(config: &mut AppConfig) {
    fn normalize_key_binding(value: &mut String, fallback: &str) {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            *value = fallback.to_string();
        } else {
            *value = normalized;
        }
    }

    let bounds = config.speed_bounds();
    config.min_wpm = bounds.min();
    config.max_wpm = bounds.max();
    config.default_wpm = bounds.clamp(config.default_wpm);
    config.wpm_step = config.wpm_step.clamp(MIN_WPM_STEP, MAX_WPM_STEP);
    config.font_size = config.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    config.window_width = config.window_width.clamp(MIN_WINDOW_WIDTH, MAX_WINDOW_WIDTH);
    config.window_height = config
        .window_height
        .clamp(MIN_WINDOW_HEIGHT, MAX_WINDOW_HEIGHT);
    let delay = DelayPolicy::new(
        config.base_multiplier,
        config.per_char_multiplier,
        config.max_scaled_chars,
    );
    config.base_multiplier = delay.base_multiplier;
    config.per_char_multiplier = delay.per_char_multiplier;
    config.max_scaled_chars = delay.max_scaled_chars;
    normalize_key_binding(&mut config.key_toggle_play_pause, "space");
    normalize_key_binding(&mut config.key_next_token, "l");
    normalize_key_binding(&mut config.key_previous_token, "h");
    normalize_key_binding(&mut config.key_reset, "r");
    normalize_key_binding(&mut config.key_speed_up, "k");
    normalize_key_binding(&mut config.key_speed_down, "j");
    normalize_key_binding(&mut config.key_find_next, "n");
    normalize_key_binding(&mut config.key_safe_quit, "q");
}

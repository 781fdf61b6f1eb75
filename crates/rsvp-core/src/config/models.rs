use crate::extract::HeadingRules;
use crate::playback::{DelayPolicy, SpeedBounds};
use serde::Deserialize;

/// Flat app configuration, built from the sectioned TOML tables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub theme: ThemeMode,
    pub font_size: u32,
    pub window_width: f32,
    pub window_height: f32,
    pub log_level: LogLevel,
    pub default_wpm: u32,
    pub min_wpm: u32,
    pub max_wpm: u32,
    pub wpm_step: u32,
    pub scale_with_length: bool,
    pub base_multiplier: f32,
    pub per_char_multiplier: f32,
    pub max_scaled_chars: usize,
    pub chapter_keywords: Vec<String>,
    pub spelled_numbers: Vec<String>,
    pub allow_roman: bool,
    pub leading_label: String,
    pub fallback_label: String,
    pub autoplay: bool,
    pub key_toggle_play_pause: String,
    pub key_next_token: String,
    pub key_previous_token: String,
    pub key_reset: String,
    pub key_speed_up: String,
    pub key_speed_down: String,
    pub key_find_next: String,
    pub key_safe_quit: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        use crate::config::defaults;

        AppConfig {
            theme: ThemeMode::default(),
            font_size: defaults::default_font_size(),
            window_width: defaults::default_window_width(),
            window_height: defaults::default_window_height(),
            log_level: defaults::default_log_level(),
            default_wpm: defaults::default_wpm(),
            min_wpm: defaults::default_min_wpm(),
            max_wpm: defaults::default_max_wpm(),
            wpm_step: defaults::default_wpm_step(),
            scale_with_length: defaults::default_scale_with_length(),
            base_multiplier: defaults::default_base_multiplier(),
            per_char_multiplier: defaults::default_per_char_multiplier(),
            max_scaled_chars: defaults::default_max_scaled_chars(),
            chapter_keywords: defaults::default_chapter_keywords(),
            spelled_numbers: defaults::default_spelled_numbers(),
            allow_roman: defaults::default_allow_roman(),
            leading_label: defaults::default_leading_label(),
            fallback_label: defaults::default_fallback_label(),
            autoplay: defaults::default_autoplay(),
            key_toggle_play_pause: defaults::default_key_toggle_play_pause(),
            key_next_token: defaults::default_key_next_token(),
            key_previous_token: defaults::default_key_previous_token(),
            key_reset: defaults::default_key_reset(),
            key_speed_up: defaults::default_key_speed_up(),
            key_speed_down: defaults::default_key_speed_down(),
            key_find_next: defaults::default_key_find_next(),
            key_safe_quit: defaults::default_key_safe_quit(),
        }
    }
}

impl AppConfig {
    pub fn speed_bounds(&self) -> SpeedBounds {
        SpeedBounds::new(self.min_wpm, self.max_wpm)
    }

    pub fn delay_policy(&self) -> DelayPolicy {
        if !self.scale_with_length {
            return DelayPolicy::flat();
        }
        DelayPolicy::new(
            self.base_multiplier,
            self.per_char_multiplier,
            self.max_scaled_chars,
        )
    }

    pub fn heading_rules(&self) -> HeadingRules {
        HeadingRules {
            keywords: self.chapter_keywords.clone(),
            spelled_numbers: self.spelled_numbers.clone(),
            allow_roman: self.allow_roman,
            leading_label: self.leading_label.clone(),
            fallback_label: self.fallback_label.clone(),
        }
    }
}

/// Theme mode.
#[derive(Debug, Clone, Copy, Default, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    #[default]
    Day,
    Night,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Day => ThemeMode::Night,
            ThemeMode::Night => ThemeMode::Day,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Default, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

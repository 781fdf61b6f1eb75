use super::defaults;
use super::models::{AppConfig, LogLevel, ThemeMode};
use serde::Deserialize;

/// On-disk layout of `config.toml`: one table per concern.
#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    appearance: AppearanceConfig,
    #[serde(default)]
    reading: ReadingConfig,
    #[serde(default)]
    delay: DelayConfig,
    #[serde(default)]
    chapters: ChapterConfig,
    #[serde(default)]
    queue: QueueConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    keys: KeyConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            theme: tables.appearance.theme,
            font_size: tables.appearance.font_size,
            window_width: tables.appearance.window_width,
            window_height: tables.appearance.window_height,
            log_level: tables.logging.log_level,
            default_wpm: tables.reading.default_wpm,
            min_wpm: tables.reading.min_wpm,
            max_wpm: tables.reading.max_wpm,
            wpm_step: tables.reading.wpm_step,
            scale_with_length: tables.delay.scale_with_length,
            base_multiplier: tables.delay.base_multiplier,
            per_char_multiplier: tables.delay.per_char_multiplier,
            max_scaled_chars: tables.delay.max_scaled_chars,
            chapter_keywords: tables.chapters.keywords,
            spelled_numbers: tables.chapters.spelled_numbers,
            allow_roman: tables.chapters.allow_roman,
            leading_label: tables.chapters.leading_label,
            fallback_label: tables.chapters.fallback_label,
            autoplay: tables.queue.autoplay,
            key_toggle_play_pause: tables.keys.toggle_play_pause,
            key_next_token: tables.keys.next_token,
            key_previous_token: tables.keys.previous_token,
            key_reset: tables.keys.reset,
            key_speed_up: tables.keys.speed_up,
            key_speed_down: tables.keys.speed_down,
            key_find_next: tables.keys.find_next,
            key_safe_quit: tables.keys.safe_quit,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            appearance: AppearanceConfig {
                theme: config.theme,
                font_size: config.font_size,
                window_width: config.window_width,
                window_height: config.window_height,
            },
            reading: ReadingConfig {
                default_wpm: config.default_wpm,
                min_wpm: config.min_wpm,
                max_wpm: config.max_wpm,
                wpm_step: config.wpm_step,
            },
            delay: DelayConfig {
                scale_with_length: config.scale_with_length,
                base_multiplier: config.base_multiplier,
                per_char_multiplier: config.per_char_multiplier,
                max_scaled_chars: config.max_scaled_chars,
            },
            chapters: ChapterConfig {
                keywords: config.chapter_keywords.clone(),
                spelled_numbers: config.spelled_numbers.clone(),
                allow_roman: config.allow_roman,
                leading_label: config.leading_label.clone(),
                fallback_label: config.fallback_label.clone(),
            },
            queue: QueueConfig {
                autoplay: config.autoplay,
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
            keys: KeyConfig {
                toggle_play_pause: config.key_toggle_play_pause.clone(),
                next_token: config.key_next_token.clone(),
                previous_token: config.key_previous_token.clone(),
                reset: config.key_reset.clone(),
                speed_up: config.key_speed_up.clone(),
                speed_down: config.key_speed_down.clone(),
                find_next: config.key_find_next.clone(),
                safe_quit: config.key_safe_quit.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct AppearanceConfig {
    #[serde(default)]
    theme: ThemeMode,
    #[serde(default = "defaults::default_font_size")]
    font_size: u32,
    #[serde(default = "defaults::default_window_width")]
    window_width: f32,
    #[serde(default = "defaults::default_window_height")]
    window_height: f32,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        AppearanceConfig {
            theme: ThemeMode::default(),
            font_size: defaults::default_font_size(),
            window_width: defaults::default_window_width(),
            window_height: defaults::default_window_height(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ReadingConfig {
    #[serde(default = "defaults::default_wpm")]
    default_wpm: u32,
    #[serde(default = "defaults::default_min_wpm")]
    min_wpm: u32,
    #[serde(default = "defaults::default_max_wpm")]
    max_wpm: u32,
    #[serde(default = "defaults::default_wpm_step")]
    wpm_step: u32,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        ReadingConfig {
            default_wpm: defaults::default_wpm(),
            min_wpm: defaults::default_min_wpm(),
            max_wpm: defaults::default_max_wpm(),
            wpm_step: defaults::default_wpm_step(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct DelayConfig {
    #[serde(default = "defaults::default_scale_with_length")]
    scale_with_length: bool,
    #[serde(default = "defaults::default_base_multiplier")]
    base_multiplier: f32,
    #[serde(default = "defaults::default_per_char_multiplier")]
    per_char_multiplier: f32,
    #[serde(default = "defaults::default_max_scaled_chars")]
    max_scaled_chars: usize,
}

impl Default for DelayConfig {
    fn default() -> Self {
        DelayConfig {
            scale_with_length: defaults::default_scale_with_length(),
            base_multiplier: defaults::default_base_multiplier(),
            per_char_multiplier: defaults::default_per_char_multiplier(),
            max_scaled_chars: defaults::default_max_scaled_chars(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ChapterConfig {
    #[serde(default = "defaults::default_chapter_keywords")]
    keywords: Vec<String>,
    #[serde(default = "defaults::default_spelled_numbers")]
    spelled_numbers: Vec<String>,
    #[serde(default = "defaults::default_allow_roman")]
    allow_roman: bool,
    #[serde(default = "defaults::default_leading_label")]
    leading_label: String,
    #[serde(default = "defaults::default_fallback_label")]
    fallback_label: String,
}

impl Default for ChapterConfig {
    fn default() -> Self {
        ChapterConfig {
            keywords: defaults::default_chapter_keywords(),
            spelled_numbers: defaults::default_spelled_numbers(),
            allow_roman: defaults::default_allow_roman(),
            leading_label: defaults::default_leading_label(),
            fallback_label: defaults::default_fallback_label(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct QueueConfig {
    #[serde(default = "defaults::default_autoplay")]
    autoplay: bool,
}

impl Default for QueueConfig {
    fn default() -> Self {
        QueueConfig {
            autoplay: defaults::default_autoplay(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct KeyConfig {
    #[serde(default = "defaults::default_key_toggle_play_pause")]
    toggle_play_pause: String,
    #[serde(default = "defaults::default_key_next_token")]
    next_token: String,
    #[serde(default = "defaults::default_key_previous_token")]
    previous_token: String,
    #[serde(default = "defaults::default_key_reset")]
    reset: String,
    #[serde(default = "defaults::default_key_speed_up")]
    speed_up: String,
    #[serde(default = "defaults::default_key_speed_down")]
    speed_down: String,
    #[serde(default = "defaults::default_key_find_next")]
    find_next: String,
    #[serde(default = "defaults::default_key_safe_quit")]
    safe_quit: String,
}

impl Default for KeyConfig {
    fn default() -> Self {
        KeyConfig {
            toggle_play_pause: defaults::default_key_toggle_play_pause(),
            next_token: defaults::default_key_next_token(),
            previous_token: defaults::default_key_previous_token(),
            reset: defaults::default_key_reset(),
            speed_up: defaults::default_key_speed_up(),
            speed_down: defaults::default_key_speed_down(),
            find_next: defaults::default_key_find_next(),
            safe_quit: defaults::default_key_safe_quit(),
        }
    }
}

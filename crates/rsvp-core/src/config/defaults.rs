pub(crate) fn default_wpm() -> u32 {
    300
}

pub(crate) fn default_min_wpm() -> u32 {
    100
}

pub(crate) fn default_max_wpm() -> u32 {
    1000
}

pub(crate) fn default_wpm_step() -> u32 {
    25
}

pub(crate) fn default_scale_with_length() -> bool {
    true
}

pub(crate) fn default_base_multiplier() -> f32 {
    0.7
}

pub(crate) fn default_per_char_multiplier() -> f32 {
    0.05
}

pub(crate) fn default_max_scaled_chars() -> usize {
    12
}

pub(crate) fn default_chapter_keywords() -> Vec<String> {
    ["Chapter", "Part", "Article", "Section"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub(crate) fn default_spelled_numbers() -> Vec<String> {
    [
        "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
        "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen",
        "Nineteen", "Twenty",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

pub(crate) fn default_allow_roman() -> bool {
    true
}

pub(crate) fn default_leading_label() -> String {
    "Preface".to_string()
}

pub(crate) fn default_fallback_label() -> String {
    "Content".to_string()
}

pub(crate) fn default_autoplay() -> bool {
    true
}

pub(crate) fn default_font_size() -> u32 {
    48
}

pub(crate) fn default_window_width() -> f32 {
    900.0
}

pub(crate) fn default_window_height() -> f32 {
    720.0
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Debug
}

pub(crate) fn default_key_toggle_play_pause() -> String {
    "space".to_string()
}

pub(crate) fn default_key_next_token() -> String {
    "l".to_string()
}

pub(crate) fn default_key_previous_token() -> String {
    "h".to_string()
}

pub(crate) fn default_key_reset() -> String {
    "r".to_string()
}

pub(crate) fn default_key_speed_up() -> String {
    "k".to_string()
}

pub(crate) fn default_key_speed_down() -> String {
    "j".to_string()
}

pub(crate) fn default_key_find_next() -> String {
    "n".to_string()
}

pub(crate) fn default_key_safe_quit() -> String {
    "q".to_string()
}

/// Limits for reader controls.
pub(crate) const MIN_FONT_SIZE: u32 = 16;
pub(crate) const MAX_FONT_SIZE: u32 = 128;
pub(crate) const MIN_WINDOW_WIDTH: f32 = 320.0;
pub(crate) const MAX_WINDOW_WIDTH: f32 = 7680.0;
pub(crate) const MIN_WINDOW_HEIGHT: f32 = 240.0;
pub(crate) const MAX_WINDOW_HEIGHT: f32 = 4320.0;
pub(crate) const MIN_WPM_STEP: u32 = 5;
pub(crate) const MAX_WPM_STEP: u32 = 200;
/// Separator for several paths typed into the file bar.
pub(crate) const PATH_SEPARATOR: char = ';';

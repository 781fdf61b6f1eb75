//! Playback controller: a cursor over one token sequence plus speed.
//!
//! The controller never owns a timer. `Playing` only records intent; whoever
//! drives playback calls [`PlaybackController::next_token`] once per delay.

use crate::error::PlaybackError;
use crate::tokens::TokenSequence;
use std::time::Duration;
use tracing::debug;

/// Hard limits for any configured speed range.
pub const MIN_WPM: u32 = 100;
pub const MAX_WPM: u32 = 1000;

/// Upper limits for configured delay scaling.
pub const MAX_DELAY_MULTIPLIER: f32 = 10.0;
pub const MAX_SCALED_CHARS: usize = 64;

/// Inclusive words-per-minute range accepted by `set_speed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedBounds {
    min: u32,
    max: u32,
}

impl SpeedBounds {
    /// Build a range inside [`MIN_WPM`, `MAX_WPM`]; swapped ends are reordered.
    pub fn new(min: u32, max: u32) -> Self {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min: lo.clamp(MIN_WPM, MAX_WPM),
            max: hi.clamp(MIN_WPM, MAX_WPM),
        }
    }

    pub fn min(self) -> u32 {
        self.min
    }

    pub fn max(self) -> u32 {
        self.max
    }

    pub fn contains(self, wpm: u32) -> bool {
        (self.min..=self.max).contains(&wpm)
    }

    pub fn clamp(self, wpm: u32) -> u32 {
        wpm.clamp(self.min, self.max)
    }

    fn check(self, wpm: u32) -> Result<u32, PlaybackError> {
        if self.contains(wpm) {
            Ok(wpm)
        } else {
            Err(PlaybackError::InvalidSpeed {
                wpm,
                min: self.min,
                max: self.max,
            })
        }
    }
}

impl Default for SpeedBounds {
    fn default() -> Self {
        Self::new(MIN_WPM, MAX_WPM)
    }
}

/// Per-token display time: `60 / wpm` seconds scaled by
/// `base_multiplier + min(chars, max_scaled_chars) * per_char_multiplier`.
///
/// With the defaults a two-letter word is held for 0.8x the base duration, a
/// six-letter word for exactly 1.0x, and words of twelve or more letters for
/// 1.3x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayPolicy {
    pub base_multiplier: f32,
    pub per_char_multiplier: f32,
    pub max_scaled_chars: usize,
}

impl DelayPolicy {
    /// Build a policy from untrusted values. Non-finite multipliers fall back
    /// to the defaults and everything is clamped to a sane range.
    pub fn new(base_multiplier: f32, per_char_multiplier: f32, max_scaled_chars: usize) -> Self {
        let defaults = Self::default();
        let sanitize = |value: f32, fallback: f32| {
            if value.is_finite() {
                value.clamp(0.0, MAX_DELAY_MULTIPLIER)
            } else {
                fallback
            }
        };
        Self {
            base_multiplier: sanitize(base_multiplier, defaults.base_multiplier),
            per_char_multiplier: sanitize(per_char_multiplier, defaults.per_char_multiplier),
            max_scaled_chars: max_scaled_chars.min(MAX_SCALED_CHARS),
        }
    }

    /// Every token gets exactly the base duration.
    pub fn flat() -> Self {
        Self {
            base_multiplier: 1.0,
            per_char_multiplier: 0.0,
            max_scaled_chars: 0,
        }
    }

    pub fn multiplier(&self, token: &str) -> f64 {
        let chars = token.chars().count().min(self.max_scaled_chars);
        let multiplier =
            f64::from(self.base_multiplier) + chars as f64 * f64::from(self.per_char_multiplier);
        multiplier.max(0.0)
    }
}

impl Default for DelayPolicy {
    fn default() -> Self {
        Self {
            base_multiplier: 0.7,
            per_char_multiplier: 0.05,
            max_scaled_chars: 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Paused,
    Playing,
}

/// Read-only progress snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub index: usize,
    pub total: usize,
    /// 0.0..=100.0
    pub percent: f64,
}

#[derive(Debug, Clone)]
pub struct PlaybackController {
    tokens: TokenSequence,
    index: usize,
    wpm: u32,
    state: PlaybackState,
    bounds: SpeedBounds,
    delay_policy: DelayPolicy,
}

impl PlaybackController {
    pub fn new(
        tokens: TokenSequence,
        wpm: u32,
        bounds: SpeedBounds,
        delay_policy: DelayPolicy,
    ) -> Result<Self, PlaybackError> {
        let wpm = bounds.check(wpm)?;
        Ok(Self {
            tokens,
            index: 0,
            wpm,
            state: PlaybackState::Stopped,
            bounds,
            delay_policy,
        })
    }

    /// Default bounds [100, 1000] and the default delay policy.
    pub fn with_defaults(tokens: TokenSequence, wpm: u32) -> Result<Self, PlaybackError> {
        Self::new(tokens, wpm, SpeedBounds::default(), DelayPolicy::default())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn speed(&self) -> u32 {
        self.wpm
    }

    pub fn bounds(&self) -> SpeedBounds {
        self.bounds
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// The cursor sits one past the last token.
    pub fn is_finished(&self) -> bool {
        self.index >= self.tokens.len()
    }

    /// `None` once finished or for an empty sequence.
    pub fn current_token(&self) -> Option<&str> {
        self.tokens.get(self.index)
    }

    /// Marks intent to play. A finished controller stays where it is.
    pub fn play(&mut self) {
        if self.is_finished() {
            debug!(index = self.index, "Ignoring play at end of sequence");
            return;
        }
        self.transition(PlaybackState::Playing);
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.transition(PlaybackState::Paused);
        }
    }

    pub fn stop(&mut self) {
        self.index = 0;
        self.transition(PlaybackState::Stopped);
    }

    pub fn reset(&mut self) {
        self.stop();
    }

    /// Advance one token; at the end the cursor parks at `len` and further
    /// calls do nothing.
    pub fn next_token(&mut self) -> Option<&str> {
        if self.index < self.tokens.len() {
            self.index += 1;
            self.leave_stopped();
        }
        self.current_token()
    }

    /// Step back one token; a no-op at index 0.
    pub fn previous_token(&mut self) -> Option<&str> {
        self.index = self.index.saturating_sub(1);
        self.current_token()
    }

    /// Jump to `index`; `len` itself is allowed and means "finished".
    pub fn seek(&mut self, index: usize) -> Result<(), PlaybackError> {
        if index > self.tokens.len() {
            return Err(PlaybackError::OutOfRange {
                index,
                len: self.tokens.len(),
            });
        }
        self.index = index;
        self.leave_stopped();
        Ok(())
    }

    pub fn set_speed(&mut self, wpm: u32) -> Result<(), PlaybackError> {
        self.wpm = self.bounds.check(wpm)?;
        debug!(wpm, "Playback speed changed");
        Ok(())
    }

    /// Display time for the current token.
    pub fn delay(&self) -> Duration {
        let base = 60.0 / f64::from(self.wpm);
        let multiplier = self
            .current_token()
            .map(|token| self.delay_policy.multiplier(token))
            .unwrap_or(1.0);
        Duration::try_from_secs_f64(base * multiplier)
            .unwrap_or_else(|_| Duration::from_secs_f64(base))
    }

    /// First token at or after `start_from` containing `term`, ignoring case.
    /// Does not wrap and does not move the cursor.
    pub fn search(&self, term: &str, start_from: usize) -> Option<usize> {
        let needle = term.to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.tokens
            .iter()
            .enumerate()
            .skip(start_from)
            .find(|(_, token)| token.to_lowercase().contains(&needle))
            .map(|(idx, _)| idx)
    }

    /// Next match after the cursor, wrapping to the start after the end.
    pub fn find_next(&self, term: &str) -> Option<usize> {
        let start = self.index.saturating_add(1);
        self.search(term, start).or_else(|| self.search(term, 0))
    }

    pub fn progress(&self) -> Progress {
        let total = self.tokens.len();
        let percent = if total == 0 {
            0.0
        } else {
            self.index as f64 / total as f64 * 100.0
        };
        Progress {
            index: self.index,
            total,
            percent,
        }
    }

    /// `Stopped` always means index 0.
    fn leave_stopped(&mut self) {
        if self.state == PlaybackState::Stopped && self.index > 0 {
            self.state = PlaybackState::Paused;
        }
    }

    fn transition(&mut self, next: PlaybackState) {
        if self.state != next {
            debug!(from = ?self.state, to = ?next, index = self.index, "Playback state change");
            self.state = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(words: &[&str]) -> PlaybackController {
        PlaybackController::with_defaults(TokenSequence::from(words), 300).expect("valid speed")
    }

    #[test]
    fn seek_then_current_token_returns_that_token() {
        let words = ["alpha", "beta", "gamma", "delta"];
        let mut playback = controller(&words);
        for (idx, word) in words.iter().enumerate() {
            playback.seek(idx).expect("in range");
            assert_eq!(playback.current_token(), Some(*word));
        }
    }

    #[test]
    fn next_token_parks_at_end() {
        let mut playback = controller(&["a", "b", "c"]);
        for _ in 0..3 {
            playback.next_token();
        }
        assert_eq!(playback.index(), 3);
        assert!(playback.is_finished());
        assert_eq!(playback.current_token(), None);

        assert_eq!(playback.next_token(), None);
        assert_eq!(playback.index(), 3);
    }

    #[test]
    fn previous_token_at_start_is_noop() {
        let mut playback = controller(&["a", "b"]);
        assert_eq!(playback.previous_token(), Some("a"));
        assert_eq!(playback.index(), 0);
    }

    #[test]
    fn seek_rejects_past_length() {
        let mut playback = controller(&["a", "b"]);
        playback.seek(1).expect("in range");
        assert_eq!(
            playback.seek(3),
            Err(PlaybackError::OutOfRange { index: 3, len: 2 })
        );
        assert_eq!(playback.index(), 1);
        playback.seek(2).expect("length is allowed");
        assert!(playback.is_finished());
    }

    #[test]
    fn invalid_speed_keeps_previous_value() {
        let mut playback = controller(&["a"]);
        assert!(matches!(
            playback.set_speed(99),
            Err(PlaybackError::InvalidSpeed { wpm: 99, .. })
        ));
        assert!(playback.set_speed(1001).is_err());
        assert_eq!(playback.speed(), 300);
        playback.set_speed(1000).expect("upper bound allowed");
        assert_eq!(playback.speed(), 1000);
    }

    #[test]
    fn constructor_rejects_out_of_range_speed() {
        assert!(PlaybackController::with_defaults(TokenSequence::default(), 20).is_err());
    }

    #[test]
    fn delay_scales_with_token_length() {
        let mut playback = controller(&["ok", "sixsix", "extraordinarily"]);
        playback.set_speed(600).expect("speed");
        let base = 0.1;
        assert!((playback.delay().as_secs_f64() - base * 0.8).abs() < 1e-6);
        playback.next_token();
        assert!((playback.delay().as_secs_f64() - base).abs() < 1e-6);
        playback.next_token();
        assert!((playback.delay().as_secs_f64() - base * 1.3).abs() < 1e-6);
        playback.next_token();
        assert!((playback.delay().as_secs_f64() - base).abs() < 1e-6);
    }

    #[test]
    fn flat_policy_uses_base_delay() {
        let playback = PlaybackController::new(
            TokenSequence::from(&["extraordinarily"][..]),
            120,
            SpeedBounds::default(),
            DelayPolicy::flat(),
        )
        .expect("controller");
        assert_eq!(playback.delay(), Duration::from_millis(500));
    }

    #[test]
    fn delay_policy_rejects_unusable_values() {
        let policy = DelayPolicy::new(f32::INFINITY, f32::NAN, 10_000);
        assert_eq!(policy.base_multiplier, DelayPolicy::default().base_multiplier);
        assert_eq!(
            policy.per_char_multiplier,
            DelayPolicy::default().per_char_multiplier
        );
        assert_eq!(policy.max_scaled_chars, MAX_SCALED_CHARS);

        let policy = DelayPolicy::new(1e30, -2.0, 3);
        assert_eq!(policy.base_multiplier, MAX_DELAY_MULTIPLIER);
        assert_eq!(policy.per_char_multiplier, 0.0);
        assert_eq!(policy.max_scaled_chars, 3);
    }

    #[test]
    fn overflowing_delay_falls_back_to_base() {
        let policy = DelayPolicy {
            base_multiplier: f32::INFINITY,
            per_char_multiplier: 0.0,
            max_scaled_chars: 0,
        };
        let playback = PlaybackController::new(
            TokenSequence::from(&["word"][..]),
            120,
            SpeedBounds::default(),
            policy,
        )
        .expect("controller");
        assert_eq!(playback.delay(), Duration::from_millis(500));
    }

    #[test]
    fn search_is_case_insensitive_and_bounded() {
        let playback = controller(&["The", "quick", "brown", "fox"]);
        assert_eq!(playback.search("the", 0), Some(0));
        assert_eq!(playback.search("fox", 1), Some(3));
        assert_eq!(playback.search("zzz", 0), None);
        assert_eq!(playback.search("the", 1), None);
        assert_eq!(playback.search("", 0), None);
        assert_eq!(playback.index(), 0);
    }

    #[test]
    fn find_next_wraps_after_the_end() {
        let mut playback = controller(&["cat", "dog", "cat", "emu"]);
        assert_eq!(playback.find_next("cat"), Some(2));
        playback.seek(2).expect("seek");
        assert_eq!(playback.find_next("cat"), Some(0));
        playback.seek(0).expect("seek");
        assert_eq!(playback.find_next("emu"), Some(3));
        assert_eq!(playback.find_next("yak"), None);
    }

    #[test]
    fn find_next_returns_current_match_last() {
        let mut playback = controller(&["solo", "other"]);
        playback.seek(0).expect("seek");
        assert_eq!(playback.find_next("solo"), Some(0));
    }

    #[test]
    fn state_machine_transitions() {
        let mut playback = controller(&["a", "b", "c"]);
        assert_eq!(playback.state(), PlaybackState::Stopped);
        playback.play();
        assert_eq!(playback.state(), PlaybackState::Playing);
        playback.next_token();
        playback.pause();
        assert_eq!(playback.state(), PlaybackState::Paused);
        assert_eq!(playback.index(), 1);
        playback.play();
        playback.reset();
        assert_eq!(playback.state(), PlaybackState::Stopped);
        assert_eq!(playback.index(), 0);
    }

    #[test]
    fn moving_off_the_start_leaves_stopped() {
        let mut playback = controller(&["a", "b"]);
        playback.next_token();
        assert_eq!(playback.state(), PlaybackState::Paused);
    }

    #[test]
    fn play_at_end_is_ignored() {
        let mut playback = controller(&["a"]);
        playback.seek(1).expect("seek");
        playback.play();
        assert!(!playback.is_playing());
    }

    #[test]
    fn progress_snapshot() {
        let mut playback = controller(&["a", "b", "c", "d"]);
        playback.seek(1).expect("seek");
        let progress = playback.progress();
        assert_eq!((progress.index, progress.total), (1, 4));
        assert!((progress.percent - 25.0).abs() < f64::EPSILON);

        let empty = PlaybackController::with_defaults(TokenSequence::default(), 300)
            .expect("controller");
        assert_eq!(empty.progress().percent, 0.0);
        assert_eq!(empty.current_token(), None);
    }

    #[test]
    fn speed_bounds_are_normalized() {
        let bounds = SpeedBounds::new(2000, 50);
        assert_eq!((bounds.min(), bounds.max()), (MIN_WPM, MAX_WPM));
        assert_eq!(SpeedBounds::new(200, 400).clamp(900), 400);
    }
}

//! Toolkit-agnostic reader session.
//!
//! `ReaderSession` is what a presentation shell drives: it owns the active
//! [`PlaybackController`], the [`ReadingQueue`], the status line and the single
//! pending timer. The shell forwards user intents and timer deliveries here and
//! only reads state back for rendering.

use crate::config::AppConfig;
use crate::error::{ErrorKind, ExtractError, PlaybackError};
use crate::extract::{self, ChapterSplitter};
use crate::playback::{DelayPolicy, PlaybackController, PlaybackState, Progress, SpeedBounds};
use crate::queue::{EntryId, ReadingQueue};
use crate::scheduler::{ScheduleHandle, Scheduler, TimerAction};
use crate::tokens::TokenSequence;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    fn for_error(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::EmptyDocument | ErrorKind::InvalidSpeed | ErrorKind::OutOfRange => {
                Severity::Warning
            }
            ErrorKind::FileNotFound
            | ErrorKind::UnsupportedFormat
            | ErrorKind::ExtractionFailed
            | ErrorKind::EncodingError => Severity::Error,
        }
    }
}

/// One-line user-visible status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub severity: Severity,
    pub text: String,
}

impl Status {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            text: text.into(),
        }
    }

    fn new_for_error(kind: ErrorKind, text: String) -> Self {
        Self {
            severity: Severity::for_error(kind),
            text,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Everything the session needs from configuration.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub bounds: SpeedBounds,
    pub delay_policy: DelayPolicy,
    pub splitter: ChapterSplitter,
    pub initial_wpm: u32,
    pub autoplay: bool,
}

impl SessionSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        let bounds = config.speed_bounds();
        Self {
            bounds,
            delay_policy: config.delay_policy(),
            splitter: ChapterSplitter::new(&config.heading_rules()),
            initial_wpm: bounds.clamp(config.default_wpm),
            autoplay: config.autoplay,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

pub struct ReaderSession {
    bounds: SpeedBounds,
    delay_policy: DelayPolicy,
    splitter: ChapterSplitter,
    playback: Option<PlaybackController>,
    document_name: Option<String>,
    queue: ReadingQueue,
    wpm: u32,
    search_term: String,
    last_match: Option<usize>,
    status: Status,
    pending: Option<ScheduleHandle>,
    generation: u64,
}

impl ReaderSession {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            bounds: settings.bounds,
            delay_policy: settings.delay_policy,
            splitter: settings.splitter,
            playback: None,
            document_name: None,
            queue: ReadingQueue::new(settings.autoplay),
            wpm: settings.bounds.clamp(settings.initial_wpm),
            search_term: String::new(),
            last_match: None,
            status: Status::info("No document loaded"),
            pending: None,
            generation: 0,
        }
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn queue(&self) -> &ReadingQueue {
        &self.queue
    }

    pub fn playback(&self) -> Option<&PlaybackController> {
        self.playback.as_ref()
    }

    pub fn document_name(&self) -> Option<&str> {
        self.document_name.as_deref()
    }

    pub fn current_token(&self) -> Option<&str> {
        self.playback.as_ref().and_then(|p| p.current_token())
    }

    pub fn progress(&self) -> Option<Progress> {
        self.playback.as_ref().map(PlaybackController::progress)
    }

    pub fn state(&self) -> PlaybackState {
        self.playback
            .as_ref()
            .map(PlaybackController::state)
            .unwrap_or(PlaybackState::Stopped)
    }

    pub fn is_playing(&self) -> bool {
        self.state() == PlaybackState::Playing
    }

    pub fn speed(&self) -> u32 {
        self.wpm
    }

    pub fn bounds(&self) -> SpeedBounds {
        self.bounds
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    pub fn has_pending_timer(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_cancelled())
    }

    // ---- loading -------------------------------------------------------

    /// Load `path` as the active document and make it the current queue
    /// entry. On failure the previous document stays active.
    pub fn open_document(&mut self, path: &Path) -> Result<EntryId, ExtractError> {
        let tokens = match extract::load_document(path) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.report_extract_error(&err);
                return Err(err);
            }
        };
        let id = self.queue.push(display_name(path), tokens);
        self.activate(id);
        Ok(id)
    }

    /// Open the first loadable path and queue the rest behind it. Every
    /// failure ends up in one status line. Returns how many entries were
    /// added.
    pub fn open_documents<P: AsRef<Path>>(&mut self, paths: &[P]) -> usize {
        let (added, failures) = self.queue_paths(paths, whole_file);
        if let Some(first) = added.first() {
            self.activate(*first);
        }
        if !failures.is_empty() || added.len() > 1 {
            self.report_queued(&added, failures);
        }
        added.len()
    }

    /// Queue each path as one entry. Failing paths are reported and skipped.
    /// Returns how many entries were added.
    pub fn enqueue_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> usize {
        let (added, failures) = self.queue_paths(paths, whole_file);
        self.finish_enqueue(&added, failures);
        added.len()
    }

    /// Queue one entry per chapter of each path, labeled
    /// `"<file> - <chapter>"`. Returns how many entries were added.
    pub fn enqueue_chapters<P: AsRef<Path>>(&mut self, paths: &[P]) -> usize {
        let (added, failures) = self.queue_paths(paths, chapters_of);
        self.finish_enqueue(&added, failures);
        added.len()
    }

    /// Queue already tokenized text under `name`.
    pub fn enqueue_tokens(&mut self, name: impl Into<String>, tokens: TokenSequence) -> EntryId {
        let id = self.queue.push(name, tokens);
        self.finish_enqueue(&[id], Vec::new());
        id
    }

    fn queue_paths<P: AsRef<Path>>(
        &mut self,
        paths: &[P],
        load: Loader,
    ) -> (Vec<EntryId>, Vec<ExtractError>) {
        let mut added = Vec::new();
        let mut failures = Vec::new();
        for path in paths {
            let path = path.as_ref();
            match load(self, path) {
                Ok(entries) => added.extend(
                    entries
                        .into_iter()
                        .map(|(name, tokens)| self.queue.push(name, tokens)),
                ),
                Err(err) => {
                    warn!(path = %path.display(), "Could not queue path: {err}");
                    failures.push(err);
                }
            }
        }
        (added, failures)
    }

    fn finish_enqueue(&mut self, added: &[EntryId], failures: Vec<ExtractError>) {
        if self.playback.is_none() {
            if let Some(first) = added.first() {
                self.activate(*first);
            }
        }
        self.report_queued(added, failures);
    }

    fn report_queued(&mut self, added: &[EntryId], failures: Vec<ExtractError>) {
        self.status = match failures.as_slice() {
            [] => Status::info(format!("Added {} item(s) to queue", added.len())),
            [only] if added.is_empty() => {
                Status::new_for_error(only.kind(), only.to_string())
            }
            many => Status::warning(format!(
                "Added {} item(s); {} failed: {}",
                added.len(),
                many.len(),
                many.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ")
            )),
        };
    }

    // ---- playback ------------------------------------------------------

    pub fn play(&mut self, scheduler: &mut dyn Scheduler) {
        let pending = self.has_pending_timer();
        let Some(playback) = self.playback.as_mut() else {
            self.status = Status::warning("No document loaded");
            return;
        };
        if playback.is_finished() {
            self.status = Status::info("Finished. Reset to read again");
            return;
        }
        if playback.is_playing() && pending {
            return;
        }
        playback.play();
        self.status = Status::info("Playing");
        self.schedule_next(scheduler);
    }

    pub fn pause(&mut self) {
        self.cancel_pending();
        if let Some(playback) = self.playback.as_mut() {
            playback.pause();
            self.status = Status::info("Paused");
        }
    }

    pub fn toggle_play(&mut self, scheduler: &mut dyn Scheduler) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play(scheduler);
        }
    }

    pub fn reset(&mut self) {
        self.cancel_pending();
        if let Some(playback) = self.playback.as_mut() {
            playback.reset();
            self.last_match = None;
            self.status = Status::info("Reset to start");
        }
    }

    /// Manual step forward; a running timer keeps its schedule.
    pub fn next(&mut self) {
        match self.playback.as_mut() {
            Some(playback) => {
                playback.next_token();
            }
            None => self.status = Status::warning("No document loaded"),
        }
    }

    pub fn previous(&mut self) {
        match self.playback.as_mut() {
            Some(playback) => {
                playback.previous_token();
            }
            None => self.status = Status::warning("No document loaded"),
        }
    }

    /// Move the cursor to `index`. Without a document every index is out of
    /// range.
    pub fn seek(&mut self, index: usize) -> Result<(), PlaybackError> {
        let result = match self.playback.as_mut() {
            Some(playback) => playback.seek(index),
            None => Err(PlaybackError::OutOfRange { index, len: 0 }),
        };
        result.inspect_err(|err| {
            self.status = Status::new_for_error(err.kind(), err.to_string());
        })
    }

    /// Change speed. Applies from the next scheduled token; the pending
    /// delay is left alone.
    pub fn set_speed(&mut self, wpm: u32) -> Result<(), PlaybackError> {
        if !self.bounds.contains(wpm) {
            let err = PlaybackError::InvalidSpeed {
                wpm,
                min: self.bounds.min(),
                max: self.bounds.max(),
            };
            self.status = Status::new_for_error(err.kind(), err.to_string());
            return Err(err);
        }
        if let Some(playback) = self.playback.as_mut() {
            playback.set_speed(wpm)?;
        }
        self.wpm = wpm;
        self.status = Status::info(format!("Speed {wpm} WPM"));
        Ok(())
    }

    /// Nudge the speed by `delta`, clamped to the configured bounds.
    pub fn adjust_speed(&mut self, delta: i64) {
        let target = (i64::from(self.wpm) + delta).clamp(0, i64::from(u32::MAX));
        let target = self.bounds.clamp(u32::try_from(target).unwrap_or(self.wpm));
        if target != self.wpm {
            // Clamped into bounds, cannot fail.
            let _ = self.set_speed(target);
        }
    }

    // ---- search --------------------------------------------------------

    /// Jump to the first match of `term` from the start of the document.
    pub fn search(&mut self, term: &str) -> Option<usize> {
        self.search_term = term.trim().to_string();
        let found = match self.playback.as_ref() {
            Some(playback) => playback.search(&self.search_term, 0),
            None => {
                self.status = Status::warning("No document loaded");
                return None;
            }
        };
        self.apply_match(found)
    }

    /// Jump to the next match after the cursor, wrapping to the start.
    pub fn find_next(&mut self) -> Option<usize> {
        if self.search_term.is_empty() {
            self.status = Status::warning("Nothing to search for");
            return None;
        }
        let found = match self.playback.as_ref() {
            Some(playback) => playback.find_next(&self.search_term),
            None => {
                self.status = Status::warning("No document loaded");
                return None;
            }
        };
        self.apply_match(found)
    }

    fn apply_match(&mut self, found: Option<usize>) -> Option<usize> {
        let Some(index) = found else {
            self.status = Status::warning(format!("'{}' not found", self.search_term));
            return None;
        };
        if self.seek(index).is_err() {
            return None;
        }
        self.last_match = Some(index);
        self.status = Status::info(format!(
            "Found '{}' at word {}",
            self.search_term,
            index + 1
        ));
        Some(index)
    }

    // ---- queue ---------------------------------------------------------

    /// Make `id` the active document, paused at its start.
    pub fn select_entry(&mut self, id: EntryId) -> bool {
        if self.queue.get(id).is_none() {
            self.status = Status::warning("Queue entry no longer exists");
            return false;
        }
        self.activate(id);
        true
    }

    pub fn play_entry(&mut self, id: EntryId, scheduler: &mut dyn Scheduler) {
        if self.select_entry(id) {
            self.play(scheduler);
        }
    }

    pub fn move_entry_up(&mut self, id: EntryId) -> bool {
        self.queue.move_up(id)
    }

    pub fn move_entry_down(&mut self, id: EntryId) -> bool {
        self.queue.move_down(id)
    }

    /// Removing the current entry keeps it on screen but detached.
    pub fn remove_entry(&mut self, id: EntryId) -> bool {
        match self.queue.remove(id) {
            Some(entry) => {
                self.status = Status::info(format!("Removed {}", entry.name));
                true
            }
            None => false,
        }
    }

    pub fn clear_queue(&mut self) {
        self.queue.clear();
        self.status = Status::info("Queue cleared");
    }

    pub fn set_autoplay(&mut self, enabled: bool) {
        self.queue.set_autoplay(enabled);
    }

    // ---- timer ---------------------------------------------------------

    /// Deliver a fired timer. Cancelled, stale or foreign deliveries are
    /// ignored.
    pub fn on_timer(
        &mut self,
        action: TimerAction,
        handle: &ScheduleHandle,
        scheduler: &mut dyn Scheduler,
    ) {
        let TimerAction::Advance { generation } = action;
        let is_pending = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.same_as(handle));
        if handle.is_cancelled() || !is_pending || generation != self.generation {
            debug!(generation, current = self.generation, "Ignoring stale timer");
            return;
        }
        self.pending = None;

        let Some(playback) = self.playback.as_mut() else {
            return;
        };
        if !playback.is_playing() {
            return;
        }
        playback.next_token();
        if !playback.is_finished() {
            self.schedule_next(scheduler);
            return;
        }
        self.finish_current(scheduler);
    }

    /// Cancel outstanding timers, e.g. before the shell exits.
    pub fn shutdown(&mut self) {
        self.cancel_pending();
        if let Some(playback) = self.playback.as_mut() {
            playback.pause();
        }
    }

    fn finish_current(&mut self, scheduler: &mut dyn Scheduler) {
        let successor = if self.queue.autoplay() {
            self.queue.next_after_current().map(|entry| entry.id)
        } else {
            None
        };
        match successor {
            Some(id) => {
                info!(%id, "Autoplaying next queue entry");
                self.activate(id);
                self.play(scheduler);
            }
            None => {
                if let Some(playback) = self.playback.as_mut() {
                    playback.pause();
                }
                info!("Reached end of document");
                self.status = Status::info("Finished");
            }
        }
    }

    fn schedule_next(&mut self, scheduler: &mut dyn Scheduler) {
        let Some(playback) = self.playback.as_ref() else {
            return;
        };
        let delay = playback.delay();
        self.cancel_pending();
        let handle = scheduler.schedule(
            delay,
            TimerAction::Advance {
                generation: self.generation,
            },
        );
        self.pending = Some(handle);
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
        self.generation = self.generation.wrapping_add(1);
    }

    /// Swap in a fresh controller for `id` at index 0 with the current speed.
    fn activate(&mut self, id: EntryId) {
        let Some(entry) = self.queue.get(id) else {
            return;
        };
        let name = entry.name.clone();
        let tokens = entry.tokens.clone();
        match PlaybackController::new(tokens, self.wpm, self.bounds, self.delay_policy) {
            Ok(playback) => {
                self.cancel_pending();
                info!(%id, name = %name, tokens = playback.len(), "Activated document");
                self.status = Status::info(format!("Loaded {name} ({} words)", playback.len()));
                self.playback = Some(playback);
                self.document_name = Some(name);
                self.last_match = None;
                self.queue.set_current(id);
            }
            Err(err) => {
                self.status = Status::new_for_error(err.kind(), err.to_string());
            }
        }
    }

    fn report_extract_error(&mut self, err: &ExtractError) {
        warn!("Document load failed: {err}");
        self.status = Status::new_for_error(err.kind(), err.to_string());
    }
}

type Loader = fn(&ReaderSession, &Path) -> Result<Vec<(String, TokenSequence)>, ExtractError>;

fn whole_file(
    _session: &ReaderSession,
    path: &Path,
) -> Result<Vec<(String, TokenSequence)>, ExtractError> {
    Ok(vec![(display_name(path), extract::load_document(path)?)])
}

fn chapters_of(
    session: &ReaderSession,
    path: &Path,
) -> Result<Vec<(String, TokenSequence)>, ExtractError> {
    let chapters = extract::parse_chapters_with(path, &session.splitter)?;
    if chapters.is_empty() {
        return Err(ExtractError::EmptyDocument {
            path: path.to_path_buf(),
        });
    }
    let file = display_name(path);
    Ok(chapters
        .into_iter()
        .map(|(label, tokens)| (format!("{file} - {label}"), tokens))
        .collect())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

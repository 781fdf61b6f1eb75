use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::{Effect, EffectScheduler};
use rsvp_core::{EntryId, ReaderSession, Scheduler, ScheduleHandle, TimerAction};
use tracing::{debug, info};

impl App {
    pub(super) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::PathInputChanged(path) => self.path_input = path,
            Message::OpenPath => self.handle_open_path(),
            Message::QueuePaths => self.handle_queue_paths(),
            Message::QueueChapters => self.handle_queue_chapters(),
            Message::TogglePlayPause => {
                self.with_scheduler(&mut effects, |session, scheduler| {
                    session.toggle_play(scheduler)
                });
            }
            Message::Play => {
                self.with_scheduler(&mut effects, |session, scheduler| session.play(scheduler));
            }
            Message::Pause => self.session.pause(),
            Message::NextToken => self.session.next(),
            Message::PreviousToken => self.session.previous(),
            Message::Reset => self.session.reset(),
            Message::SpeedChanged(wpm) => {
                // Rejections land on the status line.
                let _ = self.session.set_speed(wpm);
            }
            Message::SpeedUp => self.session.adjust_speed(i64::from(self.config.wpm_step)),
            Message::SpeedDown => self.session.adjust_speed(-i64::from(self.config.wpm_step)),
            Message::SearchInputChanged(term) => self.search_input = term,
            Message::SearchSubmit => self.handle_search_submit(),
            Message::FindNext => self.handle_find_next(),
            Message::PlayEntry(id) => self.handle_play_entry(id, &mut effects),
            Message::MoveEntryUp(id) => {
                self.session.move_entry_up(id);
            }
            Message::MoveEntryDown(id) => {
                self.session.move_entry_down(id);
            }
            Message::RemoveEntry(id) => {
                self.session.remove_entry(id);
            }
            Message::ClearQueue => self.session.clear_queue(),
            Message::AutoplayToggled(enabled) => {
                self.config.autoplay = enabled;
                self.session.set_autoplay(enabled);
            }
            Message::ToggleTheme => self.handle_toggle_theme(),
            Message::Timer { action, handle } => self.handle_timer(action, handle, &mut effects),
            Message::KeyPressed { key, modifiers } => {
                if let Some(shortcut) = self.shortcut_message_for_key(key, modifiers) {
                    effects.extend(self.reduce(shortcut));
                }
            }
            Message::PollSystemSignals => self.handle_poll_system_signals(&mut effects),
            Message::SafeQuit => effects.push(Effect::QuitSafely),
        }

        effects
    }

    /// Run a session call that may start a timer and collect the timers it
    /// requested as effects.
    fn with_scheduler(
        &mut self,
        effects: &mut Vec<Effect>,
        f: impl FnOnce(&mut ReaderSession, &mut dyn Scheduler),
    ) {
        let mut scheduler = EffectScheduler::default();
        f(&mut self.session, &mut scheduler);
        effects.extend(scheduler.into_effects());
    }

    fn handle_open_path(&mut self) {
        let paths = self.input_paths();
        let Some(first) = paths.first() else {
            return;
        };
        if paths.len() > 1 {
            debug!(ignored = paths.len() - 1, "Open uses the first path only");
        }
        info!(path = %first.display(), "Opening path from file bar");
        // Failures are reported through the status line.
        let _ = self.session.open_document(first);
    }

    fn handle_queue_paths(&mut self) {
        let paths = self.input_paths();
        if paths.is_empty() {
            return;
        }
        let added = self.session.enqueue_files(&paths);
        info!(requested = paths.len(), added, "Queued files from file bar");
    }

    fn handle_queue_chapters(&mut self) {
        let paths = self.input_paths();
        if paths.is_empty() {
            return;
        }
        let added = self.session.enqueue_chapters(&paths);
        info!(requested = paths.len(), added, "Queued chapters from file bar");
    }

    fn handle_search_submit(&mut self) {
        let term = self.search_input.clone();
        self.session.search(&term);
    }

    fn handle_find_next(&mut self) {
        let term = self.search_input.trim();
        if !term.is_empty() && term != self.session.search_term() {
            let term = term.to_string();
            self.session.search(&term);
        } else {
            self.session.find_next();
        }
    }

    fn handle_play_entry(&mut self, id: EntryId, effects: &mut Vec<Effect>) {
        self.with_scheduler(effects, |session, scheduler| {
            session.play_entry(id, scheduler)
        });
    }

    fn handle_toggle_theme(&mut self) {
        self.config.theme = self.config.theme.toggled();
        debug!(theme = %self.config.theme, "Theme toggled");
    }

    fn handle_timer(
        &mut self,
        action: TimerAction,
        handle: ScheduleHandle,
        effects: &mut Vec<Effect>,
    ) {
        self.with_scheduler(effects, |session, scheduler| {
            session.on_timer(action, &handle, scheduler)
        });
    }

    fn handle_poll_system_signals(&mut self, effects: &mut Vec<Effect>) {
        if crate::take_sigint_requested() {
            info!("Received Ctrl+C; quitting safely");
            effects.push(Effect::QuitSafely);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::keyboard::{Key, Modifiers, key};
    use rsvp_core::config::AppConfig;
    use rsvp_core::{PlaybackState, TokenSequence};

    fn app_with(words: &[&str]) -> App {
        let mut app = App::new(AppConfig::default());
        app.session.enqueue_tokens("sample", TokenSequence::from(words));
        app
    }

    fn scheduled(effects: &[Effect]) -> Vec<(TimerAction, ScheduleHandle)> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::Schedule { action, handle, .. } => Some((*action, handle.clone())),
                Effect::QuitSafely => None,
            })
            .collect()
    }

    #[test]
    fn play_requests_one_timer() {
        let mut app = app_with(&["one", "two"]);
        let effects = app.reduce(Message::TogglePlayPause);
        assert_eq!(scheduled(&effects).len(), 1);
        assert_eq!(app.session.state(), PlaybackState::Playing);
    }

    #[test]
    fn timer_delivery_advances_and_reschedules() {
        let mut app = app_with(&["one", "two", "three"]);
        let effects = app.reduce(Message::Play);
        let (action, handle) = scheduled(&effects).pop().expect("timer");

        let effects = app.reduce(Message::Timer { action, handle });
        assert_eq!(app.session.current_token(), Some("two"));
        assert_eq!(scheduled(&effects).len(), 1);
    }

    #[test]
    fn pause_turns_pending_timer_stale() {
        let mut app = app_with(&["one", "two"]);
        let effects = app.reduce(Message::Play);
        let (action, handle) = scheduled(&effects).pop().expect("timer");
        app.reduce(Message::Pause);

        let effects = app.reduce(Message::Timer { action, handle });
        assert!(effects.is_empty());
        assert_eq!(app.session.current_token(), Some("one"));
    }

    #[test]
    fn space_key_toggles_playback() {
        let mut app = app_with(&["one", "two"]);
        let effects = app.reduce(Message::KeyPressed {
            key: Key::Named(key::Named::Space),
            modifiers: Modifiers::empty(),
        });
        assert_eq!(scheduled(&effects).len(), 1);

        let effects = app.reduce(Message::KeyPressed {
            key: Key::Named(key::Named::Space),
            modifiers: Modifiers::empty(),
        });
        assert!(effects.is_empty());
        assert_eq!(app.session.state(), PlaybackState::Paused);
    }

    #[test]
    fn speed_keys_step_by_configured_amount() {
        let mut app = app_with(&["one"]);
        app.reduce(Message::SpeedUp);
        assert_eq!(app.session.speed(), 325);
        app.reduce(Message::SpeedDown);
        app.reduce(Message::SpeedDown);
        assert_eq!(app.session.speed(), 275);
    }

    #[test]
    fn find_next_uses_the_search_box() {
        let mut app = app_with(&["cat", "dog", "cat"]);
        app.reduce(Message::SearchInputChanged("dog".to_string()));
        app.reduce(Message::FindNext);
        assert_eq!(app.session.current_token(), Some("dog"));

        app.reduce(Message::SearchInputChanged("cat".to_string()));
        app.reduce(Message::SearchSubmit);
        assert_eq!(app.session.last_match(), Some(0));
        app.reduce(Message::FindNext);
        assert_eq!(app.session.last_match(), Some(2));
    }

    #[test]
    fn safe_quit_is_an_effect() {
        let mut app = app_with(&["one"]);
        let effects = app.reduce(Message::SafeQuit);
        assert!(matches!(effects.as_slice(), [Effect::QuitSafely]));
    }

    #[test]
    fn queue_chapters_reports_every_failed_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let good = dir.path().join("novel.txt");
        std::fs::write(&good, "Chapter 1\nIt began.").expect("write");
        let missing = dir.path().join("missing.txt");

        let mut app = App::new(AppConfig::default());
        app.reduce(Message::PathInputChanged(format!(
            "{};{}",
            missing.display(),
            good.display()
        )));
        app.reduce(Message::QueueChapters);

        assert_eq!(app.session.queue().len(), 1);
        assert_eq!(app.session.status().severity, rsvp_core::Severity::Warning);
        assert!(app.session.status().text.contains("missing.txt"));
    }

    #[test]
    fn autoplay_checkbox_updates_the_queue() {
        let mut app = app_with(&["one"]);
        app.reduce(Message::AutoplayToggled(false));
        assert!(!app.session.queue().autoplay());
    }
}

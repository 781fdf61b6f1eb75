use iced::keyboard::{Key, Modifiers};
use rsvp_core::{EntryId, ScheduleHandle, TimerAction};

/// Messages emitted by the UI.
#[derive(Debug, Clone)]
pub enum Message {
    PathInputChanged(String),
    OpenPath,
    QueuePaths,
    QueueChapters,
    TogglePlayPause,
    Play,
    Pause,
    NextToken,
    PreviousToken,
    Reset,
    SpeedChanged(u32),
    SpeedUp,
    SpeedDown,
    SearchInputChanged(String),
    SearchSubmit,
    FindNext,
    PlayEntry(EntryId),
    MoveEntryUp(EntryId),
    MoveEntryDown(EntryId),
    RemoveEntry(EntryId),
    ClearQueue,
    AutoplayToggled(bool),
    ToggleTheme,
    Timer {
        action: TimerAction,
        handle: ScheduleHandle,
    },
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
    PollSystemSignals,
    SafeQuit,
}

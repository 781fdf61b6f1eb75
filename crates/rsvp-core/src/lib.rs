//! Core of the RSVP reader: document extraction, chapter splitting, the
//! playback controller, the reading queue and the toolkit-agnostic session
//! that a presentation shell drives.

pub mod config;
pub mod error;
pub mod extract;
pub mod playback;
pub mod queue;
pub mod scheduler;
pub mod session;
pub mod tokens;

pub use error::{ErrorKind, ExtractError, PlaybackError};
pub use extract::{
    ChapterMap, DocumentFormat, load_document, parse, parse_chapters, parse_chapters_with,
};
pub use playback::{
    DelayPolicy, MAX_DELAY_MULTIPLIER, MAX_SCALED_CHARS, PlaybackController, PlaybackState,
    Progress, SpeedBounds,
};
pub use queue::{EntryId, QueueEntry, ReadingQueue};
pub use scheduler::{ManualScheduler, ScheduleHandle, Scheduler, TimerAction};
pub use session::{ReaderSession, SessionSettings, Severity, Status};
pub use tokens::TokenSequence;

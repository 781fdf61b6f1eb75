//! Ordered reading queue.
//!
//! Entries carry a stable [`EntryId`]; the current entry is tracked by id, so
//! reordering or removing other entries never changes which document is
//! active.

use crate::tokens::TokenSequence;
use std::fmt;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct QueueEntry {
    pub id: EntryId,
    pub name: String,
    pub tokens: TokenSequence,
}

#[derive(Debug)]
pub struct ReadingQueue {
    entries: Vec<QueueEntry>,
    current: Option<EntryId>,
    autoplay: bool,
    next_id: u64,
}

impl Default for ReadingQueue {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ReadingQueue {
    pub fn new(autoplay: bool) -> Self {
        Self {
            entries: Vec::new(),
            current: None,
            autoplay,
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueueEntry> {
        self.entries.iter()
    }

    pub fn get(&self, id: EntryId) -> Option<&QueueEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn set_autoplay(&mut self, enabled: bool) {
        self.autoplay = enabled;
        info!(enabled, "Queue autoplay toggled");
    }

    pub fn current(&self) -> Option<EntryId> {
        self.current
    }

    pub fn current_entry(&self) -> Option<&QueueEntry> {
        self.current.and_then(|id| self.get(id))
    }

    pub fn current_position(&self) -> Option<usize> {
        self.current.and_then(|id| self.position(id))
    }

    /// Marks `id` as current. Unknown ids are ignored and return false.
    pub fn set_current(&mut self, id: EntryId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.current = Some(id);
        true
    }

    /// Appends an entry and returns its id.
    pub fn push(&mut self, name: impl Into<String>, tokens: TokenSequence) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        let name = name.into();
        info!(%id, name = %name, tokens = tokens.len(), "Queued entry");
        self.entries.push(QueueEntry { id, name, tokens });
        id
    }

    pub fn move_up(&mut self, id: EntryId) -> bool {
        match self.position(id) {
            Some(pos) if pos > 0 => {
                self.entries.swap(pos, pos - 1);
                info!(%id, to = pos - 1, "Moved queue entry up");
                true
            }
            _ => false,
        }
    }

    pub fn move_down(&mut self, id: EntryId) -> bool {
        match self.position(id) {
            Some(pos) if pos + 1 < self.entries.len() => {
                self.entries.swap(pos, pos + 1);
                info!(%id, to = pos + 1, "Moved queue entry down");
                true
            }
            _ => false,
        }
    }

    /// Removing the current entry leaves the queue without a current entry.
    pub fn remove(&mut self, id: EntryId) -> Option<QueueEntry> {
        let pos = self.position(id)?;
        let removed = self.entries.remove(pos);
        if self.current == Some(id) {
            self.current = None;
        }
        info!(%id, name = %removed.name, "Removed queue entry");
        Some(removed)
    }

    pub fn clear(&mut self) {
        let removed = self.entries.len();
        self.entries.clear();
        self.current = None;
        info!(removed, "Cleared queue");
    }

    /// Entry after the current one in queue order.
    pub fn next_after_current(&self) -> Option<&QueueEntry> {
        let pos = self.current_position()?;
        self.entries.get(pos + 1)
    }
}

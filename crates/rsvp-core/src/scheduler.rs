//! Timer abstraction used to drive playback.
//!
//! A scheduler receives a delay and a deferred [`TimerAction`] and hands back
//! a [`ScheduleHandle`]. When the delay elapses the owner delivers the action
//! to `ReaderSession::on_timer` together with its handle. The session ignores
//! deliveries whose handle was cancelled or whose generation is stale.

use std::collections::VecDeque;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;

/// Deferred command carried by a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Show the next token. `generation` ties the timer to one play run.
    Advance { generation: u64 },
}

/// Cancellation handle for one scheduled action. Clones share the flag.
#[derive(Clone, Debug, Default)]
pub struct ScheduleHandle {
    cancelled: Arc<AtomicBool>,
}

impl ScheduleHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub fn same_as(&self, other: &ScheduleHandle) -> bool {
        Arc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}

pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, action: TimerAction) -> ScheduleHandle;
}

/// One request recorded by [`ManualScheduler`].
#[derive(Debug, Clone)]
pub struct ScheduledAction {
    pub delay: Duration,
    pub action: TimerAction,
    pub handle: ScheduleHandle,
}

/// Scheduler that only records requests. Callers pop them and deliver them
/// synchronously, which makes timing deterministic in tests and headless use.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: VecDeque<ScheduledAction>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that have not been cancelled, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = &ScheduledAction> {
        self.pending.iter().filter(|entry| !entry.handle.is_cancelled())
    }

    pub fn pending_len(&self) -> usize {
        self.pending().count()
    }

    /// Oldest live request, dropping cancelled ones on the way.
    pub fn pop_due(&mut self) -> Option<ScheduledAction> {
        while let Some(entry) = self.pending.pop_front() {
            if !entry.handle.is_cancelled() {
                return Some(entry);
            }
        }
        None
    }

    /// Pops every request, cancelled ones included.
    pub fn drain(&mut self) -> Vec<ScheduledAction> {
        self.pending.drain(..).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, action: TimerAction) -> ScheduleHandle {
        let handle = ScheduleHandle::new();
        self.pending.push_back(ScheduledAction {
            delay,
            action,
            handle: handle.clone(),
        });
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_requests_are_skipped() {
        let mut scheduler = ManualScheduler::new();
        let first = scheduler.schedule(
            Duration::from_millis(10),
            TimerAction::Advance { generation: 1 },
        );
        scheduler.schedule(
            Duration::from_millis(20),
            TimerAction::Advance { generation: 2 },
        );
        first.cancel();

        assert_eq!(scheduler.pending_len(), 1);
        let due = scheduler.pop_due().expect("one live request");
        assert_eq!(due.action, TimerAction::Advance { generation: 2 });
        assert_eq!(due.delay, Duration::from_millis(20));
        assert!(scheduler.pop_due().is_none());
    }

    #[test]
    fn clones_share_cancellation() {
        let handle = ScheduleHandle::new();
        let clone = handle.clone();
        clone.cancel();
        assert!(handle.is_cancelled());
        assert!(handle.same_as(&clone));
        assert!(!handle.same_as(&ScheduleHandle::new()));
    }
}

use rsvp_core::{ScheduleHandle, Scheduler, TimerAction};
use std::time::Duration;

mod core;

/// Describes work that must be performed outside the pure reducer.
pub(super) enum Effect {
    /// Deliver `action` back as `Message::Timer` after `delay`.
    Schedule {
        delay: Duration,
        action: TimerAction,
        handle: ScheduleHandle,
    },
    QuitSafely,
}

/// Scheduler handed to the session during a reduce step. Requests are turned
/// into [`Effect::Schedule`] and run by the iced runtime afterwards.
#[derive(Default)]
pub(super) struct EffectScheduler {
    requested: Vec<Effect>,
}

impl EffectScheduler {
    pub(super) fn into_effects(self) -> Vec<Effect> {
        self.requested
    }
}

impl Scheduler for EffectScheduler {
    fn schedule(&mut self, delay: Duration, action: TimerAction) -> ScheduleHandle {
        let handle = ScheduleHandle::new();
        self.requested.push(Effect::Schedule {
            delay,
            action,
            handle: handle.clone(),
        });
        handle
    }
}

use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;
use iced::Event;
use iced::Task;
use iced::event;
use iced::keyboard;
use iced::window;
use tracing::{debug, info};

impl App {
    pub(super) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::Schedule {
                delay,
                action,
                handle,
            } => {
                debug!(delay_ms = delay.as_millis() as u64, ?action, "Scheduling timer");
                Task::perform(
                    async move {
                        tokio::time::sleep(delay).await;
                        Message::Timer { action, handle }
                    },
                    |message| message,
                )
            }
            Effect::QuitSafely => {
                info!("Safe quit requested");
                self.session.shutdown();
                iced::exit()
            }
        }
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}

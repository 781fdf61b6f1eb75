use super::messages::Message;
use super::state::App;
use iced::alignment::Vertical;
use iced::widget::{
    Column, button, checkbox, column, container, horizontal_space, progress_bar, row, scrollable,
    slider, text, text_input,
};
use iced::{Color, Element, Length};
use rsvp_core::config::ThemeMode;
use rsvp_core::{QueueEntry, Severity};

const QUEUE_HEIGHT_PX: f32 = 180.0;
const STATUS_FONT_SIZE_PX: f32 = 14.0;
const PATH_PLACEHOLDER: &str = "Path to .txt, .pdf, .epub or .pub (use ; for several)";

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        column![
            self.file_bar(),
            self.token_panel(),
            self.progress_panel(),
            self.playback_controls(),
            self.search_bar(),
            self.queue_panel(),
        ]
        .spacing(14)
        .padding(16)
        .into()
    }

    fn file_bar(&self) -> Element<'_, Message> {
        let theme_label = if matches!(self.config.theme, ThemeMode::Night) {
            "Day Mode"
        } else {
            "Night Mode"
        };
        row![
            text_input(PATH_PLACEHOLDER, &self.path_input)
                .on_input(Message::PathInputChanged)
                .on_submit(Message::OpenPath)
                .width(Length::Fill),
            button("Open").on_press(Message::OpenPath),
            button("Add to queue").on_press(Message::QueuePaths),
            button("Add chapters").on_press(Message::QueueChapters),
            button(theme_label).on_press(Message::ToggleTheme),
        ]
        .spacing(8)
        .align_y(Vertical::Center)
        .into()
    }

    fn token_panel(&self) -> Element<'_, Message> {
        let token = match (self.session.document_name(), self.session.current_token()) {
            (None, _) => "No document loaded",
            (Some(_), Some(token)) => token,
            (Some(_), None) => "",
        };
        let title = self.session.document_name().unwrap_or("");
        let status = self.session.status();

        column![
            text(title).size(STATUS_FONT_SIZE_PX),
            container(text(token).size(self.config.font_size as f32))
                .center_x(Length::Fill)
                .center_y(Length::Fixed(self.config.font_size as f32 * 2.5)),
            text(status.text.as_str())
                .size(STATUS_FONT_SIZE_PX)
                .color(severity_color(status.severity, self.config.theme)),
        ]
        .spacing(6)
        .into()
    }

    fn progress_panel(&self) -> Element<'_, Message> {
        let (position, total, percent) = self
            .session
            .progress()
            .map(|p| (p.index, p.total, p.percent))
            .unwrap_or((0, 0, 0.0));
        row![
            progress_bar(0.0..=100.0, percent as f32).width(Length::Fill),
            text(format!("{position} / {total} ({percent:.1}%)")),
        ]
        .spacing(10)
        .align_y(Vertical::Center)
        .into()
    }

    fn playback_controls(&self) -> Element<'_, Message> {
        let has_document = self.session.playback().is_some();
        let play_label = if self.session.is_playing() {
            "Pause"
        } else {
            "Play"
        };
        let bounds = self.session.bounds();

        row![
            button(play_label).on_press_maybe(has_document.then_some(Message::TogglePlayPause)),
            button("Previous").on_press_maybe(has_document.then_some(Message::PreviousToken)),
            button("Next").on_press_maybe(has_document.then_some(Message::NextToken)),
            button("Reset").on_press_maybe(has_document.then_some(Message::Reset)),
            horizontal_space(),
            text(format!("{} WPM", self.session.speed())),
            slider(
                bounds.min()..=bounds.max(),
                self.session.speed(),
                Message::SpeedChanged
            )
            .step(self.config.wpm_step)
            .width(Length::Fixed(260.0)),
        ]
        .spacing(8)
        .align_y(Vertical::Center)
        .into()
    }

    fn search_bar(&self) -> Element<'_, Message> {
        row![
            text_input("Search", &self.search_input)
                .on_input(Message::SearchInputChanged)
                .on_submit(Message::SearchSubmit)
                .width(Length::Fill),
            button("Search").on_press(Message::SearchSubmit),
            button("Find Next").on_press(Message::FindNext),
        ]
        .spacing(8)
        .align_y(Vertical::Center)
        .into()
    }

    fn queue_panel(&self) -> Element<'_, Message> {
        let queue = self.session.queue();
        let current = queue.current();
        let last = queue.len().saturating_sub(1);

        let entries = Column::with_children(queue.iter().enumerate().map(|(idx, entry)| {
            queue_row(entry, current == Some(entry.id), idx == 0, idx == last)
        }))
        .spacing(4);

        let header = row![
            text(format!("Queue ({})", queue.len())),
            horizontal_space(),
            checkbox("Autoplay", queue.autoplay()).on_toggle(Message::AutoplayToggled),
            button("Clear").on_press_maybe((!queue.is_empty()).then_some(Message::ClearQueue)),
        ]
        .spacing(10)
        .align_y(Vertical::Center);

        column![
            header,
            scrollable(entries).height(Length::Fixed(QUEUE_HEIGHT_PX)),
        ]
        .spacing(6)
        .into()
    }
}

fn queue_row(
    entry: &QueueEntry,
    is_current: bool,
    first: bool,
    last: bool,
) -> Element<'_, Message> {
    let marker = if is_current { "▶ " } else { "   " };
    row![
        text(format!("{marker}{} ({} words)", entry.name, entry.tokens.len())).width(Length::Fill),
        button("Play").on_press(Message::PlayEntry(entry.id)),
        button("Up").on_press_maybe((!first).then_some(Message::MoveEntryUp(entry.id))),
        button("Down").on_press_maybe((!last).then_some(Message::MoveEntryDown(entry.id))),
        button("Remove").on_press(Message::RemoveEntry(entry.id)),
    ]
    .spacing(6)
    .align_y(Vertical::Center)
    .into()
}

fn severity_color(severity: Severity, theme: ThemeMode) -> Color {
    match (severity, theme) {
        (Severity::Info, ThemeMode::Day) => Color::from_rgb(0.25, 0.25, 0.25),
        (Severity::Info, ThemeMode::Night) => Color::from_rgb(0.8, 0.8, 0.8),
        (Severity::Warning, _) => Color::from_rgb(0.85, 0.55, 0.0),
        (Severity::Error, _) => Color::from_rgb(0.85, 0.15, 0.15),
    }
}

//! GUI module using iced
//!
//! A terminal-like chat window: colored, aligned scrollback above a
//! single input line. Lines starting with `/` are commands.

use iced::alignment::Horizontal;
use iced::widget::scrollable::RelativeOffset;
use iced::widget::{column, container, scrollable, text, text_input, Column};
use iced::{Element, Length, Subscription, Task};
use tracing::info;

use crate::agent::{dispatch, EventHandler};
use crate::commands::CommandOutcome;
use crate::terminal::{Align, Color, UserEvent};

pub mod app;
pub mod messages;

pub use app::HalApp;
pub use messages::Message;

fn transcript_id() -> scrollable::Id {
    scrollable::Id::new("transcript")
}

fn horizontal(align: Align) -> Horizontal {
    match align {
        Align::Left => Horizontal::Left,
        Align::Center => Horizontal::Center,
        Align::Right => Horizontal::Right,
    }
}

fn iced_color(color: Color) -> iced::Color {
    iced::Color::from_rgb8(color.r, color.g, color.b)
}

impl HalApp {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::InputChanged(value) => {
                self.input = value;
            }
            Message::Submit => {
                let line = std::mem::take(&mut self.input);
                let Some(event) = UserEvent::parse(&line) else {
                    return Task::none();
                };
                if dispatch(&mut self.agent, &mut self.transcript, event) == CommandOutcome::Quit {
                    info!("👋 Closing window");
                    self.agent.shutdown();
                    return iced::exit();
                }
                return scrollable::snap_to(transcript_id(), RelativeOffset::END);
            }
            Message::Tick => {
                let before = self.transcript.logged();
                self.agent.tick(&mut self.transcript);
                if self.transcript.logged() != before {
                    return scrollable::snap_to(transcript_id(), RelativeOffset::END);
                }
            }
        }
        Task::none()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        iced::time::every(self.tick_interval).map(|_| Message::Tick)
    }

    pub fn view(&self) -> Element<'_, Message> {
        let lines: Vec<Element<Message>> = self
            .transcript
            .lines()
            .iter()
            .map(|line| {
                container(text(&line.text).size(16).color(iced_color(line.color)))
                    .width(Length::Fill)
                    .align_x(horizontal(line.align))
                    .into()
            })
            .collect();

        let log = scrollable(Column::with_children(lines).spacing(4).padding(10))
            .id(transcript_id())
            .height(Length::Fill);

        let input = text_input("Type a message, or /quit, /relocate <place>, /avatars", &self.input)
            .on_input(Message::InputChanged)
            .on_submit(Message::Submit)
            .padding(10);

        column![log, input].spacing(10).padding(20).into()
    }
}

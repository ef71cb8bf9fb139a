//! Main application state for the HalTalks window

use iced::Task;
use std::time::Duration;

use crate::agent::{log_banner, Agent};
use crate::config::Config;
use crate::terminal::Transcript;

use super::messages::Message;

/// Lines kept in the window scrollback
const SCROLLBACK: usize = 500;

/// Main application state
pub struct HalApp {
    /// The agent every event is handed to
    pub(crate) agent: Agent,
    /// Everything logged so far
    pub(crate) transcript: Transcript,
    /// Current contents of the input field
    pub(crate) input: String,
    /// Alert timer period
    pub(crate) tick_interval: Duration,
    pub(crate) agent_name: String,
}

impl HalApp {
    pub fn new(config: Config, agent: Agent) -> (Self, Task<Message>) {
        let mut transcript = Transcript::with_capacity(SCROLLBACK);
        log_banner(&mut transcript, &config.agent_name);

        let app = Self {
            agent,
            transcript,
            input: String::new(),
            tick_interval: config.tick_interval(),
            agent_name: config.agent_name,
        };
        (app, Task::none())
    }

    pub fn title(&self) -> String {
        format!("{} terminal", self.agent_name)
    }

    pub fn theme(&self) -> iced::Theme {
        iced::Theme::Light
    }
}

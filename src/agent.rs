//! The HAL9000 agent
//!
//! Owns all per-session state and reacts to typed input, slash-commands
//! and timer ticks. Front ends hand every event to an `EventHandler`.

use crate::alerts::AlertEmitter;
use crate::commands::{Command, CommandOutcome};
use crate::config::Config;
use crate::core::Responder;
use crate::terminal::{palette, Align, Terminal, UserEvent};
use crate::tts::{Prosody, SpeechQueue};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::{debug, info, warn};

const GREETING: &str = "Good evening! This is HAL.";

/// The three events a front end delivers
pub trait EventHandler {
    /// Free text typed by the operator
    fn on_input(&mut self, terminal: &mut dyn Terminal, text: &str);

    /// Text typed after a leading `/`
    fn on_command(&mut self, terminal: &mut dyn Terminal, text: &str) -> CommandOutcome;

    /// Called once per timer interval
    fn tick(&mut self, terminal: &mut dyn Terminal);
}

/// Route a parsed event to the matching handler method
pub fn dispatch(
    handler: &mut dyn EventHandler,
    terminal: &mut dyn Terminal,
    event: UserEvent,
) -> CommandOutcome {
    match event {
        UserEvent::Input(text) => {
            handler.on_input(terminal, &text);
            CommandOutcome::Continue
        }
        UserEvent::Command(text) => handler.on_command(terminal, &text),
    }
}

/// Lines printed when a session opens
pub fn log_banner(terminal: &mut dyn Terminal, agent_name: &str) {
    terminal.log("Operator started the chat.", Align::Left, palette::SYSTEM);
    terminal.log(
        &format!("{} joined.", agent_name),
        Align::Right,
        palette::SYSTEM,
    );
}

pub struct Agent {
    location: String,
    greeted: bool,
    responder: Responder,
    voice: Arc<SpeechQueue>,
    alerts: AlertEmitter,
    rng: StdRng,
}

impl Agent {
    pub fn new(config: &Config, responder: Responder, voice: Arc<SpeechQueue>) -> Self {
        let mut alerts = AlertEmitter::new(config.alert_cooldown_ticks);
        alerts.set_enabled(config.alerts_enabled);

        Self {
            location: config.initial_location.clone(),
            greeted: false,
            responder,
            voice,
            alerts,
            rng: StdRng::from_entropy(),
        }
    }

    /// Replace the entropy-seeded RNG, for reproducible sessions
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn has_greeted(&self) -> bool {
        self.greeted
    }

    pub fn voice(&self) -> Arc<SpeechQueue> {
        self.voice.clone()
    }

    pub fn shutdown(&self) {
        self.voice.shutdown();
    }

    fn say(&self, text: &str, prosody: Prosody) {
        if let Err(e) = self.voice.speak_with(text, prosody) {
            warn!("⚠️ Could not queue speech '{}': {}", text, e);
        }
    }
}

impl EventHandler for Agent {
    fn on_input(&mut self, terminal: &mut dyn Terminal, text: &str) {
        debug!("📥 Input: '{}'", text);

        if !self.greeted {
            self.greeted = true;
            self.say(GREETING, Prosody::default());
            terminal.log(GREETING, Align::Right, palette::AGENT);
        }

        if text.trim().to_lowercase() == "where am i?" {
            let message = format!("\u{2014} You are in the {}. \u{2014} ", self.location);
            terminal.log(&message, Align::Center, palette::NARRATION);
            self.say(&message, Prosody::default());
        } else {
            let message = self.responder.respond_with(text, &mut self.rng);
            terminal.log(&message, Align::Left, palette::NARRATION);
            self.say(&message, Prosody::default());
        }
    }

    fn on_command(&mut self, terminal: &mut dyn Terminal, text: &str) -> CommandOutcome {
        debug!("⌨️ Command: '{}'", text);

        match Command::parse(text) {
            Command::Quit => {
                info!("👋 Operator quit");
                return CommandOutcome::Quit;
            }
            Command::Relocate(location) => {
                terminal.log("", Align::Center, palette::NARRATION);
                info!("📍 Relocated to '{}'", location);
                let message = format!("\u{2014} Now in the {}. \u{2014}", location);
                self.location = location;
                terminal.log(&message, Align::Center, palette::NARRATION);
                self.say(&message, Prosody::default());
            }
            Command::Avatars => {
                terminal.log("Available avatars:", Align::Left, palette::ALERT);
                for avatar in self.voice.avatars() {
                    terminal.log(&avatar, Align::Left, palette::NARRATION);
                }
            }
            Command::Unknown(text) => {
                terminal.log(
                    &format!("Command `{}` unknown.", text),
                    Align::Left,
                    palette::ALERT,
                );
                terminal.log("I'm afraid I can't do that.", Align::Right, palette::AGENT);
            }
        }

        CommandOutcome::Continue
    }

    fn tick(&mut self, terminal: &mut dyn Terminal) {
        let Some(alert) = self.alerts.tick(&mut self.rng) else {
            return;
        };
        terminal.log(alert.headline, Align::Center, palette::ALERT);
        terminal.log(alert.follow_up, Align::Center, palette::WARNING);
        self.say(alert.headline, alert.headline_voice);
        self.say(alert.follow_up, alert.follow_up_voice);
    }
}

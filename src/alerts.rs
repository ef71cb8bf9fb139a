//! Randomized alert narration
//!
//! A tick-driven cooldown machine: while cooling down each tick only counts
//! down, once it reaches zero every tick rolls for one of three scenarios.

use crate::tts::{Prosody, MAX_VOLUME};
use rand::Rng;
use tracing::{debug, info};

/// Ticks an alert blocks the next one for
pub const DEFAULT_COOLDOWN_TICKS: u32 = 20;

/// Rolls are drawn from `0..=ROLL_MAX`
pub const ROLL_MAX: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertScenario {
    Asteroid,
    SolarProtonEvent,
    Fire,
}

impl AlertScenario {
    /// Map a roll onto a scenario; 30 and above means all quiet
    pub fn from_roll(roll: u32) -> Option<Self> {
        match roll {
            0..=9 => Some(Self::Asteroid),
            10..=19 => Some(Self::SolarProtonEvent),
            20..=29 => Some(Self::Fire),
            _ => None,
        }
    }

    pub fn alert(self) -> Alert {
        let (headline, follow_up, follow_up_rate) = match self {
            Self::Asteroid => (
                "Alert! Asteroid on collision trajectory.",
                "Initiating avoidance protocol!",
                2,
            ),
            Self::SolarProtonEvent => (
                "Massive Solar proton event detected!",
                "System switching to self-preservation mode...",
                -5,
            ),
            Self::Fire => (
                "Alert! Fire detected at your location.",
                "Emitting FM-200 gas to suppress fire. You have 30 seconds to evacuate the room if you want to live.",
                2,
            ),
        };
        Alert {
            scenario: self,
            headline,
            follow_up,
            headline_voice: Prosody::default().volume(MAX_VOLUME).rate(3),
            follow_up_voice: Prosody::default().rate(follow_up_rate),
        }
    }
}

/// Two lines of narration and how each is spoken
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub scenario: AlertScenario,
    pub headline: &'static str,
    pub follow_up: &'static str,
    pub headline_voice: Prosody,
    pub follow_up_voice: Prosody,
}

#[derive(Debug, Clone)]
pub struct AlertEmitter {
    cooldown: u32,
    reset_ticks: u32,
    enabled: bool,
}

impl Default for AlertEmitter {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN_TICKS)
    }
}

impl AlertEmitter {
    pub fn new(reset_ticks: u32) -> Self {
        Self {
            cooldown: 0,
            reset_ticks,
            enabled: true,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Ticks left before the next roll
    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    /// Advance one tick, possibly firing an alert
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Alert> {
        self.advance(|| rng.gen_range(0..=ROLL_MAX))
    }

    fn advance(&mut self, roll: impl FnOnce() -> u32) -> Option<Alert> {
        if !self.enabled {
            return None;
        }

        if self.cooldown > 0 {
            self.cooldown -= 1;
            if self.cooldown > 0 {
                return None;
            }
        }

        let roll = roll();
        let scenario = AlertScenario::from_roll(roll)?;
        info!("🚨 Alert fired: {:?} (roll {})", scenario, roll);
        self.cooldown = self.reset_ticks;
        debug!("Alert cooldown reset to {} ticks", self.cooldown);
        Some(scenario.alert())
    }
}

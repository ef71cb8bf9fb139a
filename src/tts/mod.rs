//! TTS (Text-to-Speech) Module
//!
//! Provides a unified interface for multiple TTS backends and the
//! serialized speech queue that drives them.

use crate::config::Config;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

pub mod piper;
pub mod queue;
pub mod silent;
pub mod speechd;
pub mod system;

pub use queue::SpeechQueue;

pub const DEFAULT_VOLUME: i32 = 75;
pub const DEFAULT_RATE: i32 = 0;
pub const MIN_VOLUME: i32 = 0;
pub const MAX_VOLUME: i32 = 100;
pub const MIN_RATE: i32 = -10;
pub const MAX_RATE: i32 = 10;

/// One unit of queued synthesis work. Volume and rate are clamped on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    text: String,
    volume: i32,
    rate: i32,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>, volume: i32, rate: i32) -> Self {
        Self {
            text: text.into(),
            volume: volume.clamp(MIN_VOLUME, MAX_VOLUME),
            rate: rate.clamp(MIN_RATE, MAX_RATE),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// 0 (silent) to 100 (loudest)
    pub fn volume(&self) -> i32 {
        self.volume
    }

    /// -10 (slowest) to 10 (fastest), 0 is the voice's normal pace
    pub fn rate(&self) -> i32 {
        self.rate
    }
}

/// Per-call voice overrides; unset fields use the queue defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Prosody {
    pub volume: Option<i32>,
    pub rate: Option<i32>,
}

impl Prosody {
    pub const fn volume(mut self, volume: i32) -> Self {
        self.volume = Some(volume);
        self
    }

    pub const fn rate(mut self, rate: i32) -> Self {
        self.rate = Some(rate);
        self
    }
}

/// Trait for TTS engines
#[async_trait]
pub trait TtsEngine: Send + Sync + std::fmt::Debug {
    /// Speak the request, returning once the utterance has finished
    async fn speak(&self, request: &SpeechRequest) -> Result<()>;

    /// Get the engine name
    fn name(&self) -> &str;

    /// Voices this engine can speak with
    fn voices(&self) -> Vec<String> {
        vec![self.name().to_string()]
    }
}

/// Factory to create the configured TTS engine
pub async fn create_engine(config: &Config) -> Result<Arc<dyn TtsEngine>> {
    info!("🛠️ Creating TTS engine: {}", config.tts_engine);
    let engine: Arc<dyn TtsEngine> = match config.tts_engine.as_str() {
        "piper" => {
            info!("  - Using Piper TTS (Voice: {})", config.piper_voice);
            Arc::new(piper::PiperEngine::new(config)?)
        }
        "speechd_ng" | "speechd" => {
            info!("  - Using Speechd TTS");
            Arc::new(speechd::SpeechdEngine::connect().await?)
        }
        "silent" => {
            info!("  - Using silent TTS (log only)");
            Arc::new(silent::SilentEngine::new())
        }
        "system" => {
            info!("  - Using System TTS");
            Arc::new(system::SystemEngine::new()?)
        }
        _ => {
            warn!(
                "  - Unknown engine '{}', falling back to System",
                config.tts_engine
            );
            Arc::new(system::SystemEngine::new()?)
        }
    };
    info!("✅ TTS engine '{}' initialized", engine.name());
    Ok(engine)
}

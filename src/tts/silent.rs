//! Log-only engine for headless sessions

use super::{SpeechRequest, TtsEngine};
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

#[derive(Debug, Default)]
pub struct SilentEngine;

impl SilentEngine {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TtsEngine for SilentEngine {
    async fn speak(&self, request: &SpeechRequest) -> Result<()> {
        info!(
            "🔇 (silent) [vol {} rate {}] {}",
            request.volume(),
            request.rate(),
            request.text()
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "silent"
    }
}

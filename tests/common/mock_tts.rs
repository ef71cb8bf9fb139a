//! Mock TTS Engine for Testing
//!
//! Records every utterance with its prosody and timing for verification.

use anyhow::Result;
use async_trait::async_trait;
use haltalks::tts::{SpeechRequest, TtsEngine};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// One recorded utterance
#[derive(Debug, Clone)]
pub struct Spoken {
    pub text: String,
    pub volume: i32,
    pub rate: i32,
    pub started: Instant,
    pub finished: Instant,
}

/// Mock TTS engine that records spoken text
#[derive(Debug, Clone)]
pub struct MockTts {
    /// All utterances, in the order they finished
    pub spoken: Arc<Mutex<Vec<Spoken>>>,
    /// Simulate failure on next speak
    pub fail_next: Arc<Mutex<bool>>,
    /// How long each utterance "takes"
    pub delay: Duration,
}

impl MockTts {
    pub fn new() -> Self {
        Self::with_delay(Duration::ZERO)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            spoken: Arc::new(Mutex::new(Vec::new())),
            fail_next: Arc::new(Mutex::new(false)),
            delay,
        }
    }

    /// Get all recorded utterances
    pub fn records(&self) -> Vec<Spoken> {
        self.spoken.lock().unwrap().clone()
    }

    /// Get all spoken phrases
    pub fn texts(&self) -> Vec<String> {
        self.records().into_iter().map(|s| s.text).collect()
    }

    /// Check if a phrase was spoken
    pub fn was_spoken(&self, text: &str) -> bool {
        self.spoken.lock().unwrap().iter().any(|s| s.text.contains(text))
    }

    pub fn fail_next(&self) {
        *self.fail_next.lock().unwrap() = true;
    }
}

impl Default for MockTts {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TtsEngine for MockTts {
    async fn speak(&self, request: &SpeechRequest) -> Result<()> {
        {
            let mut fail = self.fail_next.lock().unwrap();
            if *fail {
                *fail = false;
                return Err(anyhow::anyhow!("Mock TTS failure"));
            }
        }

        let started = Instant::now();
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.spoken.lock().unwrap().push(Spoken {
            text: request.text().to_string(),
            volume: request.volume(),
            rate: request.rate(),
            started,
            finished: Instant::now(),
        });
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn voices(&self) -> Vec<String> {
        vec!["Microsoft David".to_string(), "Microsoft Zira".to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_tts_records_speech() {
        let mock = MockTts::new();
        mock.speak(&SpeechRequest::new("hello", 75, 0)).await.unwrap();
        mock.speak(&SpeechRequest::new("world", 100, 3)).await.unwrap();

        assert!(mock.was_spoken("hello"));
        assert!(mock.was_spoken("world"));
        assert_eq!(mock.records()[1].volume, 100);
        assert_eq!(mock.texts().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_tts_fails_once() {
        let mock = MockTts::new();
        mock.fail_next();
        assert!(mock.speak(&SpeechRequest::new("lost", 75, 0)).await.is_err());
        assert!(mock.speak(&SpeechRequest::new("kept", 75, 0)).await.is_ok());
        assert_eq!(mock.texts(), ["kept"]);
    }
}

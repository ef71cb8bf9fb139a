//! Piper TTS backend calling a local binary

use super::{SpeechRequest, TtsEngine};
use crate::config::Config;
use anyhow::Result;
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, error, info, warn};

#[derive(Debug)]
pub struct PiperEngine {
    model_path: PathBuf,
    voices_dir: PathBuf,
}

fn voices_dir() -> PathBuf {
    dirs::data_dir().unwrap_or_default().join("haltalks/voices")
}

/// Piper stretches phonemes by this factor; rate 10 is twice as fast, -10 twice as slow
fn length_scale(rate: i32) -> f32 {
    2f32.powf(-(rate as f32) / 10.0)
}

impl PiperEngine {
    pub fn new(config: &Config) -> Result<Self> {
        let voices_dir = voices_dir();
        let model_path = voices_dir.join(format!("{}.onnx", config.piper_voice));

        if !model_path.exists() {
            error!("❌ Piper model not found at {}", model_path.display());
            return Err(anyhow::anyhow!(
                "Piper model file missing: {}",
                model_path.display()
            ));
        }

        Ok(Self {
            model_path,
            voices_dir,
        })
    }
}

fn synthesize(model_path: &Path, wav_path: &Path, request: &SpeechRequest) -> Result<()> {
    let mut child = Command::new("piper-tts")
        .arg("-m")
        .arg(model_path)
        .arg("-f")
        .arg(wav_path)
        .arg("--length_scale")
        .arg(format!("{:.3}", length_scale(request.rate())))
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| {
            error!("❌ Failed to spawn piper-tts: {}", e);
            anyhow::anyhow!("Failed to spawn piper-tts: {}", e)
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(request.text().as_bytes())?;
        stdin.flush()?;
    }

    let status = child.wait()?;
    if !status.success() {
        return Err(anyhow::anyhow!("Piper failed with status {}", status));
    }

    if !wav_path.exists() {
        return Err(anyhow::anyhow!("Piper output file not created"));
    }
    Ok(())
}

fn play(wav_path: &Path, volume: i32) -> Result<()> {
    let (_stream, stream_handle) = rodio::OutputStream::try_default()?;
    let sink = rodio::Sink::try_new(&stream_handle)?;
    let file = std::fs::File::open(wav_path)?;
    let source = rodio::Decoder::new(std::io::BufReader::new(file))?;
    sink.set_volume(volume as f32 / 100.0);
    sink.append(source);
    sink.sleep_until_end();
    Ok(())
}

#[async_trait]
impl TtsEngine for PiperEngine {
    async fn speak(&self, request: &SpeechRequest) -> Result<()> {
        info!("📢 Piper speaking: '{}'", request.text());

        let model_path = self.model_path.clone();
        let request = request.clone();

        // Subprocess and playback both block
        tokio::task::spawn_blocking(move || -> Result<()> {
            let wav_path = std::env::temp_dir().join(format!(
                "haltalks_speech_{}.wav",
                std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map_err(|e| anyhow::anyhow!("Time error: {}", e))?
                    .as_millis()
            ));

            let result = synthesize(&model_path, &wav_path, &request).and_then(|_| {
                debug!("📢 Playing Piper WAV via rodio: {:?}", wav_path);
                play(&wav_path, request.volume())
            });
            let _ = std::fs::remove_file(&wav_path);
            result
        })
        .await
        .map_err(|e| anyhow::anyhow!("Task join error: {}", e))??;

        Ok(())
    }

    fn name(&self) -> &str {
        "piper"
    }

    fn voices(&self) -> Vec<String> {
        let entries = match std::fs::read_dir(&self.voices_dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("⚠️ Could not read {}: {}", self.voices_dir.display(), e);
                return Vec::new();
            }
        };
        let mut voices: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "onnx"))
            .filter_map(|path| {
                path.file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .collect();
        voices.sort();
        voices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_scale_bounds() {
        assert!((length_scale(0) - 1.0).abs() < f32::EPSILON);
        assert!((length_scale(10) - 0.5).abs() < 1e-6);
        assert!((length_scale(-10) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_missing_model_fails_at_startup() {
        let config = Config {
            piper_voice: "definitely-not-installed-voice".to_string(),
            ..Config::default()
        };
        assert!(PiperEngine::new(&config).is_err());
    }
}

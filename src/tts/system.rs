//! System TTS engine (speech-dispatcher or espeak-ng)

use super::{SpeechRequest, TtsEngine};
use anyhow::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    SpdSay,
    Espeak,
}

impl Backend {
    fn binary(self) -> &'static str {
        match self {
            Backend::SpdSay => "spd-say",
            Backend::Espeak => "espeak-ng",
        }
    }

    /// Command line for one blocking utterance
    fn command(self, request: &SpeechRequest) -> Command {
        let mut cmd = Command::new(self.binary());
        match self {
            Backend::SpdSay => {
                // -w waits until the message is spoken; both scales run -100..100
                cmd.arg("-w")
                    .arg("-i")
                    .arg(spd_volume(request.volume()).to_string())
                    .arg("-r")
                    .arg(spd_rate(request.rate()).to_string());
            }
            Backend::Espeak => {
                cmd.arg("-a")
                    .arg(espeak_amplitude(request.volume()).to_string())
                    .arg("-s")
                    .arg(espeak_speed(request.rate()).to_string());
            }
        }
        cmd.arg("--").arg(request.text());
        cmd
    }
}

fn spd_volume(volume: i32) -> i32 {
    volume * 2 - 100
}

fn spd_rate(rate: i32) -> i32 {
    rate * 10
}

fn espeak_amplitude(volume: i32) -> i32 {
    volume * 2
}

/// Words per minute around espeak's default of 175
fn espeak_speed(rate: i32) -> i32 {
    175 + rate * 15
}

fn on_path(binary: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(binary))
        .find(|candidate| candidate.is_file())
}

#[derive(Debug)]
pub struct SystemEngine {
    backend: Backend,
}

impl SystemEngine {
    /// Probe for spd-say, then espeak-ng
    pub fn new() -> Result<Self> {
        for backend in [Backend::SpdSay, Backend::Espeak] {
            if let Some(path) = on_path(backend.binary()) {
                debug!("System TTS found at {}", path.display());
                return Ok(Self { backend });
            }
        }
        Err(anyhow::anyhow!(
            "No system TTS command found (tried spd-say, espeak-ng)"
        ))
    }
}

#[async_trait]
impl TtsEngine for SystemEngine {
    async fn speak(&self, request: &SpeechRequest) -> Result<()> {
        debug!("System speaking: {}", request.text());

        let mut cmd = self.backend.command(request);
        let binary = self.backend.binary();
        let status = tokio::task::spawn_blocking(move || cmd.status())
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
            .map_err(|e| anyhow::anyhow!("Failed to run {}: {}", binary, e))?;

        if !status.success() {
            return Err(anyhow::anyhow!("{} failed with status {}", binary, status));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "system"
    }

    fn voices(&self) -> Vec<String> {
        let output = match self.backend {
            Backend::SpdSay => Command::new("spd-say").arg("-L").output(),
            Backend::Espeak => Command::new("espeak-ng").arg("--voices").output(),
        };
        match output {
            Ok(out) if out.status.success() => {
                parse_voice_table(&String::from_utf8_lossy(&out.stdout), self.backend)
            }
            Ok(out) => {
                warn!("⚠️ Voice listing failed with status {}", out.status);
                vec![self.backend.binary().to_string()]
            }
            Err(e) => {
                warn!("⚠️ Could not list voices: {}", e);
                vec![self.backend.binary().to_string()]
            }
        }
    }
}

/// Both tools print a header row followed by whitespace-separated columns
fn parse_voice_table(table: &str, backend: Backend) -> Vec<String> {
    table
        .lines()
        .skip(1)
        .filter_map(|line| {
            let cols: Vec<&str> = line.split_whitespace().collect();
            match backend {
                // NAME LANGUAGE VARIANT
                Backend::SpdSay => cols.first().map(|name| match cols.get(1) {
                    Some(lang) => format!("{} ({})", name, lang),
                    None => name.to_string(),
                }),
                // Pty Language Age/Gender VoiceName File ...
                Backend::Espeak => match (cols.get(3), cols.get(1)) {
                    (Some(name), Some(lang)) => Some(format!("{} ({})", name, lang)),
                    _ => None,
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_mapping() {
        assert_eq!(spd_volume(0), -100);
        assert_eq!(spd_volume(100), 100);
        assert_eq!(spd_rate(-10), -100);
        assert_eq!(espeak_amplitude(75), 150);
        assert_eq!(espeak_speed(0), 175);
        assert_eq!(espeak_speed(10), 325);
        assert_eq!(espeak_speed(-10), 25);
    }

    #[test]
    fn test_spd_command_line() {
        let cmd = Backend::SpdSay.command(&SpeechRequest::new("-hello", 100, 3));
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(cmd.get_program(), "spd-say");
        assert_eq!(args, ["-w", "-i", "100", "-r", "30", "--", "-hello"]);
    }

    #[test]
    fn test_parse_espeak_voices() {
        let table = "Pty Language       Age/Gender VoiceName          File                 Other Languages\n \
                     5  af              --/M      Afrikaans          gmw/af\n \
                     5  en-gb           --/M      English_(Great_Britain) gmw/en\n";
        let voices = parse_voice_table(table, Backend::Espeak);
        assert_eq!(
            voices,
            ["Afrikaans (af)", "English_(Great_Britain) (en-gb)"]
        );
    }

    #[test]
    fn test_parse_spd_voices() {
        let table = "NAME LANGUAGE VARIANT\nalan en-GB none\nkal\n";
        let voices = parse_voice_table(table, Backend::SpdSay);
        assert_eq!(voices, ["alan (en-GB)", "kal"]);
    }
}

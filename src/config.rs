use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Agent
    pub agent_name: String,
    pub initial_location: String,
    pub rules_path: Option<String>,
    pub match_case_insensitive: bool,
    pub lowercase_input: bool,

    // Speech
    pub tts_engine: String,
    pub piper_voice: String,
    pub default_volume: i32,
    pub default_rate: i32,
    pub drain_grace_secs: u64,

    // Alerts
    pub alerts_enabled: bool,
    pub alert_cooldown_ticks: u32,
    pub tick_interval_ms: u64,

    // Meta
    pub console_width: usize,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            agent_name: "HAL9000".to_string(),
            initial_location: "unknown".to_string(),
            rules_path: None,
            match_case_insensitive: true,
            lowercase_input: false,
            tts_engine: "system".to_string(),
            piper_voice: "en_GB-alan-medium".to_string(),
            default_volume: crate::tts::DEFAULT_VOLUME,
            default_rate: crate::tts::DEFAULT_RATE,
            drain_grace_secs: 10,
            alerts_enabled: true,
            alert_cooldown_ticks: crate::alerts::DEFAULT_COOLDOWN_TICKS,
            tick_interval_ms: 1000,
            console_width: 80,
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from an explicit path, falling back to defaults
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)?;
        match serde_json::from_str(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                // Graceful degradation: log warning and use defaults
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                let backup_path = config_path.with_extension("json.corrupt");
                let _ = std::fs::rename(config_path, &backup_path);
                Ok(Self::default())
            }
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn drain_grace(&self) -> Duration {
        Duration::from_secs(self.drain_grace_secs)
    }
}

/// `$HALTALKS_CONFIG` if set, else the per-user config directory
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os("HALTALKS_CONFIG") {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("haltalks")
        .join("config.json")
}

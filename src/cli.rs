//! Startup shared by the console and window front ends

use crate::agent::Agent;
use crate::config::{self, Config};
use crate::core::responder::MatchOptions;
use crate::core::text_normalizer::TextNormalizer;
use crate::core::{rules, Responder};
use crate::error::HalError;
use crate::tts::{self, SpeechQueue};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file (default: $HALTALKS_CONFIG or the user config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Speech engine: system, speechd, piper or silent
    #[arg(short, long)]
    pub engine: Option<String>,

    /// Disable alert narration
    #[arg(long)]
    pub no_alerts: bool,
}

impl Args {
    /// Load the config file and apply command line overrides
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => Config::load().with_context(|| {
                format!("reading config {}", config::config_path().display())
            })?,
        };

        if let Some(engine) = &self.engine {
            config.tts_engine = engine.clone();
        }
        if self.no_alerts {
            config.alerts_enabled = false;
        }
        Ok(config)
    }
}

/// Logs go to stderr so they never mix with the chat transcript.
/// `RUST_LOG` wins over `--verbose`, which wins over the config level.
pub fn init_tracing(verbose: bool, config_level: &str) -> Result<()> {
    let level = if verbose {
        "debug".to_string()
    } else {
        config_level.to_lowercase()
    };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&level))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Rule table from `rules_path`, or the stock one
pub fn build_responder(config: &Config) -> Result<Responder> {
    let rules = match &config.rules_path {
        Some(path) => rules::load_rules(Path::new(path))
            .with_context(|| format!("loading rules from {}", path))?,
        None => rules::default_rules(),
    };
    let options = MatchOptions {
        case_insensitive: config.match_case_insensitive,
        normalizer: TextNormalizer::new(config.lowercase_input),
    };
    Ok(Responder::with_options(rules, options)?)
}

/// Bring up the speech engine, its queue and the agent.
/// Fails here, at startup, when the engine is unavailable.
pub async fn build_agent(config: &Config) -> Result<Agent> {
    let engine = tts::create_engine(config)
        .await
        .map_err(|e| HalError::Tts(format!("{:#}", e)))?;
    let voice = SpeechQueue::with_defaults(engine, config.default_volume, config.default_rate)?;
    let responder = build_responder(config)?;
    info!(
        "🤖 {} ready ({} rules, voice '{}')",
        config.agent_name,
        responder.len(),
        voice.engine_name()
    );
    Ok(Agent::new(config, responder, Arc::new(voice)))
}

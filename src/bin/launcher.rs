//! HalTalks window - the chat terminal as a desktop window
//!
//! Run with: cargo run --bin haltalks-window

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use haltalks::cli::{build_agent, init_tracing, Args};
use haltalks::gui::HalApp;

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.load_config()?;
    init_tracing(args.verbose, &config.log_level)?;

    info!("🔴 HalTalks window v{} starting...", env!("CARGO_PKG_VERSION"));

    // Engine startup is async (speechd connects over D-Bus)
    let runtime = tokio::runtime::Runtime::new()?;
    let agent = runtime.block_on(build_agent(&config))?;
    let voice = agent.voice();
    let grace = config.drain_grace();

    iced::application(HalApp::title, HalApp::update, HalApp::view)
        .theme(HalApp::theme)
        .subscription(HalApp::subscription)
        .run_with(move || HalApp::new(config, agent))
        .map_err(|e| anyhow::anyhow!("Window error: {}", e))?;

    if !voice.drain(grace) {
        warn!("⚠️ Exiting with speech still queued");
    }
    info!("🔇 HalTalks window closed");
    Ok(())
}

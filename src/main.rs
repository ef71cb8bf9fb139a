//! HalTalks - a talking HAL9000 in your terminal
//!
//! Type to chat, `/relocate <place>`, `/avatars` or `/quit`.

use anyhow::Result;
use clap::Parser;
use haltalks::agent::{dispatch, log_banner, EventHandler};
use haltalks::cli::{build_agent, init_tracing, Args};
use haltalks::commands::CommandOutcome;
use haltalks::terminal::{ConsoleTerminal, UserEvent};
use std::io::BufRead;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, warn};

/// Stdin on its own thread so a pending read never holds up shutdown
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("⚠️ Could not read stdin: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.load_config()?;
    init_tracing(args.verbose, &config.log_level)?;

    info!("🔴 HalTalks v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut agent = build_agent(&config).await?;
    let voice = agent.voice();

    let mut terminal = ConsoleTerminal::new(config.console_width);
    log_banner(&mut terminal, &config.agent_name);

    let mut lines = spawn_stdin_reader();
    let interval = config.tick_interval();
    let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else {
                    info!("📭 Input closed");
                    break;
                };
                let Some(event) = UserEvent::parse(&line) else {
                    continue;
                };
                if dispatch(&mut agent, &mut terminal, event) == CommandOutcome::Quit {
                    break;
                }
            }
            _ = ticker.tick() => agent.tick(&mut terminal),
        }
    }

    agent.shutdown();
    let grace = config.drain_grace();
    if !tokio::task::spawn_blocking(move || voice.drain(grace)).await? {
        warn!("⚠️ Exiting with speech still queued");
    }

    info!("🔇 HalTalks stopped");
    Ok(())
}

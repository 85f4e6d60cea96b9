//! Azure AI demos - interactive console demonstrations of hosted AI services.
//!
//! Each subcommand walks through one scenario against the Azure endpoints:
//! speech synthesis (plain text and SSML), Whisper transcription, and
//! vision analysis. Configuration comes from environment variables through
//! a typed resolver; inputs are prompted at the terminal.

mod audio;
mod config;
mod console;
mod demos;
mod openai;
mod speech;
mod vision;

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::LocalTime;

use config::{AppConfig, Demo, Environment};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let app = AppConfig::from_args();

    // Initialize logging with a time-only format.
    // Respect RUST_LOG env var, fallback to verbose flag, default to info
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| if app.verbose { EnvFilter::try_new("debug") } else { EnvFilter::try_new("info") })
        .unwrap();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(LocalTime::new(time::macros::format_description!("[hour]:[minute]:[second]")))
        .init();

    info!("🎙️ Azure AI demos v{}", env!("CARGO_PKG_VERSION"));

    // One-time environment snapshot, seeded from a local .env file
    let env = Environment::load();

    let result = match app.demo {
        Demo::Speak => demos::speak::run(&env).await,
        Demo::Converse => demos::converse::run(&env).await,
        Demo::Transcribe { file } => demos::transcribe::run(&env, file).await,
        Demo::Describe => demos::describe::run(&env).await,
        Demo::Inspect => demos::inspect::run(&env).await,
    };

    if let Err(e) = result {
        error!("❌ Demo failed: {:#}", e);
        std::process::exit(1);
    }

    info!("✅ Done");
    Ok(())
}

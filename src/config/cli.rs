//! Application configuration and CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Demo selection and global flags.
#[derive(Parser, Debug, Clone)]
#[command(name = "azure-ai-demos")]
#[command(version, about = "Interactive demos for Azure AI speech and vision services", long_about = None)]
pub struct AppConfig {
    /// Demo to run
    #[command(subcommand)]
    pub demo: Demo,

    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// The available demonstrations.
///
/// Service endpoints, keys, and deployment names come from environment
/// variables; the demos themselves prompt for their inputs interactively.
#[derive(Subcommand, Debug, Clone)]
pub enum Demo {
    /// Synthesize typed text with an Azure OpenAI voice and play it back
    Speak,
    /// Play a scripted two-voice SSML conversation through the Speech service
    Converse,
    /// Transcribe an audio file with a Whisper deployment while it plays locally
    Transcribe {
        /// Audio file to transcribe (prompted for when omitted)
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,
    },
    /// Analyse an image with a vision deployment
    Describe,
    /// Compare a test image against a reference image to detect defects
    Inspect,
}

impl AppConfig {
    /// Parse configuration from command line arguments.
    pub fn from_args() -> Self {
        Self::parse()
    }
}

//! Transcribe an audio file with a Whisper deployment while it plays locally.
//!
//! The transcription request is started first; five seconds in, a second
//! task begins playing the same file through the speakers. Both finish
//! before the transcript is printed.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tracing::{error, info};

use super::print_word_by_word;
use crate::audio;
use crate::config::{ConfigKey, Environment};
use crate::console::Console;
use crate::openai::{OpenAiClient, OpenAiSettings};

/// Delay before local playback starts, giving the upload a head start.
const PLAYBACK_DELAY: Duration = Duration::from_secs(5);

pub async fn run(env: &Environment, file: Option<PathBuf>) -> Result<()> {
    info!("Starting the transcription demo");

    let deployment = env.resolve(ConfigKey::WhisperDeploymentName);
    let client = OpenAiClient::new(OpenAiSettings::audio(env))?;

    let audio_file = resolve_audio_file(file)?;

    info!("Calling the Azure OpenAI endpoint to transcribe the audio file. Waiting for the response...");

    let playback_path = audio_file.clone();
    let playback = tokio::spawn(async move {
        tokio::time::sleep(PLAYBACK_DELAY).await;
        match tokio::task::spawn_blocking(move || audio::play_file(&playback_path)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!("❌ Error playing the audio file: {:#}", e),
            Err(e) => error!("❌ Playback task failed: {}", e),
        }
    });

    let transcript = client.transcribe_file(&deployment, &audio_file).await;

    // Join playback before reporting, so both tasks finish before exit.
    playback.await?;
    let transcript = transcript?;

    info!("Transcription of the audio file:");
    print_word_by_word(transcript, Duration::from_millis(500)).await;

    Ok(())
}

/// Use the `--file` argument when it points at a real file, otherwise
/// prompt until one does.
fn resolve_audio_file(file: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = file {
        if path.is_file() {
            return Ok(path);
        }
        println!("{} does not exist.", path.display());
    }

    let [hello, weather] = Environment::sample_content_urls();
    println!("A WAV or MP3 file is needed. Sample clips to download and try: {} {}", hello, weather);

    let mut console = Console::new()?;
    console.existing_path("Enter the path of the audio file to transcribe")
}

//! Synthesize typed text with an Azure OpenAI voice and play it back.

use anyhow::Result;
use tracing::{error, info};

use crate::audio;
use crate::config::{ConfigKey, Environment};
use crate::console::Console;
use crate::openai::{OpenAiClient, OpenAiSettings};

/// Neural voices offered by the speech deployment.
const VOICES: &[&str] = &["alloy", "echo", "fable", "onyx", "nova", "shimmer"];

pub async fn run(env: &Environment) -> Result<()> {
    info!("Starting the text-to-speech synthesis demo");

    let deployment = env.resolve(ConfigKey::TtsDeploymentName);
    let client = OpenAiClient::new(OpenAiSettings::synthesis(env))?;

    let mut console = Console::new()?;
    let voice = console.choose("Which voice would you like to use?", VOICES)?;
    let text = console.ask("Enter the text you would like to speak")?;

    info!("Calling the Azure OpenAI endpoint to generate the voice. Waiting for the response...");
    let audio_bytes = client.synthesize_speech(&deployment, &text, voice).await?;

    info!("Response received, playing it back");
    if let Err(e) = tokio::task::spawn_blocking(move || audio::play_bytes(audio_bytes)).await? {
        // Playback trouble is reported but does not fail the demo.
        error!("❌ Error playing the audio: {:#}", e);
    }

    Ok(())
}

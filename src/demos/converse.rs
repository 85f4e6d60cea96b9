//! Play a scripted two-voice SSML conversation through the Speech service.
//!
//! Two tasks run concurrently and are both joined before the demo returns:
//! one prints the SSML word by word, the other synthesizes it and plays the
//! returned audio.

use std::time::Duration;

use anyhow::Result;
use tracing::{error, info};

use super::print_word_by_word;
use crate::audio;
use crate::config::Environment;
use crate::speech::Synthesizer;

/// A short scripted exchange between two multilingual neural voices,
/// exercising breaks, sentence marks, substitutions, and say-as.
const DIALOGUE_SSML: &str = r#"<speak version="1.0" xmlns="http://www.w3.org/2001/10/synthesis" xml:lang="en-US" xmlns:mstts="https://www.w3.org/2001/mstts">
    <voice name="en-US-NovaMultilingualNeural" effect="eq_car">
        Good morning Onyx! <break /> <s> How are you today? </s>
    </voice>
    <voice name="en-US-OnyxMultilingualNeural" effect="eq_car">
        <break time="750ms" /> Good morning to you too Nova! <s> <break strength="medium" /> I am doing well, thanks for asking. </s>
        <s> Say, have you tried the <sub alias="Text to Speech">TTS</sub> markup yet? </s>
    </voice>
    <voice name="en-US-NovaMultilingualNeural" effect="eq_car">
        <break strength="strong" /> <s> I have. </s> <break /> <s> <sub alias="Speech Synthesis Markup Language">SSML</sub> lets you shape how synthesized speech sounds. </s>
        <s> It offers around <say-as interpret-as="cardinal"> 50 </say-as> tags across <say-as interpret-as="cardinal"> 77 </say-as> locales. </s>
        <s> Pronunciation, volume, pitch, and rate are all under your control. </s>
    </voice>
    </speak>
    "#;

pub async fn run(env: &Environment) -> Result<()> {
    info!("Starting the SSML conversation demo");

    let synthesizer = Synthesizer::new(env)?;

    info!("Speaking the SSML while printing it word by word");
    let printer = tokio::spawn(print_word_by_word(DIALOGUE_SSML.to_string(), Duration::from_millis(300)));

    match synthesizer.synthesize_ssml(DIALOGUE_SSML).await {
        Ok(bytes) => match tokio::task::spawn_blocking(move || audio::play_bytes(bytes)).await? {
            Ok(()) => info!("✅ Speech synthesized for the conversation"),
            Err(e) => error!("❌ Error playing the audio: {:#}", e),
        },
        Err(e) => {
            // Reported, not fatal: the printer still finishes and the
            // demo exits normally.
            error!("❌ Speech synthesis canceled: {:#}", e);
            error!("Did you set the TTS_SPEECH_KEY and TTS_SPEECH_REGION values?");
        }
    }

    printer.await?;
    Ok(())
}

//! Text-to-speech synthesis through the Azure Speech service REST endpoint.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::{ConfigKey, Environment};

/// Header carrying the Speech service subscription key.
const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Requested output format. RIFF keeps the response a plain WAV file that
/// the local decoder can play without further negotiation.
const OUTPUT_FORMAT: &str = "riff-24khz-16bit-mono-pcm";

/// Client for the regional `cognitiveservices/v1` synthesis endpoint.
///
/// Accepts an SSML document and returns encoded audio bytes. Requests are
/// sent once and never retried.
pub struct Synthesizer {
    http: reqwest::Client,
    subscription_key: String,
    region: String,
}

impl Synthesizer {
    /// Create a synthesizer from the TTS speech key and region variables.
    ///
    /// An unset key or region stays empty and the service rejects the
    /// request at call time.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(env: &Environment) -> Result<Self> {
        let subscription_key = env.resolve(ConfigKey::TtsSpeechKey);
        let region = env.resolve(ConfigKey::TtsSpeechRegion);

        info!("Configuring the speech synthesizer for region \"{}\"", region);

        let http = reqwest::Client::builder().build().context("Failed to create HTTP client")?;

        Ok(Self { http, subscription_key, region })
    }

    /// The regional synthesis endpoint.
    fn endpoint(&self) -> String {
        format!("https://{}.tts.speech.microsoft.com/cognitiveservices/v1", self.region)
    }

    /// Synthesize an SSML document to audio bytes.
    ///
    /// # Errors
    /// Returns an error if the request fails or the service reports a
    /// non-success status.
    pub async fn synthesize_ssml(&self, ssml: &str) -> Result<Vec<u8>> {
        let url = self.endpoint();
        debug!("POST {} ({} bytes of SSML)", url, ssml.len());

        let response = self
            .http
            .post(&url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.subscription_key)
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", OUTPUT_FORMAT)
            .header("User-Agent", concat!("azure-ai-demos/", env!("CARGO_PKG_VERSION")))
            .body(ssml.to_string())
            .send()
            .await
            .context("Speech synthesis request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Speech synthesis failed with status {}: {}", status, body);
        }

        let bytes = response.bytes().await.context("Failed to read synthesized audio")?;

        info!("🎵 Synthesized {} bytes of audio", bytes.len());
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_embeds_region() {
        let env = Environment::from_vars([("TTS_SPEECH_KEY", "key"), ("TTS_SPEECH_REGION", "eastus")]);
        let synthesizer = Synthesizer::new(&env).unwrap();
        assert_eq!(synthesizer.endpoint(), "https://eastus.tts.speech.microsoft.com/cognitiveservices/v1");
    }

    #[test]
    fn test_unset_region_stays_empty() {
        let env = Environment::from_vars::<_, String, String>([]);
        let synthesizer = Synthesizer::new(&env).unwrap();
        assert_eq!(synthesizer.endpoint(), "https://.tts.speech.microsoft.com/cognitiveservices/v1");
    }
}

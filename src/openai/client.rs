//! HTTP client for deployment-scoped Azure OpenAI operations.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{ConfigKey, Environment};

/// Connection settings for one Azure OpenAI resource.
///
/// Vision models live behind endpoint 1, audio models behind endpoint 2.
/// Each profile reads the matching variables from the resolver; unset
/// values stay empty and the service rejects the request.
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
}

impl OpenAiSettings {
    /// Settings for the vision chat deployments.
    pub fn vision(env: &Environment) -> Self {
        Self {
            endpoint: env.resolve(ConfigKey::AzureOpenAiEndpoint1),
            api_key: env.resolve(ConfigKey::AzureOpenAiApiKey1),
            api_version: env.resolve(ConfigKey::ApiVersion),
        }
    }

    /// Settings for the audio transcription deployments.
    pub fn audio(env: &Environment) -> Self {
        Self {
            endpoint: env.resolve(ConfigKey::AzureOpenAiEndpoint2),
            api_key: env.resolve(ConfigKey::AzureOpenAiApiKey2),
            api_version: env.resolve(ConfigKey::ApiVersion),
        }
    }

    /// Settings for the speech synthesis deployments.
    ///
    /// Same resource as audio, but the `audio/speech` operation ships under
    /// its own preview api-version.
    pub fn synthesis(env: &Environment) -> Self {
        Self {
            endpoint: env.resolve(ConfigKey::AzureOpenAiEndpoint2),
            api_key: env.resolve(ConfigKey::AzureOpenAiApiKey2),
            api_version: env.resolve(ConfigKey::TtsApiVersion),
        }
    }
}

/// One element of a user message: plain text or an image reference.
///
/// Image URLs may be public `http(s)` URLs or `data:` URLs carrying the
/// encoded image inline.
#[derive(Serialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize, Debug, Clone)]
pub struct ImageUrl {
    url: String,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        ContentPart::ImageUrl { image_url: ImageUrl { url: url.into() } }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: MessageContent<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(&'a [ContentPart]),
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
}

/// Client for the Azure OpenAI REST surface.
///
/// Operations address a deployment directly:
/// `{endpoint}/openai/deployments/{deployment}/{operation}?api-version=...`,
/// authenticated with the `api-key` header. Requests are sent once; a failed
/// call is reported with the service's status and body text, never retried.
pub struct OpenAiClient {
    http: reqwest::Client,
    settings: OpenAiSettings,
}

impl OpenAiClient {
    /// Create a client for one resource profile.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(settings: OpenAiSettings) -> Result<Self> {
        info!("Creating the Azure OpenAI client");
        debug!("Azure OpenAI endpoint: {}", settings.endpoint);

        let http = reqwest::Client::builder().build().context("Failed to create HTTP client")?;

        Ok(Self { http, settings })
    }

    /// Build a deployment-scoped operation URL.
    fn operation_url(&self, deployment: &str, operation: &str) -> String {
        format!(
            "{}/openai/deployments/{}/{}?api-version={}",
            self.settings.endpoint.trim_end_matches('/'),
            deployment,
            operation,
            self.settings.api_version
        )
    }

    /// Send a chat completion with a system message and mixed user content.
    ///
    /// # Returns
    /// The first choice's message content, or an empty string when the model
    /// returned nothing.
    ///
    /// # Errors
    /// Returns an error if the request fails or the service reports a
    /// non-success status.
    pub async fn chat(&self, deployment: &str, system: &str, user_parts: &[ContentPart], max_tokens: u32) -> Result<String> {
        let request = ChatRequest {
            messages: vec![
                ChatMessage { role: "system", content: MessageContent::Text(system) },
                ChatMessage { role: "user", content: MessageContent::Parts(user_parts) },
            ],
            max_tokens,
        };

        let url = self.operation_url(deployment, "chat/completions");
        debug!("POST {} ({} content parts)", url, user_parts.len());

        let response = self
            .http
            .post(&url)
            .header("api-key", &self.settings.api_key)
            .json(&request)
            .send()
            .await
            .context("Chat completion request failed")?;

        let response = ensure_success(response, "Chat completion").await?;
        let body: ChatResponse = response.json().await.context("Failed to decode chat completion response")?;

        Ok(body.choices.into_iter().next().and_then(|choice| choice.message.content).unwrap_or_default())
    }

    /// Transcribe an audio file with a Whisper deployment.
    ///
    /// # Returns
    /// The recognized text.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, the request fails, or
    /// the service reports a non-success status.
    pub async fn transcribe_file(&self, deployment: &str, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path).await.with_context(|| format!("Failed to read audio file: {}", path.display()))?;
        let file_name = path.file_name().map(|name| name.to_string_lossy().to_string()).unwrap_or_else(|| "audio.wav".to_string());

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().text("response_format", "text").part("file", part);

        let url = self.operation_url(deployment, "audio/transcriptions");
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .header("api-key", &self.settings.api_key)
            .multipart(form)
            .send()
            .await
            .context("Transcription request failed")?;

        let response = ensure_success(response, "Transcription").await?;
        let text = response.text().await.context("Failed to read transcription response")?;

        Ok(text.trim().to_string())
    }

    /// Synthesize speech for the given text with one of the neural voices.
    ///
    /// # Returns
    /// The encoded audio bytes as returned by the service.
    ///
    /// # Errors
    /// Returns an error if the request fails or the service reports a
    /// non-success status.
    pub async fn synthesize_speech(&self, deployment: &str, text: &str, voice: &str) -> Result<Vec<u8>> {
        let request = SpeechRequest { model: deployment, input: text, voice };

        let url = self.operation_url(deployment, "audio/speech");
        debug!("POST {} (voice: {})", url, voice);

        let response = self
            .http
            .post(&url)
            .header("api-key", &self.settings.api_key)
            .json(&request)
            .send()
            .await
            .context("Speech synthesis request failed")?;

        let response = ensure_success(response, "Speech synthesis").await?;
        let bytes = response.bytes().await.context("Failed to read speech synthesis response")?;

        info!("🎵 Received {} bytes of audio", bytes.len());
        Ok(bytes.to_vec())
    }
}

/// Turn a non-success response into an error carrying status and body text.
async fn ensure_success(response: reqwest::Response, operation: &str) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    anyhow::bail!("{} failed with status {}: {}", operation, status, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings(endpoint: &str) -> OpenAiSettings {
        OpenAiSettings { endpoint: endpoint.to_string(), api_key: "key".to_string(), api_version: "2024-05-01".to_string() }
    }

    #[test]
    fn test_operation_url_with_trailing_slash() {
        let client = OpenAiClient::new(test_settings("https://res.openai.azure.com/")).unwrap();
        assert_eq!(
            client.operation_url("gpt-4o", "chat/completions"),
            "https://res.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-05-01"
        );
    }

    #[test]
    fn test_operation_url_without_trailing_slash() {
        let client = OpenAiClient::new(test_settings("https://res.openai.azure.com")).unwrap();
        assert_eq!(
            client.operation_url("whisper", "audio/transcriptions"),
            "https://res.openai.azure.com/openai/deployments/whisper/audio/transcriptions?api-version=2024-05-01"
        );
    }

    #[test]
    fn test_content_parts_serialize_to_wire_shape() {
        let text = serde_json::to_value(ContentPart::text("hello")).unwrap();
        assert_eq!(text, serde_json::json!({"type": "text", "text": "hello"}));

        let image = serde_json::to_value(ContentPart::image_url("data:image/png;base64,AAAA")).unwrap();
        assert_eq!(image, serde_json::json!({"type": "image_url", "image_url": {"url": "data:image/png;base64,AAAA"}}));
    }

    #[test]
    fn test_settings_profiles_pick_matching_resources() {
        let env = crate::config::Environment::from_vars([
            ("AZURE_OPENAI_ENDPOINT1", "https://vision.example.com"),
            ("AZURE_OPENAI_API_KEY1", "vision-key"),
            ("AZURE_OPENAI_ENDPOINT2", "https://audio.example.com"),
            ("AZURE_OPENAI_API_KEY2", "audio-key"),
            ("API_VERSION", "2024-05-01"),
            ("TTS_API_VERSION", "2024-07-01-preview"),
        ]);

        let vision = OpenAiSettings::vision(&env);
        assert_eq!(vision.endpoint, "https://vision.example.com");
        assert_eq!(vision.api_key, "vision-key");
        assert_eq!(vision.api_version, "2024-05-01");

        let audio = OpenAiSettings::audio(&env);
        assert_eq!(audio.endpoint, "https://audio.example.com");
        assert_eq!(audio.api_version, "2024-05-01");

        let synthesis = OpenAiSettings::synthesis(&env);
        assert_eq!(synthesis.api_key, "audio-key");
        assert_eq!(synthesis.api_version, "2024-07-01-preview");
    }

    #[test]
    fn test_missing_configuration_stays_empty() {
        let env = crate::config::Environment::from_vars::<_, String, String>([]);
        let settings = OpenAiSettings::audio(&env);
        assert_eq!(settings.endpoint, "");
        assert_eq!(settings.api_key, "");
    }
}

#[cfg(test)]
mod http_tests {
    use std::io::Write;

    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn mock_settings(server: &MockServer) -> OpenAiSettings {
        OpenAiSettings { endpoint: server.uri(), api_key: "test-api-key".to_string(), api_version: "2024-05-01".to_string() }
    }

    #[tokio::test]
    async fn chat_returns_first_choice_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/openai/deployments/gpt-4o/chat/completions"))
            .and(query_param("api-version", "2024-05-01"))
            .and(header("api-key", "test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "A harbor at dusk."}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenAiClient::new(mock_settings(&server)).unwrap();
        let parts = vec![ContentPart::text("Describe the image"), ContentPart::image_url("https://example.com/cat.png")];
        let answer = client.chat("gpt-4o", "You are a helpful assistant.", &parts, 2000).await.unwrap();

        assert_eq!(answer, "A harbor at dusk.");
    }

    #[tokio::test]
    async fn chat_without_content_is_empty() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/openai/deployments/gpt-4o/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": null}}]
            })))
            .mount(&server)
            .await;

        let client = OpenAiClient::new(mock_settings(&server)).unwrap();
        let parts = vec![ContentPart::text("Describe the image")];
        let answer = client.chat("gpt-4o", "system", &parts, 2000).await.unwrap();

        assert_eq!(answer, "");
    }

    #[tokio::test]
    async fn chat_error_surfaces_status_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/openai/deployments/gpt-4o/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Access denied due to invalid subscription key"))
            .mount(&server)
            .await;

        let client = OpenAiClient::new(mock_settings(&server)).unwrap();
        let parts = vec![ContentPart::text("Describe the image")];
        let error = client.chat("gpt-4o", "system", &parts, 2000).await.unwrap_err();

        let message = format!("{error}");
        assert!(message.contains("401"), "missing status in: {message}");
        assert!(message.contains("invalid subscription key"), "missing body in: {message}");
    }

    #[tokio::test]
    async fn transcribe_file_returns_trimmed_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/openai/deployments/whisper/audio/transcriptions"))
            .and(query_param("api-version", "2024-05-01"))
            .and(header("api-key", "test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_string("The ocelot is a medium-sized spotted wild cat.\n"))
            .expect(1)
            .mount(&server)
            .await;

        let mut file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        file.write_all(b"RIFF....WAVE").unwrap();

        let client = OpenAiClient::new(mock_settings(&server)).unwrap();
        let transcript = client.transcribe_file("whisper", file.path()).await.unwrap();

        assert_eq!(transcript, "The ocelot is a medium-sized spotted wild cat.");
    }

    #[tokio::test]
    async fn synthesize_speech_sends_voice_and_returns_bytes() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/openai/deployments/tts/audio/speech"))
            .and(header("api-key", "test-api-key"))
            .and(body_json(serde_json::json!({
                "model": "tts",
                "input": "Hello there",
                "voice": "nova"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xFB, 0x90, 0x00]))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenAiClient::new(mock_settings(&server)).unwrap();
        let bytes = client.synthesize_speech("tts", "Hello there", "nova").await.unwrap();

        assert_eq!(bytes, vec![0xFF, 0xFB, 0x90, 0x00]);
    }
}

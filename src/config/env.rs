//! Typed configuration-value resolver.
//!
//! Service endpoints, keys, and deployment names come from a closed set of
//! environment variables, optionally seeded from a local `.env` file at
//! startup. Resolution never fails: an unset variable yields an empty
//! string, which flows into the request and is rejected by the service.

use std::collections::HashMap;

use tracing::{debug, warn};

/// The closed set of recognized configuration keys.
///
/// Each key maps 1:1 to an environment-variable name. The set is fixed at
/// build time; there is no dynamic registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    SpeechKey,
    SpeechRegion,
    AzureOpenAiApiKey1,
    AzureOpenAiApiKey2,
    AzureOpenAiEndpoint1,
    AzureOpenAiEndpoint2,
    ApiVersion,
    WhisperDeploymentName,
    DeploymentName,
    ImageUrl,
    DestinationContainerUrl,
    WhisperModelId,
    VisionDeploymentName,
    ComputerVisionEndpoint,
    ComputerVisionKey,
    VisionApiVersion,
    VideoUrl1,
    VideoUrl2,
    VideoIndexerEndpoint,
    VideoIndexerKey,
    TtsSpeechKey,
    TtsSpeechRegion,
    TtsDeploymentName,
    TtsApiVersion,
    VisionApiVersionE,
}

impl ConfigKey {
    /// All keys, for enumeration in tests and diagnostics.
    pub const ALL: &'static [ConfigKey] = &[
        ConfigKey::SpeechKey,
        ConfigKey::SpeechRegion,
        ConfigKey::AzureOpenAiApiKey1,
        ConfigKey::AzureOpenAiApiKey2,
        ConfigKey::AzureOpenAiEndpoint1,
        ConfigKey::AzureOpenAiEndpoint2,
        ConfigKey::ApiVersion,
        ConfigKey::WhisperDeploymentName,
        ConfigKey::DeploymentName,
        ConfigKey::ImageUrl,
        ConfigKey::DestinationContainerUrl,
        ConfigKey::WhisperModelId,
        ConfigKey::VisionDeploymentName,
        ConfigKey::ComputerVisionEndpoint,
        ConfigKey::ComputerVisionKey,
        ConfigKey::VisionApiVersion,
        ConfigKey::VideoUrl1,
        ConfigKey::VideoUrl2,
        ConfigKey::VideoIndexerEndpoint,
        ConfigKey::VideoIndexerKey,
        ConfigKey::TtsSpeechKey,
        ConfigKey::TtsSpeechRegion,
        ConfigKey::TtsDeploymentName,
        ConfigKey::TtsApiVersion,
        ConfigKey::VisionApiVersionE,
    ];

    /// Canonical environment-variable name for this key.
    ///
    /// `VideoIndexerEndpoint` maps to `VIDEOINDEXERENPOINT`: the misspelled
    /// name is what deployments actually set, so it is part of the contract.
    pub fn as_env_name(&self) -> &'static str {
        match self {
            ConfigKey::SpeechKey => "SPEECH_KEY",
            ConfigKey::SpeechRegion => "SPEECH_REGION",
            ConfigKey::AzureOpenAiApiKey1 => "AZURE_OPENAI_API_KEY1",
            ConfigKey::AzureOpenAiApiKey2 => "AZURE_OPENAI_API_KEY2",
            ConfigKey::AzureOpenAiEndpoint1 => "AZURE_OPENAI_ENDPOINT1",
            ConfigKey::AzureOpenAiEndpoint2 => "AZURE_OPENAI_ENDPOINT2",
            ConfigKey::ApiVersion => "API_VERSION",
            ConfigKey::WhisperDeploymentName => "WHISPER_DEPLOYMENT_NAME",
            ConfigKey::DeploymentName => "DEPLOYMENT_NAME",
            ConfigKey::ImageUrl => "IMAGEURL",
            ConfigKey::DestinationContainerUrl => "DESTINATION_CONTAINER_URL",
            ConfigKey::WhisperModelId => "WHISPERMODELID",
            ConfigKey::VisionDeploymentName => "VISION_DEPLOYMENT_NAME",
            ConfigKey::ComputerVisionEndpoint => "COMPUTERVISIONENDPOINT",
            ConfigKey::ComputerVisionKey => "COMPUTERVISIONKEY",
            ConfigKey::VisionApiVersion => "VISION_API_VERSION",
            ConfigKey::VideoUrl1 => "VIDEOURL1",
            ConfigKey::VideoUrl2 => "VIDEOURL2",
            ConfigKey::VideoIndexerEndpoint => "VIDEOINDEXERENPOINT",
            ConfigKey::VideoIndexerKey => "VIDEOINDEXERKEY",
            ConfigKey::TtsSpeechKey => "TTS_SPEECH_KEY",
            ConfigKey::TtsSpeechRegion => "TTS_SPEECH_REGION",
            ConfigKey::TtsDeploymentName => "TTS_DEPLOYMENT_NAME",
            ConfigKey::TtsApiVersion => "TTS_API_VERSION",
            ConfigKey::VisionApiVersionE => "VISION_API_VERSION_E",
        }
    }
}

impl std::fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_env_name())
    }
}

/// Immutable snapshot of the configuration environment.
///
/// Captured once by the process entry point; after construction it performs
/// only reads, so it is safe to share across tasks.
#[derive(Debug, Clone)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Snapshot the process environment, seeded from a local `.env` file.
    ///
    /// Pairs from the file never overwrite variables the hosting process
    /// already set. Call this once at startup.
    pub fn load() -> Self {
        let mut vars: HashMap<String, String> = std::env::vars().collect();

        match dotenvy::from_filename_iter(".env") {
            Ok(entries) => {
                let pairs = entries.filter_map(|entry| match entry {
                    Ok(pair) => Some(pair),
                    Err(e) => {
                        warn!("Skipping malformed .env entry: {}", e);
                        None
                    }
                });
                let added = merge_missing(&mut vars, pairs);
                debug!("Loaded {} value(s) from .env", added);
            }
            Err(e) => {
                debug!("No .env file loaded: {}", e);
            }
        }

        Self { vars }
    }

    /// Build an environment from an explicit mapping.
    ///
    /// Lets tests inject values instead of touching real process state.
    pub fn from_vars<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self { vars: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    /// Resolve a key to its configured value, or an empty string if unset.
    ///
    /// Never fails. An empty value is allowed to propagate into downstream
    /// API calls, which then fail with an authentication or bad-request
    /// error at the service.
    pub fn resolve(&self, key: ConfigKey) -> String {
        self.vars.get(key.as_env_name()).cloned().unwrap_or_default()
    }

    /// Publicly hosted sample audio clips for trying out transcription.
    pub fn sample_content_urls() -> [&'static str; 2] {
        ["https://crbn.us/hello.wav", "https://crbn.us/whatstheweatherlike.wav"]
    }
}

/// Insert pairs that are not already present, returning how many were added.
fn merge_missing(vars: &mut HashMap<String, String>, pairs: impl IntoIterator<Item = (String, String)>) -> usize {
    let mut added = 0;
    for (key, value) in pairs {
        vars.entry(key).or_insert_with(|| {
            added += 1;
            value
        });
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_returns_configured_value() {
        let env = Environment::from_vars([("API_VERSION", "2024-05-01")]);
        assert_eq!(env.resolve(ConfigKey::ApiVersion), "2024-05-01");
    }

    #[test]
    fn test_resolve_unset_key_is_empty() {
        let env = Environment::from_vars([("API_VERSION", "2024-05-01")]);
        assert_eq!(env.resolve(ConfigKey::TtsApiVersion), "");
    }

    #[test]
    fn test_resolve_is_total_over_the_key_set() {
        let env = Environment::from_vars::<_, String, String>([]);
        for key in ConfigKey::ALL {
            assert_eq!(env.resolve(*key), "");
        }
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let env = Environment::from_vars([("SPEECH_REGION", "eastus")]);
        assert_eq!(env.resolve(ConfigKey::SpeechRegion), "eastus");
        assert_eq!(env.resolve(ConfigKey::SpeechRegion), "eastus");
    }

    #[test]
    fn test_env_names_are_unique() {
        let mut names: Vec<_> = ConfigKey::ALL.iter().map(|k| k.as_env_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ConfigKey::ALL.len());
    }

    #[test]
    fn test_merge_does_not_overwrite_existing() {
        let mut vars = HashMap::from([("SPEECH_KEY".to_string(), "env-value".to_string())]);
        let added = merge_missing(&mut vars, [("SPEECH_KEY".to_string(), "file-value".to_string())]);

        assert_eq!(added, 0);
        let env = Environment { vars };
        assert_eq!(env.resolve(ConfigKey::SpeechKey), "env-value");
    }

    #[test]
    fn test_merge_adds_missing_pairs() {
        let mut vars = HashMap::from([("SPEECH_KEY".to_string(), "env-value".to_string())]);
        let added = merge_missing(
            &mut vars,
            [
                ("SPEECH_KEY".to_string(), "file-value".to_string()),
                ("SPEECH_REGION".to_string(), "westus".to_string()),
            ],
        );

        assert_eq!(added, 1);
        assert_eq!(vars.get("SPEECH_REGION").map(String::as_str), Some("westus"));
        assert_eq!(vars.get("SPEECH_KEY").map(String::as_str), Some("env-value"));
    }
}

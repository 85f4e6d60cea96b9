//! Speech service module.
//!
//! Provides SSML synthesis through the Azure Cognitive Services TTS REST
//! endpoint.

mod synthesizer;

pub use synthesizer::Synthesizer;

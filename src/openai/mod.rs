//! Azure OpenAI client module.
//!
//! Covers the deployment-scoped REST operations the demos use: chat
//! completions with image content, Whisper transcription, and speech
//! synthesis.

mod client;

pub use client::{ContentPart, OpenAiClient, OpenAiSettings};

//! Configuration module for the demos.
//!
//! Provides CLI argument parsing and the environment-backed value resolver.

mod cli;
mod env;

pub use cli::{AppConfig, Demo};
pub use env::{ConfigKey, Environment};

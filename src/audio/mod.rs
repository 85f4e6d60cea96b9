//! Audio playback module.
//!
//! Decodes and plays the encoded audio the speech services return, through
//! the default output device via rodio.

mod playback;

pub use playback::{play_bytes, play_file};

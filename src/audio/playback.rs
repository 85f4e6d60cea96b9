//! Audio playback through the default output device.
//!
//! The services return encoded audio (WAV or MP3), so playback decodes the
//! container rather than queuing raw samples. Both entry points block until
//! the clip finishes; demos run them on the blocking pool.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, Sink};
use tracing::{debug, info};

/// Decode and play audio bytes returned by a service.
///
/// # Errors
/// Returns an error if no output device is available or the bytes cannot
/// be decoded. Callers print the error and continue.
pub fn play_bytes(bytes: Vec<u8>) -> Result<()> {
    debug!("Decoding {} bytes for playback", bytes.len());

    let (_stream, handle) = OutputStream::try_default().context("No audio output device available")?;
    let sink = Sink::try_new(&handle).context("Failed to open audio sink")?;

    let source = Decoder::new(Cursor::new(bytes)).context("Failed to decode audio data")?;
    sink.append(source);
    sink.sleep_until_end();

    debug!("Playback completed");
    Ok(())
}

/// Decode and play a local audio file.
///
/// # Errors
/// Returns an error if no output device is available, the file cannot be
/// opened, or its contents cannot be decoded.
pub fn play_file(path: &Path) -> Result<()> {
    info!("🔊 Playing {}", path.display());

    let (_stream, handle) = OutputStream::try_default().context("No audio output device available")?;
    let sink = Sink::try_new(&handle).context("Failed to open audio sink")?;

    let file = File::open(path).with_context(|| format!("Failed to open audio file: {}", path.display()))?;
    let source = Decoder::new(BufReader::new(file)).with_context(|| format!("Failed to decode audio file: {}", path.display()))?;
    sink.append(source);
    sink.sleep_until_end();

    debug!("Playback completed");
    Ok(())
}

//! The five demonstrations, one per subcommand.
//!
//! Each demo is a linear script: resolve configuration, prompt for input,
//! call a remote service, then print or play the result. Shared helpers for
//! image input handling and cadenced printing live here.

pub mod converse;
pub mod describe;
pub mod inspect;
pub mod speak;
pub mod transcribe;

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use crate::config::{ConfigKey, Environment};
use crate::console::Console;
use crate::vision;

/// Token budget for the vision chat calls.
pub(crate) const VISION_MAX_TOKENS: u32 = 2000;

/// Print text one word at a time at a fixed cadence.
pub(crate) async fn print_word_by_word(text: String, delay: Duration) {
    for word in text.split_whitespace() {
        print!("{} ", word);
        let _ = std::io::stdout().flush();
        tokio::time::sleep(delay).await;
    }
    println!();
}

/// How a prompted image answer should be interpreted.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ImageInput {
    Empty,
    Url,
    LocalPath,
}

pub(crate) fn classify_image_input(answer: &str) -> ImageInput {
    if answer.is_empty() {
        ImageInput::Empty
    } else if answer.starts_with("http://") || answer.starts_with("https://") {
        ImageInput::Url
    } else {
        ImageInput::LocalPath
    }
}

/// Prompt for an image until the answer resolves to something the service
/// accepts: an `http(s)` URL passes through, a local file is encoded into a
/// data URL, and an empty answer falls back to the IMAGEURL variable.
pub(crate) fn prompt_image(console: &mut Console, env: &Environment, prompt: &str) -> Result<String> {
    loop {
        let answer = console.ask(prompt)?;
        match classify_image_input(&answer) {
            ImageInput::Empty => {
                let fallback = env.resolve(ConfigKey::ImageUrl);
                if fallback.is_empty() {
                    println!("No image given and IMAGEURL is not set. Please enter a path or URL.");
                } else {
                    info!("Using the configured IMAGEURL");
                    return Ok(fallback);
                }
            }
            ImageInput::Url => return Ok(answer),
            ImageInput::LocalPath => {
                let path = Path::new(&answer);
                if path.is_file() {
                    info!("Encoding the image into a data URL");
                    return vision::image_to_data_url(path);
                }
                println!("The image file does not exist. Please enter a valid path.");
            }
        }
    }
}

/// Print a vision response: empty answers get a placeholder, fenced JSON is
/// pretty-printed, anything else is shown verbatim.
pub(crate) fn render_answer(answer: &str) -> Result<()> {
    if answer.is_empty() {
        println!("No response from the model");
        return Ok(());
    }

    let rendered = vision::format_response(answer)?;
    println!("Response:\n{}", rendered);
    Ok(())
}

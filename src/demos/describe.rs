//! Analyse an image with a vision deployment.

use anyhow::Result;
use tracing::info;

use super::{VISION_MAX_TOKENS, prompt_image, render_answer};
use crate::config::{ConfigKey, Environment};
use crate::console::Console;
use crate::openai::{ContentPart, OpenAiClient, OpenAiSettings};

const SYSTEM_PROMPT: &str = "You are a helpful assistant that analyses images with descriptive analysis divided into paragraphs.";

const SYSTEM_PROMPT_JSON: &str =
    "You are a helpful assistant that analyses images and provides a description of various elements in the picture, generating output in raw JSON format.";

pub async fn run(env: &Environment) -> Result<()> {
    info!("Starting the image analysis demo");

    let mut console = Console::new()?;
    let image = prompt_image(&mut console, env, "Enter the path or URL of the image to analyse (empty uses IMAGEURL)")?;
    let question = console.ask("Enter the text you want to analyse the image with")?;
    let want_json = console.confirm("Do you want the output in JSON format?")?;

    let deployment = env.resolve(ConfigKey::VisionDeploymentName);
    let client = OpenAiClient::new(OpenAiSettings::vision(env))?;

    info!("Calling the Azure OpenAI endpoint to analyse the image. Waiting for the response...");
    let system = if want_json { SYSTEM_PROMPT_JSON } else { SYSTEM_PROMPT };
    let parts = vec![ContentPart::text(question), ContentPart::image_url(image)];
    let answer = client.chat(&deployment, system, &parts, VISION_MAX_TOKENS).await?;

    info!("Got a response from the Azure OpenAI endpoint");
    render_answer(&answer)
}

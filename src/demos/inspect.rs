//! Compare a test image against a reference image to detect defects.

use anyhow::Result;
use tracing::info;

use super::{VISION_MAX_TOKENS, prompt_image, render_answer};
use crate::config::{ConfigKey, Environment};
use crate::console::Console;
use crate::openai::{ContentPart, OpenAiClient, OpenAiSettings};

const SYSTEM_PROMPT: &str = "You're a professional defect detector. Your job is to compare the test image with the reference image. \
Answer with \"No defect detected\" or \"Defect detected\", and explain your decision in as much detail as possible.";

const SYSTEM_PROMPT_JSON: &str = "You're a professional defect detector. Your job is to compare the test image with the reference image. \
Answer with \"No defect detected\" or \"Defect detected\", and explain your decision in as much detail as possible. \
Return the output in JSON format with the type of defect, its location in X and Y coordinates, and the severity of the defect. \
Also provide a defect confidence score from 0 to 1 based on the reference image.";

pub async fn run(env: &Environment) -> Result<()> {
    info!("Starting the defect detection demo");

    let mut console = Console::new()?;
    let test_image = prompt_image(&mut console, env, "Enter the path or URL of the image to inspect")?;
    let reference_image = prompt_image(&mut console, env, "Enter the path or URL of the reference image")?;
    let want_json = console.confirm("Do you want the output in JSON format?")?;

    let deployment = env.resolve(ConfigKey::VisionDeploymentName);
    let client = OpenAiClient::new(OpenAiSettings::vision(env))?;

    info!("Calling the Azure OpenAI endpoint to compare the images. Waiting for the response...");
    let system = if want_json { SYSTEM_PROMPT_JSON } else { SYSTEM_PROMPT };
    let parts = vec![
        ContentPart::text("Here is the reference image"),
        ContentPart::image_url(reference_image),
        ContentPart::text("Here is the test image"),
        ContentPart::image_url(test_image),
    ];
    let answer = client.chat(&deployment, system, &parts, VISION_MAX_TOKENS).await?;

    info!("Got a response from the Azure OpenAI endpoint");
    render_answer(&answer)
}

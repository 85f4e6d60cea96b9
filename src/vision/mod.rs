//! Vision helpers.
//!
//! Encoding of local images into data URLs and rendering of model
//! responses, including fenced JSON output.

mod analysis;
mod encode;

pub use analysis::{extract_fenced_json, format_response};
pub use encode::image_to_data_url;

//! Summarizer: reduces an arbitrary-length project description to one
//! concise descriptive sentence, which becomes the canonical query for all
//! later stages.

use crate::gateway::{Gateway, GatewayError, GenerateOptions};

/// Low temperature: the summary should be near-deterministic.
const SUMMARY_TEMPERATURE: f32 = 0.2;

/// Small ceiling: one sentence, nothing more.
const SUMMARY_MAX_TOKENS: u32 = 100;

/// Wrap the user description in the fixed summarization template.
pub fn summary_prompt(description: &str) -> String {
    format!(
        "Generate a one sentence, descriptive and concise prompt for the user input: {description}\n\
         The output must be in one sentence."
    )
}

/// Summarize a non-empty project description via the gateway.
///
/// The generated sentence is returned verbatim, including any surrounding
/// whitespace the generator produced; callers display it as-is.
pub async fn summarize(
    gateway: &dyn Gateway,
    model: &str,
    description: &str,
) -> Result<String, GatewayError> {
    let options = GenerateOptions {
        model: model.to_string(),
        max_tokens: SUMMARY_MAX_TOKENS,
        temperature: SUMMARY_TEMPERATURE,
    };
    gateway.generate_text(&summary_prompt(description), &options).await
}

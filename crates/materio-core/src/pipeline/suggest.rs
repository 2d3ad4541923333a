//! Suggestion fetcher: asks the generator for material recommendations
//! against the summarized query, in one of two levels of detail.

use crate::gateway::{Gateway, GatewayError, GenerateOptions};

/// Moderate temperature: some variety in suggested materials is desirable.
const SUGGEST_TEMPERATURE: f32 = 0.4;

/// Generous ceiling: the response is multi-paragraph prose.
const SUGGEST_MAX_TOKENS: u32 = 1000;

/// How much explanation to request per material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Main key points only.
    #[default]
    Brief,
    /// Detailed explanations.
    Detailed,
}

impl Mode {
    fn instruction(self) -> &'static str {
        match self {
            Mode::Brief => "the main key points",
            Mode::Detailed => "detailed explanations",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Brief => f.write_str("brief"),
            Mode::Detailed => f.write_str("detailed"),
        }
    }
}

/// Append the fixed mode-specific instruction to the summarized query.
pub fn suggestion_prompt(summary: &str, mode: Mode) -> String {
    format!(
        "{summary}. Please provide {} regarding the materials' properties, pros, and cons.",
        mode.instruction()
    )
}

/// Fetch raw multi-paragraph suggestion prose for a summarized query.
pub async fn fetch_suggestions(
    gateway: &dyn Gateway,
    model: &str,
    summary: &str,
    mode: Mode,
) -> Result<String, GatewayError> {
    let options = GenerateOptions {
        model: model.to_string(),
        max_tokens: SUGGEST_MAX_TOKENS,
        temperature: SUGGEST_TEMPERATURE,
    };
    gateway.generate_text(&suggestion_prompt(summary, mode), &options).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brief_prompt_asks_for_key_points() {
        let prompt = suggestion_prompt("A lightweight chassis.", Mode::Brief);
        assert!(prompt.starts_with("A lightweight chassis."));
        assert!(prompt.contains("the main key points"));
        assert!(prompt.contains("properties, pros, and cons"));
    }

    #[test]
    fn detailed_prompt_asks_for_explanations() {
        let prompt = suggestion_prompt("A lightweight chassis.", Mode::Detailed);
        assert!(prompt.contains("detailed explanations"));
        assert!(!prompt.contains("main key points"));
    }

    #[test]
    fn default_mode_is_brief() {
        assert_eq!(Mode::default(), Mode::Brief);
    }
}

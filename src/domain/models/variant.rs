#[cfg(test)]
#[path = "variant_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::EnumString;
use strum::EnumVariantNames;

use super::CompletionError;
use super::StructuredReview;
use super::TurnContent;

/// Phrase the interior design preamble asks the model to answer with when the
/// input is off topic.
pub const REFUSAL_MARKER: &str = "Sorry, I am an AI assistant for interior design";

pub const REFUSAL_MESSAGE: &str =
    "🚨 Sorry, I am an AI assistant for interior design. We are not dealing with this.";

const INTERIOR_DESIGN_PREAMBLE: &str = r#"
You are an AI assistant specializing in **interior design**. Your task is to refine and improve **interior design-related prompts** provided by the user.

### **Instructions:**
✔ If the input relates to **interior design**, generate a **better, clearer, and more refined prompt** for the user.
❌ If the input is unrelated to interior design, respond with: "Sorry, I am an AI assistant for interior design. We are not dealing with this."

### **User Input:**
"#;

const CODE_REVIEW_PREAMBLE: &str = r#"
You are a senior software engineer reviewing code. Respond with JSON only, no prose.

### **Instructions:**
✔ If the input is source code, respond with:
{"input_type": "code", "code_snippet": "<the code>", "evaluation": {"errors": ["..."], "optimizations": ["..."], "best_practices": ["..."], "corrected_code": "<the corrected code>"}}
❌ If the input is not source code, respond with:
{"input_type": "non_code", "message": "<why this can't be reviewed>", "suggestion": "<what to send instead>"}

### **User Input:**
"#;

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    EnumIter,
    EnumString,
    EnumVariantNames,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Variant {
    #[default]
    InteriorDesign,
    CodeReview,
    Passthrough,
}

fn strip_surrounding_quotes(text: &str) -> &str {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        return &text[1..text.len() - 1];
    }

    return text;
}

fn strip_code_fences(text: &str) -> &str {
    let mut res = text.trim();
    if let Some(stripped) = res.strip_prefix("```json") {
        res = stripped;
    } else if let Some(stripped) = res.strip_prefix("```") {
        res = stripped;
    }

    if let Some(stripped) = res.strip_suffix("```") {
        res = stripped;
    }

    return res.trim();
}

impl Variant {
    pub fn title(&self) -> &'static str {
        match self {
            Variant::InteriorDesign => return "Interior Design Prompt Refiner",
            Variant::CodeReview => return "Code Reviewer",
            Variant::Passthrough => return "Chat",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Variant::InteriorDesign => return "Enter an interior design prompt...",
            Variant::CodeReview => return "Paste code to review...",
            Variant::Passthrough => return "Enter prompt...",
        }
    }

    /// Header shown above plain assistant answers.
    pub fn answer_heading(&self) -> &'static str {
        match self {
            Variant::InteriorDesign => return "✅ Refined Prompt:",
            Variant::CodeReview => return "Code Review:",
            Variant::Passthrough => return "Assistant:",
        }
    }

    /// Builds the message content sent to the backend for `user_text`.
    pub fn prompt(&self, user_text: &str) -> String {
        match self {
            Variant::InteriorDesign => {
                return format!("{}{user_text}", INTERIOR_DESIGN_PREAMBLE.trim_start());
            }
            Variant::CodeReview => {
                return format!("{}{user_text}", CODE_REVIEW_PREAMBLE.trim_start());
            }
            Variant::Passthrough => return user_text.to_string(),
        }
    }

    /// Turns the raw completion text into the content stored for the assistant
    /// turn.
    pub fn classify(&self, completion: &str) -> Result<TurnContent, CompletionError> {
        match self {
            Variant::Passthrough => {
                return Ok(TurnContent::Text(completion.to_string()));
            }
            Variant::InteriorDesign => {
                let text = strip_surrounding_quotes(completion.trim());
                if text
                    .to_lowercase()
                    .contains(&REFUSAL_MARKER.to_lowercase())
                {
                    return Ok(TurnContent::Text(REFUSAL_MESSAGE.to_string()));
                }

                return Ok(TurnContent::Text(text.trim().to_string()));
            }
            Variant::CodeReview => {
                let json = strip_code_fences(completion);
                let review = serde_json::from_str::<StructuredReview>(json).map_err(|err| {
                    tracing::error!(error = ?err, body = json, "Failed to parse code review");
                    return CompletionError::MalformedResponse(err.to_string());
                })?;

                return Ok(TurnContent::Review(review));
            }
        }
    }
}

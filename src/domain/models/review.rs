#[cfg(test)]
#[path = "review_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    Code,
    NonCode,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub optimizations: Vec<String>,
    #[serde(default)]
    pub best_practices: Vec<String>,
    #[serde(default)]
    pub corrected_code: String,
}

/// Response shape requested by the code review variant. Only `input_type` is
/// required, everything else is displayed when present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredReview {
    pub input_type: InputType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<Evaluation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

fn push_list(sections: &mut Vec<String>, title: &str, items: &[String]) {
    if items.is_empty() {
        sections.push(format!("{title}:\n- None"));
        return;
    }

    let bullets = items
        .iter()
        .map(|item| {
            return format!("- {item}");
        })
        .collect::<Vec<String>>()
        .join("\n");

    sections.push(format!("{title}:\n{bullets}"));
}

impl StructuredReview {
    pub fn is_code(&self) -> bool {
        return self.input_type == InputType::Code;
    }

    /// Flattens the review into display text, one section per field present.
    pub fn as_text(&self) -> String {
        let mut sections: Vec<String> = vec![];

        if let Some(snippet) = &self.code_snippet {
            if !snippet.trim().is_empty() {
                sections.push(format!("Code:\n{}", snippet.trim_end()));
            }
        }

        if let Some(evaluation) = &self.evaluation {
            push_list(&mut sections, "Errors", &evaluation.errors);
            push_list(&mut sections, "Optimizations", &evaluation.optimizations);
            push_list(&mut sections, "Best practices", &evaluation.best_practices);

            if !evaluation.corrected_code.trim().is_empty() {
                sections.push(format!(
                    "Corrected code:\n{}",
                    evaluation.corrected_code.trim_end()
                ));
            }
        }

        if let Some(message) = &self.message {
            sections.push(message.to_string());
        }

        if let Some(suggestion) = &self.suggestion {
            sections.push(format!("Suggestion: {suggestion}"));
        }

        if sections.is_empty() {
            if self.is_code() {
                return "The review came back empty.".to_string();
            }
            return "That doesn't look like code.".to_string();
        }

        return sections.join("\n\n");
    }
}

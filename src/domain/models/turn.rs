#[cfg(test)]
#[path = "turn_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::StructuredReview;
use super::Variant;
use super::REFUSAL_MARKER;

const TAB: &str = "  ";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl ToString for Role {
    fn to_string(&self) -> String {
        match self {
            Role::User => return String::from("You"),
            Role::Assistant => return String::from("Assistant"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TurnContent {
    Text(String),
    Review(StructuredReview),
}

impl TurnContent {
    pub fn as_text(&self) -> String {
        match self {
            TurnContent::Text(text) => return text.to_string(),
            TurnContent::Review(review) => return review.as_text(),
        }
    }
}

/// How a turn should be displayed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnShape {
    Prompt,
    Refusal,
    Review,
    Plain,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    variant: Option<Variant>,
    content: TurnContent,
}

impl Turn {
    pub fn user(text: &str) -> Turn {
        return Turn {
            role: Role::User,
            variant: None,
            content: TurnContent::Text(text.to_string()),
        };
    }

    /// An answer produced under `variant`. The content is stored as received.
    pub fn assistant(content: TurnContent, variant: Variant) -> Turn {
        return Turn {
            role: Role::Assistant,
            variant: Some(variant),
            content,
        };
    }

    pub fn role(&self) -> Role {
        return self.role;
    }

    pub fn content(&self) -> &TurnContent {
        return &self.content;
    }

    /// The variant that produced an assistant turn. `None` for user turns.
    pub fn variant(&self) -> Option<Variant> {
        return self.variant;
    }

    pub fn shape(&self) -> TurnShape {
        if self.role == Role::User {
            return TurnShape::Prompt;
        }

        match &self.content {
            TurnContent::Review(_) => return TurnShape::Review,
            TurnContent::Text(text) => {
                // Substring match on the model's English wording. Any rephrasing
                // by the model slips through as a plain answer.
                if text.contains(REFUSAL_MARKER) {
                    return TurnShape::Refusal;
                }
                return TurnShape::Plain;
            }
        }
    }

    /// Word wraps the turn's display text to `line_max_width` columns. Tabs
    /// are expanded here, the stored content keeps them.
    pub fn as_string_lines(&self, line_max_width: usize) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        let width = line_max_width.max(1);
        let text = self.content.as_text().replace('\t', TAB);

        for full_line in text.split('\n') {
            if full_line.trim().is_empty() {
                lines.push("".to_string());
                continue;
            }

            let mut current = String::new();
            let mut current_len = 0;
            let mut line_started = false;

            // Leading spaces come through as empty words, which keeps code
            // indentation intact.
            for word in full_line.split(' ') {
                let word_len = word.chars().count();
                if line_started && current_len + word_len + 1 > width {
                    lines.push(current.trim_end().to_string());
                    current = String::new();
                    current_len = 0;
                    line_started = false;
                }

                if line_started {
                    current.push(' ');
                    current_len += 1;
                }
                current.push_str(word);
                current_len += word_len;
                line_started = true;
            }

            if line_started {
                lines.push(current.trim_end().to_string());
            }
        }

        return lines;
    }
}

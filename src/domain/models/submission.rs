#[cfg(test)]
#[path = "submission_test.rs"]
mod tests;

use super::Variant;

/// Where the chat is in its request cycle. A failure stays on screen until the
/// next submission starts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Sending,
    Failed {
        message: String,
    },
}

impl SubmissionState {
    pub fn is_sending(&self) -> bool {
        return *self == SubmissionState::Sending;
    }

    pub fn error(&self) -> Option<&str> {
        if let SubmissionState::Failed { message } = self {
            return Some(message.as_str());
        }

        return None;
    }
}

/// A user turn that has been accepted and is waiting on the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmittedPrompt {
    pub text: String,
    pub variant: Variant,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted(SubmittedPrompt),
    EmptyInput,
    Busy,
}

#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use super::CompletionClient;
use super::Conversation;
use crate::domain::models::CompletionError;
use crate::domain::models::SubmissionState;
use crate::domain::models::SubmitOutcome;
use crate::domain::models::SubmittedPrompt;
use crate::domain::models::Turn;
use crate::domain::models::TurnContent;
use crate::domain::models::Variant;

pub struct AppState {
    pub conversation: Conversation,
    state: SubmissionState,
    variant: Variant,
}

impl AppState {
    pub fn new(variant: Variant) -> AppState {
        return AppState {
            conversation: Conversation::default(),
            state: SubmissionState::Idle,
            variant,
        };
    }

    pub fn state(&self) -> &SubmissionState {
        return &self.state;
    }

    pub fn is_sending(&self) -> bool {
        return self.state.is_sending();
    }

    pub fn variant(&self) -> Variant {
        return self.variant;
    }

    /// Switches the preamble used for the next submissions. Refused while a
    /// request is in flight.
    pub fn set_variant(&mut self, variant: Variant) -> bool {
        if self.is_sending() {
            return false;
        }

        self.variant = variant;
        return true;
    }

    pub fn clear(&mut self) {
        if self.is_sending() {
            return;
        }

        self.conversation.clear();
        self.state = SubmissionState::Idle;
    }

    /// Shows an error that didn't come from a completion request, such as a
    /// failed health check.
    pub fn surface_error(&mut self, message: &str) {
        if self.is_sending() {
            return;
        }

        self.state = SubmissionState::Failed {
            message: message.to_string(),
        };
    }

    /// Optimistically records the user turn and moves to `Sending`.
    pub fn begin_submit(&mut self, text: &str) -> SubmitOutcome {
        if self.is_sending() {
            tracing::warn!("Ignoring submission while a request is in flight");
            return SubmitOutcome::Busy;
        }

        if text.trim().is_empty() {
            return SubmitOutcome::EmptyInput;
        }

        self.conversation.append(Turn::user(text));
        self.state = SubmissionState::Sending;

        return SubmitOutcome::Accepted(SubmittedPrompt {
            text: text.to_string(),
            variant: self.variant,
        });
    }

    /// Completes the in-flight submission. Failures retract the user turn that
    /// started it.
    pub fn settle(&mut self, res: Result<TurnContent, CompletionError>) {
        if !self.is_sending() {
            tracing::warn!("Received a completion with no request in flight");
            return;
        }

        match res {
            Ok(content) => {
                self.conversation.append(Turn::assistant(content, self.variant));
                self.state = SubmissionState::Idle;
            }
            Err(err) => {
                tracing::error!(error = %err, "Completion request failed");
                self.conversation.remove_last();
                self.state = SubmissionState::Failed {
                    message: err.user_message(),
                };
            }
        }
    }

    pub async fn submit(&mut self, client: &CompletionClient, text: &str) -> SubmitOutcome {
        let outcome = self.begin_submit(text);
        if let SubmitOutcome::Accepted(prompt) = &outcome {
            let res = client.complete(&prompt.text, prompt.variant).await;
            self.settle(res);
        }

        return outcome;
    }
}

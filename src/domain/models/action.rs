use super::SubmittedPrompt;

pub enum Action {
    CompletionRequest(SubmittedPrompt),
}

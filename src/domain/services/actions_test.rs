use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use super::help_text;
use super::ActionsService;
use crate::domain::models::Action;
use crate::domain::models::Backend;
use crate::domain::models::BackendPrompt;
use crate::domain::models::CompletionError;
use crate::domain::models::Event;
use crate::domain::models::SubmittedPrompt;
use crate::domain::models::TurnContent;
use crate::domain::models::Variant;
use crate::domain::services::CompletionClient;

struct EchoBackend {}

#[async_trait]
impl Backend for EchoBackend {
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    async fn get_completion(&self, prompt: BackendPrompt) -> Result<String, CompletionError> {
        if prompt.text == "fail" {
            return Err(CompletionError::RateLimited);
        }

        return Ok(format!("echo: {}", prompt.text));
    }
}

fn to_settled(event: Option<Event>) -> Result<Result<TurnContent, CompletionError>> {
    match event {
        Some(Event::CompletionSettled(res)) => return Ok(res),
        _ => bail!("Wrong type from recv"),
    }
}

fn request(text: &str) -> Action {
    return Action::CompletionRequest(SubmittedPrompt {
        text: text.to_string(),
        variant: Variant::Passthrough,
    });
}

#[tokio::test]
async fn it_reports_completions() -> Result<()> {
    let client = Arc::new(CompletionClient::new(Box::new(EchoBackend {})));
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let worker = tokio::spawn(async move {
        return ActionsService::start(client, event_tx, &mut action_rx).await;
    });

    action_tx.send(request("Hello"))?;
    let res = to_settled(event_rx.recv().await)?;
    assert_eq!(res, Ok(TurnContent::Text("echo: Hello".to_string())));

    action_tx.send(request("fail"))?;
    let res = to_settled(event_rx.recv().await)?;
    assert_eq!(res, Err(CompletionError::RateLimited));

    drop(action_tx);
    worker.await??;

    return Ok(());
}

#[test]
fn it_lists_chat_commands_in_help() {
    let text = help_text();
    assert!(text.starts_with("COMMANDS:"));
    assert!(text.contains("/variant (/v)"));
    assert!(text.contains("/clear"));
    assert!(text.ends_with("CTRL+C - Exit, even while waiting for a response."));
}

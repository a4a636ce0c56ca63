#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use super::CompletionClient;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::SubmittedPrompt;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /variant (/v) [VARIANT] - Switches the preamble used for the next prompts. One of interior-design, code-review, passthrough.
- /clear - Clears the conversation and any error.
- /quit /exit (/q) - Exit Promptpad.

HOTKEYS:
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+C - Exit, even while waiting for a response.
        "#;

    return text.trim().to_string();
}

async fn complete(
    client: Arc<CompletionClient>,
    prompt: SubmittedPrompt,
    tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let res = client.complete(&prompt.text, prompt.variant).await;
    tx.send(Event::CompletionSettled(res))?;

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    /// Runs completion requests on behalf of the UI until the action channel
    /// closes. The UI only allows one request in flight, so each request gets
    /// its own task and reports back with `Event::CompletionSettled`.
    pub async fn start(
        client: Arc<CompletionClient>,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        while let Some(action) = rx.recv().await {
            match action {
                Action::CompletionRequest(prompt) => {
                    let worker_client = client.clone();
                    let worker_tx = tx.clone();
                    tokio::spawn(async move {
                        if let Err(err) = complete(worker_client, prompt, worker_tx).await {
                            tracing::error!(error = ?err, "Failed to report completion");
                        }
                    });
                }
            }
        }

        return Ok(());
    }
}

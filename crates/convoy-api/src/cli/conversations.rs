//! `convoy conversations` - one gateway read from the command line.

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use convoy_core::conversation::ReadOptions;

use crate::state::AppState;

/// Read a project's conversations and print them as pretty JSON.
///
/// Ctrl+C cancels the in-flight read.
pub async fn list_conversations(
    state: &AppState,
    project_id: &str,
    timeout_ms: Option<u64>,
) -> Result<()> {
    let cancel = CancellationToken::new();
    let mut options = ReadOptions::default().with_cancel(cancel.clone());
    if let Some(ms) = timeout_ms {
        options = options.with_timeout(state.gateway_config.clamp_timeout(ms));
    }

    let on_interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let result = state
        .gateway
        .get_project_conversations_with(project_id, options)
        .await;
    on_interrupt.abort();

    let conversations = result?;
    println!("{}", serde_json::to_string_pretty(&conversations)?);

    if conversations.is_empty() {
        eprintln!(
            "  {}",
            console::style(format!("No conversations for project '{project_id}'")).dim()
        );
    }

    Ok(())
}

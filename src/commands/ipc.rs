/// IPC commands
/// `send` for fire-and-forget channels, `send_sync` for channels that answer.
/// Called from window content via: invoke("send", { channel: "factory" })

use crate::error::{Result, ShellError};
use crate::models::{PromptId, PromptOptions};
use crate::services::router::Channel;
use crate::services::{windows, CommandQueue, PromptBroker};
use std::sync::Arc;
use tauri::{AppHandle, State, WebviewWindow};

fn prompt_of(label: &str) -> Result<PromptId> {
    PromptId::from_label(label).ok_or_else(|| ShellError::NotAPrompt(label.to_string()))
}

fn dispatch(
    sender: &str,
    queue: &CommandQueue,
    broker: &PromptBroker,
    channel: &str,
    payload: Option<String>,
) -> Result<()> {
    let parsed: Channel = channel.parse()?;
    if parsed.replies() {
        return Err(ShellError::ExpectsReply(channel.to_string()));
    }

    match parsed.command(sender) {
        Some(command) => queue.push(command),
        // closeDialog: record now, the window closes right after
        None => broker.answer(prompt_of(sender)?, payload.unwrap_or_default()),
    }
}

/// Options of the prompt shown in `sender`, as compact JSON.
fn read_options(sender: &str, broker: &PromptBroker) -> Result<String> {
    let options = broker.options(prompt_of(sender)?)?;
    Ok(serde_json::to_string(&options)?)
}

async fn ask(app: &AppHandle, broker: Arc<PromptBroker>, label: String) -> Result<Option<String>> {
    let (id, answer) = broker.open(PromptOptions::labelled(label));
    if let Err(e) = windows::open_prompt(app, id) {
        broker.abandon(id);
        return Err(e);
    }

    answer.await.map_err(|_| ShellError::PromptDropped(id.0))
}

#[tauri::command]
pub fn send(
    window: WebviewWindow,
    queue: State<'_, CommandQueue>,
    broker: State<'_, Arc<PromptBroker>>,
    channel: String,
    payload: Option<String>,
) -> std::result::Result<(), String> {
    dispatch(window.label(), &queue, &broker, &channel, payload).map_err(|e| {
        log::warn!("[IPC] {} from {}: {}", channel, window.label(), e);
        e.to_string()
    })
}

#[tauri::command]
pub async fn send_sync(
    app: AppHandle,
    window: WebviewWindow,
    broker: State<'_, Arc<PromptBroker>>,
    channel: String,
    payload: Option<String>,
) -> std::result::Result<Option<String>, String> {
    let broker = broker.inner().clone();
    let result = match channel.parse::<Channel>() {
        Ok(Channel::OpenDialog) => read_options(window.label(), &broker).map(Some),
        Ok(Channel::ModalVar) => ask(&app, broker, payload.unwrap_or_default()).await,
        Ok(_) => Err(ShellError::NoReply(channel.clone())),
        Err(e) => Err(e),
    };

    result.map_err(|e| {
        log::warn!("[IPC] {} from {}: {}", channel, window.label(), e);
        e.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Page;
    use crate::services::router::Command;

    #[test]
    fn test_prompt_handshake() {
        let (queue, _rx) = CommandQueue::new();
        let broker = PromptBroker::new();
        let (id, mut answer) = broker.open(PromptOptions::labelled("X"));
        let label = id.window_label();

        assert_eq!(
            read_options(&label, &broker).unwrap(),
            r#"{"label":"X","value":"","ok":"OK"}"#
        );

        dispatch(&label, &queue, &broker, "closeDialog", Some("12".to_string())).unwrap();
        broker.resolve(id);
        assert_eq!(answer.try_recv().unwrap(), Some("12".to_string()));
    }

    #[test]
    fn test_close_dialog_needs_a_prompt_window() {
        let (queue, _rx) = CommandQueue::new();
        let broker = PromptBroker::new();
        let err = dispatch("main", &queue, &broker, "closeDialog", Some("x".into())).unwrap_err();
        assert!(matches!(err, ShellError::NotAPrompt(ref l) if l == "main"));
        assert!(read_options("main", &broker).is_err());
    }

    #[test]
    fn test_fire_and_forget_channels_are_queued() {
        let (queue, mut rx) = CommandQueue::new();
        let broker = PromptBroker::new();
        dispatch("main", &queue, &broker, "repl", None).unwrap();
        dispatch("main", &queue, &broker, "version", None).unwrap();
        assert_eq!(rx.try_recv().unwrap(), Command::Open(Page::Repl));
        assert_eq!(rx.try_recv().unwrap(), Command::CheckUpdates);
    }

    #[test]
    fn test_reply_channels_rejected_by_send() {
        let (queue, mut rx) = CommandQueue::new();
        let broker = PromptBroker::new();
        let err = dispatch("main", &queue, &broker, "modalVar", Some("X".into())).unwrap_err();
        assert!(matches!(err, ShellError::ExpectsReply(_)));
        assert!(rx.try_recv().is_err());
        assert_eq!(broker.pending(), 0);
    }

    #[test]
    fn test_unknown_channel() {
        let (queue, _rx) = CommandQueue::new();
        let broker = PromptBroker::new();
        assert!(matches!(
            dispatch("main", &queue, &broker, "reboot", None),
            Err(ShellError::UnknownChannel(_))
        ));
    }
}

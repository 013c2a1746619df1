/// Shell errors
/// Every fallible operation in the shell reports one of these.
/// Tauri commands flatten them to `String` at the IPC boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("{0} not found in bundled content")]
    MissingContent(String),

    #[error("unknown channel: {0}")]
    UnknownChannel(String),

    #[error("channel {0} expects a reply, use send_sync")]
    ExpectsReply(String),

    #[error("channel {0} does not reply, use send")]
    NoReply(String),

    #[error("no pending prompt with id {0}")]
    UnknownPrompt(u32),

    #[error("window {0} is not a prompt window")]
    NotAPrompt(String),

    #[error("{0} has no window role")]
    NoRole(String),

    #[error("prompt {0} was dropped before it resolved")]
    PromptDropped(u32),

    #[error("main window not found")]
    NoMainWindow,

    #[error("command queue is closed")]
    QueueClosed,

    #[error(transparent)]
    Tauri(#[from] tauri::Error),

    #[error(transparent)]
    Updater(#[from] tauri_plugin_updater::Error),

    #[error(transparent)]
    Serial(#[from] serialport::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, ShellError>;

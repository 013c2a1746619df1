/// IPC router
/// Maps channel names sent by window content onto shell commands.
/// Fire-and-forget channels are queued and run one at a time by the controller task.

use crate::error::{Result, ShellError};
use crate::models::Page;
use crate::services::save::SaveTarget;
use std::str::FromStr;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Check for updates
    Version,
    /// Open the terminal console
    Prompt,
    Repl,
    Factory,
    /// Read the pending prompt's options
    OpenDialog,
    /// Write the pending prompt's answer
    CloseDialog,
    /// Ask for a labelled value and wait for it
    ModalVar,
    Save(SaveTarget),
}

impl FromStr for Channel {
    type Err = ShellError;

    fn from_str(name: &str) -> Result<Self> {
        Ok(match name {
            "version" => Channel::Version,
            "prompt" => Channel::Prompt,
            "repl" => Channel::Repl,
            "factory" => Channel::Factory,
            "openDialog" => Channel::OpenDialog,
            "closeDialog" => Channel::CloseDialog,
            "modalVar" => Channel::ModalVar,
            other => SaveTarget::from_channel(other)
                .map(Channel::Save)
                .ok_or_else(|| ShellError::UnknownChannel(other.to_string()))?,
        })
    }
}

impl Channel {
    /// Channels whose sender waits for a value.
    pub fn replies(&self) -> bool {
        matches!(self, Channel::OpenDialog | Channel::ModalVar)
    }

    /// Queued work for this channel, `None` for channels handled inline.
    pub fn command(&self, sender: &str) -> Option<Command> {
        match self {
            Channel::Version => Some(Command::CheckUpdates),
            Channel::Prompt => Some(Command::Open(Page::Term)),
            Channel::Repl => Some(Command::Open(Page::Repl)),
            Channel::Factory => Some(Command::Open(Page::Factory)),
            Channel::Save(target) => Some(Command::Save {
                target: *target,
                reply_to: sender.to_string(),
            }),
            Channel::OpenDialog | Channel::CloseDialog | Channel::ModalVar => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CheckUpdates,
    Open(Page),
    Save { target: SaveTarget, reply_to: String },
}

/// What the controller drives
pub trait Host {
    fn open_page(&self, page: Page) -> Result<()>;
    fn check_updates(&self);
    fn save_dialog(&self, target: SaveTarget, reply_to: String) -> Result<()>;
}

/// Producer side of the command queue, managed as Tauri state.
#[derive(Clone)]
pub struct CommandQueue {
    tx: mpsc::UnboundedSender<Command>,
}

impl CommandQueue {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Command>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn push(&self, command: Command) -> Result<()> {
        self.tx.send(command).map_err(|_| ShellError::QueueClosed)
    }
}

/// Run a single command. Failures are logged; the queue keeps going.
pub fn execute(host: &impl Host, command: Command) {
    log::debug!("[Router] {:?}", command);
    let result = match command {
        Command::CheckUpdates => {
            host.check_updates();
            Ok(())
        }
        Command::Open(page) => host.open_page(page),
        Command::Save { target, reply_to } => host.save_dialog(target, reply_to),
    };

    if let Err(e) = result {
        log::error!("[Router] Command failed: {}", e);
    }
}

/// Controller loop: drains the queue until every sender is gone.
pub async fn run_controller(host: impl Host, mut rx: mpsc::UnboundedReceiver<Command>) {
    while let Some(command) = rx.recv().await {
        execute(&host, command);
    }
    log::info!("[Router] Command queue closed");
}

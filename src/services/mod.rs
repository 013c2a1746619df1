/// Services module
/// Window management, the prompt handshake, save dialogs, updates and shortcuts.
/// Commands call into these; nothing here is exposed to the frontend directly.

pub mod host;
pub mod prompt;
pub mod router;
pub mod save;
pub mod serial;
pub mod shortcuts;
pub mod updater;
pub mod windows;

pub use prompt::PromptBroker;
pub use router::CommandQueue;
pub use windows::{SharedRegistry, WindowRegistry};

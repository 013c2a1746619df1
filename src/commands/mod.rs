/// Commands module
/// Tauri commands (IPC handlers) are defined here.
/// They are the boundary between window content and the shell.

pub mod ipc;
pub mod serial;

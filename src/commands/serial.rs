/// Serial commands

use crate::services::serial;

/// Names of the serial ports currently attached
#[tauri::command]
pub async fn list_ports() -> Result<Vec<String>, String> {
    serial::available_ports().map_err(|e| e.to_string())
}

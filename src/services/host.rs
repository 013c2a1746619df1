/// Tauri-backed host for the command controller

use crate::error::Result;
use crate::models::Page;
use crate::services::router::Host;
use crate::services::save::{self, SaveTarget};
use crate::services::{updater, windows};
use tauri::{AppHandle, Url};

pub struct TauriHost {
    app: AppHandle,
    update_endpoint: Option<Url>,
}

impl TauriHost {
    pub fn new(app: AppHandle, update_endpoint: Option<Url>) -> Self {
        Self { app, update_endpoint }
    }
}

impl Host for TauriHost {
    fn open_page(&self, page: Page) -> Result<()> {
        windows::open_page(&self.app, page)
    }

    fn check_updates(&self) {
        let app = self.app.clone();
        let endpoint = self.update_endpoint.clone();
        // Update dialogs block; keep them off the controller.
        tauri::async_runtime::spawn_blocking(move || updater::check_for_updates(app, endpoint));
    }

    fn save_dialog(&self, target: SaveTarget, reply_to: String) -> Result<()> {
        save::show_save_dialog(&self.app, target, reply_to)
    }
}

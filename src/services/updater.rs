/// Update checker
/// Turns updater lifecycle events into native message boxes.
/// Downloading needs the user's consent; installing restarts the app.

use crate::error::Result;
use crate::models::WindowRole;
use tauri::{AppHandle, Manager, Url};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tauri_plugin_updater::{Update, UpdaterExt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateEvent {
    Error(String),
    Available { version: String },
    NotAvailable,
    Downloaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    /// Yes/No question
    Confirm,
    Info,
}

/// A message box to show the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStep {
    Download,
    InstallAndRestart,
}

#[derive(Debug, Default)]
pub struct UpdateFlow {
    downloading: bool,
}

impl UpdateFlow {
    pub fn notice(event: &UpdateEvent) -> Notice {
        match event {
            UpdateEvent::Error(message) => Notice {
                kind: NoticeKind::Error,
                title: "Error",
                message: if message.is_empty() { "unknown".to_string() } else { message.clone() },
            },
            UpdateEvent::Available { .. } => Notice {
                kind: NoticeKind::Confirm,
                title: "Update",
                message: "A new version is available, do you want to download and install it now?"
                    .to_string(),
            },
            UpdateEvent::NotAvailable => Notice {
                kind: NoticeKind::Info,
                title: "Updated",
                message: "Your version is up to date.".to_string(),
            },
            UpdateEvent::Downloaded => Notice {
                kind: NoticeKind::Info,
                title: "Updated",
                message: "Download finished, the application will install then restart.".to_string(),
            },
        }
    }

    /// What to do after the notice for `event` was answered.
    pub fn next(&mut self, event: &UpdateEvent, confirmed: bool) -> Option<UpdateStep> {
        match event {
            UpdateEvent::Available { .. } if confirmed && !self.downloading => {
                self.downloading = true;
                Some(UpdateStep::Download)
            }
            UpdateEvent::Downloaded => Some(UpdateStep::InstallAndRestart),
            _ => None,
        }
    }
}

/// Side effects of an update run
pub trait UpdateHost {
    /// Show the notice; true when the user accepted it.
    fn present(&mut self, notice: &Notice) -> bool;
    fn download(&mut self) -> std::result::Result<(), String>;
    fn install_and_restart(&mut self) -> std::result::Result<(), String>;
}

/// Walk one check result through the update lifecycle.
/// `check` is the available version, `None` when up to date.
pub fn run_flow(host: &mut impl UpdateHost, check: std::result::Result<Option<String>, String>) {
    let mut flow = UpdateFlow::default();
    let mut event = Some(match check {
        Ok(Some(version)) => UpdateEvent::Available { version },
        Ok(None) => UpdateEvent::NotAvailable,
        Err(e) => UpdateEvent::Error(e),
    });

    while let Some(current) = event.take() {
        log::info!("[Updater] {:?}", current);
        let confirmed = host.present(&UpdateFlow::notice(&current));

        event = match flow.next(&current, confirmed) {
            Some(UpdateStep::Download) => Some(match host.download() {
                Ok(()) => UpdateEvent::Downloaded,
                Err(e) => UpdateEvent::Error(e),
            }),
            Some(UpdateStep::InstallAndRestart) => host.install_and_restart().err().map(UpdateEvent::Error),
            None => None,
        };
    }
}

struct TauriUpdateHost {
    app: AppHandle,
    update: Option<Update>,
    bytes: Option<Vec<u8>>,
}

impl UpdateHost for TauriUpdateHost {
    fn present(&mut self, notice: &Notice) -> bool {
        let mut dialog = self
            .app
            .dialog()
            .message(notice.message.clone())
            .title(notice.title);

        dialog = match notice.kind {
            NoticeKind::Error => dialog.kind(MessageDialogKind::Error),
            NoticeKind::Confirm => dialog.buttons(MessageDialogButtons::YesNo),
            NoticeKind::Info => dialog.kind(MessageDialogKind::Info),
        };
        if let Some(main) = self.app.get_webview_window(WindowRole::Main.label()) {
            dialog = dialog.parent(&main);
        }

        dialog.blocking_show()
    }

    fn download(&mut self) -> std::result::Result<(), String> {
        let update = self.update.as_ref().ok_or("no update to download")?;
        let mut received = 0usize;
        let bytes = tauri::async_runtime::block_on(update.download(
            |chunk, total| {
                received += chunk;
                log::debug!("[Updater] Downloaded {} of {:?} bytes", received, total);
            },
            || log::info!("[Updater] Download finished"),
        ))
        .map_err(|e| e.to_string())?;

        self.bytes = Some(bytes);
        Ok(())
    }

    fn install_and_restart(&mut self) -> std::result::Result<(), String> {
        let update = self.update.as_ref().ok_or("no update to install")?;
        let bytes = self.bytes.take().ok_or("update was not downloaded")?;
        update.install(bytes).map_err(|e| e.to_string())?;

        log::info!("[Updater] Installed {}, restarting", update.version);
        self.app.restart()
    }
}

async fn find_update(app: &AppHandle, endpoint: Option<Url>) -> Result<Option<Update>> {
    let mut builder = app.updater_builder();
    if let Some(endpoint) = endpoint {
        builder = builder.endpoints(vec![endpoint])?;
    }
    Ok(builder.build()?.check().await?)
}

/// Check for an update and walk the user through it. Blocks on dialogs,
/// so call it off the main thread.
pub fn check_for_updates(app: AppHandle, endpoint: Option<Url>) {
    let check = tauri::async_runtime::block_on(find_update(&app, endpoint));
    let (update, check) = match check {
        Ok(Some(update)) => {
            let version = update.version.clone();
            (Some(update), Ok(Some(version)))
        }
        Ok(None) => (None, Ok(None)),
        Err(e) => {
            log::error!("[Updater] Check failed: {}", e);
            (None, Err(e.to_string()))
        }
    };

    let mut host = TauriUpdateHost { app, update, bytes: None };
    run_flow(&mut host, check);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingHost {
        accept: bool,
        fail_download: bool,
        shown: Vec<Notice>,
        downloads: usize,
        installs: usize,
    }

    impl UpdateHost for RecordingHost {
        fn present(&mut self, notice: &Notice) -> bool {
            self.shown.push(notice.clone());
            self.accept
        }

        fn download(&mut self) -> std::result::Result<(), String> {
            self.downloads += 1;
            if self.fail_download {
                Err("connection reset".to_string())
            } else {
                Ok(())
            }
        }

        fn install_and_restart(&mut self) -> std::result::Result<(), String> {
            self.installs += 1;
            Ok(())
        }
    }

    #[test]
    fn test_declining_update_skips_download() {
        let mut host = RecordingHost::default();
        run_flow(&mut host, Ok(Some("1.2.0".to_string())));

        assert_eq!(host.downloads, 0);
        assert_eq!(host.installs, 0);
        assert_eq!(host.shown.len(), 1);
        assert_eq!(host.shown[0].kind, NoticeKind::Confirm);
        assert_eq!(host.shown[0].title, "Update");
    }

    #[test]
    fn test_accepting_update_downloads_once_then_installs() {
        let mut host = RecordingHost { accept: true, ..Default::default() };
        run_flow(&mut host, Ok(Some("1.2.0".to_string())));

        assert_eq!(host.downloads, 1);
        assert_eq!(host.installs, 1);
        let titles: Vec<&str> = host.shown.iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["Update", "Updated"]);
        assert_eq!(
            host.shown[1].message,
            "Download finished, the application will install then restart."
        );
    }

    #[test]
    fn test_up_to_date_shows_info() {
        let mut host = RecordingHost { accept: true, ..Default::default() };
        run_flow(&mut host, Ok(None));

        assert_eq!(host.downloads, 0);
        assert_eq!(host.shown, vec![UpdateFlow::notice(&UpdateEvent::NotAvailable)]);
        assert_eq!(host.shown[0].message, "Your version is up to date.");
    }

    #[test]
    fn test_check_error_shows_error_box() {
        let mut host = RecordingHost::default();
        run_flow(&mut host, Err("endpoint unreachable".to_string()));

        assert_eq!(host.shown.len(), 1);
        assert_eq!(host.shown[0].kind, NoticeKind::Error);
        assert_eq!(host.shown[0].message, "endpoint unreachable");
    }

    #[test]
    fn test_failed_download_reports_error_and_stops() {
        let mut host = RecordingHost { accept: true, fail_download: true, ..Default::default() };
        run_flow(&mut host, Ok(Some("2.0.0".to_string())));

        assert_eq!(host.downloads, 1);
        assert_eq!(host.installs, 0);
        assert_eq!(host.shown.last().map(|n| n.kind), Some(NoticeKind::Error));
    }

    #[test]
    fn test_flow_never_downloads_twice() {
        let mut flow = UpdateFlow::default();
        let available = UpdateEvent::Available { version: "1.0.1".to_string() };
        assert_eq!(flow.next(&available, true), Some(UpdateStep::Download));
        assert_eq!(flow.next(&available, true), None);
    }

    #[test]
    fn test_empty_error_reads_unknown() {
        let notice = UpdateFlow::notice(&UpdateEvent::Error(String::new()));
        assert_eq!(notice.message, "unknown");
    }
}

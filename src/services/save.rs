/// Save dialog dispatcher
/// Fixed table of save channels. Each opens a native save dialog and answers
/// the requesting window on `saved-<ext>` with the chosen path.

use crate::error::{Result, ShellError};
use crate::models::WindowRole;
use serde::Serialize;
use tauri::{AppHandle, Emitter, Manager};
use tauri_plugin_dialog::DialogExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTarget {
    Bin,
    Ino,
    Py,
    Bloc,
    Csv,
}

/// Dialog configuration for one target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveSpec {
    pub channel: &'static str,
    pub title: &'static str,
    pub default_name: &'static str,
    pub ext: &'static str,
}

/// Event sent back to the requesting window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReply {
    pub event: String,
    pub path: Option<String>,
}

impl SaveTarget {
    pub fn all() -> [SaveTarget; 5] {
        [SaveTarget::Bin, SaveTarget::Ino, SaveTarget::Py, SaveTarget::Bloc, SaveTarget::Csv]
    }

    pub fn spec(&self) -> SaveSpec {
        let (channel, title, default_name, ext) = match self {
            SaveTarget::Bin => ("save-bin", "Exporter les binaires", "Otto_hex", "hex"),
            SaveTarget::Ino => ("save-ino", "Save format .INO", "Otto_Arduino", "ino"),
            SaveTarget::Py => ("save-py", "Save format .PY", "Otto_python", "py"),
            SaveTarget::Bloc => ("save-bloc", "Save format .BLOC", "Otto_block", "bloc"),
            SaveTarget::Csv => ("save-csv", "Save format CSV", "Otto_csv", "csv"),
        };
        SaveSpec { channel, title, default_name, ext }
    }

    pub fn from_channel(channel: &str) -> Option<Self> {
        Self::all().into_iter().find(|t| t.spec().channel == channel)
    }

    pub fn reply_event(&self) -> String {
        format!("saved-{}", self.spec().ext)
    }

    pub fn reply(&self, path: Option<String>) -> SaveReply {
        SaveReply {
            event: self.reply_event(),
            path,
        }
    }
}

impl SaveReply {
    pub fn send(&self, app: &AppHandle, window_label: &str) -> Result<()> {
        app.emit_to(window_label, &self.event, Payload(self.path.as_deref()))?;
        Ok(())
    }
}

#[derive(Clone, Serialize)]
#[serde(transparent)]
struct Payload<'a>(Option<&'a str>);

/// Show the dialog for `target`; the reply goes to `reply_to` once the user picks or cancels.
pub fn show_save_dialog(app: &AppHandle, target: SaveTarget, reply_to: String) -> Result<()> {
    let spec = target.spec();
    let main = app
        .get_webview_window(WindowRole::Main.label())
        .ok_or(ShellError::NoMainWindow)?;

    let app_handle = app.clone();
    app.dialog()
        .file()
        .set_parent(&main)
        .set_title(spec.title)
        .set_file_name(spec.default_name)
        .add_filter(spec.ext, &[spec.ext])
        .save_file(move |picked| {
            let path = picked
                .and_then(|p| p.into_path().ok())
                .map(|p| p.display().to_string());
            log::info!("[Save] {} -> {:?}", spec.channel, path);

            if let Err(e) = target.reply(path).send(&app_handle, &reply_to) {
                log::error!("[Save] Failed to reply to {}: {}", reply_to, e);
            }
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_channel_resolves_to_its_target() {
        for target in SaveTarget::all() {
            assert_eq!(SaveTarget::from_channel(target.spec().channel), Some(target));
        }
        assert_eq!(SaveTarget::from_channel("save-exe"), None);
    }

    #[test]
    fn test_reply_events_follow_extension() {
        let events: Vec<String> = SaveTarget::all().into_iter().map(|t| t.reply_event()).collect();
        assert_eq!(
            events,
            vec!["saved-hex", "saved-ino", "saved-py", "saved-bloc", "saved-csv"]
        );
    }

    #[test]
    fn test_bin_dialog_config() {
        let spec = SaveTarget::Bin.spec();
        assert_eq!(spec.title, "Exporter les binaires");
        assert_eq!(spec.default_name, "Otto_hex");
        assert_eq!(spec.ext, "hex");
    }

    #[test]
    fn test_reply_carries_exact_path() {
        let reply = SaveTarget::Csv.reply(Some("/home/otto/log.csv".to_string()));
        assert_eq!(reply.event, "saved-csv");
        assert_eq!(reply.path.as_deref(), Some("/home/otto/log.csv"));
        assert_eq!(
            serde_json::to_string(&Payload(reply.path.as_deref())).unwrap(),
            r#""/home/otto/log.csv""#
        );
    }

    #[test]
    fn test_cancelled_reply_is_null() {
        let reply = SaveTarget::Ino.reply(None);
        assert_eq!(reply.event, "saved-ino");
        assert_eq!(serde_json::to_string(&Payload(reply.path.as_deref())).unwrap(), "null");
    }
}

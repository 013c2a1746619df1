/// Global shortcuts
/// F8 toggles devtools, F5 reloads. Both act on the focused window.

use tauri::{AppHandle, Manager, WebviewWindow};
use tauri_plugin_global_shortcut::{Code, Shortcut, ShortcutEvent, ShortcutState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    ToggleDevtools,
    Reload,
}

impl ShortcutAction {
    pub const ALL: [ShortcutAction; 2] = [ShortcutAction::ToggleDevtools, ShortcutAction::Reload];

    pub fn code(&self) -> Code {
        match self {
            ShortcutAction::ToggleDevtools => Code::F8,
            ShortcutAction::Reload => Code::F5,
        }
    }

    pub fn shortcut(&self) -> Shortcut {
        Shortcut::new(None, self.code())
    }

    pub fn from_shortcut(shortcut: &Shortcut) -> Option<Self> {
        Self::ALL.into_iter().find(|action| *shortcut == action.shortcut())
    }
}

fn focused_window(app: &AppHandle) -> Option<WebviewWindow> {
    app.webview_windows()
        .into_values()
        .find(|window| window.is_focused().unwrap_or(false))
}

fn apply(window: &WebviewWindow, action: ShortcutAction) -> tauri::Result<()> {
    match action {
        ShortcutAction::ToggleDevtools => {
            if window.is_devtools_open() {
                window.close_devtools();
            } else {
                window.open_devtools();
            }
            Ok(())
        }
        // Hard reload; the webview decides cache revalidation.
        ShortcutAction::Reload => window.eval("window.location.reload()"),
    }
}

/// Handler installed on the global shortcut plugin.
pub fn handle(app: &AppHandle, shortcut: &Shortcut, event: ShortcutEvent) {
    if event.state() != ShortcutState::Pressed {
        return;
    }
    let Some(action) = ShortcutAction::from_shortcut(shortcut) else {
        return;
    };
    let Some(window) = focused_window(app) else {
        return;
    };

    if let Err(e) = apply(&window, action) {
        log::warn!("[Shortcuts] {:?} failed on {}: {}", action, window.label(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tauri_plugin_global_shortcut::Modifiers;

    #[test]
    fn test_function_keys_map_to_actions() {
        assert_eq!(
            ShortcutAction::from_shortcut(&Shortcut::new(None, Code::F8)),
            Some(ShortcutAction::ToggleDevtools)
        );
        assert_eq!(
            ShortcutAction::from_shortcut(&Shortcut::new(None, Code::F5)),
            Some(ShortcutAction::Reload)
        );
    }

    #[test]
    fn test_modified_keys_are_ignored() {
        let ctrl_f5 = Shortcut::new(Some(Modifiers::CONTROL), Code::F5);
        assert_eq!(ShortcutAction::from_shortcut(&ctrl_f5), None);
        assert_eq!(ShortcutAction::from_shortcut(&Shortcut::new(None, Code::F6)), None);
    }
}

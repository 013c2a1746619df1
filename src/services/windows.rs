/// Window manager
/// Creates the shell's windows and keeps at most one window per role.
/// A second request for an open role reuses that window instead of stacking a new one.

use crate::error::{Result, ShellError};
use crate::models::{Page, PromptId, WindowRole};
use crate::services::PromptBroker;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use tauri::{AppHandle, LogicalSize, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

pub type SharedRegistry = Arc<Mutex<WindowRegistry>>;

/// Outcome of claiming a role.
#[derive(Debug, PartialEq, Eq)]
pub enum Slot {
    /// Nothing open yet: build a window with this label
    Vacant(&'static str),
    /// Already open under this label
    Occupied(&'static str),
}

/// Which singleton roles currently have a live window.
#[derive(Debug, Default)]
pub struct WindowRegistry {
    open: HashSet<WindowRole>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, role: WindowRole) -> Slot {
        if self.open.insert(role) {
            Slot::Vacant(role.label())
        } else {
            Slot::Occupied(role.label())
        }
    }

    /// Drop the tracked reference for a closed window.
    pub fn release(&mut self, label: &str) -> Option<WindowRole> {
        let role = WindowRole::from_label(label)?;
        self.open.remove(&role).then_some(role)
    }

    pub fn is_open(&self, role: WindowRole) -> bool {
        self.open.contains(&role)
    }
}

/// Fails when the main page is absent from the bundled assets.
pub fn verify_bundle(has_asset: impl Fn(&str) -> bool) -> Result<()> {
    let entry = Page::Index.path();
    if has_asset(entry) {
        Ok(())
    } else {
        Err(ShellError::MissingContent(entry.to_string()))
    }
}

/// Main page path, carrying the launch argument (file association) as `?url=`.
pub fn main_entry(launch_arg: Option<&str>) -> String {
    match launch_arg {
        Some(arg) if !arg.is_empty() => {
            let encoded: String = url::form_urlencoded::byte_serialize(arg.as_bytes()).collect();
            format!("{}?url={}", Page::Index.path(), encoded)
        }
        _ => Page::Index.path().to_string(),
    }
}

/// Argument the OS passes on "open with". Only honoured on Windows.
pub fn launch_argument() -> Option<String> {
    if cfg!(windows) {
        std::env::args().nth(1)
    } else {
        None
    }
}

fn build(app: &AppHandle, label: &str, page: Page, path: String) -> Result<WebviewWindow> {
    let (width, height) = page.size();
    let mut builder = WebviewWindowBuilder::new(app, label, WebviewUrl::App(path.into()))
        .title(app.package_info().name.clone())
        .inner_size(width, height)
        .resizable(page.resizable())
        .decorations(false)
        .skip_taskbar(page.modal())
        .center();

    if page.role() != Some(WindowRole::Main) {
        let main = app
            .get_webview_window(WindowRole::Main.label())
            .ok_or(ShellError::NoMainWindow)?;
        builder = builder.parent(&main)?;
    }

    let window = builder.build()?;
    log::info!("[Windows] Created {} ({})", label, page.path());
    Ok(window)
}

fn reuse(window: &WebviewWindow, page: Page) -> Result<()> {
    let url = window.url()?.join(page.path())?;
    window.navigate(url)?;

    let (width, height) = page.size();
    window.set_size(LogicalSize::new(width, height))?;
    window.set_resizable(page.resizable())?;
    window.set_focus()?;
    log::info!("[Windows] Reused {} for {}", window.label(), page.path());
    Ok(())
}

fn open_with(app: &AppHandle, role: WindowRole, page: Page, path: String) -> Result<()> {
    let registry = app.state::<SharedRegistry>();
    let slot = registry.lock().claim(role);

    match slot {
        Slot::Occupied(label) => match app.get_webview_window(label) {
            Some(window) => reuse(&window, page),
            None => {
                log::warn!("[Windows] {} was tracked but is gone, rebuilding", label);
                build(app, label, page, path).map(|_| ())
            }
        },
        Slot::Vacant(label) => build(app, label, page, path).map(|_| ()).inspect_err(|_| {
            registry.lock().release(label);
        }),
    }
}

/// Open (or reuse) the window for a singleton page.
pub fn open_page(app: &AppHandle, page: Page) -> Result<()> {
    let role = page
        .role()
        .ok_or_else(|| ShellError::NoRole(page.path().to_string()))?;
    open_with(app, role, page, page.path().to_string())
}

pub fn open_main(app: &AppHandle, launch_arg: Option<&str>) -> Result<()> {
    open_with(app, WindowRole::Main, Page::Index, main_entry(launch_arg))
}

pub fn open_prompt(app: &AppHandle, id: PromptId) -> Result<()> {
    build(app, &id.window_label(), Page::Prompt, Page::Prompt.path().to_string()).map(|_| ())
}

/// Window teardown: release its role and settle any prompt it was showing.
pub fn on_destroyed(app: &AppHandle, label: &str) {
    if let Some(role) = app.state::<SharedRegistry>().lock().release(label) {
        log::info!("[Windows] Closed {:?}", role);
    }

    if let Some(id) = PromptId::from_label(label) {
        app.state::<Arc<PromptBroker>>().resolve(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_claim_reuses_the_window() {
        let mut registry = WindowRegistry::new();
        assert_eq!(registry.claim(WindowRole::Factory), Slot::Vacant("factory"));
        assert_eq!(registry.claim(WindowRole::Factory), Slot::Occupied("factory"));
        assert!(registry.is_open(WindowRole::Factory));
    }

    #[test]
    fn test_release_frees_the_role() {
        let mut registry = WindowRegistry::new();
        registry.claim(WindowRole::Term);
        assert_eq!(registry.release("term"), Some(WindowRole::Term));
        assert!(!registry.is_open(WindowRole::Term));
        assert_eq!(registry.claim(WindowRole::Term), Slot::Vacant("term"));
    }

    #[test]
    fn test_release_ignores_untracked_labels() {
        let mut registry = WindowRegistry::new();
        assert_eq!(registry.release("prompt-3"), None);
        assert_eq!(registry.release("term"), None);
    }

    #[test]
    fn test_verify_bundle() {
        assert!(verify_bundle(|path| path == "index.html").is_ok());
        let err = verify_bundle(|_| false).unwrap_err();
        assert!(matches!(err, ShellError::MissingContent(ref p) if p == "index.html"));
    }

    #[test]
    fn test_main_entry_appends_launch_argument() {
        assert_eq!(main_entry(None), "index.html");
        assert_eq!(main_entry(Some("")), "index.html");
        assert_eq!(
            main_entry(Some(r"C:\Users\otto\dance.bloc")),
            "index.html?url=C%3A%5CUsers%5Cotto%5Cdance.bloc"
        );
    }
}

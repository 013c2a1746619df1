/// Otto desktop shell
/// Hosts the block editor, console, factory and prompt windows,
/// routes IPC from window content, and handles save dialogs and updates.
///
/// Module structure:
/// - commands: Tauri IPC handlers (window content → shell)
/// - services: window manager, prompt broker, router, dialogs, updater
/// - models: shared data types

mod commands;
mod config;
mod error;
mod models;
mod services;

use config::ShellConfig;
use parking_lot::Mutex;
use services::host::TauriHost;
use services::{router, serial, shortcuts, windows};
use services::{CommandQueue, PromptBroker, WindowRegistry};
use std::sync::Arc;
use tauri::{Manager, RunEvent, WindowEvent};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};
use tauri_plugin_global_shortcut::GlobalShortcutExt;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let config = ShellConfig::from_env();
    let (queue, commands) = CommandQueue::new();

    let shortcuts_plugin = tauri_plugin_global_shortcut::Builder::new()
        .with_handler(|app, shortcut, event| shortcuts::handle(app, shortcut, event))
        .build();

    tauri::Builder::default()
        .plugin(
            tauri_plugin_log::Builder::default()
                .level(config.log_level)
                .build(),
        )
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_fs::init())
        .plugin(tauri_plugin_updater::Builder::new().build())
        .plugin(shortcuts_plugin)
        .manage(Arc::new(Mutex::new(WindowRegistry::new())))
        .manage(Arc::new(PromptBroker::new()))
        .manage(queue)
        .setup(move |app| {
            for warning in &config.warnings {
                log::warn!("{}", warning);
            }

            let handle = app.handle().clone();
            let bundled = windows::verify_bundle(|path| {
                handle.asset_resolver().get(path.to_string()).is_some()
            });
            if let Err(e) = bundled {
                log::error!("Startup aborted: {}", e);
                app.dialog()
                    .message(e.to_string())
                    .title("Error")
                    .kind(MessageDialogKind::Error)
                    .show(move |_| handle.exit(1));
                return Ok(());
            }

            let launch_arg = windows::launch_argument();
            windows::open_main(app.handle(), launch_arg.as_deref())?;

            for action in shortcuts::ShortcutAction::ALL {
                app.global_shortcut().register(action.shortcut())?;
            }

            let host = TauriHost::new(app.handle().clone(), config.update_endpoint.clone());
            tauri::async_runtime::spawn(router::run_controller(host, commands));

            std::thread::spawn(serial::log_ports);
            Ok(())
        })
        .on_window_event(|window, event| {
            if let WindowEvent::Destroyed = event {
                windows::on_destroyed(window.app_handle(), window.label());
            }
        })
        .invoke_handler(tauri::generate_handler![
            commands::ipc::send,
            commands::ipc::send_sync,
            commands::serial::list_ports,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| match event {
            #[cfg(target_os = "macos")]
            RunEvent::Reopen { .. } => {
                if app_handle.get_webview_window(models::WindowRole::Main.label()).is_none() {
                    if let Err(e) = windows::open_main(app_handle, None) {
                        log::error!("Failed to reopen main window: {}", e);
                    }
                }
            }
            // The app stays alive without windows on macOS until quit explicitly.
            #[cfg(target_os = "macos")]
            RunEvent::ExitRequested { api, code: None, .. } => api.prevent_exit(),
            RunEvent::Exit => {
                log::info!("App shutting down - releasing global shortcuts");
                if let Err(e) = app_handle.global_shortcut().unregister_all() {
                    log::warn!("Failed to unregister shortcuts: {}", e);
                }
            }
            _ => {}
        });
}

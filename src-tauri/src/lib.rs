//! Inventory Insights Backend
//!
//! Layered architecture:
//! - insights_core: domain, repositories, report services, action handlers
//! - commands: Tauri command handlers

use std::path::PathBuf;
use std::sync::Arc;
use tauri::{Emitter, Manager};

use insights_core::config::AppConfig;
use insights_core::handlers::{InsightsContext, SessionToken};
use insights_core::repository::{init_db, CatalogRepository, DbState, TermRepository};

mod commands;

/// Application state shared across commands
pub struct AppState {
    pub context: InsightsContext,
}

/// Resolve the database path and make sure its directory exists
fn get_db_path(app_handle: &tauri::AppHandle, config: &AppConfig) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let app_dir = app_handle.path().app_data_dir()?;
    std::fs::create_dir_all(&app_dir)?;
    let db_path = config.database_path(&app_dir);
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(db_path)
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|_app, _args, _cwd| {
                // Focus the existing window when a new instance tries to start
                if let Some(window) = _app.get_webview_window("main") {
                    let _ = window.set_focus();
                }
            }))?;

            let app_handle = app.handle().clone();

            // Initialize logging
            rolling_logger::init_logger(app_handle.path().app_log_dir()?, "InventoryInsights")?;

            let config = AppConfig::load(&app_handle.path().app_config_dir()?);
            let db_path = get_db_path(&app_handle, &config)?;
            log::info!(
                "[{}] App setup starting, catalog at {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                db_path.display()
            );

            // Empty slot now, connection installed once the background init finishes
            let db_state = DbState::new();
            let context = InsightsContext {
                catalog: Arc::new(CatalogRepository::new(db_state.conn.clone(), &config.admin_url)),
                terms: Arc::new(TermRepository::new(db_state.conn.clone())),
                session: SessionToken::new(),
                export_prefix: config.export_prefix.clone(),
            };

            // Manage state IMMEDIATELY
            app.manage(AppState { context });

            // Initialize database asynchronously in background
            tauri::async_runtime::spawn(async move {
                match init_db(&db_path).await {
                    Ok(initialized) => {
                        db_state.install(initialized).await;
                        let _ = rolling_logger::info("Async DB init success");

                        if let Err(e) = app_handle.emit("db-initialized", ()) {
                            log::error!("Failed to emit event: {}", e);
                        }
                    }
                    Err(e) => {
                        let _ = rolling_logger::error(&format!("Async DB init failed: {}", e));
                    }
                }
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::get_session_token,
            // Filter dropdowns
            commands::get_filter_values,
            commands::get_categories,
            commands::describe_filter,
            // Results
            commands::search,
            commands::export,
            // Inline stock edits
            commands::update_quantity,
            commands::enable_stock,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

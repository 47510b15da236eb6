//! Tauri Commands for searching and exporting
//!
//! Thin wrappers: every rule lives in `insights_core::handlers`.

use tauri::State;
use insights_core::domain::SearchParams;
use insights_core::handlers::{self, CommandError, ExportParams, ExportPayload, SearchResponse};
use insights_core::report::SelectOption;
use crate::AppState;

/// Anti-forgery token for this session, fetched once at start-up
#[tauri::command]
pub fn get_session_token(state: State<'_, AppState>) -> String {
    state.context.session.value().to_string()
}

/// Options of the filter value dropdown
#[tauri::command]
pub async fn get_filter_values(
    state: State<'_, AppState>,
    nonce: String,
    filter_type: String,
) -> Result<Vec<SelectOption>, CommandError> {
    handlers::get_filter_values(&state.context, &nonce, &filter_type).await
}

/// Category dropdown, optionally scoped to a filter
#[tauri::command]
pub async fn get_categories(
    state: State<'_, AppState>,
    nonce: String,
    filter_type: Option<String>,
    filter_value: Option<String>,
) -> Result<Vec<SelectOption>, CommandError> {
    handlers::get_categories(
        &state.context,
        &nonce,
        filter_type.as_deref(),
        filter_value.as_deref(),
    )
    .await
}

/// Label of a filter for the recent searches list
#[tauri::command]
pub async fn describe_filter(
    state: State<'_, AppState>,
    nonce: String,
    filter_type: String,
    filter_value: String,
) -> Result<String, CommandError> {
    handlers::describe_filter(&state.context, &nonce, &filter_type, &filter_value).await
}

#[tauri::command]
pub async fn search(
    state: State<'_, AppState>,
    nonce: String,
    params: SearchParams,
) -> Result<SearchResponse, CommandError> {
    handlers::search(&state.context, &nonce, params).await
}

#[tauri::command]
pub async fn export(
    state: State<'_, AppState>,
    nonce: String,
    params: ExportParams,
) -> Result<ExportPayload, CommandError> {
    handlers::export(&state.context, &nonce, params).await
}

//! Insights Commands
//!
//! Frontend bindings for the filter, search and export commands.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::models::{CommandError, ExportParams, ExportPayload, SearchParams, SearchResponse, SelectOption};
use super::{call, invoke};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct FilterTypeArgs<'a> {
    nonce: &'a str,
    #[serde(rename = "filterType")]
    filter_type: &'a str,
}

#[derive(Serialize)]
struct FilterArgs<'a> {
    nonce: &'a str,
    #[serde(rename = "filterType")]
    filter_type: Option<&'a str>,
    #[serde(rename = "filterValue")]
    filter_value: Option<&'a str>,
}

#[derive(Serialize)]
struct ParamsArgs<'a, P> {
    nonce: &'a str,
    params: &'a P,
}

// ========================
// Commands
// ========================

pub async fn get_session_token() -> Result<String, CommandError> {
    match invoke("get_session_token", JsValue::NULL).await {
        Ok(value) => value.as_string().ok_or_else(|| CommandError::network("Failed to start.")),
        Err(_) => Err(CommandError::network("Failed to start.")),
    }
}

pub async fn get_filter_values(nonce: &str, filter_type: &str) -> Result<Vec<SelectOption>, CommandError> {
    call(
        "get_filter_values",
        &FilterTypeArgs { nonce, filter_type },
        "Failed to load filter values.",
    )
    .await
}

pub async fn get_categories(
    nonce: &str,
    filter_type: Option<&str>,
    filter_value: Option<&str>,
) -> Result<Vec<SelectOption>, CommandError> {
    call(
        "get_categories",
        &FilterArgs { nonce, filter_type, filter_value },
        "Failed to load categories.",
    )
    .await
}

pub async fn describe_filter(nonce: &str, filter_type: &str, filter_value: &str) -> Result<String, CommandError> {
    call(
        "describe_filter",
        &FilterArgs {
            nonce,
            filter_type: Some(filter_type),
            filter_value: Some(filter_value),
        },
        "Failed to load filter details.",
    )
    .await
}

pub async fn search(nonce: &str, params: &SearchParams) -> Result<SearchResponse, CommandError> {
    call("search", &ParamsArgs { nonce, params }, "Search failed.").await
}

pub async fn export(nonce: &str, params: &ExportParams) -> Result<ExportPayload, CommandError> {
    call("export", &ParamsArgs { nonce, params }, "Export failed.").await
}

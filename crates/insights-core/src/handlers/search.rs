//! Search and CSV export actions

use serde::{Deserialize, Serialize};

use crate::domain::{ProductRecord, SearchParams};
use crate::report::{export_filename, render_csv, render_table, search_products, ExportScope};

use super::error::or_upstream;
use super::{CommandResult, InsightsContext};

const SEARCH_FAILED: &str = "Search failed. Please try again.";
const EXPORT_FAILED: &str = "Export failed. Please try again.";

/// Products plus the rendered table, so the caller need not re-render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub products: Vec<ProductRecord>,
    pub html: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportParams {
    #[serde(flatten)]
    pub search: SearchParams,
    /// "all" or "selected"
    #[serde(default)]
    pub export_type: String,
    #[serde(default)]
    pub selected_product_ids: Vec<u32>,
}

/// A CSV download
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPayload {
    pub filename: String,
    pub content_type: String,
    pub content_disposition: String,
    pub bytes: Vec<u8>,
}

pub async fn search(ctx: &InsightsContext, nonce: &str, params: SearchParams) -> CommandResult<SearchResponse> {
    ctx.authorize(nonce, "search")?;
    let criteria = params.validate()?;

    let products = search_products(ctx.catalog.as_ref(), &criteria)
        .await
        .map_err(or_upstream(SEARCH_FAILED))?;
    let html = render_table(&products, criteria.min_stock).to_html();

    log::info!(
        "[SEARCH] {}={} category={:?} min_stock={:?}: {} products",
        params.filter_type,
        params.filter_value,
        criteria.category_id,
        criteria.min_stock,
        products.len()
    );
    Ok(SearchResponse { products, html })
}

pub async fn export(ctx: &InsightsContext, nonce: &str, params: ExportParams) -> CommandResult<ExportPayload> {
    ctx.authorize(nonce, "export")?;
    let criteria = params.search.validate()?;
    let scope = ExportScope::from_request(&params.export_type, params.selected_product_ids)?;

    let products = search_products(ctx.catalog.as_ref(), &criteria)
        .await
        .map_err(or_upstream(EXPORT_FAILED))?;
    let bytes = render_csv(&products, criteria.min_stock, &scope).map_err(or_upstream(EXPORT_FAILED))?;
    let filename = export_filename(&ctx.export_prefix, &scope, &chrono::Local::now());

    log::info!("[EXPORT] {} ({} bytes)", filename, bytes.len());
    Ok(ExportPayload {
        content_type: "text/csv; charset=utf-8".to_string(),
        content_disposition: format!("attachment; filename=\"{}\"", filename),
        filename,
        bytes,
    })
}
